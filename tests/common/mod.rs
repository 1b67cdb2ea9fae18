#![allow(dead_code)]

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bitewise::config::{ApiConfig, Config, ObservabilityConfig, ServerConfig};
use bitewise::{create_app, AppState};
use bitewise_api::ApiClient;
use bitewise_plan::Planner;

/// Token used by every authenticated test request.
pub const TOKEN: &str = "test-token-1";

pub struct TestApp {
    pub router: Router,
    pub remote: MockServer,
}

impl TestApp {
    /// Run one request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router request should not fail")
    }

    /// GET a page as an anonymous visitor.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET a page with the session cookie attached.
    pub async fn get_authed(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .header("cookie", format!("auth_token={TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// POST a urlencoded form as an anonymous visitor.
    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// POST a urlencoded form with the session cookie attached.
    pub async fn post_form_authed(&self, uri: &str, body: &str) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("cookie", format!("auth_token={TOKEN}"))
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Build the full application wired to a fresh mock of the remote API.
pub async fn spawn_app() -> TestApp {
    let remote = MockServer::start().await;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        api: ApiConfig {
            base_url: remote.uri(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        observability: ObservabilityConfig::default(),
    };

    let api = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        Duration::from_secs(config.api.connect_timeout_secs),
    )
    .expect("api client should build");

    let state = AppState {
        api: api.clone(),
        planner: Planner::new(api),
        config,
    };

    TestApp {
        router: create_app(state),
        remote,
    }
}

pub async fn read_body(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf8")
}

pub fn user_json(id: u64, name: &str, email: &str, is_admin: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "is_admin": is_admin,
    })
}

/// Make the stored test token resolve to the given account, so requests
/// carrying the session cookie are treated as signed in.
pub async fn mount_current_user(remote: &MockServer, user: Value) {
    Mock::given(method("GET"))
        .and(path("/auth/user"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .mount(remote)
        .await;
}

pub fn recipe_summary_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "image": format!("https://img.example.com/{id}.jpg"),
    })
}

pub fn plan_entry_json(id: u64, day: &str, meal: &str, recipe_id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "day_of_week": day,
        "meal_type": meal,
        "week_number": 1,
        "recipe": recipe_summary_json(recipe_id, title),
    })
}

/// Mount the weekly plan fetch with a fixed set of entries.
pub async fn mount_diet_plan(remote: &MockServer, entries: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/diet-plans"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "diet_plans": entries })))
        .mount(remote)
        .await;
}
