use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, ResponseTemplate};

mod common;

use common::{mount_current_user, read_body, spawn_app, user_json, TOKEN};

#[tokio::test]
async fn login_page_renders_for_anonymous_visitors() {
    let app = spawn_app().await;

    let response = app.get("/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Log in"));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
async fn successful_login_sets_the_session_cookie_and_redirects_home() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(1, "Ada", "ada@example.com", false),
            "access_token": TOKEN,
        })))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app
        .post_form("/login", "email=ada@example.com&password=password123")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");

    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains(&format!("auth_token={TOKEN}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn rejected_credentials_rerender_the_form_with_a_message() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.remote)
        .await;

    let response = app
        .post_form("/login", "email=ada@example.com&password=wrong")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains("ada@example.com"));
}

#[tokio::test]
async fn invalid_email_is_rejected_before_any_remote_call() {
    let app = spawn_app().await;

    let response = app
        .post_form("/login", "email=not-an-email&password=password123")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Enter a valid email address"));

    let requests = app.remote.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn registration_signs_the_new_account_in() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": user_json(2, "Grace", "grace@example.com", false),
            "access_token": TOKEN,
        })))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app
        .post_form(
            "/register",
            "name=Grace&email=grace@example.com&password=password123&password_confirm=password123",
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");

    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains(&format!("auth_token={TOKEN}")));
}

#[tokio::test]
async fn short_password_is_rejected_before_any_remote_call() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/register",
            "name=Grace&email=grace@example.com&password=short&password_confirm=short",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Password must be at least 8 characters"));

    let requests = app.remote.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn mismatched_passwords_are_rejected() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/register",
            "name=Grace&email=grace@example.com&password=password123&password_confirm=password124",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Passwords do not match"));
}

#[tokio::test]
async fn duplicate_email_message_from_the_api_is_shown() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "message": "Email already registered" })),
        )
        .mount(&app.remote)
        .await;

    let response = app
        .post_form(
            "/register",
            "name=Grace&email=taken@example.com&password=password123&password_confirm=password123",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Email already registered"));
}

#[tokio::test]
async fn logout_clears_the_cookie_even_when_the_remote_call_fails() {
    let app = spawn_app().await;
    mount_current_user(&app.remote, user_json(1, "Ada", "ada@example.com", false)).await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.post_form_authed("/logout", "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");

    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn a_rejected_stored_token_clears_the_session_cookie() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.get_authed("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0"));

    let body = read_body(response).await;
    assert!(body.contains("Log in"));
}

#[tokio::test]
async fn the_stored_token_is_validated_once_per_request() {
    let app = spawn_app().await;
    mount_current_user(&app.remote, user_json(1, "Ada", "ada@example.com", false)).await;

    let response = app.get_authed("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Ada"));
    assert!(body.contains("Log out"));

    let requests = app.remote.received_requests().await.unwrap();
    let validations = requests
        .iter()
        .filter(|r| r.url.path() == "/auth/user")
        .count();
    assert_eq!(validations, 1);
}

#[tokio::test]
async fn anonymous_visitors_are_redirected_from_protected_pages() {
    let app = spawn_app().await;

    for uri in ["/diet-plan", "/favorites", "/profile"] {
        let response = app.get(uri).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri: {uri}");
        assert_eq!(response.headers().get("location").unwrap(), "/login");
    }
}

#[tokio::test]
async fn signed_in_visitors_skip_the_login_page() {
    let app = spawn_app().await;
    mount_current_user(&app.remote, user_json(1, "Ada", "ada@example.com", false)).await;

    let response = app.get_authed("/login").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn profile_update_replaces_name_and_email() {
    let app = spawn_app().await;
    mount_current_user(&app.remote, user_json(1, "Ada", "ada@example.com", false)).await;

    Mock::given(method("PUT"))
        .and(path("/auth/user"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(1, "Ada L.", "ada@newmail.com", false),
        })))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app
        .post_form_authed("/profile", "name=Ada%20L.&email=ada@newmail.com")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("Profile updated successfully!"));
    assert!(body.contains("ada@newmail.com"));
}
