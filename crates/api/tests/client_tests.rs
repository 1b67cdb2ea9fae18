use std::time::Duration;

use bitewise_api::{shape_query, ApiClient, ApiError, NewPlanEntry, SearchFilters};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        &server.uri(),
        Duration::from_secs(5),
        Duration::from_secs(2),
    )
    .expect("client should build")
}

#[tokio::test]
async fn authenticated_requests_carry_a_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/favorites"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "favorites": [
                {"id": 7, "title": "Lentil Soup", "image": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let favorites = client(&server)
        .favorites("secret-token")
        .await
        .expect("favorites should load");

    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Lentil Soup");
}

#[tokio::test]
async fn recipe_search_is_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("query", "chicken"))
        .and(query_param("number", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "title": "Roast Chicken"}],
            "totalResults": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = shape_query(&SearchFilters {
        category: "chicken".to_string(),
        ..Default::default()
    });
    let response = client(&server)
        .search_recipes(&query)
        .await
        .expect("search should succeed");

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.total_results, 1);

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn zero_recipe_id_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let result = client(&server).recipe_detail(0).await;

    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    let requests = server.received_requests().await.expect("requests recorded");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn zero_week_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let result = client(&server).diet_plan("token", 0).await;

    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    let requests = server.received_requests().await.expect("requests recorded");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn unauthorized_status_maps_to_its_own_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client(&server).current_user("stale-token").await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let result = client(&server).login("a@b.test", "wrong").await;

    match result {
        Err(ApiError::Rejected { message }) => assert_eq!(message, "Invalid email or password"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_map_to_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/9/information"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client(&server).recipe_detail(9).await;

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_payload_shape_fails_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "unexpected": true
        })))
        .mount(&server)
        .await;

    let result = client(&server).current_user("token").await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn register_confirms_the_password_it_sends() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(json!({
            "name": "Sam",
            "email": "sam@example.test",
            "password": "hunter2hunter2",
            "password_confirmation": "hunter2hunter2"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": {"id": 3, "name": "Sam", "email": "sam@example.test"},
            "access_token": "fresh-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = client(&server)
        .register("Sam", "sam@example.test", "hunter2hunter2")
        .await
        .expect("registration should succeed");

    assert_eq!(auth.user.id, 3);
    assert_eq!(auth.access_token, "fresh-token");
    assert!(!auth.user.is_admin);
}

#[tokio::test]
async fn diet_plan_unwraps_the_envelope_and_passes_the_week() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/diet-plans"))
        .and(query_param("week", "2"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "diet_plans": [
                {
                    "id": 11,
                    "day_of_week": "monday",
                    "meal_type": "dinner",
                    "week_number": 2,
                    "recipe": {"id": 5, "title": "Chili", "image": null}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client(&server)
        .diet_plan("token", 2)
        .await
        .expect("plan should load");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day_of_week, "monday");
    assert_eq!(entries[0].recipe.title, "Chili");
}

#[tokio::test]
async fn plan_mutations_send_the_expected_payloads() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/diet-plans"))
        .and(body_partial_json(json!({
            "recipe_id": 5,
            "day_of_week": "friday",
            "meal_type": "lunch",
            "week_number": 1
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/diet-plans/clear"))
        .and(query_param("week", "1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.add_to_diet_plan(
        "token",
        &NewPlanEntry {
            recipe_id: 5,
            day_of_week: "friday".to_string(),
            meal_type: "lunch".to_string(),
            week_number: 1,
        },
    )
    .await
    .expect("add should succeed");

    api.clear_diet_plan("token", 1)
        .await
        .expect("clear should succeed");
}

#[tokio::test]
async fn favorites_can_be_added_and_removed_directly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/favorites/31"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/favorites/31"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.add_favorite("token", 31).await.expect("add should succeed");
    api.remove_favorite("token", 31)
        .await
        .expect("remove should succeed");
}

#[tokio::test]
async fn missing_resources_map_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/404/information"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client(&server).recipe_detail(404).await;

    assert!(matches!(result, Err(ApiError::NotFound)));
}
