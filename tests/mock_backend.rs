use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use delivery_client::mock_backend::{MockState, OPENAPI_PATH, app};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(request: Request<Body>) -> (StatusCode, Value) {
    let response = app(MockState::seeded()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn serves_openapi_document() {
    let (status, body) = call(Request::get(OPENAPI_PATH).body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Delivery mock backend");
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/login",
        "/api/account/{id}",
        "/api/restaurants",
        "/api/products",
        "/api/orders",
        "/api/order/{id}/status",
        "/api/order/{id}/rating",
        "/api/deliveries",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn login_failure_has_error_body() {
    let (status, body) = call(post(
        "/api/login",
        json!({ "email": "customer@example.com", "password": "wrong-password" }),
    ))
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[rstest]
#[case(
    json!({ "restaurant_id": 1, "customer_id": 2, "products": [] }),
    StatusCode::BAD_REQUEST
)]
#[case(
    json!({ "restaurant_id": 1, "customer_id": 2, "products": [{ "id": 1, "quantity": 0 }] }),
    StatusCode::BAD_REQUEST
)]
#[case(
    json!({ "restaurant_id": 1, "customer_id": 2, "products": [{ "id": 6, "quantity": 1 }] }),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(
    json!({ "restaurant_id": 99, "customer_id": 2, "products": [{ "id": 1, "quantity": 1 }] }),
    StatusCode::NOT_FOUND
)]
#[case(
    json!({ "restaurant_id": 1, "customer_id": 2, "products": [{ "id": 1, "quantity": 3 }] }),
    StatusCode::CREATED
)]
#[tokio::test]
async fn create_order_validates_lines(#[case] order: Value, #[case] expected: StatusCode) {
    let (status, body) = call(post("/api/orders", order)).await;

    assert_eq!(status, expected);
    if status == StatusCode::CREATED {
        assert_eq!(body["total_cost"], 150);
        assert_eq!(body["status"], "pending");
    } else {
        assert!(body["error"].is_string());
    }
}

#[rstest]
#[case(0)]
#[case(6)]
#[tokio::test]
async fn rating_out_of_range_is_rejected(#[case] stars: u8) {
    let (status, _) = call(post(
        "/api/order/4/rating",
        json!({ "restaurant_rating": stars }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_order_status_update_is_not_found() {
    let (status, body) = call(post(
        "/api/order/404/status",
        json!({ "status": "delivered" }),
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
}
