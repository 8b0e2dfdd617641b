//! Router-level tests for the product endpoints.
//!
//! These exercise everything that is decided before a query runs: the
//! id-format middleware and request body validation.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use stockroom_integration_tests::test_app;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

// =============================================================================
// ID-format middleware
// =============================================================================

#[tokio::test]
async fn test_get_product_with_malformed_id_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/products/not-a-uuid")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Invalid ID format" }));
}

#[tokio::test]
async fn test_put_product_with_malformed_id_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/products/12345")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"price": "1.00"}"#))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid ID format");
}

#[tokio::test]
async fn test_total_stock_route_is_not_shadowed_by_id_routes() {
    // /total-stock must reach its own handler, not the {id} matcher; the
    // middleware would otherwise reject it as a malformed id. Reaching the
    // handler means reaching the (unconnected) database, which surfaces as
    // a 500 rather than the middleware's 400.
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/products/total-stock")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_ne!(response.status(), StatusCode::BAD_REQUEST);
    assert_ne!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Body validation
// =============================================================================

#[tokio::test]
async fn test_create_product_with_missing_fields_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Widget"}"#))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_product_without_json_content_type_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .body(Body::from("name=Widget"))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
