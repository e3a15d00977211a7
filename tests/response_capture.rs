//! Response capture against a mock upstream.

use mirror_cache::CachedResponse;

#[tokio::test]
async fn capture_preserves_status_headers_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/acme/widgets")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("etag", "\"deadbeef\"")
        .with_body("{\"name\":\"widgets\"}")
        .create_async()
        .await;

    let response = reqwest::get(format!("{}/repos/acme/widgets", server.url()))
        .await
        .unwrap();
    let captured = CachedResponse::capture(response).await.unwrap();

    assert_eq!(captured.status, 200);
    assert_eq!(captured.body, b"{\"name\":\"widgets\"}");
    assert_eq!(captured.text, "{\"name\":\"widgets\"}");
    assert_eq!(captured.header("content-type"), Some("application/json"));
    assert_eq!(captured.header("ETag"), Some("\"deadbeef\""));
}

#[tokio::test]
async fn capture_keeps_error_text_for_classification() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rate-limited")
        .with_status(403)
        .with_body("You have triggered an abuse detection mechanism.")
        .create_async()
        .await;

    let response = reqwest::get(format!("{}/rate-limited", server.url()))
        .await
        .unwrap();
    let captured = CachedResponse::capture(response).await.unwrap();

    assert!(mirror_cache::is_rate_limit_error(&captured));
    let decision = mirror_cache::should_serve_from_cache(&captured);
    assert!(decision.serve);
    assert_eq!(decision.reason, "RATE_LIMITED");
}
