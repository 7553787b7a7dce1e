use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::{
    matchers::{method, query_param},
    Mock, MockServer, ResponseTemplate,
};

use filmrec_api::{
    error::AppError,
    services::{HttpReviewClient, ReviewClient},
};

#[tokio::test]
async fn test_batch_call_sends_comma_joined_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("films", "2,3,4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "film_id": 2, "reviews": [{ "rating": 5 }, { "rating": 4 }] },
            { "film_id": 3, "reviews": [] }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpReviewClient::new(mock_server.uri());
    let reviews = client.get_reviews(&[2, 3, 4]).await.unwrap();

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[&2].len(), 2);
    assert!(reviews[&3].is_empty());
    // film 4 was absent from the payload, not defaulted to empty
    assert!(!reviews.contains_key(&4));
}

#[tokio::test]
async fn test_http_error_status_fails_without_retry() {
    let mock_server = MockServer::start().await;

    // expect(1) turns a retried request into a verification failure
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpReviewClient::new(mock_server.uri());
    let result = client.get_reviews(&[1]).await;

    assert!(matches!(result, Err(AppError::ReviewService(_))));
}

#[tokio::test]
async fn test_malformed_payload_fails_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpReviewClient::new(mock_server.uri());
    let result = client.get_reviews(&[1]).await;

    assert!(matches!(result, Err(AppError::ReviewService(_))));
}

/// Serves one dropped connection, then one good JSON response
///
/// Wiremock answers every connection, so the transport-failure path needs
/// a raw listener that kills the first connection before any bytes go out.
async fn flaky_review_server(body: String) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);

        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = [0u8; 1024];
        let _ = socket.read(&mut head).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_transport_failure_is_retried_once() {
    let body = serde_json::json!([
        { "film_id": 7, "reviews": [{ "rating": 5 }] }
    ])
    .to_string();
    let base_url = flaky_review_server(body).await;

    let client = HttpReviewClient::new(base_url);
    let reviews = client.get_reviews(&[7]).await.unwrap();

    assert_eq!(reviews[&7].len(), 1);
}

#[tokio::test]
async fn test_transport_failure_on_both_attempts_fails() {
    // Bind then drop, so the port is very likely unbound for both attempts
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpReviewClient::new(format!("http://{}", addr));
    let result = client.get_reviews(&[1]).await;

    assert!(matches!(result, Err(AppError::ReviewService(_))));
}
