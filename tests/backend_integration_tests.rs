use std::sync::Arc;

use fareadmin::api::{
    ApiError, Fare, FareBackend, FareUpdate, HttpFareBackend, StaticToken,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend(server: &MockServer, token: Option<&str>) -> HttpFareBackend {
    HttpFareBackend::new(
        server.uri(),
        Arc::new(StaticToken::new(token.map(str::to_string))),
    )
}

fn fare_json(id: u64, to_city: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "fromCity": "Jakarta",
        "fromCode": "CGK",
        "toCity": to_city,
        "toCode": "DPS",
        "duration": 110,
        "price": price
    })
}

fn update_fields() -> FareUpdate {
    FareUpdate {
        from_city: "Jakarta".to_string(),
        from_code: "CGK".to_string(),
        to_city: "Denpasar".to_string(),
        to_code: "DPS".to_string(),
        duration: 115,
        price: 900000.0,
    }
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_fares_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airports/baseprice"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [fare_json(1, "Denpasar", 850000.0), fare_json(2, "Medan", 1200000.0)],
            "message": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fares = backend(&server, Some("secret")).list_fares().await;
    let fares = tokio_test::assert_ok!(fares);
    assert_eq!(fares.len(), 2);
    assert_eq!(fares[0].to_city, "Denpasar");
    assert_eq!(fares[1].price, 1200000.0);
}

#[tokio::test]
async fn test_list_fares_unauthorized_passes_message_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airports/baseprice"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
        )
        .mount(&server)
        .await;

    let err = backend(&server, Some("stale")).list_fares().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 401,
            message: "Token expired".to_string()
        }
    );
    assert_eq!(err.reason(), "Token expired");
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = backend(&server, None).list_fares().await.unwrap_err();
    assert_eq!(err, ApiError::MissingCredential);
    assert_eq!(err.reason(), "No token found");

    // Blank tokens count as missing too
    let err = backend(&server, Some("  ")).delete_fare(1).await.unwrap_err();
    assert_eq!(err, ApiError::MissingCredential);
}

#[tokio::test]
async fn test_list_without_data_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airports/baseprice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let err = backend(&server, Some("secret")).list_fares().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/airports/baseprice/7"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    tokio_test::assert_ok!(backend(&server, Some("secret")).delete_fare(7).await);
}

#[tokio::test]
async fn test_delete_rejected_with_remote_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/airports/baseprice/7"))
        .respond_with(ResponseTemplate::new(423).set_body_json(json!({ "message": "locked" })))
        .mount(&server)
        .await;

    let err = backend(&server, Some("secret")).delete_fare(7).await.unwrap_err();
    assert_eq!(err.reason(), "locked");
}

#[tokio::test]
async fn test_delete_rejected_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/airports/baseprice/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend(&server, Some("secret")).delete_fare(7).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 500,
            message: "Error deleting data".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_of_vanished_fare_shows_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/airports/baseprice/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    // Deleting the same id twice surfaces the remote wording both times
    let backend = backend(&server, Some("secret"));
    for _ in 0..2 {
        let err = backend.delete_fare(7).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 404,
                message: "not found".to_string()
            }
        );
        assert_eq!(err.reason(), "not found");
    }
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_returns_stored_fare() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/airports/baseprice/3"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({
            "fromCity": "Jakarta",
            "fromCode": "CGK",
            "toCity": "Denpasar",
            "toCode": "DPS",
            "duration": 115,
            "price": 900000.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": fare_json(3, "Denpasar (Ngurah Rai)", 900000.0)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fare = backend(&server, Some("secret"))
        .update_fare(3, &update_fields())
        .await
        .unwrap();
    assert_eq!(fare.id, 3);
    assert_eq!(fare.to_city, "Denpasar (Ngurah Rai)");
}

#[tokio::test]
async fn test_update_with_empty_body_uses_submitted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/airports/baseprice/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fare = backend(&server, Some("secret"))
        .update_fare(3, &update_fields())
        .await
        .unwrap();
    assert_eq!(fare, update_fields().into_fare(3));
}

#[tokio::test]
async fn test_update_rejected_with_remote_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/airports/baseprice/3"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Price too low" })),
        )
        .mount(&server)
        .await;

    let err = backend(&server, Some("secret"))
        .update_fare(3, &update_fields())
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "Price too low");
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on the discard port
    let backend = HttpFareBackend::new(
        "http://127.0.0.1:9",
        Arc::new(StaticToken::new(Some("secret".to_string()))),
    );
    let err: Result<Vec<Fare>, ApiError> = backend.list_fares().await;
    assert!(matches!(err, Err(ApiError::Network(_))));
}
