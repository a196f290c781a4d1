//! Integration tests for `EventStoreClient` using wiremock HTTP mocks.

use serde_json::json;
use spotlight_cluster::{ClusterId, ClusterQuery, ClusterService, EventSource, FetchError};
use spotlight_store::{EventStoreClient, StoreError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> EventStoreClient {
    EventStoreClient::new(base_url, "test-key", "events", 5, "spotlight-test/0.1")
        .expect("client construction should not fail")
}

fn rows() -> serde_json::Value {
    json!([
        {
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "title": "Garage Rock Night",
            "genre": "rock",
            "location": "Mission",
            "latitude": 37.7599,
            "longitude": -122.4148,
            "attendee_count": 80,
            "is_hot": false,
            "created_at": "2026-09-01T20:00:00Z"
        },
        {
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "title": "Punk Matinee",
            "genre": "rock",
            "location": "Mission",
            "latitude": 37.7601,
            "longitude": -122.4150,
            "attendee_count": null,
            "is_hot": true,
            "created_at": "2026-09-02T15:00:00Z"
        },
        {
            "id": "16fd2706-8baf-433b-82eb-8c7fada847da",
            "title": "Location TBA",
            "genre": "rock",
            "latitude": null,
            "longitude": null,
            "created_at": "2026-09-03T15:00:00Z"
        }
    ])
}

#[tokio::test]
async fn list_located_events_sends_filters_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .and(query_param("select", "*"))
        .and(query_param("latitude", "not.is.null"))
        .and(query_param("longitude", "not.is.null"))
        .and(query_param("order", "created_at.asc"))
        .and(header("apikey", "test-key"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client
        .list_located_events(None)
        .await
        .expect("should parse events");

    assert_eq!(events.len(), 2, "row without coordinates is dropped");
    assert_eq!(events[0].title, "Garage Rock Night");
    assert_eq!(events[0].attendee_count, Some(80));
    assert!(events[1].is_hot);
    assert!(events[1].attendee_count.is_none());
}

#[tokio::test]
async fn list_located_events_applies_genre_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .and(query_param("genre", "eq.jazz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let events = client
        .list_located_events(Some("jazz"))
        .await
        .expect("should parse empty list");

    assert!(events.is_empty());
}

#[tokio::test]
async fn undecodable_rows_are_skipped() {
    let server = MockServer::start().await;

    let body = json!([
        { "id": "not-a-uuid", "title": "Broken", "latitude": 1.0, "longitude": 1.0,
          "created_at": "2026-09-01T20:00:00Z" },
        { "id": "0f8fad5b-d9cb-469f-a165-70867728950e", "title": "Fine",
          "latitude": 1.0, "longitude": 1.0, "created_at": "2026-09-01T20:00:00Z" }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let events = test_client(&server.uri())
        .list_located_events(None)
        .await
        .expect("partial success");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Fine");
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).list_located_events(None).await;

    assert!(
        matches!(result, Err(StoreError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn non_array_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "relation missing" })),
        )
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).list_located_events(None).await;

    assert!(
        matches!(result, Err(StoreError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn event_source_impl_reports_typed_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_events(None).await;

    assert!(matches!(result, Err(FetchError::Unavailable(_))));
}

#[tokio::test]
async fn cluster_service_fetches_once_and_refetches_after_invalidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows()))
        .expect(2)
        .mount(&server)
        .await;

    let service = ClusterService::new(test_client(&server.uri()));
    let query = ClusterQuery::new(200.0);

    let markers = service.map_markers(&query, false).await;
    let details = service.cluster_details(&query, false).await;
    service.invalidate().await;
    service.clusters(&query, false).await;

    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].count, 2);
    assert!(markers[0].hot, "one member is individually hot");
    assert_eq!(details[&ClusterId(0)].name, "Rock Hub");
    assert_eq!(details[&ClusterId(0)].description, "2 events with 81 attending");
}

#[tokio::test]
async fn cluster_service_returns_empty_when_store_is_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = ClusterService::new(test_client(&server.uri()));
    let clusters = service.clusters(&ClusterQuery::new(200.0), false).await;

    assert!(clusters.is_empty());
    assert!(service.cached_at().await.is_none());
}
