//! Integration tests for the Mapbox directions client (wiremock-based)

use domain::value_objects::GeoLocation;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_directions::{DirectionsClient, DirectionsConfig, DirectionsError, MapboxDirectionsClient};

fn config_for_mock(base_url: &str) -> DirectionsConfig {
    DirectionsConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..DirectionsConfig::from_token("pk.test-token")
    }
}

const fn whitehall_walk_json() -> &'static str {
    r#"{
        "code": "Ok",
        "uuid": "abc123",
        "routes": [{
            "weight_name": "pedestrian",
            "duration": 431.4,
            "distance": 524.0,
            "legs": [{
                "summary": "Whitehall, Bridge Street",
                "steps": [
                    {
                        "geometry": {
                            "coordinates": [[-0.1276, 51.5034], [-0.1262, 51.5021]],
                            "type": "LineString"
                        },
                        "maneuver": {
                            "location": [-0.1276, 51.5034],
                            "instruction": "Walk south on Whitehall"
                        }
                    },
                    {
                        "geometry": {
                            "coordinates": [[-0.1262, 51.5021], [-0.1246, 51.5007]],
                            "type": "LineString"
                        },
                        "maneuver": {
                            "location": [-0.1262, 51.5021],
                            "instruction": "Turn left onto Bridge Street"
                        }
                    },
                    {
                        "maneuver": {
                            "location": [-0.1246, 51.5007],
                            "instruction": "You have arrived at Big Ben"
                        }
                    }
                ]
            }]
        }]
    }"#
}

#[tokio::test]
async fn test_fetch_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/directions/v5/mapbox/walking/-0.1276,51.5034;-0.1246,51.5007",
        ))
        .and(query_param("geometries", "geojson"))
        .and(query_param("steps", "true"))
        .and(query_param("access_token", "pk.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(whitehall_walk_json()))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client
        .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
        .await
        .unwrap();

    let steps = response.primary_steps().expect("one leg");
    assert_eq!(steps.len(), 3);

    let with_geometry = steps
        .steps()
        .iter()
        .filter(|s| s.geometry.is_some())
        .count();
    assert_eq!(with_geometry, 2);
    assert_eq!(
        steps.steps()[2].maneuver.instruction,
        "You have arrived at Big Ben"
    );
}

#[tokio::test]
async fn test_fetch_route_no_route_answer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "code": "NoRoute", "message": "No route found", "routes": [] }"#,
        ))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client
        .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
        .await
        .unwrap();

    assert!(response.routes.is_empty());
    assert!(response.primary_steps().is_none());
}

#[tokio::test]
async fn test_fetch_route_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
        .await;

    assert!(matches!(result, Err(DirectionsError::RequestFailed(_))));
    assert!(result.unwrap_err().is_retryable());
}

#[tokio::test]
async fn test_fetch_route_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
        .await;

    match result {
        Err(DirectionsError::RateLimitExceeded { retry_after_secs }) => {
            assert_eq!(retry_after_secs, Some(30));
        }
        other => unreachable!("expected rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_route_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>upstream</html>"))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .fetch_route(GeoLocation::downing_street(), GeoLocation::big_ben())
        .await;

    assert!(matches!(result, Err(DirectionsError::Decode(_))));
    assert!(!result.unwrap_err().is_retryable());
}
