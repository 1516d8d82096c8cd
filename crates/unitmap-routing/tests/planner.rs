//! Integration tests for `RoutePlanner` against a wiremock OSRM server.

use serde_json::json;
use unitmap_core::{great_circle_distance_km, Coordinate, RouteKind, RoutePoint};
use unitmap_routing::{OsrmClient, RouteHistory, RoutePlanner, RoutingError};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURITIBA: (f64, f64) = (-25.43, -49.27);
const LONDRINA: (f64, f64) = (-23.31, -51.16);
const ROUTE_PATH: &str = "/route/v1/driving/-49.27,-25.43;-51.16,-23.31";

fn planner(server: &MockServer) -> RoutePlanner {
    let client =
        OsrmClient::with_base_url(&server.uri(), 5).expect("client construction should not fail");
    RoutePlanner::new(Box::new(client))
}

fn two_points() -> Vec<RoutePoint> {
    vec![
        RoutePoint::new(CURITIBA.0, CURITIBA.1),
        RoutePoint::new(LONDRINA.0, LONDRINA.1),
    ]
}

#[tokio::test]
async fn exact_route_converts_units_and_geometry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{
                "distance": 381_500.0,
                "duration": 17_100.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-49.27, -25.43], [-50.16, -25.09], [-51.16, -23.31]]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let route = planner(&server)
        .plan_route(&two_points(), true)
        .await
        .expect("should plan");

    assert_eq!(route.kind, RouteKind::Exact);
    assert!((route.distance_km - 381.5).abs() < 1e-9);
    assert!((route.duration_min.expect("duration") - 285.0).abs() < 1e-9);
    assert_eq!(
        route.geometry.expect("geometry"),
        vec![
            Coordinate::new(-25.43, -49.27),
            Coordinate::new(-25.09, -50.16),
            Coordinate::new(-23.31, -51.16),
        ]
    );
    assert_eq!(route.points, two_points());
}

#[tokio::test]
async fn not_found_falls_back_to_estimate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let route = planner(&server)
        .plan_route(&two_points(), true)
        .await
        .expect("should fall back");

    let expected = great_circle_distance_km(
        Coordinate::new(CURITIBA.0, CURITIBA.1),
        Coordinate::new(LONDRINA.0, LONDRINA.1),
    );
    assert_eq!(route.kind, RouteKind::Estimated);
    assert!(route.duration_min.is_none());
    assert_eq!(route.distance_km, expected);
}

#[tokio::test]
async fn empty_routes_fall_back_to_estimate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": "Ok", "routes": [] })),
        )
        .mount(&server)
        .await;

    let route = planner(&server)
        .plan_route(&two_points(), true)
        .await
        .expect("should fall back");
    assert_eq!(route.kind, RouteKind::Estimated);
}

#[tokio::test]
async fn error_code_falls_back_to_estimate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "NoRoute", "message": "Impossible route" })),
        )
        .mount(&server)
        .await;

    let route = planner(&server)
        .plan_route(&two_points(), true)
        .await
        .expect("should fall back");
    assert_eq!(route.kind, RouteKind::Estimated);
}

#[tokio::test]
async fn estimate_only_skips_the_routing_service() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let route = planner(&server)
        .plan_route(&two_points(), false)
        .await
        .expect("should estimate");
    assert_eq!(route.kind, RouteKind::Estimated);
}

#[tokio::test]
async fn fewer_than_two_points_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let planner = planner(&server);
    for prefer_exact in [true, false] {
        let err = planner
            .plan_route(&[RoutePoint::new(CURITIBA.0, CURITIBA.1)], prefer_exact)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::InsufficientPoints { got: 1 }));
    }
}

#[tokio::test]
async fn repeated_calls_produce_distinct_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let planner = planner(&server);
    let mut history = RouteHistory::new();
    let first = planner.plan_route(&two_points(), true).await.unwrap();
    let second = planner.plan_route(&two_points(), true).await.unwrap();
    history.push(first.clone());
    history.push(second.clone());

    assert_ne!(first.id, second.id);
    assert!(second.created_at >= first.created_at);
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().map(|r| &r.id), Some(&second.id));
}
