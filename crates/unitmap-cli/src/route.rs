//! `route` command handler.

use unitmap_core::{AppConfig, RoutePoint};
use unitmap_routing::{estimate_route, OsrmClient, RoutePlanner};

/// Parse a `LAT,LNG` pair.
pub(crate) fn parse_point(raw: &str) -> Result<RoutePoint, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {raw:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude {lng:?}: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("coordinate out of range: {lat},{lng}"));
    }
    Ok(RoutePoint::new(lat, lng))
}

/// Plan a route and print it.
///
/// `estimate` forces the great-circle estimate; otherwise the exact router is
/// tried when `prefer_exact_routes` is enabled.
///
/// # Errors
///
/// Returns an error for fewer than two points or if the router client cannot
/// be built.
pub(crate) async fn run_route(
    config: &AppConfig,
    points: &[RoutePoint],
    estimate: bool,
) -> anyhow::Result<()> {
    let route = if estimate || !config.prefer_exact_routes {
        estimate_route(points)?
    } else {
        let client = OsrmClient::with_base_url(&config.osrm_base_url, config.http_timeout_secs)
            .map_err(|e| anyhow::anyhow!("failed to build routing client: {e}"))?;
        RoutePlanner::new(Box::new(client))
            .plan_route(points, true)
            .await?
    };

    tracing::info!(
        route_id = %route.id,
        kind = ?route.kind,
        distance_km = route.distance_km,
        "route planned"
    );
    crate::print_json(&route)
}
