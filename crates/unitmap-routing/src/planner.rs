//! Route planning with exact-then-estimated fallback.
//!
//! ```text
//! plan_route(points, prefer_exact)
//!   points < 2          -> Err(InsufficientPoints)
//!   prefer_exact = true -> exact router -> Ok: type = exact
//!                                       -> Err: warn, estimated
//!   prefer_exact = false -> estimated
//! ```

use chrono::Utc;
use unitmap_core::{sum_path_distance_km, Coordinate, RouteKind, RoutePoint, RouteResult};

use crate::error::RoutingError;
use crate::osrm::ExactRouter;

fn new_route_id() -> String {
    format!("route-{}", uuid::Uuid::new_v4())
}

/// Straight-line route: the chain of great-circle legs between the points.
///
/// # Errors
///
/// Returns [`RoutingError::InsufficientPoints`] when fewer than two points are given.
pub fn estimate_route(points: &[RoutePoint]) -> Result<RouteResult, RoutingError> {
    let coordinates: Vec<Coordinate> = points.iter().map(RoutePoint::coordinate).collect();
    let distance_km = sum_path_distance_km(&coordinates)?;

    Ok(RouteResult {
        id: new_route_id(),
        points: points.to_vec(),
        distance_km,
        duration_min: None,
        kind: RouteKind::Estimated,
        geometry: Some(coordinates),
        created_at: Utc::now(),
    })
}

pub struct RoutePlanner {
    router: Box<dyn ExactRouter>,
}

impl RoutePlanner {
    #[must_use]
    pub fn new(router: Box<dyn ExactRouter>) -> Self {
        Self { router }
    }

    /// Plan a route through `points` in order.
    ///
    /// Every call yields a fresh result with its own id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InsufficientPoints`] when fewer than two points
    /// are given. Routing-service failures never surface; they degrade to an
    /// estimated route.
    pub async fn plan_route(
        &self,
        points: &[RoutePoint],
        prefer_exact: bool,
    ) -> Result<RouteResult, RoutingError> {
        if points.len() < 2 {
            return Err(RoutingError::InsufficientPoints { got: points.len() });
        }

        if !prefer_exact {
            return estimate_route(points);
        }

        let coordinates: Vec<Coordinate> = points.iter().map(RoutePoint::coordinate).collect();
        match self.router.route(&coordinates).await {
            Ok(exact) => {
                tracing::info!(
                    points = points.len(),
                    distance_km = exact.distance_km,
                    duration_min = exact.duration_min,
                    "exact route computed"
                );
                Ok(RouteResult {
                    id: new_route_id(),
                    points: points.to_vec(),
                    distance_km: exact.distance_km,
                    duration_min: Some(exact.duration_min),
                    kind: RouteKind::Exact,
                    geometry: Some(exact.geometry),
                    created_at: Utc::now(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "exact routing failed, using great-circle estimate");
                estimate_route(points)
            }
        }
    }
}
