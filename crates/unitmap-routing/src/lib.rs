//! Point-to-point route planning: exact road routing via OSRM, degrading to a
//! chain of great-circle legs when the routing service is unavailable.

mod error;
mod history;
mod osrm;
mod planner;

pub use error::RoutingError;
pub use history::RouteHistory;
pub use osrm::{ExactRoute, ExactRouter, OsrmClient};
pub use planner::{estimate_route, RoutePlanner};
