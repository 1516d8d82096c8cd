use serde::{Deserialize, Serialize};
use unitmap_core::RouteResult;

/// Append-only log of computed routes. The most recent one is displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteHistory {
    routes: Vec<RouteResult>,
}

impl RouteHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: RouteResult) {
        self.routes.push(route);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&RouteResult> {
        self.routes.last()
    }

    /// Oldest first.
    #[must_use]
    pub fn routes(&self) -> &[RouteResult] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
