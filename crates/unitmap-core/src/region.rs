//! Region membership predicate.
//!
//! A bounding rectangle deliberately tightened past the state's true extent,
//! minus rectangular exclusion zones that strip neighbouring-state and ocean
//! false positives near the boundary. This is a heuristic filter, not a
//! polygon test: points near the border can be misclassified either way.
//!
//! The exclusion thresholds were picked empirically and have no documented
//! derivation. They are kept literally; do not adjust them without new
//! boundary data.

/// An open rectangle. Unbounded sides use infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl ExclusionZone {
    /// Strict containment, so a point exactly on an edge is not excluded.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat > self.min_lat && lat < self.max_lat && lng > self.min_lng && lng < self.max_lng
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionBounds {
    pub name: &'static str,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub exclusions: &'static [ExclusionZone],
}

const PARANA_EXCLUSIONS: &[ExclusionZone] = &[
    // Atlantic, east of the bay of Paranaguá and south of 25°S.
    ExclusionZone {
        name: "coastal ocean",
        min_lat: f64::NEG_INFINITY,
        max_lat: -25.0,
        min_lng: -48.0,
        max_lng: f64::INFINITY,
    },
    // São Paulo state north of the Paranapanema.
    ExclusionZone {
        name: "sao paulo border",
        min_lat: -23.0,
        max_lat: f64::INFINITY,
        min_lng: -50.0,
        max_lng: f64::INFINITY,
    },
    // Santa Catarina north coast and plateau.
    ExclusionZone {
        name: "santa catarina border",
        min_lat: f64::NEG_INFINITY,
        max_lat: -26.5,
        min_lng: -52.0,
        max_lng: f64::INFINITY,
    },
];

impl RegionBounds {
    /// Paraná, Brazil.
    #[must_use]
    pub fn parana() -> Self {
        Self {
            name: "Paraná",
            north: -22.4,
            south: -26.8,
            east: -47.8,
            west: -54.7,
            exclusions: PARANA_EXCLUSIONS,
        }
    }

    #[must_use]
    pub fn within_rectangle(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }

    /// The exclusion zone containing the point, if any.
    #[must_use]
    pub fn excluded_by(&self, lat: f64, lng: f64) -> Option<&ExclusionZone> {
        self.exclusions.iter().find(|zone| zone.contains(lat, lng))
    }

    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.within_rectangle(lat, lng) && self.excluded_by(lat, lng).is_none()
    }
}

/// Whether `(lat, lng)` falls inside Paraná according to the heuristic bounds.
#[must_use]
pub fn is_inside_region(lat: f64, lng: f64) -> bool {
    RegionBounds::parana().contains(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curitiba_is_inside() {
        assert!(is_inside_region(-25.43, -49.27));
    }

    #[test]
    fn interior_cities_are_inside() {
        // Londrina, Maringá, Cascavel, Ponta Grossa, Guarapuava
        for (lat, lng) in [
            (-23.31, -51.16),
            (-23.42, -51.94),
            (-24.96, -53.46),
            (-25.09, -50.16),
            (-25.39, -51.46),
        ] {
            assert!(is_inside_region(lat, lng), "({lat}, {lng}) should be inside");
        }
    }

    #[test]
    fn region_centroid_is_inside() {
        let r = RegionBounds::parana();
        let lat = f64::midpoint(r.north, r.south);
        let lng = f64::midpoint(r.east, r.west);
        assert!(r.contains(lat, lng));
    }

    #[test]
    fn points_outside_rectangle_are_rejected() {
        let r = RegionBounds::parana();
        let samples = [
            (r.north + 0.01, -51.0),
            (r.south - 0.01, -51.0),
            (-24.0, r.east + 0.01),
            (-24.0, r.west - 0.01),
            (-23.55, -46.63), // São Paulo city
            (-27.59, -48.55), // Florianópolis
            (0.0, 0.0),
        ];
        for (lat, lng) in samples {
            assert!(!r.contains(lat, lng), "({lat}, {lng}) should be outside");
        }
    }

    #[test]
    fn exclusion_zones_reject_points_inside_rectangle() {
        let r = RegionBounds::parana();
        let samples = [
            ("coastal ocean", -25.5, -47.9),
            ("sao paulo border", -22.8, -49.0),
            ("santa catarina border", -26.7, -49.0),
        ];
        for (zone, lat, lng) in samples {
            assert!(r.within_rectangle(lat, lng));
            assert_eq!(r.excluded_by(lat, lng).map(|z| z.name), Some(zone));
            assert!(!r.contains(lat, lng));
        }
    }

    #[test]
    fn exclusion_edges_are_not_excluded() {
        let r = RegionBounds::parana();
        // lat exactly -25.0 is not strictly below the ocean zone's max.
        assert!(r.contains(-25.0, -47.9));
    }
}
