//! Great-circle distance on a spherical Earth.

use crate::types::Coordinate;
use crate::CoreError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
///
/// Symmetric in its arguments and exactly `0.0` for identical points.
#[must_use]
pub fn great_circle_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    // Absolute deltas keep the result bit-for-bit symmetric.
    let half_dlat = ((b.lat - a.lat).abs().to_radians() / 2.0).sin();
    let half_dlng = ((b.lng - a.lng).abs().to_radians() / 2.0).sin();
    let h = half_dlat * half_dlat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * half_dlng * half_dlng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of consecutive-pair great-circle distances along `points`, in order.
///
/// # Errors
///
/// Returns [`CoreError::InsufficientPoints`] when fewer than two points are given.
pub fn sum_path_distance_km(points: &[Coordinate]) -> Result<f64, CoreError> {
    if points.len() < 2 {
        return Err(CoreError::InsufficientPoints { got: points.len() });
    }
    Ok(points
        .windows(2)
        .map(|pair| great_circle_distance_km(pair[0], pair[1]))
        .fold(0.0, |total, leg| total + leg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURITIBA: Coordinate = Coordinate::new(-25.4284, -49.2733);
    const LONDRINA: Coordinate = Coordinate::new(-23.3045, -51.1696);
    const MARINGA: Coordinate = Coordinate::new(-23.4205, -51.9333);

    #[test]
    fn identical_points_are_zero() {
        for p in [CURITIBA, LONDRINA, Coordinate::new(0.0, 0.0), Coordinate::new(89.9, 179.9)] {
            assert_eq!(great_circle_distance_km(p, p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (CURITIBA, LONDRINA),
            (LONDRINA, MARINGA),
            (Coordinate::new(10.0, -170.0), Coordinate::new(-45.5, 60.25)),
        ];
        for (a, b) in pairs {
            assert_eq!(great_circle_distance_km(a, b), great_circle_distance_km(b, a));
        }
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = great_circle_distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn curitiba_to_londrina_is_plausible() {
        let d = great_circle_distance_km(CURITIBA, LONDRINA);
        assert!(d > 290.0 && d < 310.0, "got {d}");
    }

    #[test]
    fn path_sum_adds_every_leg() {
        let expected =
            great_circle_distance_km(CURITIBA, LONDRINA) + great_circle_distance_km(LONDRINA, MARINGA);
        let total = sum_path_distance_km(&[CURITIBA, LONDRINA, MARINGA]).unwrap();
        assert_eq!(total, expected);
        // No shortcutting: the chained path is longer than the direct leg.
        assert!(total > great_circle_distance_km(CURITIBA, MARINGA));
    }

    #[test]
    fn path_sum_requires_two_points() {
        assert_eq!(
            sum_path_distance_km(&[]),
            Err(CoreError::InsufficientPoints { got: 0 })
        );
        assert_eq!(
            sum_path_distance_km(&[CURITIBA]),
            Err(CoreError::InsufficientPoints { got: 1 })
        );
    }
}
