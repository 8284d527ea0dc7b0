use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// Serialized as a `[latitude, longitude]` pair, which is the order the map
/// widget and the trip descriptors use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.latitude, coordinate.longitude]
    }
}

// geo-types is x = longitude, y = latitude
impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<Coordinate> for geo_types::Coord {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::coord! { x: coordinate.longitude, y: coordinate.latitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn serializes_as_lat_lon_pair() {
        let coordinate = Coordinate::new(30.1, -83.1);
        assert_eq!(serde_json::to_string(&coordinate).unwrap(), "[30.1,-83.1]");

        let parsed: Coordinate = serde_json::from_str("[30.2463, -83.2461]").unwrap();
        assert_eq!(parsed, Coordinate::new(30.2463, -83.2461));
    }

    #[test]
    fn rejects_non_numeric_pairs() {
        assert!(serde_json::from_str::<Coordinate>(r#"["30.1", -83.1]"#).is_err());
        assert!(serde_json::from_str::<Coordinate>("[30.1]").is_err());
    }

    #[test]
    fn point_uses_longitude_as_x() {
        let point: Point = Coordinate::new(30.0, -83.0).into();
        assert_eq!(point.x(), -83.0);
        assert_eq!(point.y(), 30.0);
    }

    #[rstest]
    #[case(30.0, -83.0, true)]
    #[case(90.0, 180.0, true)]
    #[case(-90.0, -180.0, true)]
    #[case(90.5, 0.0, false)]
    #[case(0.0, -180.1, false)]
    #[case(f64::NAN, 0.0, false)]
    fn range_check(#[case] latitude: f64, #[case] longitude: f64, #[case] expected: bool) {
        assert_eq!(Coordinate::new(latitude, longitude).is_in_range(), expected);
    }
}
