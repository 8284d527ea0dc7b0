use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A named marker along a trip, such as a launch, camp or take-out.
///
/// `icon` and `color` are opaque keys handed to the map widget as-is
/// (e.g. `fa-campground`, `green`).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Waypoint {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id"))]
    pub waypoint_id: i64,
    pub trip_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: String,
    pub color: String,
}

impl Waypoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
