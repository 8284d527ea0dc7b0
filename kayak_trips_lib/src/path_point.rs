use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// One vertex of the polyline approximating a trip's route.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PathPoint {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id"))]
    pub path_point_id: i64,
    pub trip_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl PathPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
