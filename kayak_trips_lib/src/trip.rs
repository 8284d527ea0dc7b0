use serde::{Deserialize, Serialize};

use crate::{path_point::PathPoint, waypoint::Waypoint};

#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id"))]
    pub trip_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Trip {
    pub fn new(trip_id: i64, name: String, description: Option<String>) -> Self {
        Self {
            trip_id,
            name,
            description,
        }
    }
}

/// Everything stored for one trip, in insertion order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TripDetail {
    pub waypoints: Vec<Waypoint>,
    pub path: Vec<PathPoint>,
}
