//! Free-form trip input, as submitted by the UI or read from a JSON file.
//!
//! ```json
//! {
//!   "name": "Suwannee River Kayak Adventure",
//!   "description": "A scenic kayak route.",
//!   "waypoints": [
//!     { "name": "Launch", "coordinate": [30.2463, -83.2461], "icon": "fa-water", "color": "blue" }
//!   ],
//!   "path": [[30.2463, -83.2461], [30.2300, -83.2450]]
//! }
//! ```

use kayak_trips_lib::Coordinate;
use serde::{Deserialize, Serialize};

use crate::DataManagerError;

/// Marker style the map widget falls back to.
pub const DEFAULT_ICON: &str = "info-sign";
pub const DEFAULT_COLOR: &str = "blue";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<WaypointDescriptor>,
    #[serde(default)]
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointDescriptor {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_icon() -> String {
    DEFAULT_ICON.into()
}

fn default_color() -> String {
    DEFAULT_COLOR.into()
}

impl TripDescriptor {
    pub fn from_json(json: &str) -> Result<Self, DataManagerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the fields the store relies on. Coordinates must be on the globe.
    pub fn validate(&self) -> Result<(), DataManagerError> {
        if self.name.trim().is_empty() {
            return Err(DataManagerError::Validation("Trip name must not be empty".into()));
        }

        for (index, waypoint) in self.waypoints.iter().enumerate() {
            if waypoint.name.trim().is_empty() {
                return Err(DataManagerError::Validation(format!("Waypoint {index} has no name")));
            }
            if !waypoint.coordinate.is_in_range() {
                return Err(DataManagerError::Validation(format!(
                    "Waypoint '{}' is out of range: {:?}", waypoint.name, waypoint.coordinate
                )));
            }
        }

        if let Some((index, coordinate)) = self.path.iter().enumerate().find(|(_, c)| !c.is_in_range()) {
            return Err(DataManagerError::Validation(format!("Path point {index} is out of range: {coordinate:?}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_full_descriptor() {
        let descriptor = TripDescriptor::from_json(r#"{
            "name": "Santa Fe",
            "description": "Short one",
            "waypoints": [
                { "name": "Launch", "coordinate": [29.93, -82.80], "icon": "fa-water", "color": "darkblue" },
                { "name": "Camp", "coordinate": [29.90, -82.85] }
            ],
            "path": [[29.93, -82.80], [29.90, -82.85]]
        }"#).unwrap();

        assert_eq!(descriptor.name, "Santa Fe");
        assert_eq!(descriptor.waypoints[0].color, "darkblue");
        assert_eq!(descriptor.waypoints[1].icon, DEFAULT_ICON);
        assert_eq!(descriptor.waypoints[1].color, DEFAULT_COLOR);
        assert_eq!(descriptor.path, vec![Coordinate::new(29.93, -82.80), Coordinate::new(29.90, -82.85)]);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn description_waypoints_and_path_are_optional() {
        let descriptor = TripDescriptor::from_json(r#"{ "name": "Bare" }"#).unwrap();

        assert_eq!(descriptor.description, None);
        assert!(descriptor.waypoints.is_empty());
        assert!(descriptor.path.is_empty());
    }

    #[rstest]
    #[case::not_json("name: nope")]
    #[case::missing_name(r#"{ "path": [] }"#)]
    #[case::string_coordinate(r#"{ "name": "T", "path": [["30.0", -83.0]] }"#)]
    #[case::short_coordinate(r#"{ "name": "T", "path": [[30.0]] }"#)]
    #[case::waypoint_without_coordinate(r#"{ "name": "T", "waypoints": [{ "name": "W" }] }"#)]
    fn malformed_input_is_a_parse_error(#[case] json: &str) {
        assert!(matches!(TripDescriptor::from_json(json), Err(DataManagerError::Parse(_))));
    }

    #[rstest]
    #[case::empty_name(r#"{ "name": "" }"#)]
    #[case::empty_waypoint_name(r#"{ "name": "T", "waypoints": [{ "name": " ", "coordinate": [30.0, -83.0] }] }"#)]
    #[case::waypoint_out_of_range(r#"{ "name": "T", "waypoints": [{ "name": "W", "coordinate": [91.0, -83.0] }] }"#)]
    #[case::path_out_of_range(r#"{ "name": "T", "path": [[30.0, -183.0]] }"#)]
    fn invalid_values_fail_validation(#[case] json: &str) {
        let descriptor = TripDescriptor::from_json(json).unwrap();
        assert!(matches!(descriptor.validate(), Err(DataManagerError::Validation(_))));
    }
}
