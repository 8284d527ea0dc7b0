//! Turns stored trip rows into the shape the map widget draws.
//!
//! Everything here is pure: the same rows always give the same model, and no
//! input makes it fail. A trip without any path falls back to
//! [`DEFAULT_CENTER`].

use geo_types::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};

use crate::{
    coordinate::Coordinate,
    path_point::PathPoint,
    trip::{Trip, TripDetail},
    waypoint::Waypoint,
};

/// Map center used when a trip has no path vertices.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(30.28, -82.92);
pub const DEFAULT_ZOOM: u8 = 10;
pub const DEFAULT_TILES: &str = "OpenStreetMap";

/// Marker descriptor for a single waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub coordinate: Coordinate,
    pub icon_key: String,
    pub color_key: String,
}

impl From<&Waypoint> for Marker {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            label: waypoint.name.clone(),
            coordinate: waypoint.coordinate(),
            icon_key: waypoint.icon.clone(),
            color_key: waypoint.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub popup: Option<String>,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: "#00FFFF".into(),
            weight: 6,
            opacity: 0.9,
            popup: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub markers: Vec<Marker>,
    pub route: Vec<Coordinate>,
    pub center: Coordinate,
    pub zoom: u8,
    pub tiles: String,
    pub route_style: RouteStyle,
}

/// Build the render model from waypoints and path vertices, keeping their order.
pub fn to_render_model(waypoints: &[Waypoint], path: &[PathPoint]) -> RenderModel {
    let route: Vec<Coordinate> = path.iter().map(PathPoint::coordinate).collect();

    RenderModel {
        markers: waypoints.iter().map(Marker::from).collect(),
        center: map_center(&route),
        route,
        zoom: DEFAULT_ZOOM,
        tiles: DEFAULT_TILES.into(),
        route_style: RouteStyle::default(),
    }
}

/// Arithmetic mean of the route's latitudes and longitudes.
pub fn map_center(route: &[Coordinate]) -> Coordinate {
    if route.is_empty() {
        return DEFAULT_CENTER;
    }

    let n = route.len() as f64;
    let (lat_sum, lon_sum) = route.iter().fold((0.0, 0.0), |(lat, lon), c| {
        (lat + c.latitude, lon + c.longitude)
    });

    Coordinate::new(lat_sum / n, lon_sum / n)
}

impl RenderModel {
    /// Render model for a stored trip; the route popup shows the trip name.
    pub fn for_trip(trip: &Trip, detail: &TripDetail) -> Self {
        let mut model = to_render_model(&detail.waypoints, &detail.path);
        model.route_style.popup = Some(trip.name.clone());
        model
    }

    /// Markers as `Point` features followed by the route as one `LineString`.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features: Vec<Feature> = self
            .markers
            .iter()
            .map(|marker| {
                let point: Point = marker.coordinate.into();
                let mut properties = JsonObject::new();
                properties.insert("name".into(), marker.label.clone().into());
                properties.insert("icon".into(), marker.icon_key.clone().into());
                properties.insert("color".into(), marker.color_key.clone().into());
                feature(Value::from(&point), properties)
            })
            .collect();

        if !self.route.is_empty() {
            let line: LineString = self
                .route
                .iter()
                .copied()
                .map(geo_types::Coord::from)
                .collect();

            // simplestyle property names
            let mut properties = JsonObject::new();
            properties.insert("stroke".into(), self.route_style.color.clone().into());
            properties.insert("stroke-width".into(), self.route_style.weight.into());
            properties.insert("stroke-opacity".into(), self.route_style.opacity.into());
            if let Some(popup) = &self.route_style.popup {
                properties.insert("name".into(), popup.clone().into());
            }
            features.push(feature(Value::from(&line), properties));
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// One row of the waypoint summary table shown next to the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointSummaryRow {
    pub waypoint: String,
    pub latitude: String,
    pub longitude: String,
}

pub fn waypoint_summary(waypoints: &[Waypoint]) -> Vec<WaypointSummaryRow> {
    waypoints
        .iter()
        .map(|waypoint| WaypointSummaryRow {
            waypoint: waypoint.name.clone(),
            latitude: format!("{:.4}", waypoint.latitude),
            longitude: format!("{:.4}", waypoint.longitude),
        })
        .collect()
}
