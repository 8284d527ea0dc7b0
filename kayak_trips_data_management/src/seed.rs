use kayak_trips_lib::Coordinate;

use crate::descriptor::{TripDescriptor, WaypointDescriptor};

const SUWANNEE_WAYPOINTS: [(&str, [f64; 2], &str, &str); 4] = [
    ("Dowling Park River Camp (Start, Mile 113)", [30.2463, -83.2461], "fa-water", "blue"),
    ("Lafayette Blue Springs State Park (Night 1, Mile 103.3)", [30.1272, -83.2255], "fa-campground", "green"),
    ("Peacock Slough River Camp (Night 2, Mile 95.8)", [30.1024, -83.1383], "fa-campground", "green"),
    ("Adams Tract River Camp (Take-Out, Mile 85.2)", [30.0352, -83.0189], "fa-anchor", "red"),
];

const SUWANNEE_PATH: [[f64; 2]; 19] = [
    [30.2463, -83.2461], [30.2300, -83.2450], [30.2100, -83.2400], [30.1800, -83.2350],
    [30.1500, -83.2300], [30.1272, -83.2255], [30.1200, -83.2100], [30.1150, -83.2000],
    [30.1100, -83.1850], [30.1050, -83.1650], [30.1030, -83.1500], [30.1024, -83.1383],
    [30.1000, -83.1250], [30.0900, -83.1100], [30.0800, -83.0900], [30.0650, -83.0650],
    [30.0550, -83.0450], [30.0450, -83.0300], [30.0352, -83.0189],
];

/// Demonstration trip stored on first run.
pub(crate) fn suwannee_trip() -> TripDescriptor {
    TripDescriptor {
        name: "Suwannee River Kayak Adventure".into(),
        description: Some("A scenic kayak route along the Suwannee River.".into()),
        waypoints: SUWANNEE_WAYPOINTS
            .iter()
            .map(|&(name, coordinate, icon, color)| WaypointDescriptor {
                name: name.into(),
                coordinate: coordinate.into(),
                icon: icon.into(),
                color: color.into(),
            })
            .collect(),
        path: SUWANNEE_PATH.into_iter().map(Coordinate::from).collect(),
    }
}

#[test]
fn seed_trip_is_valid() {
    let trip = suwannee_trip();
    assert!(trip.validate().is_ok());
    assert_eq!(trip.waypoints.len(), 4);
    assert_eq!(trip.path.len(), 19);
}
