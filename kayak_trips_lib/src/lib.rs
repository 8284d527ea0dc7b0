pub mod coordinate;
pub mod path_point;
pub mod render;
pub mod trip;
pub mod waypoint;

pub use coordinate::Coordinate;
pub use path_point::PathPoint;
pub use trip::{Trip, TripDetail};
pub use waypoint::Waypoint;
