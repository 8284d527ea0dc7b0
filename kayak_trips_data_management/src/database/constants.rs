pub const TRIPS_TABLE_NAME: &str = "trips";
pub const POINTS_TABLE_NAME: &str = "points";
pub const PATHS_TABLE_NAME: &str = "paths";

pub const ID: &str = "id";
pub const TRIP_ID: &str = "trip_id";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const ICON: &str = "icon";
pub const COLOR: &str = "color";
