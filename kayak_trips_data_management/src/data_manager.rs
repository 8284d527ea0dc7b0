use kayak_trips_lib::{
    render::{waypoint_summary, RenderModel, WaypointSummaryRow},
    Coordinate, Trip, TripDetail,
};
use tracing::{info, warn};

use crate::{
    config::DatabaseConfig, database::db::TripDatabase, descriptor::TripDescriptor,
    DataManagerError,
};

/// Session over the trip store.
///
/// Created once by the caller and passed to whatever needs the data. Call
/// [`DataManager::close`] when done; dropping it also releases the database.
#[derive(Clone)]
pub struct DataManager {
    pub(crate) database: TripDatabase,
}

/// The public interface for all kayak trip data.
impl DataManager {
    pub async fn start(config: &DatabaseConfig) -> Result<Self, DataManagerError> {
        // Create data dir if it doesn't exist
        if let Some(data_dir) = config.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !data_dir.exists() {
                warn!("Data directory {} does not exist, creating it", data_dir.display());
                std::fs::create_dir_all(data_dir).map_err(|source| DataManagerError::Io {
                    context: format!("Failed to create data directory {}", data_dir.display()),
                    source,
                })?;
            }
        }

        let database = TripDatabase::connect(&config.path).await?;
        info!("Data manager started");

        Ok(DataManager {
            database,
        })
    }

    pub async fn close(self) {
        self.database.close().await;
    }

    pub async fn add_trip(&self, name: &str, description: Option<&str>) -> Result<i64, DataManagerError> {
        self.database.add_trip(name, description).await
    }

    pub async fn add_waypoint(&self, trip_id: i64, name: &str, coordinate: Coordinate, icon: &str, color: &str) -> Result<i64, DataManagerError> {
        self.database.add_waypoint(trip_id, name, coordinate, icon, color).await
    }

    pub async fn add_path_point(&self, trip_id: i64, coordinate: Coordinate) -> Result<i64, DataManagerError> {
        self.database.add_path_point(trip_id, coordinate).await
    }

    /// Validates the descriptor, then stores the trip with its waypoints and
    /// path atomically.
    pub async fn create_trip(&self, descriptor: &TripDescriptor) -> Result<i64, DataManagerError> {
        descriptor.validate()?;
        self.database.insert_trip_descriptor(descriptor).await
    }

    pub async fn create_trip_from_json(&self, json: &str) -> Result<i64, DataManagerError> {
        let descriptor = TripDescriptor::from_json(json)?;
        self.create_trip(&descriptor).await
    }

    pub async fn seed_if_empty(&self) -> Result<Option<i64>, DataManagerError> {
        self.database.seed_if_empty().await
    }

    pub async fn get_trips(&self) -> Result<Vec<Trip>, DataManagerError> {
        self.database.get_trips().await
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, DataManagerError> {
        self.database.get_trip(trip_id).await
    }

    pub async fn get_trip_detail(&self, trip_id: i64) -> Result<TripDetail, DataManagerError> {
        self.database.get_trip_detail(trip_id).await
    }

    pub async fn get_render_model(&self, trip_id: i64) -> Result<RenderModel, DataManagerError> {
        let trip = self.database.get_trip(trip_id).await?;
        let detail = self.database.get_trip_detail(trip_id).await?;
        Ok(RenderModel::for_trip(&trip, &detail))
    }

    pub async fn get_waypoint_summary(&self, trip_id: i64) -> Result<Vec<WaypointSummaryRow>, DataManagerError> {
        let detail = self.database.get_trip_detail(trip_id).await?;
        Ok(waypoint_summary(&detail.waypoints))
    }
}
