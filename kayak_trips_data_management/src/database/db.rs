use std::path::Path;

use const_format::concatcp;
use kayak_trips_lib::{Coordinate, PathPoint, Trip, TripDetail, Waypoint};
use sqlx::{
    query_as, query_scalar,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor, Pool, Sqlite, SqliteConnection,
};
use tracing::{debug, info};

use crate::{descriptor::TripDescriptor, seed, DataManagerError};

use super::constants::*;

const SELECT_TRIP: &str = concatcp!("SELECT ", ID, ", ", NAME, ", ", DESCRIPTION, " FROM ", TRIPS_TABLE_NAME);

/// Handle to the trip store. Every operation commits before it returns.
///
/// The pool holds a single connection, so writes from one process are
/// serialized. Coordinating several processes on the same file is up to the
/// caller.
#[derive(Clone)]
pub struct TripDatabase {
    pool: Pool<Sqlite>,
}

impl TripDatabase {
    pub async fn connect(path: &Path) -> Result<Self, DataManagerError> {
        info!("Opening trip database at {}", path.display());
        let options = SqliteConnectOptions::new()
            .filename(path)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options).await
            .map_err(|e| DataManagerError::database("Failed to connect to database", e))?;

        let db = Self {
            pool
        };

        db.create_schema().await?;

        Ok(db)
    }

    /// Safe to run on every startup.
    pub async fn create_schema(&self) -> Result<(), DataManagerError> {
        self.pool.execute(concatcp!("
            CREATE TABLE IF NOT EXISTS ", TRIPS_TABLE_NAME, "(",
                ID,          " INTEGER PRIMARY KEY AUTOINCREMENT,",
                NAME,        " TEXT NOT NULL,",
                DESCRIPTION, " TEXT);

            CREATE TABLE IF NOT EXISTS ", POINTS_TABLE_NAME, "(",
                ID,        " INTEGER PRIMARY KEY AUTOINCREMENT,",
                TRIP_ID,   " INTEGER NOT NULL,",
                NAME,      " TEXT NOT NULL,",
                LATITUDE,  " REAL NOT NULL,",
                LONGITUDE, " REAL NOT NULL,",
                ICON,      " TEXT NOT NULL,",
                COLOR,     " TEXT NOT NULL,
                FOREIGN KEY(", TRIP_ID, ") REFERENCES ", TRIPS_TABLE_NAME, "(", ID, "));

            CREATE TABLE IF NOT EXISTS ", PATHS_TABLE_NAME, "(",
                ID,        " INTEGER PRIMARY KEY AUTOINCREMENT,",
                TRIP_ID,   " INTEGER NOT NULL,",
                LATITUDE,  " REAL NOT NULL,",
                LONGITUDE, " REAL NOT NULL,
                FOREIGN KEY(", TRIP_ID, ") REFERENCES ", TRIPS_TABLE_NAME, "(", ID, "));
            ")).await
            .map_err(|e| DataManagerError::database("Failed to create schema", e))
            .map(|_| ())
    }

    pub async fn add_trip(&self, name: &str, description: Option<&str>) -> Result<i64, DataManagerError> {
        let mut conn = self.acquire().await?;
        insert_trip(&mut conn, name, description).await
    }

    pub async fn add_waypoint(&self, trip_id: i64, name: &str, coordinate: Coordinate, icon: &str, color: &str) -> Result<i64, DataManagerError> {
        let mut conn = self.acquire().await?;
        insert_waypoint(&mut conn, trip_id, name, coordinate, icon, color).await
    }

    pub async fn add_path_point(&self, trip_id: i64, coordinate: Coordinate) -> Result<i64, DataManagerError> {
        let mut conn = self.acquire().await?;
        insert_path_point(&mut conn, trip_id, coordinate).await
    }

    /// Inserts a trip with all of its waypoints and path in one transaction.
    /// Nothing is stored if any insert fails.
    pub async fn insert_trip_descriptor(&self, descriptor: &TripDescriptor) -> Result<i64, DataManagerError> {
        let mut tx = self.pool.begin().await
            .map_err(|e| DataManagerError::database("Failed to begin transaction", e))?;

        let trip_id = insert_descriptor_rows(&mut tx, descriptor).await?;

        tx.commit().await
            .map_err(|e| DataManagerError::database("Failed to commit trip", e))?;

        info!("Created trip {} ({}) with {} waypoints and {} path points", trip_id, descriptor.name, descriptor.waypoints.len(), descriptor.path.len());
        Ok(trip_id)
    }

    /// One-time bootstrap: stores the demonstration trip if there are no trips yet.
    pub async fn seed_if_empty(&self) -> Result<Option<i64>, DataManagerError> {
        let mut tx = self.pool.begin().await
            .map_err(|e| DataManagerError::database("Failed to begin transaction", e))?;

        if count_trips(&mut tx).await? > 0 {
            debug!("Trip store already populated, skipping seed");
            return Ok(None);
        }

        let descriptor = seed::suwannee_trip();
        let trip_id = insert_descriptor_rows(&mut tx, &descriptor).await?;

        tx.commit().await
            .map_err(|e| DataManagerError::database("Failed to commit seed trip", e))?;

        info!("Seeded empty trip store with trip {} ({})", trip_id, descriptor.name);
        Ok(Some(trip_id))
    }

    pub async fn count_trips(&self) -> Result<i64, DataManagerError> {
        let mut conn = self.acquire().await?;
        count_trips(&mut conn).await
    }

    pub async fn get_trips(&self) -> Result<Vec<Trip>, DataManagerError> {
        query_as::<_, Trip>(concatcp!(SELECT_TRIP, " ORDER BY ", ID))
            .fetch_all(&self.pool).await
            .map_err(|e| DataManagerError::database("Failed to get trips", e))
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, DataManagerError> {
        query_as::<_, Trip>(concatcp!(SELECT_TRIP, " WHERE ", ID, " = ?1"))
            .bind(trip_id)
            .fetch_optional(&self.pool).await
            .map_err(|e| DataManagerError::database("Failed to get trip", e))?
            .ok_or(DataManagerError::NotFound { trip_id })
    }

    /// Waypoints and path points of a trip, each in insertion order.
    pub async fn get_trip_detail(&self, trip_id: i64) -> Result<TripDetail, DataManagerError> {
        self.get_trip(trip_id).await?;

        let waypoints = query_as::<_, Waypoint>(concatcp!(
            "SELECT ", ID, ", ", TRIP_ID, ", ", NAME, ", ", LATITUDE, ", ", LONGITUDE, ", ", ICON, ", ", COLOR,
            " FROM ", POINTS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1 ORDER BY ", ID))
                .bind(trip_id)
                .fetch_all(&self.pool).await
                .map_err(|e| DataManagerError::database("Failed to get waypoints", e))?;

        let path = query_as::<_, PathPoint>(concatcp!(
            "SELECT ", ID, ", ", TRIP_ID, ", ", LATITUDE, ", ", LONGITUDE,
            " FROM ", PATHS_TABLE_NAME, " WHERE ", TRIP_ID, " = ?1 ORDER BY ", ID))
                .bind(trip_id)
                .fetch_all(&self.pool).await
                .map_err(|e| DataManagerError::database("Failed to get path", e))?;

        Ok(TripDetail { waypoints, path })
    }

    /// Waits for the connection to be returned and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Trip database closed");
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<Sqlite>, DataManagerError> {
        self.pool.acquire().await
            .map_err(|e| DataManagerError::database("Failed to acquire connection", e))
    }
}

async fn insert_descriptor_rows(conn: &mut SqliteConnection, descriptor: &TripDescriptor) -> Result<i64, DataManagerError> {
    let trip_id = insert_trip(conn, &descriptor.name, descriptor.description.as_deref()).await?;

    for waypoint in &descriptor.waypoints {
        insert_waypoint(conn, trip_id, &waypoint.name, waypoint.coordinate, &waypoint.icon, &waypoint.color).await?;
    }

    for coordinate in &descriptor.path {
        insert_path_point(conn, trip_id, *coordinate).await?;
    }

    Ok(trip_id)
}

async fn insert_trip(conn: &mut SqliteConnection, name: &str, description: Option<&str>) -> Result<i64, DataManagerError> {
    if name.trim().is_empty() {
        return Err(DataManagerError::Validation("Trip name must not be empty".into()));
    }

    let trip_id = query_as::<_, (i64,)>(concatcp!("
        INSERT INTO ", TRIPS_TABLE_NAME, "(", NAME, ", ", DESCRIPTION, ")
        VALUES (?1, ?2) RETURNING ", ID))
            .bind(name)
            .bind(description)
            .fetch_one(&mut *conn).await
            .map_err(|e| DataManagerError::database("Failed to insert trip", e))
            .map(|row| row.0)?;

    debug!("Inserted trip {}: {}", trip_id, name);
    Ok(trip_id)
}

async fn insert_waypoint(conn: &mut SqliteConnection, trip_id: i64, name: &str, coordinate: Coordinate, icon: &str, color: &str) -> Result<i64, DataManagerError> {
    ensure_trip_exists(conn, trip_id).await?;

    let waypoint_id = query_as::<_, (i64,)>(concatcp!("
        INSERT INTO ", POINTS_TABLE_NAME,
        "(", TRIP_ID, ", ", NAME, ", ", LATITUDE, ", ", LONGITUDE, ", ", ICON, ", ", COLOR, ")
        VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING ", ID))
            .bind(trip_id)
            .bind(name)
            .bind(coordinate.latitude)
            .bind(coordinate.longitude)
            .bind(icon)
            .bind(color)
            .fetch_one(&mut *conn).await
            .map_err(|e| insert_error(trip_id, "Failed to insert waypoint", e))
            .map(|row| row.0)?;

    debug!("Inserted waypoint {} for trip {}", waypoint_id, trip_id);
    Ok(waypoint_id)
}

async fn insert_path_point(conn: &mut SqliteConnection, trip_id: i64, coordinate: Coordinate) -> Result<i64, DataManagerError> {
    ensure_trip_exists(conn, trip_id).await?;

    let path_point_id = query_as::<_, (i64,)>(concatcp!("
        INSERT INTO ", PATHS_TABLE_NAME, "(", TRIP_ID, ", ", LATITUDE, ", ", LONGITUDE, ")
        VALUES (?1, ?2, ?3) RETURNING ", ID))
            .bind(trip_id)
            .bind(coordinate.latitude)
            .bind(coordinate.longitude)
            .fetch_one(&mut *conn).await
            .map_err(|e| insert_error(trip_id, "Failed to insert path point", e))
            .map(|row| row.0)?;

    debug!("Inserted path point {} for trip {}", path_point_id, trip_id);
    Ok(path_point_id)
}

async fn ensure_trip_exists(conn: &mut SqliteConnection, trip_id: i64) -> Result<(), DataManagerError> {
    let exists = query_scalar::<_, i64>(concatcp!("SELECT EXISTS(SELECT 1 FROM ", TRIPS_TABLE_NAME, " WHERE ", ID, " = ?1)"))
        .bind(trip_id)
        .fetch_one(&mut *conn).await
        .map_err(|e| DataManagerError::database("Failed to look up trip", e))?;

    if exists == 0 {
        return Err(DataManagerError::NotFound { trip_id });
    }
    Ok(())
}

async fn count_trips(conn: &mut SqliteConnection) -> Result<i64, DataManagerError> {
    query_scalar::<_, i64>(concatcp!("SELECT COUNT(*) FROM ", TRIPS_TABLE_NAME))
        .fetch_one(&mut *conn).await
        .map_err(|e| DataManagerError::database("Failed to count trips", e))
}

// The foreign key catches a trip that vanished between the check and the insert.
fn insert_error(trip_id: i64, context: &'static str, error: sqlx::Error) -> DataManagerError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => DataManagerError::NotFound { trip_id },
        _ => DataManagerError::database(context, error),
    }
}
