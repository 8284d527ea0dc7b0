use std::{path::Path, sync::Arc};

use axum::{
    extract::{Path as UrlPath, Request, State},
    http::{header, StatusCode},
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kayak_trips_data_management::DataManagerError;
use kayak_trips_lib::{
    render::{RenderModel, WaypointSummaryRow},
    Trip, TripDetail,
};
use serde::Serialize;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use crate::server_state::ServerState;

pub fn router(state: Arc<ServerState>, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/trips", get(get_trips).post(create_trip))
        .route("/trips/{trip_id}", get(get_trip))
        .route("/trips/{trip_id}/render", get(get_render_model))
        .route("/trips/{trip_id}/summary", get(get_summary))
        .route("/trips/{trip_id}/geojson", get(get_geojson));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))));
    }

    router
        .with_state(state)
        .layer(from_fn(log_request))
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;
    tracing::debug!("{} {} -> {}", method, path, response.status());
    response
}

pub struct ApiError(DataManagerError);

impl From<DataManagerError> for ApiError {
    fn from(error: DataManagerError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DataManagerError::Parse(_) | DataManagerError::Validation(_) => StatusCode::BAD_REQUEST,
            DataManagerError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        } else {
            tracing::warn!("Rejected request: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
struct TripResponse {
    #[serde(flatten)]
    trip: Trip,
    #[serde(flatten)]
    detail: TripDetail,
}

async fn get_trips(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<Trip>>, ApiError> {
    Ok(Json(state.data_manager.get_trips().await?))
}

/// Body is a trip descriptor. Parsed here rather than by `Json` so that
/// malformed input gets the same error shape as every other failure.
async fn create_trip(State(state): State<Arc<ServerState>>, body: String) -> Result<Response, ApiError> {
    let trip_id = state.data_manager.create_trip_from_json(&body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "trip_id": trip_id }))).into_response())
}

async fn get_trip(State(state): State<Arc<ServerState>>, UrlPath(trip_id): UrlPath<i64>) -> Result<Json<TripResponse>, ApiError> {
    let trip = state.data_manager.get_trip(trip_id).await?;
    let detail = state.data_manager.get_trip_detail(trip_id).await?;
    Ok(Json(TripResponse { trip, detail }))
}

async fn get_render_model(State(state): State<Arc<ServerState>>, UrlPath(trip_id): UrlPath<i64>) -> Result<Json<RenderModel>, ApiError> {
    Ok(Json(state.data_manager.get_render_model(trip_id).await?))
}

async fn get_summary(State(state): State<Arc<ServerState>>, UrlPath(trip_id): UrlPath<i64>) -> Result<Json<Vec<WaypointSummaryRow>>, ApiError> {
    Ok(Json(state.data_manager.get_waypoint_summary(trip_id).await?))
}

async fn get_geojson(State(state): State<Arc<ServerState>>, UrlPath(trip_id): UrlPath<i64>) -> Result<Response, ApiError> {
    let model = state.data_manager.get_render_model(trip_id).await?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], Json(model.to_geojson())).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use kayak_trips_data_management::{config::DatabaseConfig, DataManager};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("server.db"),
        };
        let data_manager = DataManager::start(&config).await.unwrap();
        data_manager.seed_if_empty().await.unwrap();

        let state = Arc::new(ServerState { data_manager });
        (dir, router(state, None))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn lists_seeded_trip() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, get("/trips")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Suwannee River Kayak Adventure");
    }

    #[tokio::test]
    async fn trip_detail_includes_rows() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, get("/trips/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["trip_id"], 1);
        assert_eq!(body["waypoints"].as_array().unwrap().len(), 4);
        assert_eq!(body["path"].as_array().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn created_trip_renders() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, post("/trips", r#"{
            "name": "Test run",
            "waypoints": [{ "name": "X", "coordinate": [30.1, -83.1], "icon": "fa-star", "color": "orange" }],
            "path": [[30.0, -83.0], [30.2, -83.2]]
        }"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let trip_id = body["trip_id"].as_i64().unwrap();

        let (status, model) = send(&app, get(&format!("/trips/{trip_id}/render"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model["markers"][0]["label"], "X");
        assert_eq!(model["markers"][0]["coordinate"], json!([30.1, -83.1]));
        assert_eq!(model["route"].as_array().unwrap().len(), 2);
        assert!((model["center"][0].as_f64().unwrap() - 30.1).abs() < 1e-9);

        let (status, summary) = send(&app, get(&format!("/trips/{trip_id}/summary"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary[0]["latitude"], "30.1000");
    }

    #[tokio::test]
    async fn malformed_and_invalid_trips_are_bad_requests() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, post("/trips", "{ not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Malformed JSON"));

        let (status, _) = send(&app, post("/trips", r#"{ "name": "" }"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, trips) = send(&app, get("/trips")).await;
        assert_eq!(trips.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, get("/trips/99/render")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Trip 99 does not exist");
    }

    #[tokio::test]
    async fn geojson_has_geo_content_type() {
        let (_dir, app) = app().await;

        let response = app.clone().oneshot(get("/trips/1/geojson")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/geo+json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let collection: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(collection["features"].as_array().unwrap().len(), 5);
    }
}
