//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, warn};

use crate::catalog::CatalogError;
use crate::geocode::Geocoder;
use crate::optimizer::{ErrorKind, RouteError, RouteQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G: Geocoder + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimize_route", post(optimize_route::<G>))
        .route(
            "/stations",
            get(list_stations::<G>).post(upload_stations::<G>),
        )
        .route("/stations/reload", post(reload_stations::<G>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find stations in range of the start and a route link to the destination.
async fn optimize_route<G: Geocoder + 'static>(
    State(state): State<AppState<G>>,
    payload: Result<Json<OptimizeRouteRequest>, JsonRejection>,
) -> Result<Json<OptimizeRouteResponse>, AppError> {
    let Json(req) = payload?;
    let query = RouteQuery::from(req);
    let result = state.optimizer.optimize(&query).await?;
    Ok(Json(result.into()))
}

/// List the current catalog.
async fn list_stations<G: Geocoder + 'static>(
    State(state): State<AppState<G>>,
) -> Json<StationListResponse> {
    let response = match state.optimizer.catalog().snapshot().await {
        Some(snapshot) => StationListResponse {
            count: snapshot.len(),
            loaded_at: Some(snapshot.loaded_at()),
            source: Some(snapshot.source().to_string()),
            stations: snapshot.stations().iter().map(StationView::from).collect(),
        },
        None => StationListResponse {
            count: 0,
            loaded_at: None,
            source: None,
            stations: Vec::new(),
        },
    };

    Json(response)
}

/// Replace the catalog with an uploaded CSV body.
async fn upload_stations<G: Geocoder + 'static>(
    State(state): State<AppState<G>>,
    body: Bytes,
) -> Result<Json<CatalogLoadResponse>, AppError> {
    let loaded = state
        .optimizer
        .catalog()
        .load_reader(body.as_ref(), "upload")
        .await?;

    Ok(Json(CatalogLoadResponse { loaded }))
}

/// Re-read the configured station file.
async fn reload_stations<G: Geocoder + 'static>(
    State(state): State<AppState<G>>,
) -> Result<Json<CatalogLoadResponse>, AppError> {
    let loaded = state.optimizer.catalog().refresh().await?;
    Ok(Json(CatalogLoadResponse { loaded }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "bad_input"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadGateway { .. } => (StatusCode::BAD_GATEWAY, "service_error"),
            AppError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "no_data"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Unavailable { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e.kind() {
            ErrorKind::BadInput => AppError::BadRequest { message },
            ErrorKind::NotFound => AppError::NotFound { message },
            ErrorKind::ServiceError => AppError::BadGateway { message },
            ErrorKind::NoData => AppError::Unavailable { message },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let message = e.to_string();
        match e {
            CatalogError::DataFormat { .. } | CatalogError::NoSource => {
                AppError::BadRequest { message }
            }
            CatalogError::Io { .. } => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = self.message().to_string();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            kind,
        });
        (status, body).into_response()
    }
}
