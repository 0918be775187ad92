use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::grid::{CityColumn, ComplexityEntry, Record, SparseEntry, WriteOutcome, YearRow};
use crate::services::grid_service::{ColumnMajorView, RowMajorView, SparseView};
use crate::services::GridService;

#[derive(Clone)]
pub struct AppState {
    pub grid_service: GridService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    /// Date in DD/MM/YYYY format; only the year is used
    pub date: String,
    pub city: String,
}

#[derive(Serialize, ToSchema)]
pub struct WriteResponse {
    pub outcome: WriteOutcome,
}

#[derive(Serialize, ToSchema)]
pub struct ReadingResponse {
    pub city: String,
    pub year: i32,
    pub temperature: f64,
}

#[derive(Serialize, ToSchema)]
pub struct ComplexityResponse {
    pub operations: Vec<ComplexityEntry>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        insert_reading,
        delete_reading,
        get_reading,
        get_row_major,
        get_column_major,
        get_sparse,
        get_complexity
    ),
    components(schemas(
        HealthResponse,
        Record,
        DeleteRequest,
        WriteOutcome,
        WriteResponse,
        ReadingResponse,
        YearRow,
        CityColumn,
        SparseEntry,
        ComplexityEntry,
        ComplexityResponse,
        RowMajorView,
        ColumnMajorView,
        SparseView
    )),
    tags((name = "temperature-grid", description = "Yearly temperature grid by city"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/readings", post(insert_reading).delete(delete_reading))
        .route("/readings/{city}/{year}", get(get_reading))
        .route("/grid/row-major", get(get_row_major))
        .route("/grid/column-major", get(get_column_major))
        .route("/grid/sparse", get(get_sparse))
        .route("/complexity", get(get_complexity))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "temperature-grid",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/readings",
    tag = "temperature-grid",
    request_body = Record,
    responses(
        (status = 200, description = "Applied, or ignored when year/city is outside the grid", body = WriteResponse),
        (status = 400, description = "Malformed date")
    )
)]
#[instrument(skip(state, record), fields(city = %record.city, date = %record.date))]
async fn insert_reading(
    State(state): State<AppState>,
    Json(record): Json<Record>,
) -> Result<Json<WriteResponse>, StatusCode> {
    let outcome = state.grid_service.insert(&record).await.map_err(|e| {
        warn!("Rejected insert for {} on {}: {}", record.city, record.date, e);
        StatusCode::BAD_REQUEST
    })?;

    Ok(Json(WriteResponse { outcome }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/readings",
    tag = "temperature-grid",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Cleared, or ignored when year/city is outside the grid", body = WriteResponse),
        (status = 400, description = "Malformed date")
    )
)]
#[instrument(skip(state))]
async fn delete_reading(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<WriteResponse>, StatusCode> {
    let outcome = state
        .grid_service
        .delete(&request.date, &request.city)
        .await
        .map_err(|e| {
            warn!(
                "Rejected delete for {} on {}: {}",
                request.city, request.date, e
            );
            StatusCode::BAD_REQUEST
        })?;

    Ok(Json(WriteResponse { outcome }))
}

#[utoipa::path(
    get,
    path = "/api/v1/readings/{city}/{year}",
    tag = "temperature-grid",
    params(
        ("city" = String, Path, description = "City name (case-insensitive)"),
        ("year" = i32, Path, description = "Calendar year")
    ),
    responses(
        (status = 200, description = "Recorded temperature", body = ReadingResponse),
        (status = 404, description = "No reading for that city and year")
    )
)]
#[instrument(skip(state), fields(city = %city, year = %year))]
async fn get_reading(
    State(state): State<AppState>,
    Path((city, year)): Path<(String, i32)>,
) -> Result<Json<ReadingResponse>, StatusCode> {
    let temperature = state.grid_service.retrieve(&city, year).await.ok_or_else(|| {
        warn!("No reading for {} in {}", city, year);
        StatusCode::NOT_FOUND
    })?;

    info!("Retrieved {:.1} for {} in {}", temperature, city, year);
    Ok(Json(ReadingResponse {
        city,
        year,
        temperature,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/grid/row-major",
    tag = "temperature-grid",
    responses((status = 200, description = "Years in ascending order, each with per-city values", body = RowMajorView))
)]
#[instrument(skip(state))]
async fn get_row_major(State(state): State<AppState>) -> Json<RowMajorView> {
    let view = state.grid_service.row_major().await;
    debug!("Row-major view with {} rows", view.rows.len());
    Json(view)
}

#[utoipa::path(
    get,
    path = "/api/v1/grid/column-major",
    tag = "temperature-grid",
    responses((status = 200, description = "Cities in declared order, each with per-year values", body = ColumnMajorView))
)]
#[instrument(skip(state))]
async fn get_column_major(State(state): State<AppState>) -> Json<ColumnMajorView> {
    let view = state.grid_service.column_major().await;
    debug!("Column-major view with {} columns", view.columns.len());
    Json(view)
}

#[utoipa::path(
    get,
    path = "/api/v1/grid/sparse",
    tag = "temperature-grid",
    responses((status = 200, description = "Populated cells only", body = SparseView))
)]
#[instrument(skip(state))]
async fn get_sparse(State(state): State<AppState>) -> Json<SparseView> {
    let view = state.grid_service.sparse().await;
    info!("Sparse view with {} entries", view.total_entries);
    Json(view)
}

#[utoipa::path(
    get,
    path = "/api/v1/complexity",
    tag = "temperature-grid",
    responses((status = 200, description = "Big-O cost of each grid operation", body = ComplexityResponse))
)]
#[instrument(skip(state))]
async fn get_complexity(State(state): State<AppState>) -> Json<ComplexityResponse> {
    Json(ComplexityResponse {
        operations: state.grid_service.complexity_report().to_vec(),
    })
}
