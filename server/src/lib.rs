use anyhow::Result;
use axum::{extract::{Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use ratings_core::{
    professor_ratings, DatasetLoader, DatasetLocation, ProfessorRatings, QueryEngine, RenderedTable, SortDirection,
    TableSortController,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

pub const LOAD_ERROR_MESSAGE: &str = "Error loading professor data. Please try again later.";

#[derive(Deserialize)]
pub struct FindParams {
    pub q: String,
    #[serde(default)]
    pub details: bool,
}

#[derive(Serialize)]
pub struct FindResponse {
    pub query: String,
    pub took_s: f64,
    pub tables: Vec<CourseTable>,
}

#[derive(Serialize)]
pub struct CourseTable {
    #[serde(flatten)]
    pub table: RenderedTable,
    /// Individual reviews per professor, only when `details=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<ProfessorRatings>>,
}

#[derive(Deserialize)]
pub struct SortRequest {
    pub rows: Vec<Vec<String>>,
    pub column: usize,
    /// Column directions from previous clicks on this table.
    #[serde(default)]
    pub directions: HashMap<usize, SortDirection>,
}

#[derive(Serialize)]
pub struct SortResponse {
    pub rows: Vec<Vec<String>>,
    pub direction: SortDirection,
    pub directions: HashMap<usize, SortDirection>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine<DatasetLocation>>,
}

/// The dataset is fetched on the first query, not here, so a server started
/// before its data source is reachable still comes up.
pub fn build_app(data: &str, timeout: Duration) -> Result<Router> {
    let location = DatasetLocation::parse(data, timeout)?;
    let app_state = AppState { engine: Arc::new(QueryEngine::new(DatasetLoader::new(location))) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/professors", get(find_professors))
        .route("/api/sort", post(sort_table))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn find_professors(
    State(state): State<AppState>,
    Query(params): Query<FindParams>,
) -> Result<Json<FindResponse>, (StatusCode, Json<serde_json::Value>)> {
    let start = std::time::Instant::now();
    let (dataset, groups) = state.engine.query_with_dataset(&params.q).await.map_err(|e| {
        tracing::error!(error = %e, "find professors failed");
        (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({ "error": LOAD_ERROR_MESSAGE })))
    })?;

    let tables = groups
        .iter()
        .map(|group| CourseTable {
            table: RenderedTable::from_group(group),
            ratings: params.details.then(|| professor_ratings(&dataset, &group.course_id)),
        })
        .collect();

    Ok(Json(FindResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), tables }))
}

pub async fn sort_table(Json(req): Json<SortRequest>) -> Json<SortResponse> {
    let SortRequest { mut rows, column, directions } = req;
    let mut ctl = TableSortController::from_directions(directions);
    let direction = ctl.sort(&mut rows, column);
    Json(SortResponse { rows, direction, directions: ctl.into_directions() })
}
