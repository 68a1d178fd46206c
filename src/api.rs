use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::StoreError;
use crate::h2h;
use crate::models::{H2HAnalysis, League, Team};
use crate::store::Storage;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            StoreError::InvalidInput(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            StoreError::Unexpected(err) => {
                error!("unexpected store failure: {err:#}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("internal error: {err:#}"),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn build_router<S: Storage>(store: Arc<S>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/leagues", get(get_leagues::<S>))
        .route("/league", post(post_league::<S>))
        .route("/league/:league_id/teams", get(get_teams::<S>))
        .route("/league/:league_id/upload-team", post(upload_team::<S>))
        .route("/league/:league_id/h2h", get(get_h2h::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let out = tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| StoreError::Unexpected(anyhow!("store task failed: {err}")))?;
    Ok(out?)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "H2H Predictor API running",
        "status": "online",
    }))
}

async fn get_leagues<S: Storage>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<League>>, ApiError> {
    let leagues = run_blocking(move || store.list_leagues()).await?;
    Ok(Json(leagues))
}

#[derive(Debug, Deserialize)]
pub struct LeagueCreate {
    pub name: String,
}

async fn post_league<S: Storage>(
    State(store): State<Arc<S>>,
    payload: Result<Json<LeagueCreate>, JsonRejection>,
) -> Result<Json<League>, ApiError> {
    let Json(payload) = payload?;
    let league = run_blocking(move || store.create_league(&payload.name)).await?;
    Ok(Json(league))
}

async fn get_teams<S: Storage>(
    State(store): State<Arc<S>>,
    Path(league_id): Path<String>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = run_blocking(move || store.list_teams(&league_id)).await?;
    // An absent league and an empty one answer the same way.
    if teams.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "league not found or has no teams",
        ));
    }
    Ok(Json(teams))
}

async fn upload_team<S: Storage>(
    State(store): State<Arc<S>>,
    Path(league_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Team>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::new(err.status(), format!("invalid upload: {err}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("upload has no file name"))?;
        let content = field
            .bytes()
            .await
            .map_err(|err| ApiError::new(err.status(), format!("invalid upload: {err}")))?;
        upload = Some((file_name, content));
        break;
    }
    let (file_name, content) =
        upload.ok_or_else(|| ApiError::bad_request("missing multipart field 'file'"))?;

    let team = run_blocking(move || store.save_team_csv(&league_id, &file_name, &content)).await?;
    info!(team_id = %team.team_id, "team uploaded");
    Ok(Json(team))
}

#[derive(Debug, Deserialize)]
pub struct H2hParams {
    pub home: Option<String>,
    pub away: Option<String>,
}

fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(format!("missing query parameter '{name}'")))
}

async fn get_h2h<S: Storage>(
    State(store): State<Arc<S>>,
    Path(league_id): Path<String>,
    params: Result<Query<H2hParams>, QueryRejection>,
) -> Result<Json<H2HAnalysis>, ApiError> {
    let Query(params) = params?;
    let home = required_param(params.home, "home")?;
    let away = required_param(params.away, "away")?;
    let analysis = run_blocking(move || {
        h2h::analyze_h2h(store.as_ref(), &league_id, &home, &away)
    })
    .await?;
    Ok(Json(analysis))
}
