use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/timeseries/*path", get(timeseries))
}

async fn timeseries(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let body = state
        .get(&path)
        .ok_or_else(|| AppError::NotFound(path.clone()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
