use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::{self, parse, AnalysisOptions};
use crate::sink::{self, UuidKeyGenerator};
use crate::state::AppState;
use crate::types::analysis::ActivityAnalysis;

const DEFAULT_IDENTITY: &str = "anonymous";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/process", post(process))
}

#[derive(Serialize)]
struct ProcessResponse {
    #[serde(flatten)]
    analysis: ActivityAnalysis,
    #[serde(rename = "TimeseriesPath")]
    timeseries_path: String,
}

async fn process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut threshold_power: Option<i64> = None;
    let mut identity: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::BadRequest(format!("Failed to read file bytes: {}", e))
                        })?
                        .to_vec(),
                );
            }
            "ftp" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read ftp field: {}", e))
                })?;
                let value = text.trim().parse::<i64>().map_err(|_| {
                    AppError::BadRequest(format!("ftp must be an integer, got {:?}", text))
                })?;
                threshold_power = Some(value);
            }
            "identity" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read identity field: {}", e))
                })?;
                identity = Some(text.trim().to_string()).filter(|s| !s.is_empty());
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let activity = parse::decode(&bytes)?;
    let options = AnalysisOptions {
        tolerance: state.config().simplify_tolerance,
        threshold_power,
    };

    let analysis = tokio::task::spawn_blocking(move || {
        pipeline::analyze(&activity, &options, &UuidKeyGenerator)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))??;

    let identity = identity.as_deref().unwrap_or(DEFAULT_IDENTITY);
    let timeseries_path =
        sink::upload_payload(&state, identity, &analysis.timeseries_key, &analysis.payload())
            .await?;

    tracing::info!(
        "Processed activity: {} track points, NP {:.0} W, stored at {}",
        analysis.simplified_coordinates.len(),
        analysis.normalized_power,
        timeseries_path
    );

    Ok(Json(ProcessResponse {
        analysis,
        timeseries_path,
    }))
}
