use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::Member;
use crate::api::dtos::responses::FeatureStatusResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_features(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    let features = state.features.list_features(&ctx.scope()).await?;
    Ok(Json(features))
}

/// Reports a single flag. Unknown keys read as disabled.
pub async fn get_feature(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let enabled = state.features.is_feature_enabled(&ctx.tenant.id, &key).await?;
    Ok(Json(FeatureStatusResponse { key: key.trim().to_ascii_lowercase(), enabled }))
}
