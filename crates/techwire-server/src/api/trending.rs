use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// One story in the public trending feed. Field names match the stored
/// model exactly; the carousel consumes this as-is.
#[derive(Debug, Serialize)]
pub(super) struct TrendingStoryItem {
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendingQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_trending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<Vec<TrendingStoryItem>>>, ApiError> {
    let rows = techwire_db::list_recent_stories(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| TrendingStoryItem {
            title: row.title,
            summary: row.summary,
            image_url: row.image_url,
            source_url: row.source_url,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
