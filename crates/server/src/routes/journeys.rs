use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use serde::Deserialize;
use services::services::journeys::{JourneyOverview, JourneyService, SchoolFilter};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::Query};

#[derive(Debug, Default, Deserialize)]
pub struct JourneyQuery {
    #[serde(default)]
    pub school: SchoolFilter,
    #[serde(default)]
    pub upcoming_only: bool,
}

/// GET /api/journeys
/// Derived outbound/return status for every term, plus attention list and stats
pub async fn get_journeys(
    State(state): State<AppState>,
    Query(query): Query<JourneyQuery>,
) -> Result<ResponseJson<ApiResponse<JourneyOverview>>, ApiError> {
    let overview = JourneyService::new(state.db().pool.clone())
        .overview(query.school, query.upcoming_only)
        .await?;
    Ok(ResponseJson(ApiResponse::success(overview)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/journeys", get(get_journeys))
}
