use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::term::Term;
use serde::Deserialize;
use services::services::{bookings::BookingService, journeys::SchoolFilter};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::Query};

#[derive(Debug, Default, Deserialize)]
pub struct TermsQuery {
    #[serde(default)]
    pub school: SchoolFilter,
}

/// GET /api/terms
/// Term calendar for one or both schools, earliest first
pub async fn list_terms(
    State(state): State<AppState>,
    Query(query): Query<TermsQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Term>>>, ApiError> {
    let terms = BookingService::new(state.db().pool.clone())
        .list_terms(query.school.school())
        .await?;
    Ok(ResponseJson(ApiResponse::success(terms)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/terms", get(list_terms))
}
