use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::not_travelling::{NotTravelling, UpsertNotTravelling};
use services::services::bookings::BookingService;
use utils::response::ApiResponse;

use super::TermQuery;
use crate::{
    AppState,
    error::ApiError,
    extract::{Json, Path, Query},
};

pub async fn list_not_travelling(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<NotTravelling>>>, ApiError> {
    let records = BookingService::new(state.db().pool.clone())
        .list_not_travelling(query.term_id.as_deref())
        .await?;
    Ok(ResponseJson(ApiResponse::success(records)))
}

/// Creates the term's flag or overwrites the existing one
pub async fn set_not_travelling(
    State(state): State<AppState>,
    Path(term_id): Path<String>,
    Json(payload): Json<UpsertNotTravelling>,
) -> Result<ResponseJson<ApiResponse<NotTravelling>>, ApiError> {
    let record = BookingService::new(state.db().pool.clone())
        .set_not_travelling(&term_id, &payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(record)))
}

pub async fn clear_not_travelling(
    State(state): State<AppState>,
    Path(term_id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    BookingService::new(state.db().pool.clone())
        .clear_not_travelling(&term_id)
        .await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/not-travelling", get(list_not_travelling))
        .route(
            "/not-travelling/{term_id}",
            put(set_not_travelling).delete(clear_not_travelling),
        )
}
