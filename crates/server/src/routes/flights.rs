use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::flight::{CreateFlight, Flight};
use services::services::bookings::BookingService;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::TermQuery;
use crate::{
    AppState,
    error::ApiError,
    extract::{Json, Path, Query},
};

/// GET /api/flights
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Flight>>>, ApiError> {
    let flights = BookingService::new(state.db().pool.clone())
        .list_flights(query.term_id.as_deref())
        .await?;
    Ok(ResponseJson(ApiResponse::success(flights)))
}

/// POST /api/flights
pub async fn create_flight(
    State(state): State<AppState>,
    Json(payload): Json<CreateFlight>,
) -> Result<ResponseJson<ApiResponse<Flight>>, ApiError> {
    let flight = BookingService::new(state.db().pool.clone())
        .create_flight(&payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(flight)))
}

/// GET /api/flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Flight>>, ApiError> {
    let flight = BookingService::new(state.db().pool.clone())
        .get_flight(id)
        .await?;
    Ok(ResponseJson(ApiResponse::success(flight)))
}

/// PUT /api/flights/{id}
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateFlight>,
) -> Result<ResponseJson<ApiResponse<Flight>>, ApiError> {
    let flight = BookingService::new(state.db().pool.clone())
        .update_flight(id, &payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(flight)))
}

/// DELETE /api/flights/{id}
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    BookingService::new(state.db().pool.clone())
        .delete_flight(id)
        .await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights).post(create_flight))
        .route(
            "/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}
