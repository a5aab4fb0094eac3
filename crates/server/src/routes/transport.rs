use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::transport::{CreateTransport, Transport};
use services::services::bookings::BookingService;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::TermQuery;
use crate::{
    AppState,
    error::ApiError,
    extract::{Json, Path, Query},
};

/// GET /api/transport
pub async fn list_transport(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Transport>>>, ApiError> {
    let transport = BookingService::new(state.db().pool.clone())
        .list_transport(query.term_id.as_deref())
        .await?;
    Ok(ResponseJson(ApiResponse::success(transport)))
}

/// POST /api/transport
pub async fn create_transport(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransport>,
) -> Result<ResponseJson<ApiResponse<Transport>>, ApiError> {
    let transport = BookingService::new(state.db().pool.clone())
        .create_transport(&payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(transport)))
}

/// GET /api/transport/{id}
pub async fn get_transport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Transport>>, ApiError> {
    let transport = BookingService::new(state.db().pool.clone())
        .get_transport(id)
        .await?;
    Ok(ResponseJson(ApiResponse::success(transport)))
}

/// PUT /api/transport/{id}
pub async fn update_transport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTransport>,
) -> Result<ResponseJson<ApiResponse<Transport>>, ApiError> {
    let transport = BookingService::new(state.db().pool.clone())
        .update_transport(id, &payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(transport)))
}

/// DELETE /api/transport/{id}
pub async fn delete_transport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    BookingService::new(state.db().pool.clone())
        .delete_transport(id)
        .await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transport", get(list_transport).post(create_transport))
        .route(
            "/transport/{id}",
            get(get_transport).put(update_transport).delete(delete_transport),
        )
}
