use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{bookings::BookingError, journeys::JourneyServiceError};
use thiserror::Error;
use tracing::error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Journey(#[from] JourneyServiceError),
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("invalid path: {0}")]
    Path(#[from] PathRejection),
    #[error("invalid query: {0}")]
    Query(#[from] QueryRejection),
    #[error("unauthorized")]
    Unauthorized,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Booking(BookingError::Invalid { .. })
            | ApiError::Body(_)
            | ApiError::Path(_)
            | ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Booking(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Booking(_) | ApiError::Journey(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse::<()>::error(&message))).into_response()
    }
}
