use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{AppState, error::ApiError};

/// Header carrying the family's shared secret
pub const SECRET_HEADER: &str = "x-app-secret";

pub async fn require_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    let had_secret = provided.is_some();
    let authorized = provided.is_some_and(|secret| state.secret_matches(secret));

    if authorized {
        return Ok(next.run(request).await);
    }

    warn!(
        path = %request.uri().path(),
        had_secret,
        "Rejected unauthenticated request"
    );
    Err(ApiError::Unauthorized)
}
