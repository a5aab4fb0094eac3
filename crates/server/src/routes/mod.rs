use axum::{Router, middleware::from_fn_with_state};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::{AppState, auth::require_secret};

pub mod flights;
pub mod health;
pub mod journeys;
pub mod not_travelling;
pub mod terms;
pub mod transport;

/// Optional `?term_id=` filter shared by the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TermQuery {
    pub term_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(terms::router())
        .merge(flights::router())
        .merge(transport::router())
        .merge(not_travelling::router())
        .merge(journeys::router())
        .route_layer(from_fn_with_state(state.clone(), require_secret));

    Router::new()
        .nest("/api", health::router().merge(protected))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
