use std::sync::Arc;

use db::DBService;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Per-process handles passed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    app_secret: Arc<SecretString>,
}

impl AppState {
    pub fn new(db: DBService, app_secret: SecretString) -> Self {
        Self {
            db,
            app_secret: Arc::new(app_secret),
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    /// Compare a caller-supplied secret without leaking timing information
    pub fn secret_matches(&self, candidate: &str) -> bool {
        let expected = self.app_secret.expose_secret().as_bytes();
        bool::from(expected.ct_eq(candidate.as_bytes()))
    }
}
