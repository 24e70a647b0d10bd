use epl_auth::{AuthService, AuthSettings};
use epl_db::Database;

use std::sync::Arc;

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Database, settings: AuthSettings) -> Self {
        Self {
            auth: Arc::new(AuthService::new(db.clone(), settings)),
            db,
        }
    }
}
