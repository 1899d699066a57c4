use todo_core::{IdentityProvider, TokenService};
use todo_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Issues tokens at login and verifies them on protected routes.
    pub tokens: TokenService,
    /// Decides which username/password pairs may log in.
    pub identity: Box<dyn IdentityProvider>,
}
