//! HTTP router construction.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, store::Store};

/// Build the application router with all routes and middleware.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Account routes
        .route(
            "/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route("/accounts/{id}", get(handlers::accounts::get_account))
        .route(
            "/accounts/{id}/entries",
            get(handlers::accounts::list_entries),
        )
        // Transfer routes
        .route("/transfers", post(handlers::transfers::create_transfer))
        .route("/transfers/{id}", get(handlers::transfers::get_transfer))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Router over a pool that never connects; for tests of request validation.
#[cfg(test)]
pub(crate) fn test_router() -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://localhost:1/unreachable")
        .expect("lazy pool");

    router(Store::new(pool, std::time::Duration::from_millis(200)))
}
