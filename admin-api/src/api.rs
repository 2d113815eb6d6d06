pub use crate::ping::ping_handler;
pub use crate::report_metadata::filter_values_handler;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route(
            "/report-metadata/:data_source/:field/values",
            get(filter_values_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
