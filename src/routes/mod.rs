//! Router assembly.

mod common;
mod contact;

pub use common::common_routes;
pub use contact::contact_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common routes at the root, contact routes under `settings.api_prefix`.
pub fn app(state: AppState, settings: &Settings) -> Router {
    let contacts = contact_routes(state.clone());
    let contacts = if settings.api_prefix.is_empty() {
        contacts
    } else {
        Router::new().nest(&settings.api_prefix, contacts)
    };
    Router::new()
        .merge(common_routes(state))
        .merge(contacts)
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
