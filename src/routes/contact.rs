//! Contact routes: public submission plus admin management.

use crate::handlers::contact::{create_contact, delete_contact, get_contact, list_contacts, update_contact};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn contact_routes(state: AppState) -> Router {
    Router::new()
        .route("/contact", post(create_contact))
        .route("/contact/admin", get(list_contacts))
        .route(
            "/contact/admin/:contact_id",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .with_state(state)
}
