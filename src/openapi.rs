//! OpenAPI document for the contact routes.

use crate::handlers::contact::{ContactPatch, ContactSubmission};
use crate::model::Contact;
use crate::response::SubmissionReceipt;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::contact::create_contact,
        crate::handlers::contact::list_contacts,
        crate::handlers::contact::get_contact,
        crate::handlers::contact::update_contact,
        crate::handlers::contact::delete_contact,
    ),
    components(schemas(Contact, SubmissionReceipt, ContactSubmission, ContactPatch)),
    modifiers(&BearerAuth),
    tags((name = "Contact", description = "Contact form submission and management"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
