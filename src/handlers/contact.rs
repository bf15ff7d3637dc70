//! Contact handlers: public submission and admin list, read, update, delete.

use crate::error::AppError;
use crate::extractors::AdminGuard;
use crate::model::Contact;
use crate::response::SubmissionReceipt;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

/// Public contact form body.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ContactSubmission {
    #[schema(example = "John Doe")]
    name: String,
    #[schema(format = "email", example = "john@example.com")]
    email: String,
    #[schema(example = "General Inquiry")]
    subject: String,
    #[schema(example = "Hello, I have a question...")]
    message: String,
}

/// Admin update body; at least one field.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ContactPatch {
    name: Option<String>,
    #[schema(format = "email")]
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ContactListParams {
    /// Filter by sender name
    name: Option<String>,
    /// Filter by sender email
    email: Option<String>,
    /// Filter by message subject
    subject: Option<String>,
    /// `field:desc|asc`, e.g. `createdAt:desc`
    sort_by: Option<String>,
    /// Maximum number of contacts (default 10)
    #[param(minimum = 1)]
    limit: Option<u32>,
    /// Page number (default 1)
    #[param(minimum = 1)]
    page: Option<u32>,
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v).map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
        _ => AppError::BadRequest(e.body_text()),
    })
}

#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contact",
    request_body = ContactSubmission,
    responses(
        (status = 201, description = "Contact form submitted", body = SubmissionReceipt),
        (status = 400, description = "Validation error"),
        (status = 413, description = "Body too large"),
        (status = 500, description = "Internal error"),
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let new = RequestValidator::create_body(&body)?;
    state.contacts.create_contact(new).await?;
    Ok((StatusCode::CREATED, Json(SubmissionReceipt::issued_at(Utc::now()))))
}

#[utoipa::path(
    get,
    path = "/contact/admin",
    tag = "Contact",
    params(ContactListParams),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "OK", body = [Contact]),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    )
)]
pub async fn list_contacts(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let (filter, options) = RequestValidator::list_query(&params)?;
    let rows = state.contacts.query_contacts(&filter, &options).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/contact/admin/{contactId}",
    tag = "Contact",
    params(("contactId" = i32, Path, description = "Contact ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "OK", body = Contact),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contact not found"),
    )
)]
pub async fn get_contact(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let id = RequestValidator::contact_id_from_path(&contact_id)?;
    Ok(Json(state.contacts.require_contact(id).await?))
}

#[utoipa::path(
    patch,
    path = "/contact/admin/{contactId}",
    tag = "Contact",
    params(("contactId" = i32, Path, description = "Contact ID")),
    request_body = ContactPatch,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "OK", body = Contact),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contact not found"),
    )
)]
pub async fn update_contact(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Contact>, AppError> {
    let id = RequestValidator::contact_id_from_path(&contact_id)?;
    let body = json_body(body)?;
    let changes = RequestValidator::update_body(&body)?;
    Ok(Json(state.contacts.update_contact_by_id(id, &changes).await?))
}

#[utoipa::path(
    delete,
    path = "/contact/admin/{contactId}",
    tag = "Contact",
    params(("contactId" = i32, Path, description = "Contact ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "No content"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contact not found"),
    )
)]
pub async fn delete_contact(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = RequestValidator::contact_id_from_path(&contact_id)?;
    state.contacts.delete_contact_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
