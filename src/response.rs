//! Response bodies that are not plain contacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SUBMISSION_THANKS: &str = "Thank you for your message! We will get back to you soon.";

/// Reply to a public submission. `id` is a receipt, not the stored row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    #[schema(example = "contact-1731579600000")]
    pub id: String,
}

impl SubmissionReceipt {
    pub fn issued_at(at: DateTime<Utc>) -> Self {
        SubmissionReceipt {
            success: true,
            message: SUBMISSION_THANKS.to_string(),
            id: receipt_id(at),
        }
    }
}

/// `contact-<unix millis>`.
pub fn receipt_id(at: DateTime<Utc>) -> String {
    format!("contact-{}", at.timestamp_millis())
}
