//! Form payload, server reply, and client-side field checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email pattern is a valid regex: {e}"))
});

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Reply to a submission. `id` is the receipt reference, not the stored row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Per-field messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

impl ContactFormData {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        ContactFormData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Checks run before anything is sent. Empty map means the form may be submitted.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let required = [
            ("name", "Name", &self.name),
            ("email", "Email", &self.email),
            ("subject", "Subject", &self.subject),
            ("message", "Message", &self.message),
        ];
        for (field, label, value) in required {
            if value.trim().is_empty() {
                errors.insert(field, format!("{label} is required"));
            }
        }
        if !errors.contains_key("email") && !EMAIL.is_match(self.email.trim()) {
            errors.insert("email", "Please enter a valid email address".into());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFormData {
        ContactFormData {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            subject: "General Inquiry".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert!(filled().check().is_empty());
    }

    #[test]
    fn blank_fields_are_reported_individually() {
        let form = ContactFormData {
            name: "  ".into(),
            ..ContactFormData::default()
        };
        let errors = form.check();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["email"], "Email is required");
    }

    #[test]
    fn malformed_email_is_reported() {
        let form = ContactFormData {
            email: "john.example.com".into(),
            ..filled()
        };
        let errors = form.check();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "Please enter a valid email address");
    }

    #[test]
    fn receipt_id_is_optional() {
        let r: ContactResponse = serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert_eq!(r.id, None);
        let r: ContactResponse =
            serde_json::from_str(r#"{"success":true,"message":"ok","id":"contact-1"}"#).unwrap();
        assert_eq!(r.id.as_deref(), Some("contact-1"));
    }
}
