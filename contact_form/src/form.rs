//! Form controller: field values, per-field errors, and submission status.

use crate::client::{ClientError, ContactClient};
use crate::model::{ContactFormData, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub data: ContactFormData,
    errors: FieldErrors,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Set one field by name and clear its error. Unknown names are ignored.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        let slot = match field {
            "name" => &mut self.data.name,
            "email" => &mut self.data.email,
            "subject" => &mut self.data.subject,
            "message" => &mut self.data.message,
            _ => return,
        };
        *slot = value.into();
        self.errors.retain(|k, _| *k != field);
    }

    /// Check, send once, and record the outcome. Fields are cleared only on success.
    /// Dropping the returned future mid-flight puts the form back to `Idle`.
    pub async fn submit(&mut self, client: &ContactClient) -> &FormStatus {
        self.errors = self.data.check();
        if !self.errors.is_empty() {
            self.status = FormStatus::Failed {
                message: "Please correct the highlighted fields".into(),
            };
            return &self.status;
        }

        let payload = self.data.trimmed();
        let in_flight = InFlight::start(&mut self.status);
        let outcome = client.submit(&payload).await;
        *in_flight.status = match outcome {
            Ok(reply) if reply.success => {
                self.data = ContactFormData::default();
                FormStatus::Succeeded { message: reply.message }
            }
            Ok(reply) => FormStatus::Failed { message: reply.message },
            Err(e) => {
                tracing::warn!(error = %e, "contact form submission failed");
                FormStatus::Failed {
                    message: failure_message(&e),
                }
            }
        };
        drop(in_flight);
        &self.status
    }
}

/// Holds the status at `Submitting` while a request is outstanding.
struct InFlight<'a> {
    status: &'a mut FormStatus,
}

impl<'a> InFlight<'a> {
    fn start(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Submitting;
        InFlight { status }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if *self.status == FormStatus::Submitting {
            *self.status = FormStatus::Idle;
        }
    }
}

fn failure_message(e: &ClientError) -> String {
    match e {
        ClientError::Rejected { message, .. } => message.clone(),
        _ => "Failed to send message. Please try again later.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MOCK_MESSAGE;
    use std::time::Duration;

    fn instant_mock() -> ContactClient {
        ContactClient::Mock { delay: Duration::ZERO }
    }

    fn fill(form: &mut ContactForm) {
        form.set_field("name", " Ada ");
        form.set_field("email", "ada@example.com");
        form.set_field("subject", "Hello");
        form.set_field("message", "Question about pricing");
    }

    #[tokio::test]
    async fn success_resets_fields() {
        let mut form = ContactForm::new();
        fill(&mut form);
        let status = form.submit(&instant_mock()).await.clone();
        assert_eq!(
            status,
            FormStatus::Succeeded {
                message: MOCK_MESSAGE.into()
            }
        );
        assert_eq!(form.data, ContactFormData::default());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn invalid_fields_block_submission_and_keep_values() {
        let mut form = ContactForm::new();
        fill(&mut form);
        form.set_field("email", "not an email");
        let status = form.submit(&instant_mock()).await.clone();
        assert!(matches!(status, FormStatus::Failed { .. }));
        assert_eq!(form.errors().len(), 1);
        assert!(form.errors().contains_key("email"));
        assert_eq!(form.data.email, "not an email");

        form.set_field("email", "ada@example.com");
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_keeps_values() {
        let mut form = ContactForm::new();
        fill(&mut form);
        // Nothing listens on port 9 locally; the connect fails fast.
        let client = ContactClient::http("http://127.0.0.1:9/v1").unwrap();
        let status = form.submit(&client).await.clone();
        assert_eq!(
            status,
            FormStatus::Failed {
                message: "Failed to send message. Please try again later.".into()
            }
        );
        assert_eq!(form.data.name, " Ada ");
    }

    #[tokio::test]
    async fn cancelled_submission_can_be_retried() {
        let mut form = ContactForm::new();
        fill(&mut form);
        let slow = ContactClient::Mock {
            delay: Duration::from_secs(5),
        };
        assert!(tokio::time::timeout(Duration::from_millis(20), form.submit(&slow))
            .await
            .is_err());
        assert_eq!(form.status(), &FormStatus::Idle);
        assert_eq!(form.data.name, " Ada ");

        let status = form.submit(&instant_mock()).await.clone();
        assert!(matches!(status, FormStatus::Succeeded { .. }));
        assert_eq!(form.data, ContactFormData::default());
    }

    #[test]
    fn unknown_field_is_ignored() {
        let mut form = ContactForm::new();
        form.set_field("password", "x");
        assert_eq!(form.data, ContactFormData::default());
        assert_eq!(form.status(), &FormStatus::Idle);
    }
}
