//! Submission client: canned replies for local development, or HTTP against the contact API.

use crate::model::{ContactFormData, ContactResponse};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/v1";
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const MOCK_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";
pub const MOCK_RECEIPT_ID: &str = "contact-mock";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("could not reach the contact service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Where submissions go.
#[derive(Debug, Clone)]
pub enum ContactClient {
    Mock { delay: Duration },
    Http { client: Client, base_url: String },
}

impl ContactClient {
    pub fn mock() -> Self {
        ContactClient::Mock {
            delay: DEFAULT_MOCK_DELAY,
        }
    }

    pub fn http(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!("CONTACT_API_BASE_URL: not an http(s) URL: {base_url}")));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ContactClient::Http { client, base_url })
    }

    /// `CONTACT_USE_MOCK_DATA=true` selects the mock; otherwise HTTP to `CONTACT_API_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_mock = lookup("CONTACT_USE_MOCK_DATA")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if use_mock {
            return Ok(Self::mock());
        }
        let base = lookup("CONTACT_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::http(base.trim())
    }

    pub async fn submit(&self, data: &ContactFormData) -> Result<ContactResponse, ClientError> {
        match self {
            ContactClient::Mock { delay } => {
                tracing::debug!(?delay, "mock contact submission");
                tokio::time::sleep(*delay).await;
                Ok(ContactResponse {
                    success: true,
                    message: MOCK_MESSAGE.into(),
                    id: Some(MOCK_RECEIPT_ID.into()),
                })
            }
            ContactClient::Http { client, base_url } => {
                let url = format!("{base_url}/contact");
                let response = client.post(&url).json(data).send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.bytes().await.unwrap_or_default();
                    let message = rejection_message(status, &body);
                    tracing::info!(status = status.as_u16(), %message, "contact submission rejected");
                    return Err(ClientError::Rejected {
                        status: status.as_u16(),
                        message,
                    });
                }
                Ok(response.json::<ContactResponse>().await?)
            }
        }
    }
}

/// Server message from an `{"error":{"message":...}}` body, or the status reason.
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string())
}
