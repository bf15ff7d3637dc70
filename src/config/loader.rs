//! Load settings from the process environment (after `.env`) or any key lookup.

use crate::config::types::{OffsetMode, Settings, StoreBackend, TokenGrant};
use crate::error::ConfigError;
use std::collections::BTreeSet;

impl Settings {
    /// Read settings from the environment. Call `dotenvy::dotenv()` first to honour `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();
        if let Some(v) = lookup("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = v;
        }
        if let Some(v) = lookup("CONTACT_STORE") {
            s.store = parse_store(&v)?;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            s.max_connections = v
                .trim()
                .parse()
                .ok()
                .filter(|n: &u32| *n >= 1)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DB_MAX_CONNECTIONS",
                    reason: format!("'{}' is not a positive integer", v),
                })?;
        }
        if let Some(v) = lookup("ACCESS_TOKENS") {
            s.access_tokens = parse_access_tokens(&v)?;
        }
        if let Some(v) = lookup("CONTACT_PAGE_OFFSET") {
            s.offset_mode = parse_offset_mode(&v)?;
        }
        if let Some(v) = lookup("API_PREFIX") {
            s.api_prefix = normalize_prefix(&v);
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            s.body_limit_bytes = v
                .trim()
                .parse()
                .ok()
                .filter(|n: &usize| *n >= 1)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "BODY_LIMIT_BYTES",
                    reason: format!("'{}' is not a positive byte count", v),
                })?;
        }
        if let Some(v) = lookup("SEED_SAMPLE_DATA") {
            s.seed_sample_data = v.trim().eq_ignore_ascii_case("true") || v.trim() == "1";
        }
        if s.store == StoreBackend::Postgres && s.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(s)
    }
}

fn parse_store(v: &str) -> Result<StoreBackend, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
        "memory" => Ok(StoreBackend::Memory),
        other => Err(ConfigError::Invalid {
            key: "CONTACT_STORE",
            reason: format!("unknown store '{}' (expected postgres or memory)", other),
        }),
    }
}

fn parse_offset_mode(v: &str) -> Result<OffsetMode, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "page_times_limit" => Ok(OffsetMode::PageTimesLimit),
        "one_based" => Ok(OffsetMode::OneBased),
        other => Err(ConfigError::Invalid {
            key: "CONTACT_PAGE_OFFSET",
            reason: format!("unknown mode '{}' (expected page_times_limit or one_based)", other),
        }),
    }
}

/// `token:cap|cap;token:cap`. Empty entries are skipped.
fn parse_access_tokens(v: &str) -> Result<Vec<TokenGrant>, ConfigError> {
    let mut out = Vec::new();
    for entry in v.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (token, caps) = entry.split_once(':').ok_or_else(|| ConfigError::Invalid {
            key: "ACCESS_TOKENS",
            reason: "each entry must look like token:capability".into(),
        })?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKENS",
                reason: "empty token".into(),
            });
        }
        let capabilities: BTreeSet<String> = caps
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        out.push(TokenGrant {
            token: token.to_string(),
            capabilities,
        });
    }
    Ok(out)
}

fn normalize_prefix(v: &str) -> String {
    let trimmed = v.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
