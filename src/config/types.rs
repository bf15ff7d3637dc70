//! Runtime settings for the server and tool binaries.

use std::collections::BTreeSet;

/// Where contacts are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local map; lost on restart. For local development and tests.
    Memory,
}

/// How a 1-based `page` is turned into a row offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OffsetMode {
    /// `offset = page * limit`. Page 1 skips the first `limit` rows.
    #[default]
    PageTimesLimit,
    /// `offset = (page - 1) * limit`.
    OneBased,
}

/// A bearer token and the capabilities it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub capabilities: BTreeSet<String>,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub store: StoreBackend,
    pub max_connections: u32,
    pub access_tokens: Vec<TokenGrant>,
    pub offset_mode: OffsetMode,
    /// Prefix for contact routes, e.g. `/v1`. Empty mounts at the root.
    pub api_prefix: String,
    pub body_limit_bytes: usize,
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/contacts".into(),
            bind_addr: "0.0.0.0:3000".into(),
            store: StoreBackend::Postgres,
            max_connections: 5,
            access_tokens: Vec::new(),
            offset_mode: OffsetMode::default(),
            api_prefix: "/v1".into(),
            body_limit_bytes: 64 * 1024,
            seed_sample_data: false,
        }
    }
}
