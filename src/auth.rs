//! Credential lookup for admin routes and tools.

use crate::config::TokenGrant;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

/// Capability required by every `/contact/admin*` route.
pub const ADMIN_CAPABILITY: &str = "manageUsers";

/// Whoever presented a recognised credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub capabilities: BTreeSet<String>,
}

impl Principal {
    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Resolves a bearer token. `None` means the token is not recognised.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authenticate(&self, token: &str) -> Option<Principal>;
}

/// Fixed token table loaded from configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenAuthorizer {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenAuthorizer {
    pub fn new(grants: &[TokenGrant]) -> Self {
        let tokens = grants
            .iter()
            .map(|g| {
                (
                    g.token.clone(),
                    Principal {
                        capabilities: g.capabilities.clone(),
                    },
                )
            })
            .collect();
        StaticTokenAuthorizer { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authorizer for StaticTokenAuthorizer {
    async fn authenticate(&self, token: &str) -> Option<Principal> {
        self.tokens.get(token).cloned()
    }
}
