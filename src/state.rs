//! Shared application state for all routes.

use crate::auth::Authorizer;
use crate::service::ContactService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactService,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(contacts: ContactService, authorizer: Arc<dyn Authorizer>) -> Self {
        AppState { contacts, authorizer }
    }
}
