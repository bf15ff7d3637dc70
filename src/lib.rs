//! Contact desk: public contact-form submissions and admin management over PostgreSQL,
//! exposed both as HTTP routes and as typed tools.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod tools;

pub use auth::{Authorizer, Principal, StaticTokenAuthorizer, ADMIN_CAPABILITY};
pub use config::{OffsetMode, Settings, StoreBackend};
pub use error::{AppError, ConfigError, ValidationError};
pub use model::{Contact, ContactFilter, ContactUpdate, NewContact, QueryOptions};
pub use repository::{ContactRepository, InMemoryContactRepository, PgContactRepository};
pub use routes::{app, common_routes, contact_routes};
pub use service::ContactService;
pub use state::AppState;
pub use store::{ensure_contact_table, ensure_database_exists, open_repository, seed_sample_contacts};
pub use tools::{ContactTools, ToolDescriptor, ToolError};
