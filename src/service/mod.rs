//! ContactService and request validation.

mod contact;
pub mod validation;
pub use contact::{ContactService, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use validation::{ContactFields, ListRequest, RequestValidator};
