//! Client side of the contact form: what the visitor fills in, how it is checked,
//! and how it reaches the contact API.

pub mod client;
pub mod form;
pub mod model;

pub use client::{ClientError, ContactClient};
pub use form::{ContactForm, FormStatus};
pub use model::{ContactFormData, ContactResponse, FieldErrors};
