/// Contact-form intake: validation and per-tenant storage

pub mod repository;
pub mod types;

pub use repository::{ContactRepository, CONTACT_DDL};
pub use types::{ClientMeta, ContactMethod, ContactSubmission, NewContactMessage, ValidationError};
