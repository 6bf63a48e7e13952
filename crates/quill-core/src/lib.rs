//! # Quill Core
//!
//! The domain layer of the Quill posts service.
//! This crate contains the post model, input validation and the service
//! façade, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::DomainError;
pub use service::PostService;
pub use validation::ValidationErrors;
