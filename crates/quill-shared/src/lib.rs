//! # Quill Shared
//!
//! Wire types shared by the server and its clients.

pub mod dto;
pub mod response;

pub use dto::{PostResponse, SearchQuery};
pub use response::{ErrorResponse, ValidationErrorResponse};
