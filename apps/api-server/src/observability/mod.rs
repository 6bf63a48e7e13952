//! Observability module - request IDs.

mod request_id;

pub use request_id::{RequestId, request_id};

#[cfg(test)]
pub use request_id::REQUEST_ID_HEADER;
