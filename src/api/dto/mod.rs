//! Data Transfer Objects for API responses.
//!
//! The relay endpoint answers with the forwarded `MessageCard` itself, so the
//! only DTOs of its own are the error bodies.

mod error;

pub use error::{ErrorResponse, BAD_GATEWAY, BAD_REQUEST, INTERNAL_ERROR};
