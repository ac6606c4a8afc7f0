//! Middleware components for request processing.
//!
//! Request ID tracking, request logging, and error response formatting.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::global_error_handler;
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
