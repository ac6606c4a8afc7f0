//! HTTP layer: routes, handlers, middleware and response DTOs.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
