//! Thin HTTP surface: DTO mapping and status translation only.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ApiHandlers;
pub use routes::api_routes;
