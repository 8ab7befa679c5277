//! # Muza Life API
//!
//! actix-web surface of the account backend: routes, request/response DTOs,
//! JWT bearer authentication, CORS and the mapping of domain errors to
//! localized JSON responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, ApiSettings, AppState};
