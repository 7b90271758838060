//! # rota-server
//!
//! Axum HTTP surface for the todo service. The router is the sole place
//! where service results and errors are translated into HTTP status codes;
//! handlers parse input, validate it at the boundary, and delegate to
//! [`rota_store::TodoService`].

pub mod config;
pub mod errors;
pub mod health;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use errors::ApiError;
pub use server::{AppState, build_router};
