//! # rota-store
//!
//! Todo domain types and the SQLite-backed storage layer.
//!
//! Layering, top to bottom:
//! - [`service::TodoService`] — async facade owning the connection pool;
//!   every call acquires a connection for its own duration only.
//! - [`sqlite::repository::TodoRepo`] — stateless SQL data access, every
//!   method takes a `&Connection`.
//! - [`sqlite::connection`] — r2d2 pool with WAL-mode pragmas.
//! - [`sqlite::migrations`] — versioned, idempotent schema migrations.

pub mod errors;
pub mod service;
pub mod sqlite;
pub mod types;

pub use errors::{Result, StoreError};
pub use service::TodoService;
pub use sqlite::connection::{ConnectionConfig, ConnectionPool, new_file, new_in_memory};
pub use sqlite::migrations::run_migrations;
pub use types::{Priority, Todo, TodoCreate, TodoPatch, ValidationError};
