//! `SQLite` storage: connection pooling, schema migrations, and the
//! todo repository.

pub mod connection;
pub mod migrations;
pub mod repository;
