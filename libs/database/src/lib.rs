//! Database connection layer.
//!
//! Provides configuration and connection helpers for PostgreSQL via SeaORM.
//! Repositories receive a ready [`sea_orm::DatabaseConnection`]; this crate
//! owns how that connection is configured and established.

pub mod postgres;
