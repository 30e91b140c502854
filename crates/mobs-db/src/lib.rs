//! MOBS Database — embedded SurrealDB storage for tenant metadata.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - The [`TenantStore`](mobs_core::repository::TenantStore)
//!   implementation ([`repository::SurrealTenantStore`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
