//! MOBS core — the tenant domain model shared by every other crate.
//!
//! - Field validation rules ([`validation`])
//! - The [`Tenant`] and [`TenantMetadata`] entities and the status
//!   transition table
//! - Bucket name derivation ([`bucket`])
//! - Error types ([`error`])
//! - The persistence port ([`repository::TenantStore`])

pub mod bucket;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{DomainError, ErrorCode, MobsError, MobsResult, ValidationError, ValidationErrors};
pub use models::metadata::{TenantMetadata, TenantRecord};
pub use models::tenant::{Tenant, TenantStatus, is_valid_transition};
