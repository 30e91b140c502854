//! MOBS Service — tenant lifecycle orchestration over a
//! [`TenantStore`](mobs_core::repository::TenantStore).

pub mod service;

pub use service::TenantService;
