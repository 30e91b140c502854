//! SurrealDB repository implementations.

mod tenant;

pub use tenant::SurrealTenantStore;
