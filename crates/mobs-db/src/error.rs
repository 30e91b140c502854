//! Database-specific error types and conversions.

use mobs_core::error::{DomainError, MobsError};

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to encode record: {0}")]
    Encode(String),

    #[error("Corrupt record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for MobsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => DomainError::not_found(&entity, &id).into(),
            other => MobsError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use mobs_core::error::ErrorCode;

    use super::*;

    #[test]
    fn not_found_maps_to_domain_code() {
        let err: MobsError = DbError::NotFound {
            entity: "tenant".into(),
            id: "abc".into(),
        }
        .into();
        assert_eq!(err.code(), Some(ErrorCode::ResourceNotFound));
        assert!(err.is_not_found());
    }

    #[test]
    fn other_errors_become_database_errors() {
        let err: MobsError = DbError::Decode("bad status".into()).into();
        assert!(matches!(err, MobsError::Database(ref msg) if msg.contains("bad status")));
    }

    #[test]
    fn encode_failures_are_not_reported_as_corruption() {
        let err: MobsError = DbError::Encode("tenant abc: map".into()).into();
        let msg = err.to_string();
        assert!(msg.contains("Failed to encode record: tenant abc"), "{msg}");
        assert!(!msg.contains("Corrupt record"), "{msg}");
    }
}
