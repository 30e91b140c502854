//! Tenant metadata — the persisted, versioned tenant aggregate.
//!
//! Every mutation bumps `version` by exactly one and refreshes
//! `last_updated_at`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::generate_bucket_name;
use crate::error::{DomainError, ErrorCode, MobsResult, ValidationErrors};
use crate::models::tenant::{Tenant, TenantStatus, check_transition};
use crate::validation::{
    validate_bucket_name, validate_region, validate_timestamp, validate_version,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "TenantRecord")]
pub struct TenantMetadata {
    tenant_id: String,
    name: String,
    created_at: DateTime<Utc>,
    status: TenantStatus,

    /// Derived from the tenant id and name, see [`generate_bucket_name`].
    bucket_name: String,
    /// AWS-style region code, e.g. `us-west-2`.
    region: String,
    last_updated_at: DateTime<Utc>,
    version: i64,
    #[serde(default)]
    provisioning_metadata: HashMap<String, String>,
}

/// Unchecked field values of a persisted aggregate.
///
/// Storage adapters and deserializers go through
/// [`TenantMetadata::restore`], which rejects any record that breaks a
/// field rule.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantRecord {
    pub tenant_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: TenantStatus,
    pub bucket_name: String,
    pub region: String,
    pub last_updated_at: DateTime<Utc>,
    pub version: i64,
    #[serde(default)]
    pub provisioning_metadata: HashMap<String, String>,
}

impl TryFrom<TenantRecord> for TenantMetadata {
    type Error = ValidationErrors;

    fn try_from(record: TenantRecord) -> Result<Self, Self::Error> {
        Self::restore(record)
    }
}

impl TenantMetadata {
    /// Builds the metadata aggregate for `tenant` placed in `region`.
    ///
    /// Fails with `INVALID_INPUT` when no tenant is given, or with the
    /// accumulated validation errors when any field is invalid.
    pub fn derive_from(tenant: Option<&Tenant>, region: &str) -> MobsResult<Self> {
        let tenant = tenant.ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidInput, "tenant cannot be nil")
        })?;

        let metadata = Self {
            tenant_id: tenant.tenant_id.clone(),
            name: tenant.name.clone(),
            created_at: tenant.created_at,
            status: tenant.status,
            bucket_name: generate_bucket_name(&tenant.tenant_id, &tenant.name),
            region: region.to_string(),
            last_updated_at: Utc::now(),
            version: 1,
            provisioning_metadata: HashMap::new(),
        };

        metadata.validate()?;
        Ok(metadata)
    }

    /// Rebuilds an aggregate from stored values, validating every field.
    pub fn restore(record: TenantRecord) -> Result<Self, ValidationErrors> {
        let metadata = Self {
            tenant_id: record.tenant_id,
            name: record.name,
            created_at: record.created_at,
            status: record.status,
            bucket_name: record.bucket_name,
            region: record.region,
            last_updated_at: record.last_updated_at,
            version: record.version,
            provisioning_metadata: record.provisioning_metadata,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> TenantStatus {
        self.status
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Every provisioning entry, for persistence.
    pub fn provisioning_entries(&self) -> &HashMap<String, String> {
        &self.provisioning_metadata
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.to_tenant().collect_errors(&mut errors);

        validate_bucket_name("bucket_name", &self.bucket_name, &mut errors);
        validate_region("region", &self.region, &mut errors);
        validate_timestamp("last_updated_at", self.last_updated_at, &mut errors);
        validate_version("version", self.version, &mut errors);

        errors.into_result()
    }

    pub fn to_tenant(&self) -> Tenant {
        Tenant {
            tenant_id: self.tenant_id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            status: self.status,
        }
    }

    /// Same transition rules as [`Tenant::change_status`]. Only a real
    /// state change bumps the version.
    pub fn change_status(&mut self, new_status: TenantStatus) -> Result<(), DomainError> {
        if check_transition(self.status, new_status)? {
            self.status = new_status;
            self.increment_version();
        }
        Ok(())
    }

    pub fn increment_version(&mut self) {
        self.last_updated_at = Utc::now();
        self.version += 1;
    }

    pub fn set_provisioning_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.provisioning_metadata.insert(key.into(), value.into());
        self.increment_version();
    }

    /// Returns the stored value and whether the key was present.
    /// A missing key yields `("", false)`.
    pub fn provisioning_metadata(&self, key: &str) -> (&str, bool) {
        match self.provisioning_metadata.get(key) {
            Some(value) => (value.as_str(), true),
            None => ("", false),
        }
    }
}

impl fmt::Display for TenantMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TenantMetadata{{ID: {}, Name: {}, Bucket: {}, Region: {}, Status: {}, Version: {}}}",
            self.tenant_id, self.name, self.bucket_name, self.region, self.status, self.version
        )
    }
}
