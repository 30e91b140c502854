//! Tenant domain model.
//!
//! A tenant is a customer of the multi-tenant object storage system.
//! The bare [`Tenant`] only exists while a tenant is being created; the
//! long-lived, persisted form is
//! [`TenantMetadata`](crate::models::metadata::TenantMetadata).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, ErrorCode, ValidationError, ValidationErrors};
use crate::validation::{
    status_membership_message, validate_tenant_name, validate_tenant_status, validate_timestamp,
    validate_uuid,
};

/// Lifecycle state of a tenant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TenantStatus {
    /// Storage resources are being set up.
    Provisioning,
    /// Fully provisioned and operational.
    Active,
    /// Temporarily disabled.
    Suspended,
}

impl TenantStatus {
    pub const ALL: [TenantStatus; 3] = [
        TenantStatus::Provisioning,
        TenantStatus::Active,
        TenantStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Provisioning => "PROVISIONING",
            TenantStatus::Active => "ACTIVE",
            TenantStatus::Suspended => "SUSPENDED",
        }
    }

    /// Transition table. `Provisioning` is never a valid target and no
    /// state may transition to itself.
    pub fn can_transition_to(self, to: TenantStatus) -> bool {
        use TenantStatus::*;
        matches!(
            (self, to),
            (Provisioning, Active)
                | (Provisioning, Suspended)
                | (Active, Suspended)
                | (Suspended, Active)
        )
    }
}

pub fn is_valid_transition(from: TenantStatus, to: TenantStatus) -> bool {
    from.can_transition_to(to)
}

/// Shared guard for the entity-level `change_status` operations.
///
/// Returns `Ok(false)` for a same-status no-op and `Ok(true)` when the
/// caller should apply the transition.
pub(crate) fn check_transition(from: TenantStatus, to: TenantStatus) -> Result<bool, DomainError> {
    if from == to {
        return Ok(false);
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::new(
            ErrorCode::InvalidTransition,
            format!("Cannot transition from {from} to {to}"),
        ));
    }
    Ok(true)
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError {
                field: "status".into(),
                message: status_membership_message(),
            })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Tenant {
    /// UUID v4 in its textual form.
    pub(crate) tenant_id: String,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) status: TenantStatus,
}

impl Tenant {
    /// Creates a new tenant in the `Provisioning` state.
    ///
    /// The identifier and creation time are generated here; the whole
    /// entity is validated before it is returned.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationErrors> {
        let tenant = Self {
            tenant_id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            status: TenantStatus::Provisioning,
        };
        tenant.validate()?;
        Ok(tenant)
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

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.collect_errors(&mut errors);
        errors.into_result()
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        validate_uuid("tenant_id", &self.tenant_id, errors);
        validate_tenant_name("name", &self.name, errors);
        validate_timestamp("created_at", self.created_at, errors);
        validate_tenant_status("status", self.status.as_str(), errors);
    }

    pub fn change_status(&mut self, new_status: TenantStatus) -> Result<(), DomainError> {
        if check_transition(self.status, new_status)? {
            self.status = new_status;
        }
        Ok(())
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tenant{{ID: {}, Name: {}, Status: {}}}",
            self.tenant_id, self.name, self.status
        )
    }
}
