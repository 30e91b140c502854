//! Field-level validation rules.
//!
//! Every validator takes a field label, the value to check and an
//! accumulator. Within one field the first failing rule is the only one
//! recorded; across fields failures accumulate.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::models::tenant::TenantStatus;

/// 3-64 chars, alphanumeric with hyphens and underscores, alphanumeric first.
static TENANT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]{2,63}$").expect("valid regex"));

/// S3 bucket charset: lowercase alphanumerics, periods and hyphens,
/// starting and ending alphanumeric.
static BUCKET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("valid regex"));

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}-[a-z]+-[0-9]$").expect("valid regex"));

pub fn validate_uuid(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(field, "cannot be empty");
        return;
    }

    if Uuid::parse_str(value).is_err() {
        errors.add(field, "must be a valid UUID");
    }
}

pub fn validate_tenant_name(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(field, "cannot be empty");
        return;
    }

    if !(3..=64).contains(&value.len()) {
        errors.add(field, "must be between 3 and 64 characters");
        return;
    }

    if !TENANT_NAME_RE.is_match(value) {
        errors.add(
            field,
            "must contain only alphanumeric characters, hyphens, and underscores",
        );
    }
}

/// The `DateTime<Utc>` default (the Unix epoch) counts as unset.
pub fn validate_timestamp(field: &str, value: DateTime<Utc>, errors: &mut ValidationErrors) {
    if value == DateTime::<Utc>::default() {
        errors.add(field, "cannot be empty");
        return;
    }

    if value > Utc::now() {
        errors.add(field, "cannot be in the future");
    }
}

/// Checks a raw status name, as read from storage or user input.
pub fn validate_tenant_status(field: &str, value: &str, errors: &mut ValidationErrors) {
    if !TenantStatus::ALL.iter().any(|s| s.as_str() == value) {
        errors.add(field, status_membership_message());
    }
}

pub(crate) fn status_membership_message() -> String {
    let names: Vec<&str> = TenantStatus::ALL.iter().map(|s| s.as_str()).collect();
    format!("must be one of [{}]", names.join(" "))
}

pub fn validate_bucket_name(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(field, "cannot be empty");
        return;
    }

    if !(3..=63).contains(&value.len()) {
        errors.add(field, "must be between 3 and 63 characters");
        return;
    }

    if value.starts_with("xn--") {
        errors.add(field, "cannot start with 'xn--'");
        return;
    }

    if value.contains("..") {
        errors.add(field, "cannot contain consecutive periods");
        return;
    }

    if value.contains(".-") || value.contains("-.") {
        errors.add(field, "cannot contain adjacent periods and hyphens");
        return;
    }

    if !BUCKET_NAME_RE.is_match(value) {
        errors.add(
            field,
            "must contain only lowercase alphanumeric characters, periods, and hyphens",
        );
    }
}

pub fn validate_region(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(field, "cannot be empty");
        return;
    }

    if !REGION_RE.is_match(value) {
        errors.add(field, "must be a valid AWS region code");
    }
}

pub fn validate_version(field: &str, value: i64, errors: &mut ValidationErrors) {
    if value < 0 {
        errors.add(field, "must be non-negative");
    }
}
