//! Storage bucket naming.

/// S3 maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

const BUCKET_PREFIX: &str = "apt-";

/// Number of tenant id characters embedded in the bucket name.
const ID_FRAGMENT_LEN: usize = 8;

/// `"apt-"` + 8-char id fragment + `"-"`.
const BUCKET_OVERHEAD: usize = BUCKET_PREFIX.len() + ID_FRAGMENT_LEN + 1;

/// Derives a bucket name of the form `apt-{id8}-{sanitized-name}`.
///
/// The name is lowercased and spaces, underscores and periods become
/// hyphens. It is truncated so the whole result fits in 63 bytes, and
/// hyphens left dangling by truncation are stripped.
///
/// This never fails. The result is not guaranteed to be a valid bucket
/// name for arbitrary input; run it through
/// [`validate_bucket_name`](crate::validation::validate_bucket_name).
pub fn generate_bucket_name(tenant_id: &str, name: &str) -> String {
    let id_fragment = tenant_id.get(..ID_FRAGMENT_LEN).unwrap_or("");

    let mut sanitized: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '_' | '.' => '-',
            other => other,
        })
        .collect();

    let max_name_len = MAX_BUCKET_NAME_LEN - BUCKET_OVERHEAD;
    if sanitized.len() > max_name_len {
        let mut end = max_name_len;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
    }

    let sanitized = sanitized.trim_end_matches('-');

    format!("{BUCKET_PREFIX}{id_fragment}-{sanitized}")
}
