//! Replacement environment naming.

use crate::domain::error::DeployError;

/// Number of random bytes in a name suffix (encoded as twice as many hex chars).
pub const SUFFIX_BYTES: usize = 4;

/// Build `"{prefix}-{hex(suffix)}"`.
#[must_use]
pub fn name_with_suffix(prefix: &str, suffix: &[u8]) -> String {
    format!("{prefix}-{}", hex::encode(suffix))
}

/// Generate a name for the replacement environment.
///
/// The suffix is 8 lowercase hex characters drawn from the OS random source.
/// No uniqueness check is made against existing environments.
///
/// # Errors
///
/// Returns [`DeployError::RandomSourceUnavailable`] if the OS random source
/// cannot be read.
pub fn replacement_name(prefix: &str) -> Result<String, DeployError> {
    let mut suffix = [0u8; SUFFIX_BYTES];
    getrandom::getrandom(&mut suffix)
        .map_err(|e| DeployError::RandomSourceUnavailable(e.to_string()))?;
    Ok(name_with_suffix(prefix, &suffix))
}
