//! # Primary Key Validator
//!
//! The client-facing contract allows exactly one primary-key property per
//! object type. The IR's key list is flattened into that scalar here.

use crate::error::PrimaryKeyError;

/// Return the sole primary key.
///
/// # Errors
///
/// [`PrimaryKeyError::Missing`] for an empty list and
/// [`PrimaryKeyError::Composite`] for two or more keys. A composite key is
/// never narrowed to one of its members.
pub fn single_primary_key(keys: &[String]) -> Result<&str, PrimaryKeyError> {
    match keys {
        [key] => Ok(key.as_str()),
        [] => Err(PrimaryKeyError::Missing),
        _ => Err(PrimaryKeyError::Composite {
            keys: keys.to_vec(),
        }),
    }
}
