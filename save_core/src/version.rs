//! Version header checks

use crate::{SaveError, SaveResult};

/// Validate a version read from disk against the highest version the reader knows
///
/// Returns the found version so the caller can branch on older layouts.
pub fn check_version(type_name: &'static str, found: i32, supported: i32) -> SaveResult<i32> {
    if found < 1 {
        return Err(SaveError::InvalidVersion { type_name, found });
    }
    if found > supported {
        return Err(SaveError::VersionMismatch {
            type_name,
            found,
            supported,
        });
    }
    Ok(found)
}
