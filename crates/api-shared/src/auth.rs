//! API key checks for mutating endpoints.

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing x-api-key header")]
    MissingKey,
    #[error("Invalid API key")]
    InvalidKey,
}

/// Validates the provided API key against the expected one.
///
/// Returns `Ok(())` if the key matches, or an error if it is missing or wrong.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: &str) -> Result<(), AuthError> {
    let provided_key = provided_key.ok_or(AuthError::MissingKey)?;

    if constant_time_eq(provided_key.as_bytes(), expected_key.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::InvalidKey)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_key() {
        assert_eq!(validate_api_key(Some("s3cret"), "s3cret"), Ok(()));
    }

    #[test]
    fn rejects_missing_and_wrong_keys() {
        assert_eq!(validate_api_key(None, "s3cret"), Err(AuthError::MissingKey));
        assert_eq!(
            validate_api_key(Some("s3cre"), "s3cret"),
            Err(AuthError::InvalidKey)
        );
        assert_eq!(
            validate_api_key(Some("S3CRET"), "s3cret"),
            Err(AuthError::InvalidKey)
        );
    }
}
