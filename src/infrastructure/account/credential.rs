//! Credential storage encoding

use std::fmt::Debug;

use crate::domain::DomainError;

/// How a raw credential is turned into its stored form and checked later
pub trait CredentialEncoder: Send + Sync + Debug {
    /// Produce the stored form of a raw credential
    fn encode(&self, raw: &str) -> Result<String, DomainError>;

    /// Check a raw credential against its stored form
    fn matches(&self, raw: &str, stored: &str) -> bool;
}

/// Stores credentials verbatim and compares them exactly.
///
/// This keeps the plaintext semantics the account records were created with.
/// Swapping in a hashing encoder changes what is persisted and requires
/// migrating existing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextEncoder;

impl PlainTextEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialEncoder for PlainTextEncoder {
    fn encode(&self, raw: &str) -> Result<String, DomainError> {
        Ok(raw.to_string())
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        raw == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_verbatim() {
        let encoder = PlainTextEncoder::new();
        assert_eq!(encoder.encode("OldPass123").unwrap(), "OldPass123");
    }

    #[test]
    fn test_matches_is_exact() {
        let encoder = PlainTextEncoder::new();

        assert!(encoder.matches("OldPass123", "OldPass123"));
        assert!(!encoder.matches("oldpass123", "OldPass123"));
        assert!(!encoder.matches("OldPass123 ", "OldPass123"));
        assert!(!encoder.matches("", "OldPass123"));
    }
}
