//! Credential strength policy and account field validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Why a proposed credential was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialWeakness {
    #[error("New password must be different from current password")]
    SameAsCurrent,

    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Errors for account profile fields
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email '{0}' is not a valid address")]
    InvalidEmail(String),
}

pub const MIN_CREDENTIAL_LENGTH: usize = 8;
const MAX_NAME_LENGTH: usize = 255;
const MAX_EMAIL_LENGTH: usize = 255;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Check a credential against the strength rules
///
/// Rules, in order, first failure wins:
/// - present and at least 8 characters
/// - at least one `A-Z`
/// - at least one `a-z`
/// - at least one `0-9`
pub fn check_credential_strength(candidate: Option<&str>) -> Result<(), CredentialWeakness> {
    let candidate = match candidate {
        Some(c) if c.chars().count() >= MIN_CREDENTIAL_LENGTH => c,
        _ => return Err(CredentialWeakness::TooShort),
    };

    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CredentialWeakness::MissingUppercase);
    }

    if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CredentialWeakness::MissingLowercase);
    }

    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(CredentialWeakness::MissingDigit);
    }

    Ok(())
}

/// Check a replacement credential: it must differ from the supplied current
/// one, then pass [`check_credential_strength`]
pub fn check_credential_change(
    current: &str,
    candidate: Option<&str>,
) -> Result<(), CredentialWeakness> {
    if candidate == Some(current) {
        return Err(CredentialWeakness::SameAsCurrent);
    }

    check_credential_strength(candidate)
}

pub fn validate_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AccountValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.is_empty() {
        return Err(AccountValidationError::EmptyEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(AccountValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(AccountValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}
