//! Account failures returned to callers

use thiserror::Error;

use super::entity::AccountId;
use super::validation::{AccountValidationError, CredentialWeakness};
use crate::domain::DomainError;

/// Generic login failure; used for unknown emails and bad credentials alike
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";

/// Business-rule failures of account operations
///
/// None of these are retryable. Store faults pass through untouched as
/// [`AccountError::Store`].
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{message}")]
    AccountNotFound { message: String },

    #[error("User account is deactivated")]
    AccountInactive,

    #[error("{message}")]
    InvalidCredential { message: String },

    #[error("{0}")]
    WeakCredential(#[from] CredentialWeakness),

    #[error("User is already active")]
    AlreadyActive,

    #[error("User is already inactive")]
    AlreadyInactive,

    #[error("{0}")]
    InvalidAccount(#[from] AccountValidationError),

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error(transparent)]
    Store(#[from] DomainError),
}

impl AccountError {
    /// Lookup by email failed; the message does not reveal which part was wrong
    pub fn unknown_email() -> Self {
        Self::AccountNotFound {
            message: INVALID_LOGIN_MESSAGE.to_string(),
        }
    }

    pub fn unknown_id(id: AccountId) -> Self {
        Self::AccountNotFound {
            message: format!("User not found with id: {}", id),
        }
    }

    pub fn invalid_login() -> Self {
        Self::InvalidCredential {
            message: INVALID_LOGIN_MESSAGE.to_string(),
        }
    }

    pub fn wrong_current_credential() -> Self {
        Self::InvalidCredential {
            message: "Current password is incorrect".to_string(),
        }
    }

    /// Short machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound { .. } => "account_not_found",
            Self::AccountInactive => "account_inactive",
            Self::InvalidCredential { .. } => "invalid_credential",
            Self::WeakCredential(_) => "weak_credential",
            Self::AlreadyActive => "already_active",
            Self::AlreadyInactive => "already_inactive",
            Self::InvalidAccount(_) => "invalid_account",
            Self::EmailTaken(_) => "email_taken",
            Self::Store(_) => "store_failure",
        }
    }
}
