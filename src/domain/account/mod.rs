//! Account domain
//!
//! Account entities, the credential strength policy, typed failures and the
//! store trait the account services depend on.

mod entity;
mod error;
mod repository;
mod validation;

pub use entity::{AccountId, AccountSort, AccountView, NewAccount, UserAccount};
pub use error::{AccountError, INVALID_LOGIN_MESSAGE};
pub use repository::AccountStore;
pub use validation::{
    check_credential_change, check_credential_strength, validate_email, validate_name,
    AccountValidationError, CredentialWeakness, MIN_CREDENTIAL_LENGTH,
};

#[cfg(test)]
pub use repository::MockAccountStore;
