//! Account store trait

use async_trait::async_trait;

use super::entity::{AccountId, AccountSort, NewAccount, UserAccount};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence for user accounts
///
/// Implementations own per-record atomicity; callers perform a single
/// read-modify-write per operation and do no locking of their own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by its id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserAccount>, DomainError>;

    /// Find an account by its exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Persist the full record of an existing account
    async fn save(&self, account: UserAccount) -> Result<UserAccount, DomainError>;

    /// Insert a new account, assigning it a fresh id
    async fn insert(&self, account: NewAccount) -> Result<UserAccount, DomainError>;

    /// List all accounts in the given order
    async fn list(&self, sort: AccountSort) -> Result<Vec<UserAccount>, DomainError>;

    /// Count stored accounts
    async fn count(&self) -> Result<usize, DomainError>;

    /// Remove an account; returns whether it existed
    async fn delete(&self, id: AccountId) -> Result<bool, DomainError>;
}
