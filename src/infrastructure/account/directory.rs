//! Account directory: registration and profile management

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::{
    check_credential_strength, validate_email, validate_name, AccountError, AccountId,
    AccountSort, AccountStore, AccountView, NewAccount, UserAccount,
};
use crate::domain::DomainError;

use super::credential::CredentialEncoder;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    pub name: String,
    pub email: String,
    pub credential: String,
}

/// Request for updating an account profile; absent fields are left alone
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Account directory over an [`AccountStore`]
#[derive(Debug)]
pub struct AccountDirectory<S: AccountStore, E: CredentialEncoder> {
    store: Arc<S>,
    encoder: Arc<E>,
}

impl<S: AccountStore, E: CredentialEncoder> AccountDirectory<S, E> {
    pub fn new(store: Arc<S>, encoder: Arc<E>) -> Self {
        Self { store, encoder }
    }

    /// Register a new, active account
    pub async fn register(
        &self,
        request: RegisterAccountRequest,
    ) -> Result<AccountView, AccountError> {
        validate_name(&request.name)?;
        validate_email(&request.email)?;
        check_credential_strength(Some(request.credential.as_str()))?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            warn!(email = %request.email, "Registration rejected: email already registered");
            return Err(AccountError::EmailTaken(request.email));
        }

        let credential = self.encoder.encode(&request.credential)?;
        let email = request.email.clone();

        let created = self
            .store
            .insert(NewAccount {
                name: request.name,
                email: request.email,
                credential,
            })
            .await
            .map_err(|e| email_conflict(e, &email))?;

        info!(account_id = %created.id(), email = %created.email(), "Account registered");
        Ok(AccountView::from(created))
    }

    pub async fn get(&self, id: AccountId) -> Result<AccountView, AccountError> {
        self.load(id).await.map(AccountView::from)
    }

    pub async fn list(&self, sort: AccountSort) -> Result<Vec<AccountView>, AccountError> {
        let accounts = self.store.list(sort).await?;
        Ok(accounts.into_iter().map(AccountView::from).collect())
    }

    /// Change name and/or email; credential and activation state are untouched
    pub async fn update(
        &self,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> Result<AccountView, AccountError> {
        let mut account = self.load(id).await?;

        if let Some(name) = request.name {
            validate_name(&name)?;
            account.set_name(name);
        }

        if let Some(email) = request.email {
            validate_email(&email)?;

            if email != account.email() {
                if self.store.find_by_email(&email).await?.is_some() {
                    warn!(account_id = %id, email = %email, "Update rejected: email already registered");
                    return Err(AccountError::EmailTaken(email));
                }
                account.set_email(email);
            }
        }

        let email = account.email().to_string();
        let saved = self
            .store
            .save(account)
            .await
            .map_err(|e| email_conflict(e, &email))?;

        info!(account_id = %id, "Account updated");
        Ok(AccountView::from(saved))
    }

    pub async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        if !self.store.delete(id).await? {
            return Err(AccountError::unknown_id(id));
        }

        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, AccountError> {
        Ok(self.store.count().await?)
    }

    async fn load(&self, id: AccountId) -> Result<UserAccount, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::unknown_id(id))
    }
}

/// A store conflict on write means another caller took the email first
fn email_conflict(error: DomainError, email: &str) -> AccountError {
    match error {
        DomainError::Conflict { .. } => AccountError::EmailTaken(email.to_string()),
        other => AccountError::Store(other),
    }
}
