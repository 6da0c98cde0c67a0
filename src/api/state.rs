//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{AccountError, AccountId, AccountSort, AccountStore, AccountView};
use crate::infrastructure::account::{
    AccountDirectory, AccountLifecycleService, CredentialEncoder, RegisterAccountRequest,
    UpdateAccountRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<dyn AccountLifecycleTrait>,
    pub directory: Arc<dyn AccountDirectoryTrait>,
}

impl AppState {
    pub fn new(
        lifecycle: Arc<dyn AccountLifecycleTrait>,
        directory: Arc<dyn AccountDirectoryTrait>,
    ) -> Self {
        Self {
            lifecycle,
            directory,
        }
    }
}

/// Login, credential change and activation operations
#[async_trait::async_trait]
pub trait AccountLifecycleTrait: Send + Sync {
    async fn authenticate(&self, email: &str, credential: &str)
        -> Result<AccountView, AccountError>;
    async fn change_credential(
        &self,
        id: AccountId,
        current: &str,
        new: Option<&str>,
    ) -> Result<AccountView, AccountError>;
    async fn activate(&self, id: AccountId) -> Result<AccountView, AccountError>;
    async fn deactivate(&self, id: AccountId) -> Result<AccountView, AccountError>;
}

/// Registration and profile operations
#[async_trait::async_trait]
pub trait AccountDirectoryTrait: Send + Sync {
    async fn register(&self, request: RegisterAccountRequest)
        -> Result<AccountView, AccountError>;
    async fn get(&self, id: AccountId) -> Result<AccountView, AccountError>;
    async fn list(&self, sort: AccountSort) -> Result<Vec<AccountView>, AccountError>;
    async fn update(
        &self,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> Result<AccountView, AccountError>;
    async fn delete(&self, id: AccountId) -> Result<(), AccountError>;
    async fn count(&self) -> Result<usize, AccountError>;
}

#[async_trait::async_trait]
impl<S, E> AccountLifecycleTrait for AccountLifecycleService<S, E>
where
    S: AccountStore + 'static,
    E: CredentialEncoder + 'static,
{
    async fn authenticate(
        &self,
        email: &str,
        credential: &str,
    ) -> Result<AccountView, AccountError> {
        AccountLifecycleService::authenticate(self, email, credential).await
    }

    async fn change_credential(
        &self,
        id: AccountId,
        current: &str,
        new: Option<&str>,
    ) -> Result<AccountView, AccountError> {
        AccountLifecycleService::change_credential(self, id, current, new).await
    }

    async fn activate(&self, id: AccountId) -> Result<AccountView, AccountError> {
        AccountLifecycleService::activate(self, id).await
    }

    async fn deactivate(&self, id: AccountId) -> Result<AccountView, AccountError> {
        AccountLifecycleService::deactivate(self, id).await
    }
}

#[async_trait::async_trait]
impl<S, E> AccountDirectoryTrait for AccountDirectory<S, E>
where
    S: AccountStore + 'static,
    E: CredentialEncoder + 'static,
{
    async fn register(
        &self,
        request: RegisterAccountRequest,
    ) -> Result<AccountView, AccountError> {
        AccountDirectory::register(self, request).await
    }

    async fn get(&self, id: AccountId) -> Result<AccountView, AccountError> {
        AccountDirectory::get(self, id).await
    }

    async fn list(&self, sort: AccountSort) -> Result<Vec<AccountView>, AccountError> {
        AccountDirectory::list(self, sort).await
    }

    async fn update(
        &self,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> Result<AccountView, AccountError> {
        AccountDirectory::update(self, id, request).await
    }

    async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        AccountDirectory::delete(self, id).await
    }

    async fn count(&self) -> Result<usize, AccountError> {
        AccountDirectory::count(self).await
    }
}
