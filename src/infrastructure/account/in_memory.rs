//! In-memory account store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{AccountId, AccountSort, AccountStore, NewAccount, UserAccount};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<AccountId, UserAccount>,
    /// email -> id
    email_index: HashMap<String, AccountId>,
    /// Last id handed out; ids are never reused after a delete
    last_id: i64,
}

/// In-memory implementation of [`AccountStore`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryAccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing accounts
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        let mut state = Accounts::default();

        for account in accounts {
            state.last_id = state.last_id.max(account.id().value());
            state
                .email_index
                .insert(account.email().to_string(), account.id());
            state.by_id.insert(account.id(), account);
        }

        Self {
            accounts: Arc::new(RwLock::new(state)),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.by_id.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;

        Ok(accounts
            .email_index
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn save(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let mut guard = self.accounts.write().await;
        let accounts = &mut *guard;

        let old_email = match accounts.by_id.get(&account.id()) {
            Some(existing) => existing.email().to_string(),
            None => {
                return Err(DomainError::not_found(format!(
                    "Account '{}' not found",
                    account.id()
                )));
            }
        };

        if old_email != account.email() {
            if accounts.email_index.contains_key(account.email()) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    account.email()
                )));
            }

            accounts.email_index.remove(&old_email);
            accounts
                .email_index
                .insert(account.email().to_string(), account.id());
        }

        accounts.by_id.insert(account.id(), account.clone());

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> Result<UserAccount, DomainError> {
        let mut guard = self.accounts.write().await;
        let accounts = &mut *guard;

        if accounts.email_index.contains_key(&account.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                account.email
            )));
        }

        accounts.last_id += 1;
        let id = AccountId::new(accounts.last_id);
        let created = UserAccount::new(id, account.name, account.email, account.credential);

        accounts.email_index.insert(created.email().to_string(), id);
        accounts.by_id.insert(id, created.clone());

        Ok(created)
    }

    async fn list(&self, sort: AccountSort) -> Result<Vec<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;

        let mut result: Vec<UserAccount> = accounts.by_id.values().cloned().collect();
        sort.apply(&mut result);

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.by_id.len())
    }

    async fn delete(&self, id: AccountId) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.by_id.remove(&id) {
            Some(account) => {
                accounts.email_index.remove(account.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            credential: "OldPass123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryAccountStore::new();

        let created = store
            .insert(new_account("John", "john@x.com"))
            .await
            .unwrap();
        assert_eq!(created.id(), AccountId::new(1));
        assert!(created.is_active());

        let by_id = store.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = store.find_by_email("john@x.com").await.unwrap().unwrap();
        assert_eq!(by_email, created);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryAccountStore::new();
        store
            .insert(new_account("John", "john@x.com"))
            .await
            .unwrap();

        assert!(store.find_by_email("JOHN@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_email() {
        let store = InMemoryAccountStore::new();
        store
            .insert(new_account("John", "john@x.com"))
            .await
            .unwrap();

        let result = store.insert(new_account("Other", "john@x.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryAccountStore::new();
        let first = store.insert(new_account("A", "a@x.com")).await.unwrap();

        assert!(store.delete(first.id()).await.unwrap());
        assert!(!store.delete(first.id()).await.unwrap());

        let second = store.insert(new_account("A", "a@x.com")).await.unwrap();
        assert_eq!(second.id(), AccountId::new(2));
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let store = InMemoryAccountStore::with_accounts(vec![UserAccount::new(
            AccountId::new(7),
            "John",
            "john@x.com",
            "OldPass123",
        )]);

        let created = store.insert(new_account("Jane", "jane@x.com")).await.unwrap();
        assert_eq!(created.id(), AccountId::new(8));
    }

    #[tokio::test]
    async fn test_save_updates_email_index() {
        let store = InMemoryAccountStore::new();
        let mut account = store
            .insert(new_account("John", "john@x.com"))
            .await
            .unwrap();

        account.set_email("johnny@x.com");
        store.save(account).await.unwrap();

        assert!(store.find_by_email("john@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("johnny@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_email_conflict() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("A", "a@x.com")).await.unwrap();
        let mut b = store.insert(new_account("B", "b@x.com")).await.unwrap();

        b.set_email("a@x.com");
        let result = store.save(b).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert!(store.find_by_email("b@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_unknown_account() {
        let store = InMemoryAccountStore::new();
        let ghost = UserAccount::new(AccountId::new(42), "Ghost", "ghost@x.com", "Secret123");

        let result = store.save(ghost).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("Zoe", "a@x.com")).await.unwrap();
        store.insert(new_account("Adam", "z@x.com")).await.unwrap();

        let by_name = store.list(AccountSort::Name).await.unwrap();
        assert_eq!(by_name[0].name(), "Adam");

        let by_email = store.list(AccountSort::Email).await.unwrap();
        assert_eq!(by_email[0].name(), "Zoe");

        let by_id = store.list(AccountSort::Id).await.unwrap();
        assert_eq!(by_id[0].id(), AccountId::new(1));
    }
}
