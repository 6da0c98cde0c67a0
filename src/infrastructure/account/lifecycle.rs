//! Account lifecycle service: login checks, credential changes and
//! activation state transitions

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::{
    check_credential_change, AccountError, AccountId, AccountStore, AccountView,
    CredentialWeakness, UserAccount,
};

use super::credential::CredentialEncoder;

/// Behaviour switches for [`AccountLifecycleService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// Abort a credential change when the supplied current credential is
    /// wrong. When off, the mismatch is only logged.
    pub require_current_credential: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            require_current_credential: true,
        }
    }
}

/// Stateless policy engine over an [`AccountStore`]
///
/// Every operation is one read-modify-write against a single record. Identity
/// is always passed in; nothing about the caller is remembered between calls.
#[derive(Debug)]
pub struct AccountLifecycleService<S: AccountStore, E: CredentialEncoder> {
    store: Arc<S>,
    encoder: Arc<E>,
    policy: LifecyclePolicy,
}

impl<S: AccountStore, E: CredentialEncoder> AccountLifecycleService<S, E> {
    pub fn new(store: Arc<S>, encoder: Arc<E>) -> Self {
        Self {
            store,
            encoder,
            policy: LifecyclePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check an email/credential pair and return the account on success.
    ///
    /// Read-only. Unknown emails and wrong credentials produce the same
    /// message; an inactive account is rejected before its credential is
    /// looked at.
    pub async fn authenticate(
        &self,
        email: &str,
        credential: &str,
    ) -> Result<AccountView, AccountError> {
        info!(email = %email, "Login attempt");

        let account = match self.store.find_by_email(email).await? {
            Some(account) => account,
            None => {
                warn!(email = %email, "Login failed: no account for email");
                return Err(AccountError::unknown_email());
            }
        };

        if !account.is_active() {
            warn!(email = %email, account_id = %account.id(), "Login failed: account is inactive");
            return Err(AccountError::AccountInactive);
        }

        if !self.encoder.matches(credential, account.credential()) {
            warn!(email = %email, account_id = %account.id(), "Login failed: credential mismatch");
            return Err(AccountError::invalid_login());
        }

        info!(account_id = %account.id(), "Login successful");
        Ok(AccountView::from(account))
    }

    /// Replace an account's credential.
    ///
    /// Check order: current credential (see [`LifecyclePolicy`]), new differs
    /// from current, then the strength rules. Nothing is saved on failure.
    pub async fn change_credential(
        &self,
        id: AccountId,
        current: &str,
        new: Option<&str>,
    ) -> Result<AccountView, AccountError> {
        info!(account_id = %id, "Credential change attempt");

        let mut account = self.load(id).await?;

        if !self.encoder.matches(current, account.credential()) {
            warn!(account_id = %id, "Credential change: current credential is incorrect");

            if self.policy.require_current_credential {
                return Err(AccountError::wrong_current_credential());
            }
        }

        if let Err(weakness) = check_credential_change(current, new) {
            warn!(account_id = %id, reason = %weakness, "Credential change rejected");
            return Err(weakness.into());
        }

        let new = new.ok_or(CredentialWeakness::TooShort)?;
        account.set_credential(self.encoder.encode(new)?);

        let saved = self.store.save(account).await?;

        info!(account_id = %id, "Credential changed");
        Ok(AccountView::from(saved))
    }

    /// Inactive -> Active; fails with `AlreadyActive` otherwise
    pub async fn activate(&self, id: AccountId) -> Result<AccountView, AccountError> {
        info!(account_id = %id, "Activating account");

        let mut account = self.load(id).await?;

        if let Err(e) = account.activate() {
            warn!(account_id = %id, "Activation rejected: account already active");
            return Err(e);
        }

        let saved = self.store.save(account).await?;

        info!(account_id = %id, "Account activated");
        Ok(AccountView::from(saved))
    }

    /// Active -> Inactive; fails with `AlreadyInactive` otherwise
    pub async fn deactivate(&self, id: AccountId) -> Result<AccountView, AccountError> {
        info!(account_id = %id, "Deactivating account");

        let mut account = self.load(id).await?;

        if let Err(e) = account.deactivate() {
            warn!(account_id = %id, "Deactivation rejected: account already inactive");
            return Err(e);
        }

        let saved = self.store.save(account).await?;

        info!(account_id = %id, "Account deactivated");
        Ok(AccountView::from(saved))
    }

    async fn load(&self, id: AccountId) -> Result<UserAccount, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::unknown_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::MockAccountStore;
    use crate::domain::DomainError;
    use crate::infrastructure::account::credential::PlainTextEncoder;
    use crate::infrastructure::account::in_memory::InMemoryAccountStore;

    fn john() -> UserAccount {
        UserAccount::new(AccountId::new(1), "John Doe", "john@example.com", "OldPass123")
    }

    fn inactive_john() -> UserAccount {
        let mut account = john();
        account.deactivate().unwrap();
        account
    }

    fn mocked(store: MockAccountStore) -> AccountLifecycleService<MockAccountStore, PlainTextEncoder> {
        AccountLifecycleService::new(Arc::new(store), Arc::new(PlainTextEncoder::new()))
    }

    fn store_with(account: UserAccount) -> MockAccountStore {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_id()
            .returning(move |id| Ok((id == account.id()).then(|| account.clone())));
        store
    }

    fn in_memory() -> AccountLifecycleService<InMemoryAccountStore, PlainTextEncoder> {
        let store = InMemoryAccountStore::with_accounts(vec![UserAccount::new(
            AccountId::new(1),
            "John",
            "john@x.com",
            "OldPass123",
        )]);
        AccountLifecycleService::new(Arc::new(store), Arc::new(PlainTextEncoder::new()))
    }

    // authenticate

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email == "john@example.com")
            .times(1)
            .returning(|_| Ok(Some(john())));

        let view = mocked(store)
            .authenticate("john@example.com", "OldPass123")
            .await
            .unwrap();

        assert_eq!(view.email, "john@example.com");
        assert_eq!(view.name, "John Doe");
        assert!(view.active);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().times(1).returning(|_| Ok(None));

        let err = mocked(store)
            .authenticate("nonexistent@example.com", "password")
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::AccountNotFound { .. }));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_authenticate_inactive_ignores_credential() {
        for credential in ["OldPass123", "WrongPassword"] {
            let mut store = MockAccountStore::new();
            store
                .expect_find_by_email()
                .returning(|_| Ok(Some(inactive_john())));

            let err = mocked(store)
                .authenticate("john@example.com", credential)
                .await
                .unwrap_err();

            assert!(matches!(err, AccountError::AccountInactive));
            assert_eq!(err.to_string(), "User account is deactivated");
        }
    }

    #[tokio::test]
    async fn test_authenticate_wrong_credential() {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().returning(|_| Ok(Some(john())));

        let err = mocked(store)
            .authenticate("john@example.com", "WrongPassword")
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::InvalidCredential { .. }));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_authenticate_never_saves() {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().returning(|_| Ok(Some(john())));
        store.expect_save().never();

        mocked(store)
            .authenticate("john@example.com", "OldPass123")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_authenticate_store_fault_passes_through() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let err = mocked(store)
            .authenticate("john@example.com", "OldPass123")
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Store(DomainError::Storage { .. })));
    }

    // change_credential

    #[tokio::test]
    async fn test_change_credential_success() {
        let mut store = store_with(john());
        store
            .expect_save()
            .withf(|account| account.credential() == "NewPass123")
            .times(1)
            .returning(Ok);

        let view = mocked(store)
            .change_credential(AccountId::new(1), "OldPass123", Some("NewPass123"))
            .await
            .unwrap();

        assert_eq!(view.id, AccountId::new(1));
    }

    #[tokio::test]
    async fn test_change_credential_unknown_account() {
        let mut store = store_with(john());
        store.expect_save().never();

        let err = mocked(store)
            .change_credential(AccountId::new(999), "OldPass123", Some("NewPass123"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User not found with id: 999");
    }

    #[tokio::test]
    async fn test_change_credential_wrong_current_aborts() {
        let mut store = store_with(john());
        store.expect_save().never();

        let err = mocked(store)
            .change_credential(AccountId::new(1), "WrongOldPassword", Some("NewPass123"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::InvalidCredential { .. }));
        assert_eq!(err.to_string(), "Current password is incorrect");
    }

    #[tokio::test]
    async fn test_change_credential_wrong_current_tolerated_when_not_required() {
        let mut store = store_with(john());
        store.expect_save().times(1).returning(Ok);

        let service = mocked(store).with_policy(LifecyclePolicy {
            require_current_credential: false,
        });

        service
            .change_credential(AccountId::new(1), "WrongOldPassword", Some("NewPass123"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_credential_strength_runs_even_when_current_not_required() {
        let mut store = store_with(john());
        store.expect_save().never();

        let service = mocked(store).with_policy(LifecyclePolicy {
            require_current_credential: false,
        });

        let err = service
            .change_credential(AccountId::new(1), "WrongOldPassword", Some("short"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccountError::WeakCredential(CredentialWeakness::TooShort)
        ));
    }

    #[tokio::test]
    async fn test_change_credential_weak_cases() {
        let cases = [
            (Some("OldPass123"), CredentialWeakness::SameAsCurrent),
            (Some("Short1"), CredentialWeakness::TooShort),
            (None, CredentialWeakness::TooShort),
            (Some("newpass123"), CredentialWeakness::MissingUppercase),
            (Some("NEWPASS123"), CredentialWeakness::MissingLowercase),
            (Some("NewPassword"), CredentialWeakness::MissingDigit),
        ];

        for (new, expected) in cases {
            let mut store = store_with(john());
            store.expect_save().never();

            let err = mocked(store)
                .change_credential(AccountId::new(1), "OldPass123", new)
                .await
                .unwrap_err();

            match err {
                AccountError::WeakCredential(weakness) => assert_eq!(weakness, expected),
                other => panic!("expected weak credential for {:?}, got {:?}", new, other),
            }
        }
    }

    #[tokio::test]
    async fn test_change_credential_save_fault_passes_through() {
        let mut store = store_with(john());
        store
            .expect_save()
            .returning(|_| Err(DomainError::storage("write failed")));

        let err = mocked(store)
            .change_credential(AccountId::new(1), "OldPass123", Some("NewPass123"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Store(_)));
    }

    // activate / deactivate

    #[tokio::test]
    async fn test_activate_inactive_account() {
        let mut store = store_with(inactive_john());
        store
            .expect_save()
            .withf(|account| account.is_active())
            .times(1)
            .returning(Ok);

        let view = mocked(store).activate(AccountId::new(1)).await.unwrap();
        assert!(view.active);
    }

    #[tokio::test]
    async fn test_activate_already_active() {
        let mut store = store_with(john());
        store.expect_save().never();

        let err = mocked(store).activate(AccountId::new(1)).await.unwrap_err();

        assert!(matches!(err, AccountError::AlreadyActive));
        assert_eq!(err.to_string(), "User is already active");
    }

    #[tokio::test]
    async fn test_activate_unknown_account() {
        let mut store = store_with(john());
        store.expect_save().never();

        let err = mocked(store).activate(AccountId::new(999)).await.unwrap_err();
        assert!(matches!(err, AccountError::AccountNotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_active_account() {
        let mut store = store_with(john());
        store
            .expect_save()
            .withf(|account| !account.is_active())
            .times(1)
            .returning(Ok);

        let view = mocked(store).deactivate(AccountId::new(1)).await.unwrap();
        assert!(!view.active);
    }

    #[tokio::test]
    async fn test_deactivate_already_inactive() {
        let mut store = store_with(inactive_john());
        store.expect_save().never();

        let err = mocked(store).deactivate(AccountId::new(1)).await.unwrap_err();

        assert!(matches!(err, AccountError::AlreadyInactive));
        assert_eq!(err.to_string(), "User is already inactive");
    }

    // end-to-end over the in-memory store

    #[tokio::test]
    async fn test_login_and_credential_scenario() {
        let service = in_memory();

        service.authenticate("john@x.com", "OldPass123").await.unwrap();
        assert!(matches!(
            service.authenticate("john@x.com", "wrong").await,
            Err(AccountError::InvalidCredential { .. })
        ));

        assert!(matches!(
            service
                .change_credential(AccountId::new(1), "OldPass123", Some("newpass123"))
                .await,
            Err(AccountError::WeakCredential(CredentialWeakness::MissingUppercase))
        ));

        service
            .change_credential(AccountId::new(1), "OldPass123", Some("NewPass123"))
            .await
            .unwrap();

        service.authenticate("john@x.com", "NewPass123").await.unwrap();
        assert!(service.authenticate("john@x.com", "OldPass123").await.is_err());
    }

    #[tokio::test]
    async fn test_repeated_change_is_rejected() {
        let service = in_memory();
        let id = AccountId::new(1);

        service
            .change_credential(id, "OldPass123", Some("NewPass123"))
            .await
            .unwrap();

        // the stored credential moved on, so the old pair no longer verifies
        assert!(matches!(
            service
                .change_credential(id, "OldPass123", Some("NewPass123"))
                .await,
            Err(AccountError::InvalidCredential { .. })
        ));

        // re-submitting the current credential as the new one is same-as-current
        assert!(matches!(
            service
                .change_credential(id, "NewPass123", Some("NewPass123"))
                .await,
            Err(AccountError::WeakCredential(CredentialWeakness::SameAsCurrent))
        ));

        service.authenticate("john@x.com", "NewPass123").await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_scenario() {
        let service = in_memory();
        let id = AccountId::new(1);

        assert!(matches!(
            service.activate(id).await,
            Err(AccountError::AlreadyActive)
        ));

        let view = service.deactivate(id).await.unwrap();
        assert!(!view.active);

        assert!(matches!(
            service.deactivate(id).await,
            Err(AccountError::AlreadyInactive)
        ));

        assert!(matches!(
            service.authenticate("john@x.com", "OldPass123").await,
            Err(AccountError::AccountInactive)
        ));

        service.activate(id).await.unwrap();
        service.authenticate("john@x.com", "OldPass123").await.unwrap();
    }
}
