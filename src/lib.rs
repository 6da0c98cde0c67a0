//! Account Lifecycle
//!
//! User account management with:
//! - Login by email and credential, gated on the account being active
//! - Credential changes checked against a strength policy
//! - Activation and deactivation of accounts
//! - In-memory or PostgreSQL account storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::account::AccountStore;
use infrastructure::account::{
    AccountDirectory, AccountLifecycleService, InMemoryAccountStore, LifecyclePolicy,
    PlainTextEncoder, PostgresAccountStore,
};
use infrastructure::storage::{connect_postgres, run_account_migrations, StorageType};
use tracing::{info, warn};

/// Create the application state with the default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state, selecting the store backend from config
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_backend = StorageType::from_str(&config.storage.backend).unwrap_or_else(|| {
        warn!(
            backend = %config.storage.backend,
            "Unknown storage backend, falling back to memory"
        );
        StorageType::InMemory
    });

    info!("Storage backend: {:?}", storage_backend);

    let policy = LifecyclePolicy {
        require_current_credential: config.accounts.require_current_credential,
    };

    if !policy.require_current_credential {
        warn!("Credential changes will not verify the current credential");
    }

    match storage_backend {
        StorageType::InMemory => {
            info!("Using in-memory account store");
            Ok(build_state(InMemoryAccountStore::new(), policy))
        }
        StorageType::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = connect_postgres(&config.storage).await?;
            let applied = run_account_migrations(&pool).await?;
            info!(applied, "PostgreSQL account store ready");

            Ok(build_state(PostgresAccountStore::new(pool), policy))
        }
    }
}

fn build_state<S: AccountStore + 'static>(store: S, policy: LifecyclePolicy) -> AppState {
    let store = Arc::new(store);
    let encoder = Arc::new(PlainTextEncoder::new());

    let lifecycle =
        AccountLifecycleService::new(store.clone(), encoder.clone()).with_policy(policy);
    let directory = AccountDirectory::new(store, encoder);

    AppState::new(Arc::new(lifecycle), Arc::new(directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::account::{AccountError, AccountId};
    use infrastructure::account::RegisterAccountRequest;

    #[tokio::test]
    async fn test_default_state_uses_memory() {
        let state = create_app_state().await.unwrap();
        assert_eq!(state.directory.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_services_share_one_store() {
        let state = create_app_state().await.unwrap();

        let view = state
            .directory
            .register(RegisterAccountRequest {
                name: "John".to_string(),
                email: "john@x.com".to_string(),
                credential: "OldPass123".to_string(),
            })
            .await
            .unwrap();

        state.lifecycle.deactivate(view.id).await.unwrap();
        assert!(!state.directory.get(view.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_policy_from_config() {
        let mut config = AppConfig::default();
        config.accounts.require_current_credential = false;
        let state = create_app_state_with_config(&config).await.unwrap();

        state
            .directory
            .register(RegisterAccountRequest {
                name: "John".to_string(),
                email: "john@x.com".to_string(),
                credential: "OldPass123".to_string(),
            })
            .await
            .unwrap();

        // wrong current credential is tolerated when the policy is off
        let result = state
            .lifecycle
            .change_credential(AccountId::new(1), "WrongOldPassword", Some("NewPass123"))
            .await;
        assert!(result.is_ok());

        let result = state
            .lifecycle
            .change_credential(AccountId::new(1), "WrongOldPassword", Some("weak"))
            .await;
        assert!(matches!(result, Err(AccountError::WeakCredential(_))));
    }
}
