//! PostgreSQL account store implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{AccountId, AccountSort, AccountStore, NewAccount, UserAccount};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`AccountStore`] over the `users` table
#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account by email: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn save(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, active = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id().value())
        .bind(account.name())
        .bind(account.email())
        .bind(account.credential())
        .bind(account.is_active())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, account.email(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        }

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> Result<UserAccount, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.credential)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &account.email, "insert"))?;

        Ok(UserAccount::new(
            AccountId::new(id),
            account.name,
            account.email,
            account.credential,
        ))
    }

    async fn list(&self, sort: AccountSort) -> Result<Vec<UserAccount>, DomainError> {
        // column comes from a closed enum, never from input
        let query = format!(
            "SELECT id, name, email, password, active FROM users ORDER BY {}, id",
            sort.column()
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list accounts: {}", e)))?;

        rows.iter().map(row_to_account).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count accounts: {}", e)))?;

        Ok(count as usize)
    }

    async fn delete(&self, id: AccountId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete account: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn write_error(error: sqlx::Error, email: &str, action: &str) -> DomainError {
    let unique = error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique {
        DomainError::conflict(format!("Email '{}' already exists", email))
    } else {
        DomainError::storage(format!("Failed to {} account: {}", action, error))
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<UserAccount, DomainError> {
    let decode = |e: sqlx::Error| DomainError::storage(format!("Invalid account row: {}", e));

    Ok(UserAccount::from_parts(
        AccountId::new(row.try_get("id").map_err(decode)?),
        row.try_get("name").map_err(decode)?,
        row.try_get("email").map_err(decode)?,
        row.try_get("password").map_err(decode)?,
        row.try_get("active").map_err(decode)?,
    ))
}
