//! Account entity and related types

use serde::{Deserialize, Serialize};

use super::error::AccountError;

/// Store-assigned account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account as persisted by an [`AccountStore`](super::AccountStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    id: AccountId,
    name: String,
    /// Login identifier, compared case-sensitively
    email: String,
    /// Stored credential - never exposed in serialization
    #[serde(skip_serializing)]
    credential: String,
    active: bool,
}

impl UserAccount {
    /// Create a new, active account
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            credential: credential.into(),
            active: true,
        }
    }

    /// Rebuild an account from stored columns
    pub fn from_parts(
        id: AccountId,
        name: String,
        email: String,
        credential: String,
        active: bool,
    ) -> Self {
        Self {
            id,
            name,
            email,
            credential,
            active,
        }
    }

    // Getters

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace the stored credential as a whole
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    /// Inactive -> Active
    pub fn activate(&mut self) -> Result<(), AccountError> {
        if self.active {
            return Err(AccountError::AlreadyActive);
        }
        self.active = true;
        Ok(())
    }

    /// Active -> Inactive
    pub fn deactivate(&mut self) -> Result<(), AccountError> {
        if !self.active {
            return Err(AccountError::AlreadyInactive);
        }
        self.active = false;
        Ok(())
    }
}

/// An account that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub credential: String,
}

/// The caller-facing shape of an account; carries no credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl From<&UserAccount> for AccountView {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            active: account.active,
        }
    }
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            active: account.active,
        }
    }
}

/// Ordering for account listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountSort {
    Id,
    #[default]
    Name,
    Email,
}

impl AccountSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
        }
    }

    /// Sort accounts in place, ascending, ties broken by id
    pub fn apply(&self, accounts: &mut [UserAccount]) {
        match self {
            Self::Id => accounts.sort_by_key(|a| a.id()),
            Self::Name => accounts.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id()))),
            Self::Email => {
                accounts.sort_by(|a, b| a.email().cmp(b.email()).then(a.id().cmp(&b.id())))
            }
        }
    }
}
