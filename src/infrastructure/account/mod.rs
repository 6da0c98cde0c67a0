//! Account infrastructure module
//!
//! Store implementations (in-memory and PostgreSQL), the credential encoder,
//! and the two services built on top of them: the lifecycle service for
//! login, credential changes and activation, and the directory for
//! registration and profile management.

mod credential;
mod directory;
mod in_memory;
mod lifecycle;
mod postgres_repository;

pub use credential::{CredentialEncoder, PlainTextEncoder};
pub use directory::{AccountDirectory, RegisterAccountRequest, UpdateAccountRequest};
pub use in_memory::InMemoryAccountStore;
pub use lifecycle::{AccountLifecycleService, LifecyclePolicy};
pub use postgres_repository::PostgresAccountStore;
