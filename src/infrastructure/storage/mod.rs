//! Storage infrastructure - backend selection and schema migrations

mod factory;
pub mod migrations;

pub use factory::{connect_postgres, StorageType};
pub use migrations::{run_account_migrations, Migration, PostgresMigrator};
