//! Storage infrastructure - backend selection, pooling and schema

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageFactory};
pub use in_memory::InMemoryStore;
pub use migrations::{revert_last_migration, run_schema_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_pool, ping};

pub(crate) use postgres::map_write_error;
