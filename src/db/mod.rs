//! Database layer
//!
//! One table per record kind (contacts, blogs, gallery items, admins) behind
//! a driver-agnostic pool. SQLite is the default for single-binary deployment;
//! MySQL is available for hosted setups.
//!
//! # Usage
//!
//! ```ignore
//! use portfolio_api::config::DatabaseConfig;
//! use portfolio_api::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    backend, create_pool, create_test_pool, Backend, DatabasePool, DynDatabasePool, MysqlDatabase,
    SqliteDatabase,
};
