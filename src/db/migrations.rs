//! Database migrations module
//!
//! Migrations are embedded in the binary as SQL strings, one pair per backend.
//! Each collection gets its own table. A hidden `seq` column orders records
//! that share a creation timestamp; the public identifier is the `id` UUID.
//!
//! Required-field and enum constraints live in the schema itself, so inserts
//! that skip handler-level validation still cannot persist invalid records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};

use super::pool::{backend, Backend};
use super::DynDatabasePool;
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_contacts",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS contacts (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id VARCHAR(36) NOT NULL UNIQUE,
                name TEXT NOT NULL CHECK (length(name) > 0),
                email TEXT NOT NULL CHECK (length(email) > 0),
                subject TEXT NOT NULL CHECK (length(subject) > 0),
                message TEXT NOT NULL CHECK (length(message) > 0),
                status VARCHAR(16) NOT NULL DEFAULT 'new'
                    CHECK (status IN ('new', 'read', 'replied')),
                created_at TIMESTAMP NOT NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS contacts (
                seq BIGINT PRIMARY KEY AUTO_INCREMENT,
                id CHAR(36) NOT NULL UNIQUE,
                name TEXT NOT NULL CHECK (CHAR_LENGTH(name) > 0),
                email TEXT NOT NULL CHECK (CHAR_LENGTH(email) > 0),
                subject TEXT NOT NULL CHECK (CHAR_LENGTH(subject) > 0),
                message TEXT NOT NULL CHECK (CHAR_LENGTH(message) > 0),
                status VARCHAR(16) NOT NULL DEFAULT 'new'
                    CHECK (status IN ('new', 'read', 'replied')),
                created_at DATETIME(6) NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_blogs",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS blogs (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id VARCHAR(36) NOT NULL UNIQUE,
                title TEXT NOT NULL CHECK (length(title) > 0),
                excerpt TEXT NOT NULL CHECK (length(excerpt) > 0),
                content TEXT NOT NULL CHECK (length(content) > 0),
                author VARCHAR(255) NOT NULL DEFAULT 'Raushan Kumar',
                category VARCHAR(16) NOT NULL DEFAULT 'blog'
                    CHECK (category IN ('blog', 'opinions', 'motivation')),
                featured BOOLEAN NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS blogs (
                seq BIGINT PRIMARY KEY AUTO_INCREMENT,
                id CHAR(36) NOT NULL UNIQUE,
                title TEXT NOT NULL CHECK (CHAR_LENGTH(title) > 0),
                excerpt TEXT NOT NULL CHECK (CHAR_LENGTH(excerpt) > 0),
                content LONGTEXT NOT NULL CHECK (CHAR_LENGTH(content) > 0),
                author VARCHAR(255) NOT NULL DEFAULT 'Raushan Kumar',
                category VARCHAR(16) NOT NULL DEFAULT 'blog'
                    CHECK (category IN ('blog', 'opinions', 'motivation')),
                featured BOOLEAN NOT NULL DEFAULT FALSE,
                created_at DATETIME(6) NOT NULL,
                updated_at DATETIME(6) NOT NULL
            );
        "#,
    },
    Migration {
        version: 3,
        name: "create_gallery_items",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS gallery_items (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id VARCHAR(36) NOT NULL UNIQUE,
                title TEXT,
                image_url TEXT,
                description TEXT,
                category VARCHAR(16) NOT NULL DEFAULT 'gallery'
                    CHECK (category IN ('gallery', 'family', 'places', 'other')),
                created_at TIMESTAMP NOT NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS gallery_items (
                seq BIGINT PRIMARY KEY AUTO_INCREMENT,
                id CHAR(36) NOT NULL UNIQUE,
                title TEXT,
                image_url TEXT,
                description TEXT,
                category VARCHAR(16) NOT NULL DEFAULT 'gallery'
                    CHECK (category IN ('gallery', 'family', 'places', 'other')),
                created_at DATETIME(6) NOT NULL
            );
        "#,
    },
    Migration {
        version: 4,
        name: "create_admins",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS admins (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id VARCHAR(36) NOT NULL UNIQUE,
                username VARCHAR(100) NOT NULL UNIQUE CHECK (length(username) > 0),
                password_hash VARCHAR(255) NOT NULL,
                email VARCHAR(255),
                role VARCHAR(16) NOT NULL DEFAULT 'admin'
                    CHECK (role IN ('admin', 'moderator')),
                created_at TIMESTAMP NOT NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS admins (
                seq BIGINT PRIMARY KEY AUTO_INCREMENT,
                id CHAR(36) NOT NULL UNIQUE,
                username VARCHAR(100) NOT NULL UNIQUE CHECK (CHAR_LENGTH(username) > 0),
                password_hash VARCHAR(255) NOT NULL,
                email VARCHAR(255),
                role VARCHAR(16) NOT NULL DEFAULT 'admin'
                    CHECK (role IN ('admin', 'moderator')),
                created_at DATETIME(6) NOT NULL
            );
        "#,
    },
];

/// Run all pending migrations, returning how many were applied.
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied: Vec<i64> = get_applied_migrations(pool)
        .await?
        .iter()
        .map(|m| m.version)
        .collect();

    let mut count = 0;
    for migration in MIGRATIONS {
        if applied.contains(&i64::from(migration.version)) {
            continue;
        }
        tracing::info!(
            "Applying migration {}: {}",
            migration.version,
            migration.name
        );
        apply_migration(pool, migration)
            .await
            .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
        count += 1;
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Number of migrations not yet applied
pub async fn pending_count(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;
    let applied = get_applied_migrations(pool).await?;
    Ok(MIGRATIONS.len().saturating_sub(applied.len()))
}

async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    const SQL: &str = "SELECT version, name, applied_at FROM _migrations ORDER BY version";

    let records = match backend(pool)? {
        Backend::Sqlite(p) => sqlx::query(SQL)
            .fetch_all(p)
            .await?
            .iter()
            .map(|row| MigrationRecord {
                version: row.get("version"),
                name: row.get("name"),
                applied_at: row.get("applied_at"),
            })
            .collect(),
        Backend::Mysql(p) => sqlx::query(SQL)
            .fetch_all(p)
            .await?
            .iter()
            .map(|row| MigrationRecord {
                version: i64::from(row.get::<i32, _>("version")),
                name: row.get("name"),
                applied_at: row.get("applied_at"),
            })
            .collect(),
    };

    Ok(records)
}

async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match backend(pool)? {
        Backend::Sqlite(p) => apply_migration_sqlite(p, migration).await,
        Backend::Mysql(p) => apply_migration_mysql(p, migration).await,
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    let mut tx = pool.begin().await?;
    for statement in split_sql_statements(migration.up_sqlite) {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

// MySQL DDL commits implicitly, so no transaction here.
async fn apply_migration_mysql(pool: &MySqlPool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up_mysql) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

fn truncate_sql(sql: &str) -> String {
    match sql.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

/// Split SQL into individual statements, dropping comment-only fragments
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

fn is_comment_only(s: &str) -> bool {
    s.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}
