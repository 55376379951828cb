//! Admin account repository

use crate::db::DynDatabasePool;
use crate::models::AdminAccount;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::parse_stored_id;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert an account; fails on a duplicate username
    async fn create(&self, account: &AdminAccount) -> Result<AdminAccount>;

    async fn get_by_username(&self, username: &str) -> Result<Option<AdminAccount>>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

pub struct SqlxAdminRepository {
    pool: DynDatabasePool,
}

impl SqlxAdminRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn AdminRepository> {
        Arc::new(Self::new(pool))
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: String,
    username: String,
    password_hash: String,
    email: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminAccount {
    type Error = anyhow::Error;

    fn try_from(row: AdminRow) -> Result<Self> {
        Ok(Self {
            id: parse_stored_id(&row.id)?,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepository {
    async fn create(&self, account: &AdminAccount) -> Result<AdminAccount> {
        let sql = "INSERT INTO admins (id, username, password_hash, email, role, created_at) VALUES (?, ?, ?, ?, ?, ?)";
        with_backend!(&self.pool, |p| {
            sqlx::query(sql)
                .bind(account.id.to_string())
                .bind(&account.username)
                .bind(&account.password_hash)
                .bind(account.email.as_deref())
                .bind(account.role.as_str())
                .bind(account.created_at)
                .execute(p)
                .await
                .map(|_| ())
        })
        .context("Failed to create admin account")?;

        Ok(account.clone())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<AdminAccount>> {
        let sql = "SELECT id, username, password_hash, email, role, created_at FROM admins WHERE username = ?";
        let row = with_backend!(&self.pool, |p| {
            sqlx::query_as::<_, AdminRow>(sql)
                .bind(username)
                .fetch_optional(p)
                .await
        })
        .context("Failed to get admin account")?;

        row.map(AdminAccount::try_from).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count = with_backend!(&self.pool, |p| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE username = ?")
                .bind(username)
                .fetch_one(p)
                .await
        })
        .context("Failed to check admin username")?;

        Ok(count > 0)
    }

    async fn count(&self) -> Result<i64> {
        with_backend!(&self.pool, |p| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
                .fetch_one(p)
                .await
        })
        .context("Failed to count admin accounts")
    }
}
