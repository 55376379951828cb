//! Contact message repository

use crate::db::DynDatabasePool;
use crate::models::{Contact, ContactStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::parse_stored_id;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new message
    async fn create(&self, contact: &Contact) -> Result<Contact>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Contact>>;

    /// All messages, newest first
    async fn list(&self) -> Result<Vec<Contact>>;

    /// Set the status of a message, returning the updated record if it exists
    async fn update_status(&self, id: Uuid, status: ContactStatus) -> Result<Option<Contact>>;

    async fn count(&self) -> Result<i64>;
}

pub struct SqlxContactRepository {
    pool: DynDatabasePool,
}

impl SqlxContactRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContactRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, subject, message, status, created_at FROM contacts";

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = anyhow::Error;

    fn try_from(row: ContactRow) -> Result<Self> {
        Ok(Self {
            id: parse_stored_id(&row.id)?,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact> {
        let sql = "INSERT INTO contacts (id, name, email, subject, message, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
        with_backend!(&self.pool, |p| {
            sqlx::query(sql)
                .bind(contact.id.to_string())
                .bind(&contact.name)
                .bind(&contact.email)
                .bind(&contact.subject)
                .bind(&contact.message)
                .bind(contact.status.as_str())
                .bind(contact.created_at)
                .execute(p)
                .await
                .map(|_| ())
        })
        .context("Failed to create contact")?;

        Ok(contact.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Contact>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = with_backend!(&self.pool, |p| {
            sqlx::query_as::<_, ContactRow>(&sql)
                .bind(id.to_string())
                .fetch_optional(p)
                .await
        })
        .context("Failed to get contact")?;

        row.map(Contact::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Contact>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, seq DESC");
        let rows = with_backend!(&self.pool, |p| {
            sqlx::query_as::<_, ContactRow>(&sql).fetch_all(p).await
        })
        .context("Failed to list contacts")?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: ContactStatus) -> Result<Option<Contact>> {
        with_backend!(&self.pool, |p| {
            sqlx::query("UPDATE contacts SET status = ? WHERE id = ?")
                .bind(status.as_str())
                .bind(id.to_string())
                .execute(p)
                .await
                .map(|_| ())
        })
        .context("Failed to update contact status")?;

        self.get_by_id(id).await
    }

    async fn count(&self) -> Result<i64> {
        with_backend!(&self.pool, |p| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
                .fetch_one(p)
                .await
        })
        .context("Failed to count contacts")
    }
}
