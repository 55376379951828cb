//! Blog post repository
//!
//! Inserts pass through whatever the handler received; the table's NOT NULL
//! and CHECK constraints reject posts without a title, excerpt or content.

use crate::db::DynDatabasePool;
use crate::models::{BlogCategory, BlogDraft, BlogPost, UpdateBlogInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::parse_stored_id;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, draft: &BlogDraft) -> Result<BlogPost>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BlogPost>>;

    /// Posts newest first, optionally restricted to one category
    async fn list(&self, category: Option<BlogCategory>) -> Result<Vec<BlogPost>>;

    /// Patch the supplied fields and stamp `updated_at` in one statement.
    ///
    /// Returns `None` if no post has this id.
    async fn update(&self, id: Uuid, patch: &UpdateBlogInput) -> Result<Option<BlogPost>>;

    /// Remove a post; returns whether a record was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

pub struct SqlxBlogRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, excerpt, content, author, category, featured, created_at, updated_at FROM blogs";

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: String,
    title: String,
    excerpt: String,
    content: String,
    author: String,
    category: String,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BlogRow> for BlogPost {
    type Error = anyhow::Error;

    fn try_from(row: BlogRow) -> Result<Self> {
        Ok(Self {
            id: parse_stored_id(&row.id)?,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            author: row.author,
            category: row.category.parse()?,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, draft: &BlogDraft) -> Result<BlogPost> {
        let sql = "INSERT INTO blogs (id, title, excerpt, content, author, category, featured, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";
        with_backend!(&self.pool, |p| {
            sqlx::query(sql)
                .bind(draft.id.to_string())
                .bind(draft.title.as_deref())
                .bind(draft.excerpt.as_deref())
                .bind(draft.content.as_deref())
                .bind(&draft.author)
                .bind(draft.category.as_str())
                .bind(draft.featured)
                .bind(draft.created_at)
                .bind(draft.updated_at)
                .execute(p)
                .await
                .map(|_| ())
        })
        .context("Failed to create blog post")?;

        self.get_by_id(draft.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Blog post not found after insert"))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BlogPost>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = with_backend!(&self.pool, |p| {
            sqlx::query_as::<_, BlogRow>(&sql)
                .bind(id.to_string())
                .fetch_optional(p)
                .await
        })
        .context("Failed to get blog post")?;

        row.map(BlogPost::try_from).transpose()
    }

    async fn list(&self, category: Option<BlogCategory>) -> Result<Vec<BlogPost>> {
        let filter = if category.is_some() { " WHERE category = ?" } else { "" };
        let sql = format!("{SELECT_COLUMNS}{filter} ORDER BY created_at DESC, seq DESC");
        let rows = with_backend!(&self.pool, |p| {
            let mut query = sqlx::query_as::<_, BlogRow>(&sql);
            if let Some(category) = category {
                query = query.bind(category.as_str());
            }
            query.fetch_all(p).await
        })
        .context("Failed to list blog posts")?;

        rows.into_iter().map(BlogPost::try_from).collect()
    }

    async fn update(&self, id: Uuid, patch: &UpdateBlogInput) -> Result<Option<BlogPost>> {
        // updated_at never moves backwards, even if the clock does
        let sql = "UPDATE blogs SET \
            title = COALESCE(?, title), \
            excerpt = COALESCE(?, excerpt), \
            content = COALESCE(?, content), \
            author = COALESCE(?, author), \
            category = COALESCE(?, category), \
            featured = COALESCE(?, featured), \
            updated_at = CASE WHEN updated_at > ? THEN updated_at ELSE ? END \
            WHERE id = ?";
        let now = crate::models::now();
        let affected = with_backend!(&self.pool, |p| {
            sqlx::query(sql)
                .bind(patch.title.as_deref())
                .bind(patch.excerpt.as_deref())
                .bind(patch.content.as_deref())
                .bind(patch.author.as_deref())
                .bind(patch.category.map(|c| c.as_str()))
                .bind(patch.featured)
                .bind(now)
                .bind(now)
                .bind(id.to_string())
                .execute(p)
                .await
                .map(|r| r.rows_affected())
        })
        .context("Failed to update blog post")?;

        if affected == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let affected = with_backend!(&self.pool, |p| {
            sqlx::query("DELETE FROM blogs WHERE id = ?")
                .bind(id.to_string())
                .execute(p)
                .await
                .map(|r| r.rows_affected())
        })
        .context("Failed to delete blog post")?;

        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64> {
        with_backend!(&self.pool, |p| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs")
                .fetch_one(p)
                .await
        })
        .context("Failed to count blog posts")
    }
}
