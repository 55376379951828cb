//! Gallery item repository

use crate::db::DynDatabasePool;
use crate::models::{GalleryCategory, GalleryItem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::parse_stored_id;

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn create(&self, item: &GalleryItem) -> Result<GalleryItem>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<GalleryItem>>;

    /// Items newest first, optionally restricted to one category
    async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<GalleryItem>>;

    /// Remove an item; returns whether a record was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

pub struct SqlxGalleryRepository {
    pool: DynDatabasePool,
}

impl SqlxGalleryRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn GalleryRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, image_url, description, category, created_at FROM gallery_items";

#[derive(sqlx::FromRow)]
struct GalleryRow {
    id: String,
    title: Option<String>,
    image_url: Option<String>,
    description: Option<String>,
    category: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<GalleryRow> for GalleryItem {
    type Error = anyhow::Error;

    fn try_from(row: GalleryRow) -> Result<Self> {
        Ok(Self {
            id: parse_stored_id(&row.id)?,
            title: row.title,
            image_url: row.image_url,
            description: row.description,
            category: row.category.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl GalleryRepository for SqlxGalleryRepository {
    async fn create(&self, item: &GalleryItem) -> Result<GalleryItem> {
        let sql = "INSERT INTO gallery_items (id, title, image_url, description, category, created_at) VALUES (?, ?, ?, ?, ?, ?)";
        with_backend!(&self.pool, |p| {
            sqlx::query(sql)
                .bind(item.id.to_string())
                .bind(item.title.as_deref())
                .bind(item.image_url.as_deref())
                .bind(item.description.as_deref())
                .bind(item.category.as_str())
                .bind(item.created_at)
                .execute(p)
                .await
                .map(|_| ())
        })
        .context("Failed to create gallery item")?;

        Ok(item.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<GalleryItem>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = with_backend!(&self.pool, |p| {
            sqlx::query_as::<_, GalleryRow>(&sql)
                .bind(id.to_string())
                .fetch_optional(p)
                .await
        })
        .context("Failed to get gallery item")?;

        row.map(GalleryItem::try_from).transpose()
    }

    async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<GalleryItem>> {
        let filter = if category.is_some() { " WHERE category = ?" } else { "" };
        let sql = format!("{SELECT_COLUMNS}{filter} ORDER BY created_at DESC, seq DESC");
        let rows = with_backend!(&self.pool, |p| {
            let mut query = sqlx::query_as::<_, GalleryRow>(&sql);
            if let Some(category) = category {
                query = query.bind(category.as_str());
            }
            query.fetch_all(p).await
        })
        .context("Failed to list gallery items")?;

        rows.into_iter().map(GalleryItem::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let affected = with_backend!(&self.pool, |p| {
            sqlx::query("DELETE FROM gallery_items WHERE id = ?")
                .bind(id.to_string())
                .execute(p)
                .await
                .map(|r| r.rows_affected())
        })
        .context("Failed to delete gallery item")?;

        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64> {
        with_backend!(&self.pool, |p| {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery_items")
                .fetch_one(p)
                .await
        })
        .context("Failed to count gallery items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::CreateGalleryInput;

    async fn setup_test_repo() -> SqlxGalleryRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxGalleryRepository::new(pool)
    }

    fn item(title: Option<&str>, category: Option<GalleryCategory>) -> GalleryItem {
        GalleryItem::from(CreateGalleryInput {
            title: title.map(str::to_string),
            category,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_create_item_without_fields() {
        let repo = setup_test_repo().await;
        let created = repo.create(&item(None, None)).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.category, GalleryCategory::Gallery);
        assert!(fetched.title.is_none());
    }

    #[tokio::test]
    async fn test_list_filter_and_order() {
        let repo = setup_test_repo().await;
        let a = repo.create(&item(Some("a"), Some(GalleryCategory::Family))).await.unwrap();
        repo.create(&item(Some("b"), Some(GalleryCategory::Places))).await.unwrap();
        let c = repo.create(&item(Some("c"), Some(GalleryCategory::Family))).await.unwrap();

        let family: Vec<Uuid> = repo
            .list(Some(GalleryCategory::Family))
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(family, vec![c.id, a.id]);
        assert_eq!(repo.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let repo = setup_test_repo().await;
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
    }
}
