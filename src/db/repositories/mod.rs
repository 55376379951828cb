//! Database repositories
//!
//! One repository per collection. Each exposes a trait so handlers can be
//! wired to any store, and an sqlx implementation covering SQLite and MySQL.

/// Run the same query body against whichever backend the pool holds.
///
/// The body is expanded once per backend, so it may use driver-specific
/// types through the bound pool identifier.
macro_rules! with_backend {
    ($pool:expr, |$p:ident| $body:expr) => {
        match $crate::db::backend($pool)? {
            $crate::db::Backend::Sqlite($p) => $body,
            $crate::db::Backend::Mysql($p) => $body,
        }
    };
}

pub mod admin;
pub mod blog;
pub mod contact;
pub mod gallery;

pub use admin::{AdminRepository, SqlxAdminRepository};
pub use blog::{BlogRepository, SqlxBlogRepository};
pub use contact::{ContactRepository, SqlxContactRepository};
pub use gallery::{GalleryRepository, SqlxGalleryRepository};

use anyhow::{Context, Result};
use uuid::Uuid;

fn parse_stored_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Stored record has invalid id: {}", raw))
}
