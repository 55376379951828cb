//! Blog post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author used when a post does not name one
pub const DEFAULT_AUTHOR: &str = "Raushan Kumar";

/// Section a blog post is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    #[default]
    Blog,
    Opinions,
    Motivation,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Opinions => "opinions",
            Self::Motivation => "motivation",
        }
    }
}

impl std::fmt::Display for BlogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlogCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(Self::Blog),
            "opinions" => Ok(Self::Opinions),
            "motivation" => Ok(Self::Motivation),
            _ => Err(anyhow::anyhow!("Invalid blog category: {}", s)),
        }
    }
}

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: BlogCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub featured: bool,
}

/// A blog post as handed to storage on creation.
///
/// Text fields stay optional here: presence is enforced by the store's
/// schema, not by the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub id: Uuid,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: String,
    pub category: BlogCategory,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/blogs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBlogInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<BlogCategory>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl CreateBlogInput {
    pub fn into_draft(self) -> BlogDraft {
        let now = super::now();
        BlogDraft {
            id: Uuid::new_v4(),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            category: self.category.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for `PUT /api/blogs/{id}`.
///
/// Absent fields keep their stored value; the patch is applied by the
/// repository in a single statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<BlogCategory>,
    #[serde(default)]
    pub featured: Option<bool>,
}
