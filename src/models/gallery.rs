//! Gallery item model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    #[default]
    Gallery,
    Family,
    Places,
    Other,
}

impl GalleryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Family => "family",
            Self::Places => "places",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GalleryCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gallery" => Ok(Self::Gallery),
            "family" => Ok(Self::Family),
            "places" => Ok(Self::Places),
            "other" => Ok(Self::Other),
            _ => Err(anyhow::anyhow!("Invalid gallery category: {}", s)),
        }
    }
}

/// A stored gallery item. All descriptive fields are free-form and optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: GalleryCategory,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/gallery`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<GalleryCategory>,
}

impl From<CreateGalleryInput> for GalleryItem {
    fn from(input: CreateGalleryInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            image_url: input.image_url,
            description: input.description,
            category: input.category.unwrap_or_default(),
            created_at: super::now(),
        }
    }
}
