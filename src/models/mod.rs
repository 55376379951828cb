//! Data models
//!
//! Record types for the four collections (contact messages, blog posts,
//! gallery items, admin accounts) and the request payloads accepted for each.

mod admin;
mod blog;
mod contact;
mod gallery;

pub use admin::{AdminAccount, AdminRole};
pub use blog::{BlogCategory, BlogDraft, BlogPost, CreateBlogInput, UpdateBlogInput, DEFAULT_AUTHOR};
pub use contact::{Contact, ContactStatus, ContactSubmission, CreateContactInput, UpdateContactInput};
pub use gallery::{CreateGalleryInput, GalleryCategory, GalleryItem};

/// Client-supplied data failed a required-field check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Keep a text field only if it is present and non-empty; whitespace counts as content
pub(crate) fn require_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Current time at millisecond resolution, the precision timestamps are stored with
pub(crate) fn now() -> chrono::DateTime<chrono::Utc> {
    use chrono::SubsecRound;
    chrono::Utc::now().trunc_subsecs(3)
}
