//! Contact message model
//!
//! Messages submitted through the site's contact form. The only mutable field
//! after submission is `status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require_text, ValidationError};

/// Processing state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            _ => Err(anyhow::anyhow!("Invalid contact status: {}", s)),
        }
    }
}

/// A stored contact message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Build a fresh message with a new id, `new` status and the current time
    pub fn new(submission: ContactSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            status: ContactStatus::New,
            created_at: super::now(),
        }
    }
}

/// Request body for `POST /api/contacts`.
///
/// Every field is optional at the wire level so that a missing field yields
/// the "All fields are required" error rather than a decoding failure. Any
/// `status` or `createdAt` sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A contact submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl CreateContactInput {
    pub const MISSING_FIELDS: &'static str = "All fields are required";

    pub fn validate(self) -> Result<ContactSubmission, ValidationError> {
        let missing = || ValidationError::new(Self::MISSING_FIELDS);
        Ok(ContactSubmission {
            name: require_text(self.name).ok_or_else(missing)?,
            email: require_text(self.email).ok_or_else(missing)?,
            subject: require_text(self.subject).ok_or_else(missing)?,
            message: require_text(self.message).ok_or_else(missing)?,
        })
    }
}

/// Request body for `PUT /api/contacts/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactInput {
    #[serde(default)]
    pub status: Option<ContactStatus>,
}
