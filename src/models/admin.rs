//! Admin account model
//!
//! Accounts are provisioned at startup; no HTTP route exposes them. Only the
//! Argon2id hash of the password is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    Moderator,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            _ => Err(anyhow::anyhow!("Invalid admin role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Password hash (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    /// The password must already be hashed, see `services::password::hash_password`.
    pub fn new(username: String, password_hash: String, email: Option<String>, role: AdminRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            email,
            role,
            created_at: super::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let account = AdminAccount::new(
            "owner".to_string(),
            "$argon2id$v=19$secret".to_string(),
            None,
            AdminRole::Admin,
        );
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains(r#""role":"admin""#));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("moderator".parse::<AdminRole>().unwrap(), AdminRole::Moderator);
        assert!("root".parse::<AdminRole>().is_err());
    }
}
