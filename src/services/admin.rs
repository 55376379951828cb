//! Admin account service
//!
//! Provisioning and credential checks for admin accounts. Nothing here is
//! reachable over HTTP; the server uses it to create the bootstrap account.

use std::sync::Arc;

use crate::db::repositories::AdminRepository;
use crate::models::{AdminAccount, AdminRole};
use crate::services::password::{hash_password, verify_password};

#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct AdminService {
    repo: Arc<dyn AdminRepository>,
}

impl AdminService {
    pub fn new(repo: Arc<dyn AdminRepository>) -> Self {
        Self { repo }
    }

    /// Create an account, hashing the password before it is stored
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
        role: AdminRole,
    ) -> Result<AdminAccount, AdminServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AdminServiceError::ValidationError("Username is required".into()));
        }
        if password.is_empty() {
            return Err(AdminServiceError::ValidationError("Password is required".into()));
        }
        if self.repo.exists_by_username(username).await? {
            return Err(AdminServiceError::UsernameTaken(username.to_string()));
        }

        let account = AdminAccount::new(
            username.to_string(),
            hash_password(password)?,
            email.filter(|e| !e.trim().is_empty()),
            role,
        );
        Ok(self.repo.create(&account).await?)
    }

    /// Return the account if `password` matches its stored hash
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminAccount>, AdminServiceError> {
        let Some(account) = self.repo.get_by_username(username.trim()).await? else {
            return Ok(None);
        };

        if verify_password(password, &account.password_hash)? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    /// Create the bootstrap admin unless an account with that name exists.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> Result<bool, AdminServiceError> {
        match self.create(username, password, email, AdminRole::Admin).await {
            Ok(account) => {
                tracing::info!(username = %account.username, "Bootstrap admin account created");
                Ok(true)
            }
            Err(AdminServiceError::UsernameTaken(_)) => {
                tracing::debug!(username, "Bootstrap admin account already present");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
