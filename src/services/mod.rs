//! Services layer
//!
//! Record handlers talk to the repositories directly; the only logic that
//! needs its own home is admin provisioning and password hashing.

pub mod admin;
pub mod password;

pub use admin::{AdminService, AdminServiceError};
pub use password::{hash_password, verify_password};
