//! # Identity Types
//!
//! User records held by the Identity Store. The role is a closed enum:
//! there is no way to persist a role other than `user` or `admin`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level attached to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A registered identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (generated)
    pub id: Uuid,

    /// Email, unique across the store
    pub email: String,

    /// Display name (optional, from registration)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Access role
    #[serde(default)]
    pub role: Role,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new standard user
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: None,
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_admin() {
        let user = User::new("a@x.com");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
    }
}
