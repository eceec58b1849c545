//! Role records and identity errors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity store's record for a member group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRole {
    /// Integer group id rendered as text.
    pub id: String,
    pub key: Uuid,
    pub name: String,
}

impl IdentityRole {
    pub fn new(id: i32, key: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            key,
            name: name.into(),
        }
    }

    /// The id as an integer, when it is one.
    pub fn int_id(&self) -> Option<i32> {
        self.id.parse().ok()
    }

    /// Upper-cased name used for uniqueness checks.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_uppercase()
    }
}

/// A single reason the identity store refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityError {
    pub code: String,
    pub description: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    pub fn invalid_role_name(name: &str) -> Self {
        Self::new("InvalidRoleName", format!("Role name '{}' is invalid.", name))
    }

    pub fn duplicate_role_name(name: &str) -> Self {
        Self::new("DuplicateRoleName", format!("Role name '{}' is already taken.", name))
    }

    pub fn role_not_found(id: &str) -> Self {
        Self::new("RoleNotFound", format!("Role '{}' does not exist.", id))
    }

    pub fn duplicate_role_id(id: &str) -> Self {
        Self::new("DuplicateRoleId", format!("Role id '{}' is already in use.", id))
    }
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}
