//! Role store abstraction and its in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::identity::role::{IdentityError, IdentityRole};

/// Errors returned by a role store.
#[derive(Debug, Clone, Error)]
pub enum RoleStoreError {
    /// The store refused the operation; carries every reason it gave.
    #[error("identity store rejected the operation: {}", join_errors(.0))]
    Rejected(Vec<IdentityError>),

    /// The store could not be reached or failed internally.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

impl RoleStoreError {
    /// Structured reasons, empty for backend failures.
    pub fn identity_errors(&self) -> &[IdentityError] {
        match self {
            RoleStoreError::Rejected(errors) => errors,
            RoleStoreError::Unavailable(_) => &[],
        }
    }
}

fn join_errors(errors: &[IdentityError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Identity store for member group roles.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Resolve a role by its id, or by its key when `id` is a GUID.
    async fn find_by_id(&self, id: &str) -> Result<Option<IdentityRole>, RoleStoreError>;

    async fn create(&self, role: IdentityRole) -> Result<(), RoleStoreError>;

    /// Persist changes to an existing role.
    async fn update(&self, role: &IdentityRole) -> Result<(), RoleStoreError>;

    async fn delete(&self, role: &IdentityRole) -> Result<(), RoleStoreError>;

    /// All roles, in no particular order.
    async fn roles(&self) -> Result<Vec<IdentityRole>, RoleStoreError>;
}

/// Role store kept in a concurrent map keyed by role id.
///
/// Reads go straight to the map. Writes hold `write_lock` across their
/// checks and the write itself, so a name check and a delete can never
/// interleave with another write.
#[derive(Clone, Default)]
pub struct InMemoryRoleStore {
    roles: Arc<DashMap<String, IdentityRole>>,
    write_lock: Arc<Mutex<()>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    fn find_by_key(&self, key: Uuid) -> Option<IdentityRole> {
        self.roles
            .iter()
            .find(|r| r.value().key == key)
            .map(|r| r.value().clone())
    }

    /// Name rules shared by create and update. `except_id` is the role being
    /// renamed, which may keep its own name.
    fn validate_name(&self, role: &IdentityRole, except_id: Option<&str>) -> Vec<IdentityError> {
        let mut errors = Vec::new();
        if role.name.trim().is_empty() {
            errors.push(IdentityError::invalid_role_name(&role.name));
            return errors;
        }

        let normalized = role.normalized_name();
        let taken = self.roles.iter().any(|r| {
            Some(r.key().as_str()) != except_id && r.value().normalized_name() == normalized
        });
        if taken {
            errors.push(IdentityError::duplicate_role_name(&role.name));
        }
        errors
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<IdentityRole>, RoleStoreError> {
        if let Some(role) = self.roles.get(id) {
            return Ok(Some(role.value().clone()));
        }
        if let Ok(key) = Uuid::parse_str(id) {
            return Ok(self.find_by_key(key));
        }
        Ok(None)
    }

    async fn create(&self, role: IdentityRole) -> Result<(), RoleStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut errors = Vec::new();
        if self.roles.contains_key(&role.id) {
            errors.push(IdentityError::duplicate_role_id(&role.id));
        }
        errors.extend(self.validate_name(&role, None));
        if !errors.is_empty() {
            return Err(RoleStoreError::Rejected(errors));
        }

        tracing::debug!(role_id = %role.id, name = %role.name, "Role created");
        self.roles.insert(role.id.clone(), role);
        Ok(())
    }

    async fn update(&self, role: &IdentityRole) -> Result<(), RoleStoreError> {
        let _guard = self.write_lock.lock().await;
        if !self.roles.contains_key(&role.id) {
            return Err(RoleStoreError::Rejected(vec![IdentityError::role_not_found(&role.id)]));
        }
        // The name scan iterates the map, so it must finish before the
        // entry's shard guard is taken.
        let errors = self.validate_name(role, Some(&role.id));
        if !errors.is_empty() {
            return Err(RoleStoreError::Rejected(errors));
        }

        match self.roles.entry(role.id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(role.clone());
            }
            Entry::Vacant(_) => {
                return Err(RoleStoreError::Rejected(vec![IdentityError::role_not_found(&role.id)]));
            }
        }
        tracing::debug!(role_id = %role.id, name = %role.name, "Role updated");
        Ok(())
    }

    async fn delete(&self, role: &IdentityRole) -> Result<(), RoleStoreError> {
        let _guard = self.write_lock.lock().await;
        match self.roles.remove(&role.id) {
            Some(_) => {
                tracing::debug!(role_id = %role.id, "Role deleted");
                Ok(())
            }
            None => Err(RoleStoreError::Rejected(vec![IdentityError::role_not_found(&role.id)])),
        }
    }

    async fn roles(&self) -> Result<Vec<IdentityRole>, RoleStoreError> {
        Ok(self.roles.iter().map(|r| r.value().clone()).collect())
    }
}
