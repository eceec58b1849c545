//! Single access point over the identity role store and the legacy group
//! service.
//!
//! # Responsibilities
//! - Resolve a [`GroupId`] to the records each id form requires
//! - Apply the merge policy from [`crate::display::mapper`]
//! - Run updates and deletes against the identity store only
//!
//! # Lookup rules
//! - Integer ids need both a role and a legacy group; either miss is not-found
//! - GUID and GUID-UDI ids consult the role store only
//! - String UDIs never resolve

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::display::{mapper, MemberGroupDisplay};
use crate::groups::model::MemberGroup;
use crate::groups::service::{GroupServiceError, MemberGroupService};
use crate::identifier::GroupId;
use crate::identity::{IdentityRole, RoleStore, RoleStoreError};
use crate::observability::metrics;

/// Why a repository operation did not complete.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("no role found for member group '{0}'")]
    RoleNotFound(String),

    #[error("no legacy member group found for id {0}")]
    GroupNotFound(i32),

    #[error("UDI '{0}' does not wrap a GUID")]
    NotGuidUdi(String),

    /// Ids that can never address an existing group.
    #[error("member group id {0} is not a persisted id")]
    InvalidId(i32),

    #[error(transparent)]
    Role(#[from] RoleStoreError),

    #[error(transparent)]
    Group(#[from] GroupServiceError),
}

impl GroupError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GroupError::RoleNotFound(_)
                | GroupError::GroupNotFound(_)
                | GroupError::NotGuidUdi(_)
                | GroupError::InvalidId(_)
        )
    }
}

/// The records found for a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedGroup {
    RoleOnly(IdentityRole),
    Merged { role: IdentityRole, group: MemberGroup },
}

impl ResolvedGroup {
    pub fn role(&self) -> &IdentityRole {
        match self {
            ResolvedGroup::RoleOnly(role) | ResolvedGroup::Merged { role, .. } => role,
        }
    }

    pub fn to_display(&self) -> MemberGroupDisplay {
        match self {
            ResolvedGroup::RoleOnly(role) => mapper::from_role(role),
            ResolvedGroup::Merged { role, group } => mapper::merge(role, group),
        }
    }
}

/// One entry of a bulk lookup, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkLookup {
    Found { id: i32, group: MemberGroupDisplay },
    NotFound { id: i32 },
}

/// Reconciles the two member group stores.
#[derive(Clone)]
pub struct MemberGroupRepository {
    roles: Arc<dyn RoleStore>,
    groups: Arc<dyn MemberGroupService>,
}

impl MemberGroupRepository {
    pub fn new(roles: Arc<dyn RoleStore>, groups: Arc<dyn MemberGroupService>) -> Self {
        Self { roles, groups }
    }

    async fn role(&self, lookup: &str) -> Result<IdentityRole, GroupError> {
        match self.roles.find_by_id(lookup).await? {
            Some(role) => Ok(role),
            None => {
                metrics::record_store_miss("identity");
                Err(GroupError::RoleNotFound(lookup.to_string()))
            }
        }
    }

    /// Resolve a group by any id form.
    pub async fn find(&self, id: &GroupId) -> Result<ResolvedGroup, GroupError> {
        match id {
            GroupId::Int(id) => {
                let role = self.role(&id.to_string()).await?;
                let group = match self.groups.get_by_id(*id).await? {
                    Some(group) => group,
                    None => {
                        metrics::record_store_miss("legacy");
                        return Err(GroupError::GroupNotFound(*id));
                    }
                };
                Ok(ResolvedGroup::Merged { role, group })
            }
            GroupId::Guid(guid) => Ok(ResolvedGroup::RoleOnly(self.role(&guid.to_string()).await?)),
            GroupId::Udi(udi) => {
                let guid = udi
                    .as_guid()
                    .ok_or_else(|| GroupError::NotGuidUdi(udi.to_string()))?;
                Ok(ResolvedGroup::RoleOnly(self.role(&guid.to_string()).await?))
            }
        }
    }

    /// Resolve each id against the identity store. Misses are reported per
    /// entry; store failures abort the whole lookup.
    pub async fn find_many(&self, ids: &[i32]) -> Result<Vec<BulkLookup>, GroupError> {
        let mut results = Vec::with_capacity(ids.len());
        for &id in ids {
            let entry = match self.roles.find_by_id(&id.to_string()).await? {
                Some(role) => BulkLookup::Found {
                    id,
                    group: mapper::from_role(&role),
                },
                None => {
                    metrics::record_store_miss("identity");
                    BulkLookup::NotFound { id }
                }
            };
            results.push(entry);
        }
        Ok(results)
    }

    /// Every role, ordered by integer id; non-integer ids sort last.
    pub async fn all(&self) -> Result<Vec<IdentityRole>, GroupError> {
        let mut roles = self.roles.roles().await?;
        roles.sort_by(|a, b| match (a.int_id(), b.int_id()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(roles)
    }

    pub async fn role_count(&self) -> Result<usize, GroupError> {
        Ok(self.roles.roles().await?.len())
    }

    /// Delete the role for `id`. The legacy group record is left in place.
    pub async fn delete(&self, id: i32) -> Result<IdentityRole, GroupError> {
        let role = self.role(&id.to_string()).await?;
        self.roles.delete(&role).await?;
        tracing::info!(group_id = id, name = %role.name, "Member group role deleted");
        Ok(role)
    }

    /// Rename the role for `id`. Only existing groups can be saved; ids
    /// `<= 0` are rejected without touching either store.
    pub async fn rename(&self, id: i32, name: &str) -> Result<IdentityRole, GroupError> {
        if id <= 0 {
            return Err(GroupError::InvalidId(id));
        }
        let mut role = self.role(&id.to_string()).await?;
        role.name = name.to_string();
        self.roles.update(&role).await?;
        tracing::info!(group_id = id, name = %role.name, "Member group role saved");
        Ok(role)
    }
}
