//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the identity and legacy stores
//! - Load seed groups into them
//! - Assemble the handler state
//!
//! # Design Decisions
//! - Fail fast: any seed rejection is fatal
//! - Seeds may create only one side of a group to reproduce store drift

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::config::{SeedGroup, ServiceConfig};
use crate::groups::{
    GroupServiceError, InMemoryMemberGroupService, MemberGroup, MemberGroupRepository,
    MemberGroupService,
};
use crate::http::server::AppState;
use crate::identity::{IdentityRole, InMemoryRoleStore, RoleStore, RoleStoreError};
use crate::localization::TextCatalog;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to seed role for group {id}: {source}")]
    SeedRole { id: i32, source: RoleStoreError },

    #[error("failed to seed legacy group {id}: {source}")]
    SeedGroup { id: i32, source: GroupServiceError },
}

/// Write one seed entry into whichever stores it names.
pub async fn seed_group(
    roles: &dyn RoleStore,
    groups: &dyn MemberGroupService,
    seed: &SeedGroup,
) -> Result<(), StartupError> {
    let key = seed.key.unwrap_or_else(Uuid::new_v4);

    if seed.legacy {
        let group = MemberGroup {
            id: seed.id,
            key,
            ..MemberGroup::new(seed.name.clone(), seed.creator_id)
        };
        groups
            .save(group)
            .await
            .map_err(|source| StartupError::SeedGroup { id: seed.id, source })?;
    }

    if seed.role {
        roles
            .create(IdentityRole::new(seed.id, key, seed.name.clone()))
            .await
            .map_err(|source| StartupError::SeedRole { id: seed.id, source })?;
    }

    tracing::debug!(
        group_id = seed.id,
        name = %seed.name,
        role = seed.role,
        legacy = seed.legacy,
        "Seeded member group"
    );
    Ok(())
}

/// Build in-memory stores from config and wrap them in handler state.
pub async fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let roles = InMemoryRoleStore::new();
    let groups = InMemoryMemberGroupService::new();

    for seed in &config.seed.groups {
        seed_group(&roles, &groups, seed).await?;
    }

    tracing::info!(
        roles = roles.len(),
        legacy_groups = groups.len(),
        "Member group stores ready"
    );

    let repository = MemberGroupRepository::new(Arc::new(roles), Arc::new(groups));
    Ok(AppState::new(
        repository,
        TextCatalog::from_config(&config.localization),
    ))
}
