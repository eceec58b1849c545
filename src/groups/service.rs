//! Legacy member group service.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::groups::model::MemberGroup;

/// Errors returned by the group service.
#[derive(Debug, Clone, Error)]
pub enum GroupServiceError {
    #[error("member group name must not be empty")]
    EmptyName,

    #[error("no member group ids left to allocate")]
    IdsExhausted,

    #[error("group service unavailable: {0}")]
    Unavailable(String),
}

/// Access to legacy member group records.
#[async_trait]
pub trait MemberGroupService: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<MemberGroup>, GroupServiceError>;

    /// Insert or update a group. New groups (id <= 0) get an id and key
    /// assigned; the stored copy is returned.
    async fn save(&self, group: MemberGroup) -> Result<MemberGroup, GroupServiceError>;
}

/// Group service kept in memory.
#[derive(Clone)]
pub struct InMemoryMemberGroupService {
    groups: Arc<DashMap<i32, MemberGroup>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryMemberGroupService {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for InMemoryMemberGroupService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberGroupService for InMemoryMemberGroupService {
    async fn get_by_id(&self, id: i32) -> Result<Option<MemberGroup>, GroupServiceError> {
        Ok(self.groups.get(&id).map(|g| g.value().clone()))
    }

    async fn save(&self, mut group: MemberGroup) -> Result<MemberGroup, GroupServiceError> {
        if group.name.trim().is_empty() {
            return Err(GroupServiceError::EmptyName);
        }

        let now = Utc::now();
        if group.is_new() {
            // The allocator stops at i32::MAX instead of wrapping.
            group.id = self
                .next_id
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                .map_err(|_| GroupServiceError::IdsExhausted)?;
            if group.key.is_nil() {
                group.key = Uuid::new_v4();
            }
            group.create_date = Some(now);
        } else {
            // Explicit ids (seeding) keep the allocator ahead of them.
            self.next_id
                .fetch_max(group.id.saturating_add(1), Ordering::SeqCst);
            if group.key.is_nil() {
                group.key = Uuid::new_v4();
            }
            if let Some(existing) = self.groups.get(&group.id) {
                group.create_date = existing.create_date;
            }
            group.create_date.get_or_insert(now);
        }
        group.update_date = Some(now);

        self.groups.insert(group.id, group.clone());
        Ok(group)
    }
}
