//! Legacy member group record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member group as kept by the legacy group service.
///
/// Carries metadata the identity role lacks (creator, audit dates). A value
/// built with [`MemberGroup::default`] is an unpersisted blank: id 0, nil key
/// and no dates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberGroup {
    pub id: i32,
    pub key: Uuid,
    pub name: String,
    pub creator_id: i32,
    pub create_date: Option<DateTime<Utc>>,
    pub update_date: Option<DateTime<Utc>>,
}

impl MemberGroup {
    pub fn new(name: impl Into<String>, creator_id: i32) -> Self {
        Self {
            name: name.into(),
            creator_id,
            ..Self::default()
        }
    }

    /// True until the group service has assigned an id.
    pub fn is_new(&self) -> bool {
        self.id <= 0
    }
}
