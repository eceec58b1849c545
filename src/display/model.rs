//! Display model returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icon shown for every member group.
pub const MEMBER_GROUP_ICON: &str = "icon-users";

/// Root parent id; member groups are not nested.
pub const ROOT_PARENT_ID: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing message attached to a display model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub header: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
}

/// Read model combining whichever backing records were available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroupDisplay {
    pub id: i32,
    pub key: Uuid,
    pub udi: Option<String>,
    pub name: String,
    pub icon: String,
    pub path: String,
    pub parent_id: i32,
    pub trashed: bool,
    pub creator_id: Option<i32>,
    pub create_date: Option<DateTime<Utc>>,
    pub update_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
}

impl MemberGroupDisplay {
    pub fn add_success_notification(&mut self, header: impl Into<String>, message: impl Into<String>) {
        self.notifications.push(Notification {
            header: header.into(),
            message: message.into(),
            kind: NotificationType::Success,
        });
    }
}
