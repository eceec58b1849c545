//! Entity → display model mapping.
//!
//! # Merge policy
//! When a role and a legacy group describe the same id:
//! - `name` comes from the role (the identity store owns it)
//! - `id`, `key`, `creator_id` and the audit dates come from the group
//!
//! A role on its own maps without creator or dates.

use uuid::Uuid;

use crate::display::model::{MemberGroupDisplay, MEMBER_GROUP_ICON, ROOT_PARENT_ID};
use crate::groups::MemberGroup;
use crate::identifier::Udi;
use crate::identity::IdentityRole;

fn blank(id: i32, key: Uuid, name: String) -> MemberGroupDisplay {
    MemberGroupDisplay {
        id,
        key,
        udi: (!key.is_nil()).then(|| Udi::member_group(key).to_string()),
        name,
        icon: MEMBER_GROUP_ICON.to_string(),
        path: format!("{},{}", ROOT_PARENT_ID, id),
        parent_id: ROOT_PARENT_ID,
        trashed: false,
        creator_id: None,
        create_date: None,
        update_date: None,
        notifications: Vec::new(),
    }
}

/// Map a legacy group record.
pub fn from_group(group: &MemberGroup) -> MemberGroupDisplay {
    MemberGroupDisplay {
        creator_id: Some(group.creator_id),
        create_date: group.create_date,
        update_date: group.update_date,
        ..blank(group.id, group.key, group.name.clone())
    }
}

/// Map a role record. Ids that are not integers map to 0.
pub fn from_role(role: &IdentityRole) -> MemberGroupDisplay {
    blank(role.int_id().unwrap_or_default(), role.key, role.name.clone())
}

/// Map a role enriched with its legacy group record.
pub fn merge(role: &IdentityRole, group: &MemberGroup) -> MemberGroupDisplay {
    MemberGroupDisplay {
        name: role.name.clone(),
        ..from_group(group)
    }
}
