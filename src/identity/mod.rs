//! Identity role subsystem.
//!
//! # Data Flow
//! ```text
//! lookup string ("42" or a GUID)
//!     → RoleStore::find_by_id
//!     → IdentityRole (authoritative id + name)
//!
//! update / delete
//!     → RoleStore validates (name rules, existence)
//!     → Ok(()) or RoleStoreError::Rejected(Vec<IdentityError>)
//! ```
//!
//! The role store owns a group's existence and name. It knows nothing about
//! the legacy member group records.

pub mod role;
pub mod store;

pub use role::{IdentityError, IdentityRole};
pub use store::{InMemoryRoleStore, RoleStore, RoleStoreError};
