//! Member groups: legacy records and the repository reconciling them with
//! identity roles.
//!
//! # Data Flow
//! ```text
//! GroupId
//!     → repository.rs (picks stores per id form)
//!         → identity::RoleStore
//!         → service.rs (legacy MemberGroupService, integer ids only)
//!     → ResolvedGroup → display model
//! ```

pub mod model;
pub mod repository;
pub mod service;

pub use model::MemberGroup;
pub use repository::{BulkLookup, GroupError, MemberGroupRepository, ResolvedGroup};
pub use service::{GroupServiceError, InMemoryMemberGroupService, MemberGroupService};
