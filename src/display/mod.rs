//! Outward-facing read models.

pub mod mapper;
pub mod model;

pub use model::{MemberGroupDisplay, Notification, NotificationType};
