//! Member groups API library.
//!
//! Serves member groups that live in two stores: the identity role store
//! (existence and name) and the legacy member group service (key, creator,
//! audit dates). [`groups::MemberGroupRepository`] reconciles them.

pub mod api;
pub mod config;
pub mod display;
pub mod groups;
pub mod http;
pub mod identifier;
pub mod identity;
pub mod lifecycle;
pub mod localization;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
