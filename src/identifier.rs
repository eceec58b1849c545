//! Member group identifiers.
//!
//! A group can be addressed by its integer id, its GUID key, or a UDI
//! (`umb://{entity-type}/{id}`) wrapping either a GUID or an opaque string.
//! Parsing tries the forms in that order, so `"42"` is always an integer id.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// UDI scheme prefix.
pub const UDI_SCHEME: &str = "umb://";

/// Entity type tag used for member group UDIs.
pub const MEMBER_GROUP_ENTITY_TYPE: &str = "member-group";

/// Errors produced while parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("'{0}' is not a UDI (expected umb://<entity-type>/<id>)")]
    NotAUdi(String),

    #[error("UDI '{0}' has an empty entity type or id")]
    EmptyUdiSegment(String),

    #[error("'{0}' is not an integer id, GUID or UDI")]
    Unrecognized(String),
}

/// A typed universal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Udi {
    /// Identifier wrapping a GUID.
    Guid { entity_type: String, guid: Uuid },
    /// Identifier wrapping an opaque string id.
    String { entity_type: String, id: String },
}

impl Udi {
    /// Build a GUID UDI for the given entity type.
    pub fn guid(entity_type: impl Into<String>, guid: Uuid) -> Self {
        Udi::Guid {
            entity_type: entity_type.into(),
            guid,
        }
    }

    /// The UDI for a member group key.
    pub fn member_group(key: Uuid) -> Self {
        Self::guid(MEMBER_GROUP_ENTITY_TYPE, key)
    }

    pub fn entity_type(&self) -> &str {
        match self {
            Udi::Guid { entity_type, .. } | Udi::String { entity_type, .. } => entity_type,
        }
    }

    /// The wrapped GUID, if this is a GUID-bearing UDI.
    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            Udi::Guid { guid, .. } => Some(*guid),
            Udi::String { .. } => None,
        }
    }
}

impl FromStr for Udi {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(UDI_SCHEME)
            .ok_or_else(|| IdentifierError::NotAUdi(s.to_string()))?;
        let (entity_type, id) = rest
            .split_once('/')
            .ok_or_else(|| IdentifierError::NotAUdi(s.to_string()))?;
        let id = id.trim_end_matches('/');
        if entity_type.is_empty() || id.is_empty() {
            return Err(IdentifierError::EmptyUdiSegment(s.to_string()));
        }

        Ok(match Uuid::parse_str(id) {
            Ok(guid) => Udi::Guid {
                entity_type: entity_type.to_string(),
                guid,
            },
            Err(_) => Udi::String {
                entity_type: entity_type.to_string(),
                id: id.to_string(),
            },
        })
    }
}

impl fmt::Display for Udi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Udi::Guid { entity_type, guid } => {
                write!(f, "{}{}/{}", UDI_SCHEME, entity_type, guid.simple())
            }
            Udi::String { entity_type, id } => write!(f, "{}{}/{}", UDI_SCHEME, entity_type, id),
        }
    }
}

/// Any of the accepted ways of addressing a member group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupId {
    Int(i32),
    Guid(Uuid),
    Udi(Udi),
}

impl FromStr for GroupId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Ok(GroupId::Int(id));
        }
        if let Ok(guid) = Uuid::parse_str(s) {
            return Ok(GroupId::Guid(guid));
        }
        if s.starts_with(UDI_SCHEME) {
            return s.parse().map(GroupId::Udi);
        }
        Err(IdentifierError::Unrecognized(s.to_string()))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Int(id) => write!(f, "{}", id),
            GroupId::Guid(guid) => write!(f, "{}", guid),
            GroupId::Udi(udi) => write!(f, "{}", udi),
        }
    }
}
