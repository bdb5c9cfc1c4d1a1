//! # rolegate-types: Core types for `Rolegate`
//!
//! This crate contains shared types used across the `Rolegate` system:
//! - Identity names ([`RoleName`], [`ModuleName`], [`PermissionId`])
//! - Actions ([`Action`], [`UnknownAction`])
//! - Well-known names ([`modules`], [`roles`])
//!
//! Names are open: any string is a valid role, module or permission
//! identifier, and comparison is always exact. Only [`Action`] is a closed
//! set, and it is normalized to one case at the boundary.

use std::{
    borrow::Borrow,
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Names - Clone (heap strings, compared exactly)
// ============================================================================

/// Name of a user's role (e.g. `"super admin"`, `"vendor"`).
///
/// Not a closed set. Unknown roles are valid lookup keys and resolve to
/// no permissions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoleName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Borrow<str> for RoleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Name of a protected resource category (e.g. `"USER"`, `"ORDER"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModuleName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<ModuleName> for String {
    fn from(value: ModuleName) -> Self {
        value.0
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of a single flat permission (e.g. `"USER_READ"`).
///
/// Carries no module/action structure; two identifiers match only when
/// they are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this identifier is empty.
    ///
    /// An empty requirement means "no permission required".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for PermissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PermissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PermissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<PermissionId> for String {
    fn from(value: PermissionId) -> Self {
        value.0
    }
}

// ============================================================================
// Action - Copy (simple enum, no heap data)
// ============================================================================

/// Error returned when a string does not name one of the four actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action {0:?}: expected one of CREATE, READ, UPDATE, DELETE")]
pub struct UnknownAction(pub String);

/// Operation a role may perform within a module.
///
/// The canonical spelling is uppercase (`"READ"`). Parsing is ASCII
/// case-insensitive, so `"read"` and `"READ"` denote the same action.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Action {
    Create,
    #[default]
    Read,
    Update,
    Delete,
}

impl Action {
    /// All actions, in CRUD order.
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// Action checked when a caller does not name one.
    pub const DEFAULT: Action = Action::Read;

    /// Returns the canonical uppercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }

    /// Parses an action, ignoring ASCII case.
    ///
    /// Returns `None` for anything that is not one of the four actions.
    /// Permission checks use this so that an unknown action is simply
    /// "no match" rather than an error.
    pub fn parse_lenient(s: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::parse_lenient(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl TryFrom<String> for Action {
    type Error = UnknownAction;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// Well-known names
// ============================================================================

/// Module names used by the built-in role table.
pub mod modules {
    pub const USER: &str = "USER";
    pub const ROLE: &str = "ROLE";
    pub const PERMISSION: &str = "PERMISSION";
    pub const ORDER: &str = "ORDER";
    pub const PRODUCT: &str = "PRODUCT";

    /// All built-in modules.
    pub const ALL: [&str; 5] = [USER, ROLE, PERMISSION, ORDER, PRODUCT];
}

/// Role names used by the built-in role table.
pub mod roles {
    pub const SUPER_ADMIN: &str = "super admin";
    pub const ADMIN: &str = "admin";
    pub const MANAGER: &str = "manager";
    pub const STAFF: &str = "staff";
    pub const VENDOR: &str = "vendor";

    /// All built-in roles, from most to least privileged.
    pub const ALL: [&str; 5] = [SUPER_ADMIN, ADMIN, MANAGER, STAFF, VENDOR];
}
