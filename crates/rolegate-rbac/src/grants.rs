//! Grants held by a signed-in user, and the two permission checks.
//!
//! Two grant shapes exist side by side:
//! - [`ModuleActionGrant`]: "within module M, the user may do actions A"
//! - [`PermissionId`]: a flat, opaque permission identifier
//!
//! Both checks are total. Missing input never errors: absent grants deny,
//! and an absent flat requirement allows.

use rolegate_types::{Action, ModuleName, PermissionId, UnknownAction};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::permissions::ActionSet;

/// Error building a grant from untrusted strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// An action string was not one of CREATE, READ, UPDATE, DELETE.
    #[error("grant for module '{module}': {source}")]
    UnknownAction {
        module: String,
        source: UnknownAction,
    },
}

/// What a signed-in user may do within one module.
///
/// Deserializing never fails on an action string: unknown actions are
/// dropped the same way [`ModuleActionGrant::from_strs`] drops them, so one
/// unexpected value cannot revoke the rest of a session's grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawModuleActionGrant")]
pub struct ModuleActionGrant {
    pub module: ModuleName,
    pub actions: ActionSet,
}

/// Wire shape of a grant before its actions are parsed.
#[derive(Deserialize)]
struct RawModuleActionGrant {
    module: ModuleName,
    actions: Vec<String>,
}

impl From<RawModuleActionGrant> for ModuleActionGrant {
    fn from(raw: RawModuleActionGrant) -> Self {
        Self::from_strs(raw.module, raw.actions.iter().map(String::as_str))
    }
}

impl ModuleActionGrant {
    pub fn new(module: impl Into<ModuleName>, actions: impl Into<ActionSet>) -> Self {
        Self {
            module: module.into(),
            actions: actions.into(),
        }
    }

    /// Builds a grant from raw action strings, dropping any it does not
    /// recognize.
    ///
    /// Action strings are matched case-insensitively, so `["read", "update"]`
    /// grants READ and UPDATE.
    pub fn from_strs<'a>(
        module: impl Into<ModuleName>,
        actions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let module = module.into();
        let actions = actions
            .into_iter()
            .filter_map(|raw| {
                let parsed = Action::parse_lenient(raw);
                if parsed.is_none() {
                    debug!(module = %module, action = raw, "Ignoring unknown action in grant");
                }
                parsed
            })
            .collect();
        Self { module, actions }
    }

    /// Builds a grant from raw action strings, rejecting unknown ones.
    pub fn try_from_strs<'a>(
        module: impl Into<ModuleName>,
        actions: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, RbacError> {
        let module = module.into();
        let actions = actions
            .into_iter()
            .map(str::parse::<Action>)
            .collect::<Result<ActionSet, _>>()
            .map_err(|source| RbacError::UnknownAction {
                module: module.to_string(),
                source,
            })?;
        Ok(Self { module, actions })
    }

    /// Returns whether this grant covers `action` within `module`.
    ///
    /// Module names are compared exactly (case-sensitive).
    pub fn allows(&self, module: &str, action: Action) -> bool {
        self.module.as_str() == module && self.actions.contains(action)
    }
}

/// Checks a user's module/action grants against a required module and action.
///
/// - `grants`: `None` is treated as no grants.
/// - `action`: defaults to `"read"`. It is matched case-insensitively against
///   the canonical actions, so `"read"` satisfies a `READ` grant. A string
///   that names no action never matches.
///
/// Returns true iff some grant is for exactly `module` and contains the action.
///
/// # Examples
///
/// ```
/// use rolegate_rbac::grants::{ModuleActionGrant, has_permission_by_module};
///
/// let grants = vec![ModuleActionGrant::from_strs("ORDER", ["read", "update"])];
/// assert!(has_permission_by_module(Some(&grants), "ORDER", None));
/// assert!(!has_permission_by_module(Some(&[]), "ORDER", None));
/// assert!(!has_permission_by_module(None, "ORDER", Some("delete")));
/// ```
pub fn has_permission_by_module(
    grants: Option<&[ModuleActionGrant]>,
    module: &str,
    action: Option<&str>,
) -> bool {
    let Some(action) = Action::parse_lenient(action.unwrap_or("read")) else {
        return false;
    };
    grants
        .unwrap_or_default()
        .iter()
        .any(|grant| grant.allows(module, action))
}

/// Checks a flat list of permission identifiers against one requirement.
///
/// An absent or empty requirement is vacuously satisfied. Otherwise the
/// requirement must appear verbatim in `granted`; there is no wildcard or
/// hierarchy.
///
/// # Examples
///
/// ```
/// use rolegate_rbac::grants::has_permission_by_identifier;
/// use rolegate_types::PermissionId;
///
/// let granted = vec![PermissionId::from("USER_READ")];
/// assert!(has_permission_by_identifier(&granted, None));
/// assert!(!has_permission_by_identifier(&granted, Some(&PermissionId::from("USER_WRITE"))));
/// ```
pub fn has_permission_by_identifier(
    granted: &[PermissionId],
    required: Option<&PermissionId>,
) -> bool {
    match required {
        None => true,
        Some(required) if required.is_empty() => true,
        Some(required) => granted.contains(required),
    }
}
