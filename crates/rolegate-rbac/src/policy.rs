//! Unified authorization interface.
//!
//! Callers state which grant shape they hold and which requirement they
//! check, so the semantics in play are always explicit:
//!
//! | Grants           | Requirement                 | Satisfied when                           |
//! |------------------|-----------------------------|------------------------------------------|
//! | `ModuleAction`   | `ModuleAction { m, a }`     | some grant is for `m` and contains `a`   |
//! | `FlatIdentifier` | `FlatIdentifier(Some(id))`  | `id` is in the list                      |
//! | any              | `FlatIdentifier(None)`      | always (nothing required)                |
//! | mismatched shape | anything else               | never                                    |

use std::fmt::Display;

use rolegate_types::{Action, ModuleName, PermissionId};
use serde::{Deserialize, Serialize};

use crate::grants::{ModuleActionGrant, has_permission_by_identifier};

/// Permissions held by a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "grants", rename_all = "snake_case")]
pub enum Grants {
    /// Per-module action grants.
    ModuleAction(Vec<ModuleActionGrant>),
    /// Flat permission identifiers.
    FlatIdentifier(Vec<PermissionId>),
}

impl Grants {
    /// Returns whether these grants satisfy `requirement`.
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        match (self, requirement) {
            (_, Requirement::FlatIdentifier(None)) => true,
            (Grants::FlatIdentifier(granted), Requirement::FlatIdentifier(required)) => {
                has_permission_by_identifier(granted, required.as_ref())
            }
            (Grants::ModuleAction(grants), Requirement::ModuleAction { module, action }) => grants
                .iter()
                .any(|grant| grant.allows(module.as_str(), *action)),
            (Grants::ModuleAction(_), Requirement::FlatIdentifier(Some(_)))
            | (Grants::FlatIdentifier(_), Requirement::ModuleAction { .. }) => false,
        }
    }

    /// Returns the shape name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Grants::ModuleAction(_) => "module_action",
            Grants::FlatIdentifier(_) => "flat_identifier",
        }
    }
}

/// What an operation requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    /// `action` within `module`.
    ModuleAction { module: ModuleName, action: Action },
    /// A single flat permission, or nothing at all.
    FlatIdentifier(Option<PermissionId>),
}

impl Requirement {
    /// Requires `action` within `module`.
    pub fn module_action(module: impl Into<ModuleName>, action: Action) -> Self {
        Requirement::ModuleAction {
            module: module.into(),
            action,
        }
    }

    /// Requires READ within `module`.
    pub fn read(module: impl Into<ModuleName>) -> Self {
        Self::module_action(module, Action::DEFAULT)
    }

    /// Requires one flat permission. An empty identifier requires nothing.
    pub fn identifier(id: impl Into<PermissionId>) -> Self {
        let id = id.into();
        if id.is_empty() {
            Requirement::FlatIdentifier(None)
        } else {
            Requirement::FlatIdentifier(Some(id))
        }
    }

    /// Requires nothing.
    pub fn nothing() -> Self {
        Requirement::FlatIdentifier(None)
    }
}

impl Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::ModuleAction { module, action } => write!(f, "{action} on {module}"),
            Requirement::FlatIdentifier(Some(id)) => write!(f, "permission {id}"),
            Requirement::FlatIdentifier(None) => write!(f, "nothing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn order_grants() -> Grants {
        Grants::ModuleAction(vec![ModuleActionGrant::from_strs(
            "ORDER",
            ["read", "update"],
        )])
    }

    fn flat_grants() -> Grants {
        Grants::FlatIdentifier(vec![PermissionId::from("USER_READ")])
    }

    #[test_case(Requirement::read("ORDER"), true; "default read")]
    #[test_case(Requirement::module_action("ORDER", Action::Update), true; "update")]
    #[test_case(Requirement::module_action("ORDER", Action::Delete), false; "delete not granted")]
    #[test_case(Requirement::read("PRODUCT"), false; "other module")]
    #[test_case(Requirement::identifier("USER_READ"), false; "shape mismatch")]
    #[test_case(Requirement::nothing(), true; "nothing required")]
    fn test_module_action_grants(requirement: Requirement, expected: bool) {
        assert_eq!(order_grants().satisfies(&requirement), expected);
    }

    #[test_case(Requirement::identifier("USER_READ"), true; "member")]
    #[test_case(Requirement::identifier("USER_WRITE"), false; "not member")]
    #[test_case(Requirement::identifier(""), true; "empty requirement")]
    #[test_case(Requirement::read("USER"), false; "shape mismatch")]
    fn test_flat_identifier_grants(requirement: Requirement, expected: bool) {
        assert_eq!(flat_grants().satisfies(&requirement), expected);
    }

    #[test]
    fn test_empty_grants_deny_everything_required() {
        let grants = Grants::ModuleAction(Vec::new());
        assert!(!grants.satisfies(&Requirement::read("ORDER")));
        assert!(grants.satisfies(&Requirement::nothing()));

        let flat = Grants::FlatIdentifier(Vec::new());
        assert!(!flat.satisfies(&Requirement::identifier("USER_READ")));
    }

    #[test]
    fn test_identifier_constructor_normalizes_empty() {
        assert_eq!(Requirement::identifier(""), Requirement::nothing());
    }

    #[test]
    fn test_requirement_display() {
        assert_eq!(
            Requirement::module_action("ORDER", Action::Delete).to_string(),
            "DELETE on ORDER"
        );
        assert_eq!(
            Requirement::identifier("USER_READ").to_string(),
            "permission USER_READ"
        );
        assert_eq!(Requirement::nothing().to_string(), "nothing");
    }

    #[test]
    fn test_grants_json_shape() {
        let json = r#"{ "kind": "flat_identifier", "grants": ["USER_READ"] }"#;
        let grants: Grants = serde_json::from_str(json).unwrap();
        assert_eq!(grants, flat_grants());
        assert_eq!(grants.kind(), "flat_identifier");
    }

    #[test]
    fn test_module_grants_payload_tolerates_unknown_action() {
        let json = r#"{
            "kind": "module_action",
            "grants": [{ "module": "ORDER", "actions": ["read", "update", "export"] }]
        }"#;
        let grants: Grants = serde_json::from_str(json).unwrap();

        assert_eq!(grants, order_grants());
        assert!(grants.satisfies(&Requirement::read("ORDER")));
    }
}
