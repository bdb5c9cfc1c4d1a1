//! Permission resolution.
//!
//! [`PermissionResolver`] answers authorization queries against an injected
//! [`RolePermissionTable`] and audits each decision.

use std::sync::Arc;

use rolegate_types::{Action, PermissionId};
use thiserror::Error;
use tracing::{info, warn};

use crate::grants::{self, ModuleActionGrant};
use crate::permissions::ModulePermissions;
use crate::policy::{Grants, Requirement};
use crate::roles::RolePermissionTable;

/// Error type for permission enforcement.
#[derive(Debug, Error)]
pub enum EnforcementError {
    /// The caller's grants do not satisfy the requirement.
    #[error("Access denied: {requirement} is required")]
    AccessDenied { requirement: String },

    /// The caller's role does not allow the action.
    #[error("Insufficient permissions: role '{role}' cannot {action} {module}")]
    InsufficientPermissions {
        role: String,
        module: String,
        action: Action,
    },
}

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, EnforcementError>;

/// Permission resolution engine.
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    /// Role table, fixed for the resolver's lifetime.
    table: Arc<RolePermissionTable>,

    /// Whether to log decisions.
    audit_enabled: bool,
}

impl PermissionResolver {
    /// Creates a resolver over `table`.
    pub fn new(table: Arc<RolePermissionTable>) -> Self {
        Self {
            table,
            audit_enabled: true,
        }
    }

    /// Creates a resolver over the built-in table.
    pub fn standard() -> Self {
        Self::new(Arc::new(RolePermissionTable::standard()))
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Returns the underlying table.
    pub fn table(&self) -> &RolePermissionTable {
        &self.table
    }

    /// Returns the module permissions of `role`; empty for unknown roles.
    pub fn permissions_for(&self, role: &str) -> &ModulePermissions {
        self.table.permissions_for(role)
    }

    /// Derives the grants a signed-in user with `role` carries.
    pub fn grants_for_role(&self, role: &str) -> Grants {
        Grants::ModuleAction(self.table.grants_for(role))
    }

    /// Returns whether `role` may perform `action` within `module`.
    pub fn role_allows(&self, role: &str, module: &str, action: Action) -> bool {
        let allowed = self.table.allows(role, module, action);

        if self.audit_enabled {
            if allowed {
                info!(role, module, %action, "Role access granted");
            } else {
                warn!(role, module, %action, "Role access denied");
            }
        }

        allowed
    }

    /// Enforces that `role` may perform `action` within `module`.
    pub fn enforce_role(&self, role: &str, module: &str, action: Action) -> Result<()> {
        if self.role_allows(role, module, action) {
            Ok(())
        } else {
            Err(EnforcementError::InsufficientPermissions {
                role: role.to_string(),
                module: module.to_string(),
                action,
            })
        }
    }

    /// Returns whether `grants` satisfy `requirement`.
    pub fn authorize(&self, grants: &Grants, requirement: &Requirement) -> bool {
        let allowed = grants.satisfies(requirement);

        if self.audit_enabled {
            if allowed {
                info!(grants = grants.kind(), %requirement, "Access granted");
            } else {
                warn!(grants = grants.kind(), %requirement, "Access denied");
            }
        }

        allowed
    }

    /// Enforces that `grants` satisfy `requirement`.
    ///
    /// Returns `Ok(())` if access is allowed, `Err` otherwise.
    pub fn enforce(&self, grants: &Grants, requirement: &Requirement) -> Result<()> {
        if self.authorize(grants, requirement) {
            Ok(())
        } else {
            Err(EnforcementError::AccessDenied {
                requirement: requirement.to_string(),
            })
        }
    }

    /// Module/action check; see [`grants::has_permission_by_module`].
    pub fn has_permission_by_module(
        &self,
        grants: Option<&[ModuleActionGrant]>,
        module: &str,
        action: Option<&str>,
    ) -> bool {
        let allowed = grants::has_permission_by_module(grants, module, action);

        if self.audit_enabled && !allowed {
            warn!(module, action = action.unwrap_or("read"), "Module access denied");
        }

        allowed
    }

    /// Flat identifier check; see [`grants::has_permission_by_identifier`].
    pub fn has_permission_by_identifier(
        &self,
        granted: &[PermissionId],
        required: Option<&PermissionId>,
    ) -> bool {
        let allowed = grants::has_permission_by_identifier(granted, required);

        if self.audit_enabled && !allowed {
            warn!(required = ?required.map(PermissionId::as_str), "Permission denied");
        }

        allowed
    }
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_types::{modules, roles};

    #[test]
    fn test_role_allows_uses_table() {
        let resolver = PermissionResolver::standard().without_audit();

        assert!(resolver.role_allows(roles::SUPER_ADMIN, modules::USER, Action::Delete));
        assert!(resolver.role_allows(roles::VENDOR, modules::USER, Action::Read));
        assert!(!resolver.role_allows(roles::VENDOR, modules::ORDER, Action::Read));
        assert!(!resolver.role_allows("guest", modules::USER, Action::Read));
    }

    #[test]
    fn test_enforce_role_denied() {
        let resolver = PermissionResolver::standard().without_audit();
        let result = resolver.enforce_role(roles::STAFF, modules::USER, Action::Delete);

        match result {
            Err(EnforcementError::InsufficientPermissions { role, module, action }) => {
                assert_eq!(role, roles::STAFF);
                assert_eq!(module, modules::USER);
                assert_eq!(action, Action::Delete);
            }
            _ => panic!("Expected InsufficientPermissions error"),
        }
    }

    #[test]
    fn test_fixture_table_is_injected() {
        let table = RolePermissionTable::builder()
            .grant("tester", "REPORT", [Action::Read])
            .build();
        let resolver = PermissionResolver::new(Arc::new(table)).without_audit();

        assert!(resolver.role_allows("tester", "REPORT", Action::Read));
        assert!(!resolver.role_allows(roles::SUPER_ADMIN, modules::USER, Action::Read));
    }

    #[test]
    fn test_grants_for_role_feed_module_check() {
        let resolver = PermissionResolver::standard().without_audit();

        let Grants::ModuleAction(grants) = resolver.grants_for_role(roles::MANAGER) else {
            panic!("Expected module/action grants");
        };
        assert!(resolver.has_permission_by_module(Some(&grants), modules::ORDER, None));
        assert!(resolver.has_permission_by_module(Some(&grants), modules::ORDER, Some("create")));
        assert!(!resolver.has_permission_by_module(Some(&grants), modules::ORDER, Some("delete")));
        assert!(!resolver.has_permission_by_module(Some(&grants), modules::PERMISSION, None));
    }

    #[test]
    fn test_enforce_access_denied_names_requirement() {
        let resolver = PermissionResolver::standard().without_audit();
        let grants = Grants::FlatIdentifier(vec![PermissionId::from("USER_READ")]);

        assert!(resolver.enforce(&grants, &Requirement::identifier("USER_READ")).is_ok());
        assert!(resolver.enforce(&grants, &Requirement::nothing()).is_ok());

        let err = resolver
            .enforce(&grants, &Requirement::identifier("USER_WRITE"))
            .unwrap_err();
        assert!(err.to_string().contains("USER_WRITE"));
    }

    #[test]
    fn test_identifier_check_passthrough() {
        let resolver = PermissionResolver::standard().without_audit();
        let granted = vec![PermissionId::from("USER_READ")];

        assert!(resolver.has_permission_by_identifier(&granted, None));
        assert!(!resolver.has_permission_by_identifier(&[], Some(&PermissionId::from("USER_READ"))));
    }

    #[test]
    fn test_audited_resolver_gives_same_answers() {
        let audited = PermissionResolver::standard();
        let quiet = PermissionResolver::standard().without_audit();

        for role in roles::ALL {
            for module in modules::ALL {
                for action in Action::ALL {
                    assert_eq!(
                        audited.role_allows(role, module, action),
                        quiet.role_allows(role, module, action)
                    );
                }
            }
        }
    }

    #[test]
    fn test_clones_share_table() {
        let resolver = PermissionResolver::standard();
        let clone = resolver.clone();
        assert!(std::ptr::eq(resolver.table(), clone.table()));
    }
}
