//! Role definitions for RBAC.
//!
//! The [`RolePermissionTable`] maps each role to the actions it may perform
//! in each module. Built-in roles, from most to least privileged:
//! - super admin: everything
//! - admin: everything except creating/deleting roles and editing permissions
//! - manager: runs orders and products, can view and edit users
//! - staff: works orders, views users and products
//! - vendor: manages its own products, views users
//!
//! The table is built once and never mutated afterwards. Share it by
//! reference (or `Arc`) with whatever needs to answer authorization queries.

use std::collections::BTreeMap;

use rolegate_types::{Action, ModuleName, RoleName, modules, roles};
use serde::{Deserialize, Serialize};

use crate::grants::ModuleActionGrant;
use crate::permissions::{ActionSet, ModulePermissions};

static NO_PERMISSIONS: ModulePermissions = ModulePermissions::empty();

/// Immutable role → module → actions lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionTable {
    roles: BTreeMap<RoleName, ModulePermissions>,
}

impl RolePermissionTable {
    /// Creates a table with no roles. Every lookup resolves to nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a custom table (e.g. a test fixture).
    pub fn builder() -> RoleTableBuilder {
        RoleTableBuilder::default()
    }

    /// Returns the built-in table.
    ///
    /// | Role        | USER | ROLE  | PERMISSION | ORDER | PRODUCT |
    /// |-------------|------|-------|------------|-------|---------|
    /// | super admin | CRUD | CRUD  | CRUD       | CRUD  | CRUD    |
    /// | admin       | CRUD | C R U | R          | CRUD  | CRUD    |
    /// | manager     | R U  | R     |            | C R U | C R U   |
    /// | staff       | R    |       |            | R U   | R       |
    /// | vendor      | R    |       |            |       | C R U   |
    pub fn standard() -> Self {
        use Action::{Create, Read, Update};

        let mut builder = Self::builder();
        for module in modules::ALL {
            builder = builder.grant(roles::SUPER_ADMIN, module, Action::ALL);
        }

        builder
            .grant(roles::ADMIN, modules::USER, Action::ALL)
            .grant(roles::ADMIN, modules::ROLE, [Create, Read, Update])
            .grant(roles::ADMIN, modules::PERMISSION, [Read])
            .grant(roles::ADMIN, modules::ORDER, Action::ALL)
            .grant(roles::ADMIN, modules::PRODUCT, Action::ALL)
            .grant(roles::MANAGER, modules::USER, [Read, Update])
            .grant(roles::MANAGER, modules::ROLE, [Read])
            .grant(roles::MANAGER, modules::ORDER, [Create, Read, Update])
            .grant(roles::MANAGER, modules::PRODUCT, [Create, Read, Update])
            .grant(roles::STAFF, modules::USER, [Read])
            .grant(roles::STAFF, modules::ORDER, [Read, Update])
            .grant(roles::STAFF, modules::PRODUCT, [Read])
            .grant(roles::VENDOR, modules::USER, [Read])
            .grant(roles::VENDOR, modules::PRODUCT, [Create, Read, Update])
            .build()
    }

    /// Returns the module permissions of `role`.
    ///
    /// Roles absent from the table resolve to an empty mapping.
    pub fn permissions_for(&self, role: &str) -> &ModulePermissions {
        self.roles.get(role).unwrap_or(&NO_PERMISSIONS)
    }

    /// Returns the actions `role` may perform within `module`.
    pub fn actions_for(&self, role: &str, module: &str) -> &ActionSet {
        self.permissions_for(role).actions_for(module)
    }

    /// Returns whether `role` may perform `action` within `module`.
    pub fn allows(&self, role: &str, module: &str, action: Action) -> bool {
        self.actions_for(role, module).contains(action)
    }

    /// Returns whether the table defines `role` at all.
    pub fn contains_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Derives the grant list a signed-in user with `role` carries.
    ///
    /// The result feeds [`crate::grants::has_permission_by_module`]. Unknown
    /// roles yield an empty list.
    pub fn grants_for(&self, role: &str) -> Vec<ModuleActionGrant> {
        self.permissions_for(role)
            .iter()
            .map(|(module, actions)| ModuleActionGrant::new(module.clone(), actions.clone()))
            .collect()
    }

    /// Iterates over defined roles in name order.
    pub fn roles(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.keys()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Consuming builder for [`RolePermissionTable`].
#[derive(Debug, Default)]
pub struct RoleTableBuilder {
    roles: BTreeMap<RoleName, ModulePermissions>,
}

impl RoleTableBuilder {
    /// Grants `actions` on `module` to `role`, merging with earlier grants.
    pub fn grant(
        mut self,
        role: impl Into<RoleName>,
        module: impl Into<ModuleName>,
        actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        self.roles
            .entry(role.into())
            .or_default()
            .grant(module.into(), actions);
        self
    }

    /// Declares a role with no permissions.
    pub fn role(mut self, role: impl Into<RoleName>) -> Self {
        self.roles.entry(role.into()).or_default();
        self
    }

    pub fn build(self) -> RolePermissionTable {
        RolePermissionTable { roles: self.roles }
    }
}
