//! # rolegate-rbac: Role-Based Access Control
//!
//! Answers "may this user do this?" for the Rolegate dashboard:
//! - **Role table**: static role → module → actions lookup
//! - **Module/action checks**: a user's per-module grants vs. a required action
//! - **Flat identifier checks**: a user's permission ids vs. a required id
//! - **Unified interface**: [`Grants`] and [`Requirement`] with explicit variants
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Authorization Query                         │
//! │  (role, or Grants + Requirement)             │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  PermissionResolver                          │
//! │  ├─ RolePermissionTable (immutable, shared)  │
//! │  ├─ Module/action grant matching             │
//! │  ├─ Flat identifier membership               │
//! │  └─ Audit logging                            │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  bool, or Result<(), EnforcementError>       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Roles
//!
//! | Role        | USER | ROLE  | PERMISSION | ORDER | PRODUCT |
//! |-------------|------|-------|------------|-------|---------|
//! | super admin | CRUD | CRUD  | CRUD       | CRUD  | CRUD    |
//! | admin       | CRUD | C R U | R          | CRUD  | CRUD    |
//! | manager     | R U  | R     |            | C R U | C R U   |
//! | staff       | R    |       |            | R U   | R       |
//! | vendor      | R    |       |            |       | C R U   |
//!
//! Unknown roles have no permissions.
//!
//! ## Decision Rules
//!
//! Checks never fail. Missing grants deny; a missing flat requirement
//! allows. Actions are compared case-insensitively (`"read"` matches a
//! `READ` grant); modules, roles and permission ids are compared exactly.
//! An action string that names no action is simply "no match".
//!
//! ## Examples
//!
//! ```
//! use rolegate_rbac::{Grants, PermissionResolver, Requirement};
//! use rolegate_types::{Action, PermissionId};
//!
//! let resolver = PermissionResolver::standard();
//!
//! // Route guard on the role table
//! assert!(resolver.role_allows("vendor", "USER", Action::Read));
//! assert!(!resolver.role_allows("vendor", "ORDER", Action::Read));
//!
//! // Signed-in user's grants
//! let grants = resolver.grants_for_role("staff");
//! assert!(resolver.authorize(&grants, &Requirement::read("ORDER")));
//!
//! // Flat identifiers
//! let flat = Grants::FlatIdentifier(vec![PermissionId::from("USER_READ")]);
//! resolver.enforce(&flat, &Requirement::identifier("USER_READ"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod enforcement;
pub mod grants;
pub mod permissions;
pub mod policy;
pub mod roles;

// Re-export commonly used types
pub use enforcement::{EnforcementError, PermissionResolver};
pub use grants::{
    ModuleActionGrant, RbacError, has_permission_by_identifier, has_permission_by_module,
};
pub use permissions::{ActionSet, ModulePermissions};
pub use policy::{Grants, Requirement};
pub use roles::{RolePermissionTable, RoleTableBuilder};

#[cfg(test)]
mod tests;
