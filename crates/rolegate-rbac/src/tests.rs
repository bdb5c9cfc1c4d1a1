//! Property tests for permission checks.

use proptest::prelude::*;
use rolegate_types::{Action, PermissionId, modules, roles};

use crate::ActionSet;
use crate::grants::{ModuleActionGrant, has_permission_by_identifier, has_permission_by_module};
use crate::policy::{Grants, Requirement};
use crate::roles::RolePermissionTable;

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn module_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(modules::ALL.to_vec()).prop_map(str::to_string),
        "[A-Za-z]{1,8}",
    ]
}

fn grant_strategy() -> impl Strategy<Value = ModuleActionGrant> {
    (
        module_strategy(),
        prop::collection::btree_set(action_strategy(), 0..=4),
    )
        .prop_map(|(module, actions)| {
            ModuleActionGrant::new(module, actions.into_iter().collect::<ActionSet>())
        })
}

proptest! {
    /// Property: Roles absent from the table have no permissions in any module.
    #[test]
    fn prop_unknown_role_has_no_permissions(role in "[a-z ]{0,12}", module in module_strategy()) {
        let table = RolePermissionTable::standard();
        prop_assume!(!roles::ALL.contains(&role.as_str()));

        prop_assert!(table.actions_for(&role, &module).is_empty());
        for action in Action::ALL {
            prop_assert!(!table.allows(&role, &module, action));
        }
    }

    /// Property: The module check is true iff some grant names the module
    /// exactly and contains the action.
    #[test]
    fn prop_module_check_matches_definition(
        grants in prop::collection::vec(grant_strategy(), 0..6),
        module in module_strategy(),
        action in action_strategy(),
        lowercase in any::<bool>(),
    ) {
        let spelled = if lowercase {
            action.as_str().to_ascii_lowercase()
        } else {
            action.as_str().to_string()
        };
        let expected = grants
            .iter()
            .any(|g| g.module.as_str() == module && g.actions.contains(action));

        prop_assert_eq!(
            has_permission_by_module(Some(&grants), &module, Some(&spelled)),
            expected
        );
        prop_assert_eq!(
            Grants::ModuleAction(grants.clone())
                .satisfies(&Requirement::module_action(module.as_str(), action)),
            expected
        );
    }

    /// Property: Without grants, the module check always denies.
    #[test]
    fn prop_no_grants_always_denies(module in module_strategy(), action in action_strategy()) {
        prop_assert!(!has_permission_by_module(None, &module, Some(action.as_str())));
        prop_assert!(!has_permission_by_module(Some(&[]), &module, Some(action.as_str())));
    }

    /// Property: The identifier check is plain membership, and absent
    /// requirements always pass.
    #[test]
    fn prop_identifier_check_is_membership(
        granted in prop::collection::vec("[A-Z_]{1,10}", 0..6),
        required in "[A-Z_]{1,10}",
    ) {
        let granted: Vec<PermissionId> = granted.into_iter().map(PermissionId::from).collect();
        let required = PermissionId::from(required);

        prop_assert_eq!(
            has_permission_by_identifier(&granted, Some(&required)),
            granted.contains(&required)
        );
        prop_assert!(has_permission_by_identifier(&granted, None));
    }

    /// Property: Grants derived from the table agree with direct table lookups.
    #[test]
    fn prop_role_grants_agree_with_table(
        role_index in 0usize..5,
        module in module_strategy(),
        action in action_strategy(),
    ) {
        let table = RolePermissionTable::standard();
        let role = roles::ALL[role_index];
        let grants = table.grants_for(role);

        prop_assert_eq!(
            has_permission_by_module(Some(&grants), &module, Some(action.as_str())),
            table.allows(role, &module, action)
        );
    }
}

#[test]
fn order_read_update_grant_satisfies_default_action() {
    let grants = vec![ModuleActionGrant::from_strs("ORDER", ["read", "update"])];
    assert!(has_permission_by_module(Some(&grants), "ORDER", None));
}

#[test]
fn empty_grants_do_not_satisfy_default_action() {
    assert!(!has_permission_by_module(Some(&[]), "ORDER", None));
}

#[test]
fn standard_table_spot_checks() {
    let table = RolePermissionTable::standard();

    assert_eq!(
        table
            .actions_for(roles::SUPER_ADMIN, modules::USER)
            .iter()
            .collect::<Vec<_>>(),
        Action::ALL
    );
    assert_eq!(
        table
            .actions_for(roles::VENDOR, modules::USER)
            .iter()
            .collect::<Vec<_>>(),
        [Action::Read]
    );
    assert!(table.actions_for(roles::VENDOR, modules::ORDER).is_empty());
}
