//! Permission sets for access control.
//!
//! An [`ActionSet`] is what one role may do within one module; a
//! [`ModulePermissions`] maps every module a role can touch to its set.

use std::collections::{BTreeMap, BTreeSet};

use rolegate_types::{Action, ModuleName};
use serde::{Deserialize, Serialize};

static NO_ACTIONS: ActionSet = ActionSet::empty();

/// Set of actions allowed within a module.
///
/// Order is irrelevant: `[READ, UPDATE]` equals `[UPDATE, READ]`, and a
/// duplicate grant is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet {
    actions: BTreeSet<Action>,
}

impl ActionSet {
    /// Creates an empty action set.
    pub const fn empty() -> Self {
        Self {
            actions: BTreeSet::new(),
        }
    }

    /// Creates a set holding all four actions.
    pub fn full() -> Self {
        Self::from_iter(Action::ALL)
    }

    /// Returns whether this set contains the given action.
    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Adds an action to the set.
    pub fn grant(&mut self, action: Action) {
        self.actions.insert(action);
    }

    /// Removes an action from the set.
    pub fn revoke(&mut self, action: Action) {
        self.actions.remove(&action);
    }

    /// Returns all actions in CRUD order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        Self::from_iter(actions)
    }
}

/// Actions a single role may perform, keyed by module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePermissions {
    modules: BTreeMap<ModuleName, ActionSet>,
}

impl ModulePermissions {
    /// Creates a mapping with no modules (no permissions at all).
    pub const fn empty() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// Returns the actions allowed within `module`.
    ///
    /// Modules absent from the mapping yield an empty set.
    pub fn actions_for(&self, module: &str) -> &ActionSet {
        self.modules.get(module).unwrap_or(&NO_ACTIONS)
    }

    /// Returns whether `action` is allowed within `module`.
    pub fn allows(&self, module: &str, action: Action) -> bool {
        self.actions_for(module).contains(action)
    }

    /// Iterates over modules with their allowed actions.
    pub fn iter(&self) -> impl Iterator<Item = (&ModuleName, &ActionSet)> {
        self.modules.iter()
    }

    /// Returns the number of modules with at least one entry.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Adds actions for a module, merging with anything already granted.
    pub(crate) fn grant(&mut self, module: ModuleName, actions: impl IntoIterator<Item = Action>) {
        let entry = self.modules.entry(module).or_default();
        for action in actions {
            entry.grant(action);
        }
    }
}
