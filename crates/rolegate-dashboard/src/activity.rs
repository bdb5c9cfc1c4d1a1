//! Activity feed icons.

use serde::{Deserialize, Serialize};

/// Icon shown next to an activity-feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityIcon {
    /// Profile changes.
    Profile,
    /// User created or invited.
    User,
    /// Record updated.
    Update,
    /// Task completed.
    Complete,
    /// Anything else.
    Default,
}

impl ActivityIcon {
    /// Returns the icon identifier used by the frontend icon set.
    pub fn name(&self) -> &'static str {
        match self {
            ActivityIcon::Profile => "user-circle",
            ActivityIcon::User => "user-plus",
            ActivityIcon::Update => "edit",
            ActivityIcon::Complete => "check-circle",
            ActivityIcon::Default => "bell",
        }
    }
}

/// Picks the icon for an activity type.
///
/// Matching is exact; unrecognized types get [`ActivityIcon::Default`].
pub fn icon_for(activity_type: &str) -> ActivityIcon {
    match activity_type {
        "profile" => ActivityIcon::Profile,
        "user" => ActivityIcon::User,
        "update" => ActivityIcon::Update,
        "complete" => ActivityIcon::Complete,
        _ => ActivityIcon::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("profile", ActivityIcon::Profile)]
    #[test_case("user", ActivityIcon::User)]
    #[test_case("update", ActivityIcon::Update)]
    #[test_case("complete", ActivityIcon::Complete)]
    #[test_case("login", ActivityIcon::Default; "unknown type")]
    #[test_case("Profile", ActivityIcon::Default; "case sensitive")]
    #[test_case("", ActivityIcon::Default; "empty type")]
    fn test_icon_for(activity_type: &str, expected: ActivityIcon) {
        assert_eq!(icon_for(activity_type), expected);
    }

    #[test]
    fn test_icon_names_are_distinct() {
        let icons = [
            ActivityIcon::Profile,
            ActivityIcon::User,
            ActivityIcon::Update,
            ActivityIcon::Complete,
            ActivityIcon::Default,
        ];
        let names: std::collections::HashSet<_> = icons.iter().map(ActivityIcon::name).collect();
        assert_eq!(names.len(), icons.len());
    }

    #[test]
    fn test_icon_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActivityIcon::Complete).unwrap(),
            "\"complete\""
        );
    }
}
