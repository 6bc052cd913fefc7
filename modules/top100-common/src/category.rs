use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Top100Error;

/// The three fixed ranking lists.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    SpaceMarine,
    MilitaryScifi,
    SpaceFleet,
}

impl Category {
    /// Display order of the category tabs.
    pub const ALL: [Category; 3] = [
        Category::SpaceMarine,
        Category::MilitaryScifi,
        Category::SpaceFleet,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::SpaceMarine => "space-marine",
            Category::MilitaryScifi => "military-scifi",
            Category::SpaceFleet => "space-fleet",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::SpaceMarine => "Space Marine",
            Category::MilitaryScifi => "Military Sci-Fi",
            Category::SpaceFleet => "Space Fleet",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Category::SpaceMarine => {
                "Stories featuring elite soldiers in powered armor fighting across the galaxy."
            }
            Category::MilitaryScifi => {
                "Broader military science fiction including ground combat, tactics, and warfare."
            }
            Category::SpaceFleet => {
                "Naval warfare in space, fleet battles, and ship-to-ship combat."
            }
        }
    }

    /// File name of this category's snapshot inside the snapshot directory.
    pub fn snapshot_file(self) -> &'static str {
        match self {
            Category::SpaceMarine => "top-100-space-marine.json",
            Category::MilitaryScifi => "top-100-mil-sci-fi.json",
            Category::SpaceFleet => "top-100-space-fleet.json",
        }
    }

    /// Environment variable holding the Apify task id that scrapes this category.
    pub fn task_env_var(self) -> &'static str {
        match self {
            Category::SpaceMarine => "APIFY_TASK_SPACE_MARINE",
            Category::MilitaryScifi => "APIFY_TASK_MILITARY_SCIFI",
            Category::SpaceFleet => "APIFY_TASK_SPACE_FLEET",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = Top100Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| Top100Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn slugs_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.slug().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn serde_uses_slugs() {
        let json = serde_json::to_string(&Category::MilitaryScifi).unwrap();
        assert_eq!(json, "\"military-scifi\"");
    }

    #[test]
    fn unknown_slug_is_rejected() {
        let err = "space-opera".parse::<Category>().unwrap_err();
        assert!(matches!(err, Top100Error::UnknownCategory(s) if s == "space-opera"));
    }

    #[test]
    fn snapshot_files_are_distinct() {
        let files: BTreeSet<_> = Category::ALL.iter().map(|c| c.snapshot_file()).collect();
        assert_eq!(files.len(), 3);
    }
}
