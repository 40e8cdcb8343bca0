use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// A plan feature the platform knows how to gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    Analytics,
    AiMenuSuggestions,
    AiSalesSummary,
    KitchenDisplay,
    CustomBranding,
    PrioritySupport,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Analytics,
        Feature::AiMenuSuggestions,
        Feature::AiSalesSummary,
        Feature::KitchenDisplay,
        Feature::CustomBranding,
        Feature::PrioritySupport,
    ];

    /// The tag a plan document lists the feature under.
    pub fn tag(self) -> &'static str {
        match self {
            Feature::Analytics => "Analytics",
            Feature::AiMenuSuggestions => "AI Menu Suggestions",
            Feature::AiSalesSummary => "AI Sales Summary",
            Feature::KitchenDisplay => "Kitchen Display",
            Feature::CustomBranding => "Custom Branding",
            Feature::PrioritySupport => "Priority Support",
        }
    }

    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.tag().eq_ignore_ascii_case(tag))
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The recognized features a user may use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Feature>);

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps the recognized tags, drops the rest.
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self(tags.into_iter().filter_map(Feature::from_tag).collect())
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

/// How many tables a tenant may configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableQuota {
    Unlimited,
    Limited(u32),
}

impl TableQuota {
    /// Plans store `0` for unlimited.
    pub fn from_plan(quota: u32) -> Self {
        match quota {
            0 => TableQuota::Unlimited,
            n => TableQuota::Limited(n),
        }
    }

    pub fn allows(self, tables: u32) -> bool {
        match self {
            TableQuota::Unlimited => true,
            TableQuota::Limited(max) => tables <= max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_matched_case_insensitively() {
        assert_eq!(Feature::from_tag("analytics"), Some(Feature::Analytics));
        assert_eq!(Feature::from_tag(" AI menu suggestions "), Some(Feature::AiMenuSuggestions));
        assert_eq!(Feature::from_tag("Loyalty Points"), None);
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let set = CapabilitySet::from_tags(["Analytics", "Loyalty Points", "Kitchen Display", "analytics"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Feature::KitchenDisplay));
        assert!(!set.contains(Feature::CustomBranding));
    }

    #[test]
    fn test_table_quota() {
        assert_eq!(TableQuota::from_plan(0), TableQuota::Unlimited);
        assert!(TableQuota::Unlimited.allows(500));
        assert!(TableQuota::from_plan(10).allows(10));
        assert!(!TableQuota::Limited(3).allows(4));
    }
}
