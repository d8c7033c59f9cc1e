//! Interest catalog rendered by the interests step.

/// A selectable interest chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest {
    /// Stable identifier stored in the profile's skill sets.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon name in the host's icon set.
    pub icon: &'static str,
}

/// The twelve interests offered during onboarding.
pub const INTERESTS: &[Interest] = &[
    Interest { id: "design", name: "Design", icon: "palette" },
    Interest { id: "tech", name: "Technology", icon: "laptop" },
    Interest { id: "food", name: "Food & Drink", icon: "food" },
    Interest { id: "travel", name: "Travel", icon: "airplane" },
    Interest { id: "fitness", name: "Fitness", icon: "dumbbell" },
    Interest { id: "fashion", name: "Fashion", icon: "tshirt-crew" },
    Interest { id: "art", name: "Art", icon: "brush" },
    Interest { id: "photography", name: "Photography", icon: "camera" },
    Interest { id: "diy", name: "DIY", icon: "hammer-wrench" },
    Interest { id: "music", name: "Music", icon: "music" },
    Interest { id: "reading", name: "Reading", icon: "book-open" },
    Interest { id: "gaming", name: "Gaming", icon: "gamepad-variant" },
];

/// Look up a catalog entry by id.
pub fn interest_by_id(id: &str) -> Option<&'static Interest> {
    INTERESTS.iter().find(|interest| interest.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_twelve_unique_ids() {
        assert_eq!(INTERESTS.len(), 12);
        let ids: BTreeSet<&str> = INTERESTS.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), INTERESTS.len());
    }

    #[test]
    fn lookup_by_id() {
        let design = interest_by_id("design").unwrap();
        assert_eq!(design.name, "Design");
        assert_eq!(design.icon, "palette");

        assert!(interest_by_id("juggling").is_none());
    }
}
