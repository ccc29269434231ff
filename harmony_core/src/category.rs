//! Static display taxonomy for measurements.
//!
//! Membership is keyed by measurement id, never by name, and defined once in
//! [`TAXONOMY`]. Ids missing from the table land in [`Category::Other`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Torso,
    Arms,
    Legs,
    Other,
}

/// Id → category table for the demo measurement set.
pub const TAXONOMY: [(&str, Category); 12] = [
    ("1", Category::Torso),  // shoulder width
    ("2", Category::Torso),  // hip width
    ("3", Category::Torso),  // torso length
    ("4", Category::Legs),   // left leg
    ("5", Category::Legs),   // right leg
    ("6", Category::Arms),   // left arm
    ("7", Category::Arms),   // right arm
    ("8", Category::Torso),  // chest width
    ("9", Category::Torso),  // waist width
    ("10", Category::Legs),  // inseam
    ("11", Category::Arms),  // sleeve
    ("12", Category::Other), // neck
];

impl Category {
    /// Display order.
    pub const ALL: [Category; 4] = [
        Category::Torso,
        Category::Arms,
        Category::Legs,
        Category::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Torso => "torso",
            Category::Arms => "arms",
            Category::Legs => "legs",
            Category::Other => "other",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Torso => "Torso",
            Category::Arms => "Arms",
            Category::Legs => "Legs",
            Category::Other => "Other",
        }
    }

    /// Look up the category for a measurement id.
    ///
    /// History copies carry ids like `4-6` (`<id>-<days_ago>`); they resolve
    /// through their base id.
    pub fn for_id(id: &str) -> Category {
        if let Some(c) = lookup(id) {
            return c;
        }
        match id.rsplit_once('-') {
            Some((base, day)) if !day.is_empty() && day.bytes().all(|b| b.is_ascii_digit()) => {
                lookup(base).unwrap_or(Category::Other)
            }
            _ => Category::Other,
        }
    }
}

fn lookup(id: &str) -> Option<Category> {
    TAXONOMY
        .iter()
        .find_map(|&(key, c)| (key == id).then_some(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ids_are_unique() {
        for (i, (a, _)) in TAXONOMY.iter().enumerate() {
            for (b, _) in TAXONOMY.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn resolves_direct_and_history_ids() {
        assert_eq!(Category::for_id("6"), Category::Arms);
        assert_eq!(Category::for_id("6-3"), Category::Arms);
        assert_eq!(Category::for_id("10-0"), Category::Legs);
        assert_eq!(Category::for_id("unknown"), Category::Other);
        assert_eq!(Category::for_id("6-x"), Category::Other);
        assert_eq!(Category::for_id("6-"), Category::Other);
    }
}
