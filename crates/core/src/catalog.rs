//! Static rule catalogs: daily suggestion definitions and achievement
//! definitions.
//!
//! Catalogs are versioned configuration, immutable at runtime. They are
//! injected as a [`Catalog`] value (rather than read from module globals) so
//! tests can substitute a smaller catalog. Adding an entry never requires
//! migrating persisted rows: awards reference achievements by name and
//! suggestions are copied into action rows at assignment time.

use serde::Serialize;

/// One entry in the daily suggestion catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionDef {
    /// Action text shown to the user, copied verbatim into assigned rows.
    pub text: &'static str,
    /// Category copied into assigned rows.
    pub category: &'static str,
}

/// How an achievement is earned.
///
/// Matched exhaustively in the engine, so adding a kind is a compile-time
/// checked change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Criterion {
    /// Count of completed, non-suggested actions reaches `threshold`.
    ActionCount { threshold: i64 },
    /// The text of a just-completed action contains any keyword
    /// (case-insensitive substring).
    ActionText { keywords: &'static [&'static str] },
    /// The per-user calculator usage counter reaches `threshold`.
    CalculatorUsage { threshold: i64 },
}

/// One entry in the achievement catalog.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementDef {
    /// Unique key. Award rows reference this name.
    pub name: &'static str,
    pub description: &'static str,
    /// Client-side badge asset reference.
    pub badge: &'static str,
    /// Display tier (`bronze`/`silver`/`gold`), None for keyword badges.
    pub tier: Option<&'static str>,
    pub criterion: Criterion,
}

/// The injected, immutable rule catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub suggestions: Vec<SuggestionDef>,
    pub achievements: Vec<AchievementDef>,
}

impl Catalog {
    /// Look up an achievement definition by its unique name.
    pub fn achievement(&self, name: &str) -> Option<&AchievementDef> {
        self.achievements.iter().find(|a| a.name == name)
    }

    /// The production catalog shipped with the platform.
    pub fn builtin() -> Self {
        Self {
            suggestions: builtin_suggestions(),
            achievements: builtin_achievements(),
        }
    }
}

fn builtin_suggestions() -> Vec<SuggestionDef> {
    let defs: &[(&str, &str)] = &[
        ("Take a 5-minute shorter shower", "water"),
        ("Carry a reusable water bottle", "waste"),
        ("Walk or cycle instead of driving today", "transport"),
        ("Take public transport for one trip", "transport"),
        ("Eat one meat-free meal", "food"),
        ("Buy local or seasonal produce", "food"),
        ("Unplug chargers and idle electronics", "energy"),
        ("Wash laundry at 30 degrees", "energy"),
        ("Air-dry laundry instead of tumble drying", "energy"),
        ("Switch off lights in empty rooms", "energy"),
        ("Bring a reusable bag when shopping", "waste"),
        ("Refuse single-use cutlery and straws", "waste"),
        ("Sort and recycle today's packaging", "waste"),
        ("Compost food scraps", "waste"),
        ("Fix a dripping tap or report it", "water"),
        ("Collect rainwater for plants", "water"),
        ("Plan meals to avoid food waste", "food"),
        ("Repair something instead of replacing it", "waste"),
        ("Work with the heating one degree lower", "energy"),
        ("Pick up three pieces of litter", "community"),
    ];
    defs.iter()
        .map(|&(text, category)| SuggestionDef { text, category })
        .collect()
}

fn builtin_achievements() -> Vec<AchievementDef> {
    vec![
        AchievementDef {
            name: "Eco-Newbie",
            description: "Complete your first 5 eco-actions",
            badge: "badge-newbie",
            tier: Some("bronze"),
            criterion: Criterion::ActionCount { threshold: 5 },
        },
        AchievementDef {
            name: "Green Routine",
            description: "Complete 25 eco-actions",
            badge: "badge-routine",
            tier: Some("silver"),
            criterion: Criterion::ActionCount { threshold: 25 },
        },
        AchievementDef {
            name: "Planet Champion",
            description: "Complete 100 eco-actions",
            badge: "badge-champion",
            tier: Some("gold"),
            criterion: Criterion::ActionCount { threshold: 100 },
        },
        AchievementDef {
            name: "Pedal Power",
            description: "Complete an action involving cycling",
            badge: "badge-bike",
            tier: None,
            criterion: Criterion::ActionText {
                keywords: &["bike", "cycle", "cycling"],
            },
        },
        AchievementDef {
            name: "Waste Warrior",
            description: "Complete an action about recycling or composting",
            badge: "badge-waste",
            tier: None,
            criterion: Criterion::ActionText {
                keywords: &["recycle", "recycling", "compost"],
            },
        },
        AchievementDef {
            name: "Plant Powered",
            description: "Complete a meat-free or plant-based action",
            badge: "badge-plant",
            tier: None,
            criterion: Criterion::ActionText {
                keywords: &["meat-free", "vegetarian", "vegan", "plant-based"],
            },
        },
        AchievementDef {
            name: "Curious Calculator",
            description: "Use the footprint calculator for the first time",
            badge: "badge-calc-1",
            tier: Some("bronze"),
            criterion: Criterion::CalculatorUsage { threshold: 1 },
        },
        AchievementDef {
            name: "Footprint Analyst",
            description: "Use the footprint calculator 10 times",
            badge: "badge-calc-10",
            tier: Some("silver"),
            criterion: Criterion::CalculatorUsage { threshold: 10 },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_names_are_unique() {
        let catalog = Catalog::builtin();
        let mut names: Vec<_> = catalog.achievements.iter().map(|a| a.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn suggestion_texts_are_unique_ignoring_case() {
        let catalog = Catalog::builtin();
        let mut texts: Vec<_> = catalog
            .suggestions
            .iter()
            .map(|s| s.text.to_lowercase())
            .collect();
        texts.sort();
        let before = texts.len();
        texts.dedup();
        assert_eq!(before, texts.len());
    }

    #[test]
    fn suggestion_categories_are_non_empty() {
        for def in Catalog::builtin().suggestions {
            assert!(!def.category.is_empty(), "{} has no category", def.text);
        }
    }

    #[test]
    fn lookup_by_name() {
        let catalog = Catalog::builtin();
        assert!(catalog.achievement("Eco-Newbie").is_some());
        assert!(catalog.achievement("No Such Badge").is_none());
    }
}
