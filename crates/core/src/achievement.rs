//! Achievement criterion evaluation.
//!
//! Pure evaluation of the achievement catalog against a snapshot of a user's
//! statistics. Awards are a one-way ratchet: these functions only ever decide
//! that an unearned achievement is *newly* satisfied; nothing here (or in the
//! engine above) revokes an award when a statistic later decreases.

use std::collections::HashSet;

use crate::catalog::{AchievementDef, Criterion};

/// Snapshot of the per-user counters the threshold criteria read.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserStats {
    /// Count of completed, non-suggested actions.
    pub completed_actions: i64,
    /// Lifetime footprint-calculator usage counter.
    pub calculator_uses: i64,
}

/// Whether a threshold-type criterion is satisfied by the given statistics.
///
/// `ActionText` criteria are never satisfied here: they need the text of a
/// just-completed action and are evaluated only by [`text_satisfied`].
pub fn sweep_satisfied(criterion: &Criterion, stats: &UserStats) -> bool {
    match criterion {
        Criterion::ActionCount { threshold } => stats.completed_actions >= *threshold,
        Criterion::CalculatorUsage { threshold } => stats.calculator_uses >= *threshold,
        Criterion::ActionText { .. } => false,
    }
}

/// Whether an `ActionText` criterion matches a just-completed action's text.
/// Non-text criteria never match here.
pub fn text_satisfied(criterion: &Criterion, completed_text: &str) -> bool {
    match criterion {
        Criterion::ActionText { keywords } => {
            let haystack = completed_text.to_lowercase();
            keywords.iter().any(|kw| haystack.contains(&kw.to_lowercase()))
        }
        Criterion::ActionCount { .. } | Criterion::CalculatorUsage { .. } => false,
    }
}

/// Catalog entries not yet earned whose threshold criterion is satisfied.
pub fn newly_satisfied<'a>(
    catalog: &'a [AchievementDef],
    earned: &HashSet<String>,
    stats: &UserStats,
) -> Vec<&'a AchievementDef> {
    catalog
        .iter()
        .filter(|def| !earned.contains(def.name))
        .filter(|def| sweep_satisfied(&def.criterion, stats))
        .collect()
}

/// Catalog entries not yet earned whose text criterion matches the completed
/// action's text.
pub fn newly_satisfied_by_text<'a>(
    catalog: &'a [AchievementDef],
    earned: &HashSet<String>,
    completed_text: &str,
) -> Vec<&'a AchievementDef> {
    catalog
        .iter()
        .filter(|def| !earned.contains(def.name))
        .filter(|def| text_satisfied(&def.criterion, completed_text))
        .collect()
}

/// Progress toward a threshold achievement, for client rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Progress {
    pub current: i64,
    pub threshold: i64,
}

/// Progress for a definition, or `None` for keyword achievements (which have
/// no meaningful partial progress).
///
/// Earned achievements report `current == threshold` even if the underlying
/// statistic has since decreased, so clients uniformly render 100%.
pub fn progress(def: &AchievementDef, stats: &UserStats, earned: bool) -> Option<Progress> {
    let (threshold, stat) = match def.criterion {
        Criterion::ActionCount { threshold } => (threshold, stats.completed_actions),
        Criterion::CalculatorUsage { threshold } => (threshold, stats.calculator_uses),
        Criterion::ActionText { .. } => return None,
    };
    let current = if earned { threshold } else { stat.min(threshold) };
    Some(Progress { current, threshold })
}
