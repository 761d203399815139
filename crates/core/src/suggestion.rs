//! Daily suggestion selection.
//!
//! The persistence-free half of the assignment algorithm: filter the catalog
//! against the texts already on the user's list, shuffle uniformly, take the
//! first [`DAILY_SUGGESTION_COUNT`]. The api layer's assignment service owns
//! the idempotency check and the batch write.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::SuggestionDef;

/// Number of suggestions assigned per user per day.
pub const DAILY_SUGGESTION_COUNT: usize = 3;

/// Filter the catalog down to entries whose text is not already present
/// (case-insensitively) in the user's active action list.
pub fn candidates<'a>(
    catalog: &'a [SuggestionDef],
    active_texts: &[String],
) -> Vec<&'a SuggestionDef> {
    let active: Vec<String> = active_texts.iter().map(|t| t.to_lowercase()).collect();
    catalog
        .iter()
        .filter(|def| !active.contains(&def.text.to_lowercase()))
        .collect()
}

/// Uniformly shuffle `candidates` and keep the first
/// [`DAILY_SUGGESTION_COUNT`]. Fewer candidates than that is not an error;
/// whatever remains is taken, down to an empty selection on catalog
/// exhaustion.
pub fn pick<'a, R: Rng + ?Sized>(
    mut candidates: Vec<&'a SuggestionDef>,
    rng: &mut R,
) -> Vec<&'a SuggestionDef> {
    candidates.shuffle(rng);
    candidates.truncate(DAILY_SUGGESTION_COUNT);
    candidates
}

/// Sort rank for the merged daily list: active suggestions first, then
/// incomplete tracked actions, then completed ones. Ties are broken by
/// creation time, ascending, at the call site.
pub const fn daily_rank(suggested: bool, completed: bool) -> u8 {
    match (suggested, completed) {
        (true, _) => 0,
        (false, false) => 1,
        (false, true) => 2,
    }
}
