//! Vote state machine for community questions.
//!
//! Each (user, question) pair is in one of three states: no vote, upvote, or
//! downvote. There is no persisted "no vote" row; absence of a ledger row is
//! the NoVote state. The transition table:
//!
//! | current | intent +1                  | intent -1                  |
//! |---------|----------------------------|----------------------------|
//! | NoVote  | Up; up+1                   | Down; down+1               |
//! | Up      | NoVote; up-1 (toggle-off)  | Down; up-1, down+1         |
//! | Down    | Up; down-1, up+1           | NoVote; down-1 (toggle-off)|
//!
//! The pure [`apply`] function returns what must happen to the ledger row and
//! the counter deltas for the question; the repository layer executes both in
//! one transaction.

use crate::error::CoreError;

/// A cast vote direction. Intent `0` is not a direction; it is rejected at
/// the boundary as invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Parse a wire-format intent (`+1` / `-1`).
    pub fn from_intent(value: i16) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(CoreError::Validation(format!(
                "voteType must be +1 or -1, got {other}"
            ))),
        }
    }

    /// The ledger value persisted for this direction.
    pub const fn value(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Current vote state for a (user, question) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoVote,
    Cast(Direction),
}

impl VoteState {
    /// Reconstruct the state from a persisted ledger value, if any.
    pub fn from_ledger(value: Option<i16>) -> Result<Self, CoreError> {
        match value {
            None => Ok(Self::NoVote),
            Some(v) => Direction::from_intent(v).map(Self::Cast).map_err(|_| {
                CoreError::Internal(format!("vote ledger holds invalid value {v}"))
            }),
        }
    }
}

/// What the ledger row must do as a result of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    /// Insert a new row with the given direction.
    Insert(Direction),
    /// Update the existing row to the given direction.
    Update(Direction),
    /// Delete the existing row (toggle-off).
    Delete,
}

/// Counter adjustments for the question, applied as one atomic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub upvotes: i32,
    pub downvotes: i32,
}

/// Outcome of applying an intent to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: VoteState,
    pub ledger: LedgerOp,
    pub delta: CounterDelta,
}

/// Apply a vote intent to the current state.
///
/// Total over all (state, direction) pairs; every call yields a transition.
pub fn apply(current: VoteState, intent: Direction) -> Transition {
    match (current, intent) {
        (VoteState::NoVote, dir) => Transition {
            next: VoteState::Cast(dir),
            ledger: LedgerOp::Insert(dir),
            delta: delta_for(dir, 1),
        },
        // Same direction again: toggle off.
        (VoteState::Cast(held), dir) if held == dir => Transition {
            next: VoteState::NoVote,
            ledger: LedgerOp::Delete,
            delta: delta_for(dir, -1),
        },
        // Opposite direction: flip in one step, both counters move.
        (VoteState::Cast(held), dir) => Transition {
            next: VoteState::Cast(dir),
            ledger: LedgerOp::Update(dir),
            delta: CounterDelta {
                upvotes: delta_for(held, -1).upvotes + delta_for(dir, 1).upvotes,
                downvotes: delta_for(held, -1).downvotes + delta_for(dir, 1).downvotes,
            },
        },
    }
}

const fn delta_for(dir: Direction, sign: i32) -> CounterDelta {
    match dir {
        Direction::Up => CounterDelta {
            upvotes: sign,
            downvotes: 0,
        },
        Direction::Down => CounterDelta {
            upvotes: 0,
            downvotes: sign,
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use Direction::{Down, Up};

    // -----------------------------------------------------------------------
    // Individual transitions
    // -----------------------------------------------------------------------

    #[test]
    fn no_vote_plus_one_creates_up() {
        let t = apply(VoteState::NoVote, Up);
        assert_eq!(t.next, VoteState::Cast(Up));
        assert_eq!(t.ledger, LedgerOp::Insert(Up));
        assert_eq!(t.delta, CounterDelta { upvotes: 1, downvotes: 0 });
    }

    #[test]
    fn no_vote_minus_one_creates_down() {
        let t = apply(VoteState::NoVote, Down);
        assert_eq!(t.next, VoteState::Cast(Down));
        assert_eq!(t.ledger, LedgerOp::Insert(Down));
        assert_eq!(t.delta, CounterDelta { upvotes: 0, downvotes: 1 });
    }

    #[test]
    fn up_plus_one_toggles_off() {
        let t = apply(VoteState::Cast(Up), Up);
        assert_eq!(t.next, VoteState::NoVote);
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!(t.delta, CounterDelta { upvotes: -1, downvotes: 0 });
    }

    #[test]
    fn down_minus_one_toggles_off() {
        let t = apply(VoteState::Cast(Down), Down);
        assert_eq!(t.next, VoteState::NoVote);
        assert_eq!(t.ledger, LedgerOp::Delete);
        assert_eq!(t.delta, CounterDelta { upvotes: 0, downvotes: -1 });
    }

    #[test]
    fn up_minus_one_flips_in_one_step() {
        let t = apply(VoteState::Cast(Up), Down);
        assert_eq!(t.next, VoteState::Cast(Down));
        assert_eq!(t.ledger, LedgerOp::Update(Down));
        assert_eq!(t.delta, CounterDelta { upvotes: -1, downvotes: 1 });
    }

    #[test]
    fn down_plus_one_flips_in_one_step() {
        let t = apply(VoteState::Cast(Down), Up);
        assert_eq!(t.next, VoteState::Cast(Up));
        assert_eq!(t.ledger, LedgerOp::Update(Up));
        assert_eq!(t.delta, CounterDelta { upvotes: 1, downvotes: -1 });
    }

    // -----------------------------------------------------------------------
    // Toggle laws over sequences
    // -----------------------------------------------------------------------

    /// Run a sequence of intents from NoVote, tracking state and counters.
    fn run(intents: &[Direction]) -> (VoteState, i32, i32) {
        let mut state = VoteState::NoVote;
        let (mut up, mut down) = (0, 0);
        for &intent in intents {
            let t = apply(state, intent);
            state = t.next;
            up += t.delta.upvotes;
            down += t.delta.downvotes;
        }
        (state, up, down)
    }

    #[test]
    fn double_upvote_returns_to_no_vote() {
        assert_eq!(run(&[Up, Up]), (VoteState::NoVote, 0, 0));
    }

    #[test]
    fn up_up_down_ends_down() {
        // +1, +1, -1 on a fresh question -> Down, 0 up, 1 down.
        assert_eq!(run(&[Up, Up, Down]), (VoteState::Cast(Down), 0, 1));
    }

    #[test]
    fn counters_never_go_negative_from_fresh_state() {
        for seq in [
            vec![Up, Down, Up, Down],
            vec![Down, Down, Up, Up],
            vec![Up, Up, Up, Up],
        ] {
            let (_, up, down) = run(&seq);
            assert!(up >= 0 && down >= 0, "sequence {seq:?} gave {up}/{down}");
        }
    }

    #[test]
    fn counter_sum_matches_ledger_value() {
        // up - down must always equal the ledger sum (0, +1 or -1 for one user).
        for seq in [vec![Up], vec![Up, Down], vec![Up, Up], vec![Down, Up, Up]] {
            let (state, up, down) = run(&seq);
            let ledger_sum = match state {
                VoteState::NoVote => 0,
                VoteState::Cast(d) => i32::from(d.value()),
            };
            assert_eq!(up - down, ledger_sum, "sequence {seq:?}");
        }
    }

    // -----------------------------------------------------------------------
    // Intent parsing
    // -----------------------------------------------------------------------

    #[test]
    fn zero_intent_is_rejected() {
        assert_matches!(Direction::from_intent(0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn out_of_range_intent_is_rejected() {
        assert_matches!(Direction::from_intent(2), Err(CoreError::Validation(_)));
        assert_matches!(Direction::from_intent(-5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn ledger_round_trip() {
        assert_eq!(
            VoteState::from_ledger(Some(1)).unwrap(),
            VoteState::Cast(Up)
        );
        assert_eq!(
            VoteState::from_ledger(Some(-1)).unwrap(),
            VoteState::Cast(Down)
        );
        assert_eq!(VoteState::from_ledger(None).unwrap(), VoteState::NoVote);
        assert!(VoteState::from_ledger(Some(0)).is_err());
    }
}
