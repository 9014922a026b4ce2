//! The constraint evaluation engine.
//!
//! Provides full evaluation (rebuild the excess matrix and fitness from
//! scratch, [`full_evaluate`]) and the three delta evaluators that patch the
//! cached excess matrix in place after a swap, relocate, or reverse move.
//! Every delta evaluator produces the exact excess matrix and fitness a full
//! evaluation of the post-move sequence would, at a cost proportional to the
//! disturbed region instead of the whole sequence.
//!
//! All mutation of a [`SequenceState`] during search goes through
//! [`apply_move`] / [`undo_move`], which apply the move to the slot array,
//! dispatch to the matching delta evaluator, and fold the signed delta into
//! the fitness.

mod full;
mod relocate;
mod reverse;
mod swap;

pub use full::full_evaluate;

use crate::models::{Instance, SequenceState};
use crate::moves::{Move, MoveError};

/// Applies a validated move to the state and returns the new fitness.
///
/// The move is first applied to `state.slots`; the matching delta evaluator
/// then updates `state.excess` in place against the post-move sequence and
/// the signed fitness delta is folded into `state.fitness`.
///
/// Malformed moves are a driver bug: construct moves through the
/// [`Move`] constructors, which reject them with a descriptive error.
///
/// # Examples
///
/// ```
/// use car_seq::evaluation::apply_move;
/// use car_seq::models::{Instance, SequenceState};
/// use car_seq::moves::Move;
///
/// let instance = Instance::new(
///     4,
///     vec![2, 2],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
/// let mut state = SequenceState::evaluated(&instance, vec![0, 0, 1, 1]).unwrap();
/// assert_eq!(state.fitness(), 1);
///
/// // Separating the two requiring cars repairs the violated window.
/// let mv = Move::swap(1, 2, 4).unwrap();
/// assert_eq!(apply_move(&instance, &mut state, mv), 0);
/// assert_eq!(state.slots(), &[0, 1, 0, 1]);
/// ```
pub fn apply_move(instance: &Instance, state: &mut SequenceState, mv: Move) -> u64 {
    debug_assert!(state.is_complete(), "moves require a fully assigned sequence");
    debug_assert!(
        mv.validate(state.slots.len()).is_ok(),
        "malformed move {mv:?}"
    );
    let delta = match mv {
        Move::Swap { i, j } => {
            state.slots.swap(i, j);
            swap::swap_delta(instance, &state.slots, &mut state.excess, i, j)
        }
        Move::Relocate { from, to } => {
            let class = state.slots.remove(from);
            state.slots.insert(to, class);
            relocate::relocate_delta(instance, &state.slots, &mut state.excess, from, to)
        }
        Move::Reverse { i, j } => {
            state.slots[i..=j].reverse();
            reverse::reverse_delta(instance, &state.slots, &mut state.excess, i, j)
        }
    };
    state.fitness = (state.fitness as i64 + delta) as u64;
    state.fitness
}

/// Undoes a previously applied move and returns the restored fitness.
///
/// Swap and reverse are self-inverse; relocate is undone by the mirrored
/// relocation.
pub fn undo_move(instance: &Instance, state: &mut SequenceState, mv: Move) -> u64 {
    apply_move(instance, state, mv.inverse())
}

/// Validates and applies a swap of slots `i` and `j`.
///
/// # Errors
///
/// Returns a [`MoveError`] if `i == j` or either index is out of range.
pub fn apply_swap(
    instance: &Instance,
    state: &mut SequenceState,
    i: usize,
    j: usize,
) -> Result<u64, MoveError> {
    let mv = Move::swap(i, j, state.slots.len())?;
    Ok(apply_move(instance, state, mv))
}

/// Validates and applies a relocation of the car at `from` to position `to`.
///
/// # Errors
///
/// Returns a [`MoveError`] if `from == to` or either index is out of range.
pub fn apply_relocate(
    instance: &Instance,
    state: &mut SequenceState,
    from: usize,
    to: usize,
) -> Result<u64, MoveError> {
    let mv = Move::relocate(from, to, state.slots.len())?;
    Ok(apply_move(instance, state, mv))
}

/// Validates and applies a reversal of the closed slot range `[i, j]`.
///
/// # Errors
///
/// Returns a [`MoveError`] if `i >= j` or `j` is out of range.
pub fn apply_reverse(
    instance: &Instance,
    state: &mut SequenceState,
    i: usize,
    j: usize,
) -> Result<u64, MoveError> {
    let mv = Move::reverse(i, j, state.slots.len())?;
    Ok(apply_move(instance, state, mv))
}

/// Debug aid: compares the cached excess matrix and fitness against a fresh
/// full evaluation.
///
/// Intended for assertions in tests and debugging sessions; a full
/// recomputation is exactly what delta evaluation exists to avoid, so never
/// call this on a search hot path.
pub fn is_consistent(instance: &Instance, state: &SequenceState) -> bool {
    if !state.is_complete() {
        return false;
    }
    let (excess, fitness) = full_evaluate(instance, &state.slots);
    excess == state.excess && fitness == state.fitness
}

/// Counts cars requiring `option` in the window starting at `start`.
pub(crate) fn window_count(
    instance: &Instance,
    slots: &[usize],
    option: usize,
    start: usize,
) -> u32 {
    slots[start..start + instance.window(option)]
        .iter()
        .filter(|&&class| instance.requires(class, option))
        .count() as u32
}

/// Window starts whose span can contain the slot at `site`, clamped to the
/// valid range `[0, slot_count - window]`.
pub(crate) fn affected_range(site: usize, window: usize, slot_count: usize) -> (usize, usize) {
    (site.saturating_sub(window - 1), site.min(slot_count - window))
}

/// Recomputes the excess of every window start in `[lo, hi]` against the
/// post-move sequence, storing the fresh values and returning the signed
/// fitness delta.
pub(crate) fn recompute_windows(
    instance: &Instance,
    slots: &[usize],
    row: &mut [u32],
    option: usize,
    lo: usize,
    hi: usize,
) -> i64 {
    let capacity = instance.capacity(option) as u32;
    let mut delta = 0i64;
    for w in lo..=hi {
        let fresh = window_count(instance, slots, option, w).saturating_sub(capacity);
        delta += i64::from(fresh) - i64::from(row[w]);
        row[w] = fresh;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SequenceState;

    fn instance() -> Instance {
        Instance::new(
            6,
            vec![3, 3],
            vec![1],
            vec![3],
            vec![vec![true], vec![false]],
        )
        .expect("valid instance")
    }

    #[test]
    fn test_affected_range_clamps_low() {
        assert_eq!(affected_range(0, 3, 6), (0, 0));
        assert_eq!(affected_range(1, 3, 6), (0, 1));
    }

    #[test]
    fn test_affected_range_clamps_high() {
        assert_eq!(affected_range(5, 3, 6), (3, 3));
        assert_eq!(affected_range(3, 3, 6), (1, 3));
    }

    #[test]
    fn test_window_count() {
        let instance = instance();
        let slots = vec![0, 1, 0, 1, 0, 1];
        assert_eq!(window_count(&instance, &slots, 0, 0), 2);
        assert_eq!(window_count(&instance, &slots, 0, 1), 1);
        assert_eq!(window_count(&instance, &slots, 0, 2), 2);
    }

    #[test]
    fn test_undo_restores_state() {
        let instance = instance();
        let original =
            SequenceState::evaluated(&instance, vec![0, 0, 1, 0, 1, 1]).expect("valid");
        for mv in [
            Move::swap(0, 5, 6).expect("legal"),
            Move::relocate(1, 4, 6).expect("legal"),
            Move::reverse(0, 4, 6).expect("legal"),
        ] {
            let mut state = original.clone();
            apply_move(&instance, &mut state, mv);
            undo_move(&instance, &mut state, mv);
            assert_eq!(state, original, "undo of {mv:?} must restore the state");
        }
    }

    #[test]
    fn test_is_consistent_detects_drift() {
        let instance = instance();
        let mut state = SequenceState::evaluated(&instance, vec![0, 0, 1, 0, 1, 1]).expect("valid");
        assert!(is_consistent(&instance, &state));
        state.fitness += 1;
        assert!(!is_consistent(&instance, &state));
    }

    #[test]
    fn test_wrapper_rejects_malformed() {
        let instance = instance();
        let mut state = SequenceState::evaluated(&instance, vec![0, 0, 1, 0, 1, 1]).expect("valid");
        assert!(apply_swap(&instance, &mut state, 2, 2).is_err());
        assert!(apply_reverse(&instance, &mut state, 4, 4).is_err());
        assert!(apply_relocate(&instance, &mut state, 0, 9).is_err());
        // A rejected move must leave the state untouched.
        assert!(is_consistent(&instance, &state));
    }
}
