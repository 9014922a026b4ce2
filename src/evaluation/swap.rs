//! Delta evaluation for swap moves.
//!
//! # Algorithm
//!
//! With the swap already applied to the slot array, only windows whose span
//! can contain one of the two swapped slots may change, and only for options
//! whose requirement bit differs between the two classes (equal bits leave
//! every window count untouched). Both sites' affected ranges are recomputed;
//! when the ranges overlap, the later range is truncated to start after the
//! earlier one so each window start is recomputed exactly once.

use super::{affected_range, recompute_windows};
use crate::models::Instance;

/// Patches `excess` after slots `i` and `j` were swapped, returning the
/// signed fitness delta.
pub(crate) fn swap_delta(
    instance: &Instance,
    slots: &[usize],
    excess: &mut [Vec<u32>],
    i: usize,
    j: usize,
) -> i64 {
    let (lo_site, hi_site) = if i < j { (i, j) } else { (j, i) };
    let n = instance.slot_count();
    let mut delta = 0i64;
    for option in 0..instance.option_count() {
        if instance.requires(slots[lo_site], option) == instance.requires(slots[hi_site], option) {
            continue;
        }
        let q = instance.window(option);
        let row = &mut excess[option];
        let (lo_a, hi_a) = affected_range(lo_site, q, n);
        delta += recompute_windows(instance, slots, row, option, lo_a, hi_a);
        let (lo_b, hi_b) = affected_range(hi_site, q, n);
        let lo_b = lo_b.max(hi_a + 1);
        if lo_b <= hi_b {
            delta += recompute_windows(instance, slots, row, option, lo_b, hi_b);
        }
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{apply_move, full_evaluate, is_consistent};
    use crate::models::{Instance, SequenceState};
    use crate::moves::Move;

    /// Ten slots, one option with p=1, q=2, required by
    /// classes 0 and 1 only.
    fn ten_slot_instance() -> Instance {
        Instance::new(
            10,
            vec![1, 1, 2, 2, 2, 2],
            vec![1],
            vec![2],
            vec![
                vec![true],
                vec![true],
                vec![false],
                vec![false],
                vec![false],
                vec![false],
            ],
        )
        .expect("valid instance")
    }

    fn wide_instance() -> Instance {
        // Two options with different window widths to exercise overlap
        // truncation: q=3 makes nearby swap sites share windows.
        Instance::new(
            8,
            vec![3, 3, 2],
            vec![1, 2],
            vec![2, 3],
            vec![vec![true, false], vec![false, true], vec![true, true]],
        )
        .expect("valid instance")
    }

    fn assert_matches_full(instance: &Instance, state: &SequenceState) {
        let (excess, fitness) = full_evaluate(instance, state.slots());
        assert_eq!(state.fitness(), fitness, "fitness drifted from full evaluation");
        for option in 0..instance.option_count() {
            assert_eq!(
                state.excess_row(option),
                &excess[option][..],
                "excess row {option} drifted from full evaluation"
            );
        }
    }

    #[test]
    fn test_swap_end_to_end_scenario() {
        let instance = ten_slot_instance();
        let mut state =
            SequenceState::evaluated(&instance, vec![0, 1, 5, 2, 4, 3, 3, 4, 2, 5]).expect("valid");
        // The two requiring cars sit adjacent in slots 0 and 1.
        assert_eq!(state.fitness(), 1);

        // Swapping them changes nothing: both slots still require the option.
        let fitness = apply_move(&instance, &mut state, Move::swap(0, 1, 10).expect("legal"));
        assert_eq!(fitness, 1);
        assert_eq!(state.slots(), &[1, 0, 5, 2, 4, 3, 3, 4, 2, 5]);
        assert_matches_full(&instance, &state);
    }

    #[test]
    fn test_swap_repairs_violation() {
        let instance = ten_slot_instance();
        let mut state =
            SequenceState::evaluated(&instance, vec![0, 1, 5, 2, 4, 3, 3, 4, 2, 5]).expect("valid");
        // Move the class-1 car away from the class-0 car.
        let fitness = apply_move(&instance, &mut state, Move::swap(1, 5, 10).expect("legal"));
        assert_eq!(fitness, 0);
        assert!(state.is_feasible());
        assert_matches_full(&instance, &state);
    }

    #[test]
    fn test_swap_same_class_is_noop() {
        let instance = ten_slot_instance();
        let slots = vec![0, 2, 1, 3, 4, 3, 2, 4, 5, 5];
        let mut state = SequenceState::evaluated(&instance, slots.clone()).expect("valid");
        let before = state.clone();
        // Slots 1 and 6 both hold class 2.
        apply_move(&instance, &mut state, Move::swap(1, 6, 10).expect("legal"));
        assert_eq!(state.fitness(), before.fitness());
        assert_eq!(state.excess_row(0), before.excess_row(0));
        assert_matches_full(&instance, &state);
    }

    #[test]
    fn test_swap_adjacent_sites_share_windows() {
        let instance = wide_instance();
        let mut state =
            SequenceState::evaluated(&instance, vec![0, 1, 2, 0, 1, 2, 0, 1]).expect("valid");
        for (i, j) in [(0, 1), (3, 4), (6, 7), (2, 4)] {
            apply_move(&instance, &mut state, Move::swap(i, j, 8).expect("legal"));
            assert_matches_full(&instance, &state);
        }
    }

    #[test]
    fn test_swap_sequence_boundaries() {
        let instance = wide_instance();
        let mut state =
            SequenceState::evaluated(&instance, vec![2, 0, 0, 1, 1, 2, 0, 1]).expect("valid");
        apply_move(&instance, &mut state, Move::swap(0, 7, 8).expect("legal"));
        assert_matches_full(&instance, &state);
        apply_move(&instance, &mut state, Move::swap(7, 0, 8).expect("legal"));
        assert_matches_full(&instance, &state);
    }

    #[test]
    fn test_swap_randomized_chain() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let instance = wide_instance();
        let mut state =
            SequenceState::evaluated(&instance, vec![0, 0, 0, 1, 1, 1, 2, 2]).expect("valid");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let i = rng.random_range(0..8);
            let j = rng.random_range(0..8);
            if i == j {
                continue;
            }
            apply_move(&instance, &mut state, Move::swap(i, j, 8).expect("legal"));
            assert!(is_consistent(&instance, &state));
        }
    }
}
