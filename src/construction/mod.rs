//! Construction-phase incremental growth.
//!
//! Constructive heuristics (semi-greedy, ant-based) build a sequence
//! left-to-right, scoring each candidate class before committing it.
//! [`push_class`] assigns the next slot and folds the excess of each window
//! that just became fully assigned into the running partial fitness;
//! [`pop_class`] is the exact inverse. The partial fitness covers exactly
//! the complete windows, so it equals the full-evaluation fitness once the
//! last slot is assigned.
//!
//! The construction-phase *objective* (e.g. utilization-rate greediness) is
//! the driver's concern: drivers compute it from the exposed
//! [`SequenceState::slots`], [`SequenceState::excess_row`], and
//! [`SequenceState::assigned`] views.

use crate::evaluation::window_count;
use crate::models::{Instance, SequenceError, SequenceState, UNASSIGNED};

/// Assigns `class` to the next unassigned slot and returns the new partial
/// fitness.
///
/// For each option whose newest window just became fully assigned, that
/// window's excess is computed and added to the partial fitness. Each push
/// completes at most one window per option.
///
/// # Errors
///
/// Returns a [`SequenceError`] if the sequence is already fully assigned or
/// `class` is out of range.
///
/// # Examples
///
/// ```
/// use car_seq::construction::push_class;
/// use car_seq::models::{Instance, SequenceState};
///
/// let instance = Instance::new(
///     4,
///     vec![2, 2],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
/// let mut state = SequenceState::empty(&instance);
///
/// assert_eq!(push_class(&instance, &mut state, 0).unwrap(), 0);
/// // Second requiring car completes an overfull window.
/// assert_eq!(push_class(&instance, &mut state, 0).unwrap(), 1);
/// assert_eq!(push_class(&instance, &mut state, 1).unwrap(), 1);
/// assert_eq!(push_class(&instance, &mut state, 1).unwrap(), 1);
/// assert!(state.is_complete());
/// ```
pub fn push_class(
    instance: &Instance,
    state: &mut SequenceState,
    class: usize,
) -> Result<u64, SequenceError> {
    if state.assigned == state.slots.len() {
        return Err(SequenceError::SequenceFull);
    }
    if class >= instance.class_count() {
        return Err(SequenceError::UnknownClass {
            class,
            classes: instance.class_count(),
        });
    }
    let slot = state.assigned;
    state.slots[slot] = class;
    state.assigned += 1;
    for option in 0..instance.option_count() {
        let q = instance.window(option);
        if slot + 1 >= q {
            let w = slot + 1 - q;
            let cell = window_count(instance, &state.slots, option, w)
                .saturating_sub(instance.capacity(option) as u32);
            state.excess[option][w] = cell;
            state.fitness += u64::from(cell);
        }
    }
    Ok(state.fitness)
}

/// Removes the most recently assigned car and returns the restored partial
/// fitness.
///
/// # Errors
///
/// Returns [`SequenceError::SequenceEmpty`] if no slot is assigned.
pub fn pop_class(instance: &Instance, state: &mut SequenceState) -> Result<u64, SequenceError> {
    if state.assigned == 0 {
        return Err(SequenceError::SequenceEmpty);
    }
    let slot = state.assigned - 1;
    for option in 0..instance.option_count() {
        let q = instance.window(option);
        if slot + 1 >= q {
            let w = slot + 1 - q;
            state.fitness -= u64::from(state.excess[option][w]);
            state.excess[option][w] = 0;
        }
    }
    state.slots[slot] = UNASSIGNED;
    state.assigned -= 1;
    Ok(state.fitness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{full_evaluate, is_consistent};

    fn instance() -> Instance {
        Instance::new(
            6,
            vec![3, 3],
            vec![1, 1],
            vec![2, 3],
            vec![vec![true, false], vec![false, true]],
        )
        .expect("valid instance")
    }

    #[test]
    fn test_push_reaches_full_evaluation() {
        let instance = instance();
        let sequence = [0, 0, 1, 1, 0, 1];
        let mut state = SequenceState::empty(&instance);
        let mut fitness = 0;
        for &class in &sequence {
            fitness = push_class(&instance, &mut state, class).expect("room left");
        }
        assert!(state.is_complete());
        let (excess, full_fitness) = full_evaluate(&instance, state.slots());
        assert_eq!(fitness, full_fitness);
        assert_eq!(state.excess, excess);
        assert!(is_consistent(&instance, &state));
    }

    #[test]
    fn test_partial_fitness_counts_complete_windows_only() {
        let instance = instance();
        let mut state = SequenceState::empty(&instance);
        // Two adjacent requiring cars, but the q=3 option has no complete
        // window yet.
        push_class(&instance, &mut state, 0).expect("room left");
        let fitness = push_class(&instance, &mut state, 0).expect("room left");
        assert_eq!(fitness, 1);
        assert_eq!(state.excess_row(0), &[1, 0, 0, 0, 0]);
        assert_eq!(state.excess_row(1), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_pop_inverts_push() {
        let instance = instance();
        let mut state = SequenceState::empty(&instance);
        for class in [0, 0, 1] {
            push_class(&instance, &mut state, class).expect("room left");
        }
        let snapshot = state.clone();
        push_class(&instance, &mut state, 1).expect("room left");
        pop_class(&instance, &mut state).expect("not empty");
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_pop_to_empty_and_rebuild() {
        let instance = instance();
        let mut state = SequenceState::empty(&instance);
        for class in [0, 1, 0, 1, 0, 1] {
            push_class(&instance, &mut state, class).expect("room left");
        }
        for _ in 0..6 {
            pop_class(&instance, &mut state).expect("not empty");
        }
        assert_eq!(state, SequenceState::empty(&instance));
        assert_eq!(state.fitness(), 0);
    }

    #[test]
    fn test_push_rejects_overflow_and_unknown_class() {
        let instance = instance();
        let mut state = SequenceState::empty(&instance);
        assert_eq!(
            push_class(&instance, &mut state, 9),
            Err(SequenceError::UnknownClass { class: 9, classes: 2 })
        );
        for class in [0, 1, 0, 1, 0, 1] {
            push_class(&instance, &mut state, class).expect("room left");
        }
        assert_eq!(
            push_class(&instance, &mut state, 0),
            Err(SequenceError::SequenceFull)
        );
    }

    #[test]
    fn test_pop_rejects_empty() {
        let instance = instance();
        let mut state = SequenceState::empty(&instance);
        assert_eq!(
            pop_class(&instance, &mut state),
            Err(SequenceError::SequenceEmpty)
        );
    }
}
