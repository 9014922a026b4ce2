//! Mutable sequence state: slot assignment, excess matrix, and fitness.

use thiserror::Error;

use super::Instance;
use crate::evaluation::full_evaluate;

/// Sentinel class id marking a slot that has not been assigned yet.
///
/// Only construction-phase states contain unassigned slots; move evaluation
/// requires a complete sequence.
pub const UNASSIGNED: usize = usize::MAX;

/// An error raised by sequence construction or validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The slot vector does not match the instance's slot count.
    #[error("sequence has {actual} slots, instance expects {expected}")]
    LengthMismatch {
        /// Slot count of the instance.
        expected: usize,
        /// Length of the supplied sequence.
        actual: usize,
    },
    /// A slot still holds the [`UNASSIGNED`] sentinel.
    #[error("slot {slot} is unassigned")]
    UnassignedSlot {
        /// Offending slot index.
        slot: usize,
    },
    /// A slot holds a class id outside the instance's class range.
    #[error("class {class} out of range for {classes} classes")]
    UnknownClass {
        /// Offending class id.
        class: usize,
        /// Number of classes in the instance.
        classes: usize,
    },
    /// `push_class` was called on a fully assigned sequence.
    #[error("sequence is already fully assigned")]
    SequenceFull,
    /// `pop_class` was called on an empty sequence.
    #[error("sequence has no assigned slots to remove")]
    SequenceEmpty,
}

/// The mutable solution state of one search trajectory.
///
/// Couples the slot-to-class assignment to its derived excess matrix (one row
/// per option, one cell per valid window start) and the running fitness (sum
/// of all excess cells). The three fields are never exposed for independent
/// mutation: all updates flow through the engine functions in
/// [`crate::evaluation`] and [`crate::construction`], which keep the
/// invariant `fitness == sum(excess)` after every operation.
///
/// Cloning the state is the supported way to branch a search trajectory; the
/// clone owns an independent slot array and excess matrix.
///
/// # Examples
///
/// ```
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
///
/// // Alternating classes keep every window within capacity.
/// let state = SequenceState::evaluated(&instance, vec![0, 1, 0, 1]).unwrap();
/// assert_eq!(state.fitness(), 0);
/// assert!(state.is_feasible());
///
/// // Both requiring cars adjacent: the first window holds 2 > p = 1.
/// let state = SequenceState::evaluated(&instance, vec![0, 0, 1, 1]).unwrap();
/// assert_eq!(state.fitness(), 1);
/// assert_eq!(state.excess_row(0), &[1, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    pub(crate) slots: Vec<usize>,
    pub(crate) excess: Vec<Vec<u32>>,
    pub(crate) fitness: u64,
    pub(crate) assigned: usize,
}

impl SequenceState {
    /// Creates an empty state for incremental construction.
    ///
    /// All slots hold [`UNASSIGNED`], the excess matrix is zeroed, and the
    /// partial fitness is 0. Grow the sequence with
    /// [`crate::construction::push_class`].
    pub fn empty(instance: &Instance) -> Self {
        let excess = (0..instance.option_count())
            .map(|option| vec![0; instance.window_starts(option)])
            .collect();
        Self {
            slots: vec![UNASSIGNED; instance.slot_count()],
            excess,
            fitness: 0,
            assigned: 0,
        }
    }

    /// Creates a state from a fully assigned sequence, running one full
    /// evaluation to populate the excess matrix and fitness.
    ///
    /// Class counts are not checked against the instance's demands: drivers
    /// such as the robustness evaluator deliberately evaluate sequences built
    /// for alternate demand plans against the same instance.
    ///
    /// # Errors
    ///
    /// Returns a [`SequenceError`] if the sequence length does not match the
    /// instance or any slot holds an unassigned or out-of-range class.
    pub fn evaluated(instance: &Instance, slots: Vec<usize>) -> Result<Self, SequenceError> {
        if slots.len() != instance.slot_count() {
            return Err(SequenceError::LengthMismatch {
                expected: instance.slot_count(),
                actual: slots.len(),
            });
        }
        for (slot, &class) in slots.iter().enumerate() {
            if class == UNASSIGNED {
                return Err(SequenceError::UnassignedSlot { slot });
            }
            if class >= instance.class_count() {
                return Err(SequenceError::UnknownClass {
                    class,
                    classes: instance.class_count(),
                });
            }
        }
        let (excess, fitness) = full_evaluate(instance, &slots);
        Ok(Self {
            assigned: slots.len(),
            slots,
            excess,
            fitness,
        })
    }

    /// The slot-to-class assignment.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// The excess row of the given option, indexed by window start.
    pub fn excess_row(&self, option: usize) -> &[u32] {
        &self.excess[option]
    }

    /// Current fitness: the sum of all excess cells.
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Number of assigned slots (the sequence prefix during construction).
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    /// Returns `true` if every slot is assigned.
    pub fn is_complete(&self) -> bool {
        self.assigned == self.slots.len()
    }

    /// Returns `true` if the sequence violates no window constraint.
    pub fn is_feasible(&self) -> bool {
        self.fitness == 0
    }
}
