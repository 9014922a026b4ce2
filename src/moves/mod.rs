//! Move descriptors and neighborhood enumeration.
//!
//! A [`Move`] is a short-lived, validated perturbation descriptor consumed by
//! one apply/undo cycle in [`crate::evaluation`]. Neighborhood enumeration
//! with the equal-class pruning rule lives in [`neighborhood`] and is
//! re-exported here.

mod neighborhood;

pub use neighborhood::{enumerate_moves, random_move, MoveQueue};

use thiserror::Error;

/// An error raised when constructing a malformed move.
///
/// Malformed moves indicate a driver bug; they are rejected up front and
/// never tolerated or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Swap of a slot with itself.
    #[error("swap requires two distinct slots, got {index} twice")]
    DegenerateSwap {
        /// The repeated index.
        index: usize,
    },
    /// Relocation of a slot onto itself.
    #[error("relocate requires two distinct slots, got {index} twice")]
    DegenerateRelocate {
        /// The repeated index.
        index: usize,
    },
    /// Reversal of an empty or single-slot range.
    #[error("reverse requires i < j, got i={i}, j={j}")]
    EmptyRange {
        /// Range start.
        i: usize,
        /// Range end.
        j: usize,
    },
    /// A slot index beyond the sequence.
    #[error("slot index {index} out of range for {slots} slots")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Slot count of the sequence.
        slots: usize,
    },
}

/// The shape of a move, used to select a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Exchange two slots.
    Swap,
    /// Remove one car and reinsert it elsewhere.
    Relocate,
    /// Reverse a closed sub-range.
    Reverse,
}

/// A legal local perturbation of a sequence.
///
/// Construct moves through [`Move::swap`], [`Move::relocate`], and
/// [`Move::reverse`], which validate the indices against the slot count;
/// the evaluation engine assumes validated moves.
///
/// # Examples
///
/// ```
/// use car_seq::moves::{Move, MoveError};
///
/// let mv = Move::swap(2, 5, 10).unwrap();
/// assert_eq!(mv.inverse(), mv);
///
/// assert_eq!(
///     Move::swap(3, 3, 10),
///     Err(MoveError::DegenerateSwap { index: 3 })
/// );
/// assert!(Move::reverse(5, 2, 10).is_err());
///
/// // Relocate is undone by the mirrored relocation.
/// let mv = Move::relocate(1, 7, 10).unwrap();
/// assert_eq!(mv.inverse(), Move::relocate(7, 1, 10).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    /// Exchange slots `i` and `j` (`i != j`).
    Swap {
        /// First slot.
        i: usize,
        /// Second slot.
        j: usize,
    },
    /// Remove the car at `from`, shift the interval between the sites by one
    /// slot, and reinsert it at `to` (`from != to`).
    Relocate {
        /// Slot the car leaves.
        from: usize,
        /// Slot the car lands in.
        to: usize,
    },
    /// Reverse the closed slot range `[i, j]` (`i < j`).
    Reverse {
        /// Range start.
        i: usize,
        /// Range end.
        j: usize,
    },
}

impl Move {
    /// Creates a validated swap of slots `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] if `i == j` or either index is `>= slot_count`.
    pub fn swap(i: usize, j: usize, slot_count: usize) -> Result<Self, MoveError> {
        let mv = Move::Swap { i, j };
        mv.validate(slot_count)?;
        Ok(mv)
    }

    /// Creates a validated relocation of the car at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] if `from == to` or either index is
    /// `>= slot_count`.
    pub fn relocate(from: usize, to: usize, slot_count: usize) -> Result<Self, MoveError> {
        let mv = Move::Relocate { from, to };
        mv.validate(slot_count)?;
        Ok(mv)
    }

    /// Creates a validated reversal of the closed range `[i, j]`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] if `i >= j` or `j >= slot_count`.
    pub fn reverse(i: usize, j: usize, slot_count: usize) -> Result<Self, MoveError> {
        let mv = Move::Reverse { i, j };
        mv.validate(slot_count)?;
        Ok(mv)
    }

    /// Checks this move against a sequence of `slot_count` slots.
    ///
    /// # Errors
    ///
    /// Returns the same [`MoveError`] the constructors raise.
    pub fn validate(self, slot_count: usize) -> Result<(), MoveError> {
        let check_bounds = |index: usize| {
            if index >= slot_count {
                Err(MoveError::OutOfRange {
                    index,
                    slots: slot_count,
                })
            } else {
                Ok(())
            }
        };
        match self {
            Move::Swap { i, j } => {
                check_bounds(i)?;
                check_bounds(j)?;
                if i == j {
                    return Err(MoveError::DegenerateSwap { index: i });
                }
            }
            Move::Relocate { from, to } => {
                check_bounds(from)?;
                check_bounds(to)?;
                if from == to {
                    return Err(MoveError::DegenerateRelocate { index: from });
                }
            }
            Move::Reverse { i, j } => {
                check_bounds(j)?;
                if i >= j {
                    return Err(MoveError::EmptyRange { i, j });
                }
            }
        }
        Ok(())
    }

    /// The move that undoes this one.
    ///
    /// Swap and reverse are self-inverse; relocate mirrors its endpoints.
    pub fn inverse(self) -> Self {
        match self {
            Move::Relocate { from, to } => Move::Relocate { from: to, to: from },
            other => other,
        }
    }

    /// The shape tag of this move.
    pub fn kind(self) -> MoveKind {
        match self {
            Move::Swap { .. } => MoveKind::Swap,
            Move::Relocate { .. } => MoveKind::Relocate,
            Move::Reverse { .. } => MoveKind::Reverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_validation() {
        assert!(Move::swap(0, 1, 2).is_ok());
        assert_eq!(
            Move::swap(1, 1, 4),
            Err(MoveError::DegenerateSwap { index: 1 })
        );
        assert_eq!(
            Move::swap(0, 4, 4),
            Err(MoveError::OutOfRange { index: 4, slots: 4 })
        );
    }

    #[test]
    fn test_relocate_validation() {
        assert!(Move::relocate(3, 0, 4).is_ok());
        assert_eq!(
            Move::relocate(2, 2, 4),
            Err(MoveError::DegenerateRelocate { index: 2 })
        );
        assert_eq!(
            Move::relocate(5, 0, 4),
            Err(MoveError::OutOfRange { index: 5, slots: 4 })
        );
    }

    #[test]
    fn test_reverse_validation() {
        assert!(Move::reverse(0, 3, 4).is_ok());
        assert_eq!(Move::reverse(3, 3, 4), Err(MoveError::EmptyRange { i: 3, j: 3 }));
        assert_eq!(Move::reverse(3, 1, 4), Err(MoveError::EmptyRange { i: 3, j: 1 }));
        assert_eq!(
            Move::reverse(0, 4, 4),
            Err(MoveError::OutOfRange { index: 4, slots: 4 })
        );
    }

    #[test]
    fn test_inverse() {
        let swap = Move::swap(1, 3, 6).expect("legal");
        assert_eq!(swap.inverse(), swap);
        let reverse = Move::reverse(1, 3, 6).expect("legal");
        assert_eq!(reverse.inverse(), reverse);
        let relocate = Move::relocate(1, 3, 6).expect("legal");
        assert_eq!(relocate.inverse(), Move::Relocate { from: 3, to: 1 });
        assert_eq!(relocate.inverse().inverse(), relocate);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Move::swap(0, 1, 2).expect("legal").kind(), MoveKind::Swap);
        assert_eq!(
            Move::relocate(0, 1, 2).expect("legal").kind(),
            MoveKind::Relocate
        );
        assert_eq!(
            Move::reverse(0, 1, 2).expect("legal").kind(),
            MoveKind::Reverse
        );
    }
}
