//! Neighborhood enumeration with equal-class pruning.
//!
//! # Pruning rule
//!
//! For swap and relocate, candidate partner positions extend outward from a
//! pivot in both directions only until another slot holding the pivot's
//! class is reached (exclusive): moving past an equal-class slot yields a
//! permutation-equivalent arrangement or one reachable by a shorter move.
//! For reverse, the second endpoint starts at `pivot + 2` (an adjacent-pair
//! reversal is a swap, already covered) and stops at the first later slot
//! holding the pivot's class; a pivot whose immediate successor holds its
//! own class contributes no candidates. The pruned sets stay well below the
//! full O(n²) candidate grids as soon as classes repeat.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Move, MoveKind};
use crate::models::SequenceState;

/// Enumerates the legal, de-duplicated move set of the given shape.
///
/// # Examples
///
/// ```
/// use car_seq::models::{Instance, SequenceState};
/// use car_seq::moves::{enumerate_moves, Move, MoveKind};
///
/// let instance = Instance::new(
///     3,
///     vec![2, 1],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
/// let state = SequenceState::evaluated(&instance, vec![0, 1, 0]).unwrap();
///
/// // Swapping the two class-0 cars is a no-op and is pruned away.
/// let moves = enumerate_moves(MoveKind::Swap, &state);
/// assert_eq!(
///     moves,
///     vec![Move::Swap { i: 0, j: 1 }, Move::Swap { i: 1, j: 2 }]
/// );
/// ```
pub fn enumerate_moves(kind: MoveKind, state: &SequenceState) -> Vec<Move> {
    debug_assert!(state.is_complete(), "enumeration requires a fully assigned sequence");
    let slots = state.slots();
    match kind {
        MoveKind::Swap => enumerate_swaps(slots),
        MoveKind::Relocate => enumerate_relocates(slots),
        MoveKind::Reverse => enumerate_reverses(slots),
    }
}

/// Draws one legal move of the given shape uniformly at random.
///
/// Returns `None` when the neighborhood is empty (e.g. a fully homogeneous
/// sequence). Enumerates the neighborhood on every call; use a [`MoveQueue`]
/// in randomized-descent loops instead.
pub fn random_move<R: Rng>(kind: MoveKind, state: &SequenceState, rng: &mut R) -> Option<Move> {
    let moves = enumerate_moves(kind, state);
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.random_range(0..moves.len())])
    }
}

fn enumerate_swaps(slots: &[usize]) -> Vec<Move> {
    let mut pairs = Vec::new();
    for (x, &class) in slots.iter().enumerate() {
        for j in x + 1..slots.len() {
            if slots[j] == class {
                break;
            }
            pairs.push((x, j));
        }
        for j in (0..x).rev() {
            if slots[j] == class {
                break;
            }
            pairs.push((j, x));
        }
    }
    // The outward scans visit unequal-class pairs from both pivots; the
    // stopping rule is directional, so neither side alone covers the set.
    pairs.sort_unstable();
    pairs.dedup();
    pairs
        .into_iter()
        .map(|(i, j)| Move::Swap { i, j })
        .collect()
}

fn enumerate_relocates(slots: &[usize]) -> Vec<Move> {
    let mut moves = Vec::new();
    for (x, &class) in slots.iter().enumerate() {
        for j in x + 1..slots.len() {
            if slots[j] == class {
                break;
            }
            moves.push(Move::Relocate { from: x, to: j });
        }
        for j in (0..x).rev() {
            if slots[j] == class {
                break;
            }
            moves.push(Move::Relocate { from: x, to: j });
        }
    }
    moves
}

fn enumerate_reverses(slots: &[usize]) -> Vec<Move> {
    let mut moves = Vec::new();
    for (x, &class) in slots.iter().enumerate() {
        if x + 2 >= slots.len() {
            break;
        }
        if slots[x + 1] == class {
            // Degenerate interval: reversing [x, j] just shifts the
            // duplicate, reachable by a shorter reversal from x + 1.
            continue;
        }
        for j in x + 2..slots.len() {
            if slots[j] == class {
                break;
            }
            moves.push(Move::Reverse { i: x, j });
        }
    }
    moves
}

/// A cached, shuffled queue over a neighborhood's exhaustive move set.
///
/// [`MoveQueue::next_random`] pops one move per call and re-enumerates from
/// the current state (in fresh random order) once the queue is exhausted, so
/// a randomized-descent driver cycles through every move without rebuilding
/// the list in its hot loop.
///
/// # Examples
///
/// ```
/// use car_seq::models::{Instance, SequenceState};
/// use car_seq::moves::{enumerate_moves, MoveKind, MoveQueue};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let instance = Instance::new(
///     3,
///     vec![2, 1],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
/// let state = SequenceState::evaluated(&instance, vec![0, 1, 0]).unwrap();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let mut queue = MoveQueue::new(MoveKind::Swap);
/// let total = enumerate_moves(MoveKind::Swap, &state).len();
/// let mut drawn = Vec::new();
/// for _ in 0..total {
///     drawn.push(queue.next_random(&state, &mut rng).unwrap());
/// }
/// drawn.sort();
/// drawn.dedup();
/// assert_eq!(drawn.len(), total);
/// ```
#[derive(Debug, Clone)]
pub struct MoveQueue {
    kind: MoveKind,
    queue: Vec<Move>,
}

impl MoveQueue {
    /// Creates an empty queue for the given move shape.
    pub fn new(kind: MoveKind) -> Self {
        Self {
            kind,
            queue: Vec::new(),
        }
    }

    /// The move shape this queue draws from.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Number of moves left before the next refill.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Pops the next move, refilling and reshuffling from `state` when the
    /// queue is exhausted.
    ///
    /// Returns `None` when the neighborhood itself is empty.
    pub fn next_random<R: Rng>(&mut self, state: &SequenceState, rng: &mut R) -> Option<Move> {
        if self.queue.is_empty() {
            self.queue = enumerate_moves(self.kind, state);
            self.queue.shuffle(rng);
        }
        self.queue.pop()
    }
}
