//! Domain model types for the car sequencing problem.
//!
//! Provides the core abstractions: the immutable problem definition with
//! per-option capacities, windows, and the class requirement matrix, and the
//! mutable sequence state that couples the slot assignment to its cached
//! violation matrix and fitness.

mod instance;
mod sequence;

pub use instance::{Instance, InstanceError};
pub use sequence::{SequenceError, SequenceState, UNASSIGNED};
