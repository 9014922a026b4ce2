//! Immutable problem definition.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error raised when constructing a degenerate [`Instance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// The instance has no slots, no classes, or no options.
    #[error("instance must have at least one slot, one class, and one option")]
    Empty,
    /// Class demands do not sum to the slot count.
    #[error("class demands sum to {total} but the sequence has {slots} slots")]
    DemandMismatch {
        /// Sum of all class demands.
        total: usize,
        /// Declared slot count.
        slots: usize,
    },
    /// Capacity and window vectors disagree in length.
    #[error("{capacities} capacities given for {windows} windows")]
    OptionCountMismatch {
        /// Length of the capacity vector.
        capacities: usize,
        /// Length of the window vector.
        windows: usize,
    },
    /// An option has capacity zero.
    #[error("option {option} has capacity 0; capacities must be at least 1")]
    ZeroCapacity {
        /// Offending option index.
        option: usize,
    },
    /// An option has window length zero.
    #[error("option {option} has window 0; windows must be at least 1")]
    ZeroWindow {
        /// Offending option index.
        option: usize,
    },
    /// An option's window is longer than the whole sequence.
    #[error("option {option}: window {window} exceeds slot count {slots}")]
    WindowTooLarge {
        /// Offending option index.
        option: usize,
        /// Window length of that option.
        window: usize,
        /// Slot count of the instance.
        slots: usize,
    },
    /// The requirement matrix is not `class_count x option_count`.
    #[error("requirement matrix row {row} has {cols} columns, expected {classes} rows of {options}")]
    MatrixShape {
        /// Offending row index, or the row count when the number of rows
        /// itself is wrong.
        row: usize,
        /// Columns found in that row.
        cols: usize,
        /// Expected row count.
        classes: usize,
        /// Expected column count.
        options: usize,
    },
}

/// An immutable car sequencing problem definition.
///
/// Holds the slot count, the per-class demand, the per-option capacity `p`
/// and window length `q` (no window of `q` consecutive slots may contain more
/// than `p` cars requiring the option), and the class x option requirement
/// matrix. All degenerate configurations are rejected at construction; the
/// evaluation engine assumes a validated instance thereafter.
///
/// An `Instance` owns plain data and is therefore `Send + Sync`: parallel
/// search trajectories share one instance read-only.
///
/// # Examples
///
/// ```
/// use car_seq::models::Instance;
///
/// // 4 slots, 2 classes (2 cars each), 1 option with p=1, q=2,
/// // required by class 0 only.
/// let instance = Instance::new(
///     4,
///     vec![2, 2],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
///
/// assert_eq!(instance.slot_count(), 4);
/// assert_eq!(instance.class_count(), 2);
/// assert_eq!(instance.option_count(), 1);
/// assert!(instance.requires(0, 0));
/// assert!(!instance.requires(1, 0));
/// assert_eq!(instance.window_starts(0), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct Instance {
    slot_count: usize,
    class_count: usize,
    option_count: usize,
    demand: Vec<usize>,
    capacity: Vec<usize>,
    window: Vec<usize>,
    requires: Vec<Vec<bool>>,
}

impl Instance {
    /// Creates a validated instance.
    ///
    /// `demand[c]` is the number of cars of class `c`, `capacity[o]` and
    /// `window[o]` are the per-option `p` and `q`, and `requires[c][o]` says
    /// whether class `c` needs option `o`.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] if any count is zero, the demands do not
    /// sum to `slot_count`, any capacity or window is zero, any window
    /// exceeds the slot count, or the requirement matrix has the wrong shape.
    pub fn new(
        slot_count: usize,
        demand: Vec<usize>,
        capacity: Vec<usize>,
        window: Vec<usize>,
        requires: Vec<Vec<bool>>,
    ) -> Result<Self, InstanceError> {
        if slot_count == 0 || demand.is_empty() || capacity.is_empty() {
            return Err(InstanceError::Empty);
        }
        if capacity.len() != window.len() {
            return Err(InstanceError::OptionCountMismatch {
                capacities: capacity.len(),
                windows: window.len(),
            });
        }
        let total: usize = demand.iter().sum();
        if total != slot_count {
            return Err(InstanceError::DemandMismatch {
                total,
                slots: slot_count,
            });
        }
        for (option, (&p, &q)) in capacity.iter().zip(window.iter()).enumerate() {
            if p == 0 {
                return Err(InstanceError::ZeroCapacity { option });
            }
            if q == 0 {
                return Err(InstanceError::ZeroWindow { option });
            }
            if q > slot_count {
                return Err(InstanceError::WindowTooLarge {
                    option,
                    window: q,
                    slots: slot_count,
                });
            }
        }
        let class_count = demand.len();
        let option_count = capacity.len();
        if requires.len() != class_count {
            return Err(InstanceError::MatrixShape {
                row: requires.len(),
                cols: 0,
                classes: class_count,
                options: option_count,
            });
        }
        for (row, bits) in requires.iter().enumerate() {
            if bits.len() != option_count {
                return Err(InstanceError::MatrixShape {
                    row,
                    cols: bits.len(),
                    classes: class_count,
                    options: option_count,
                });
            }
        }
        Ok(Self {
            slot_count,
            class_count,
            option_count,
            demand,
            capacity,
            window,
            requires,
        })
    }

    /// Number of slots in the sequence.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Number of car classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Number of configurable options.
    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// Demand (total occurrences) of the given class.
    pub fn demand(&self, class: usize) -> usize {
        self.demand[class]
    }

    /// Capacity `p` of the given option.
    pub fn capacity(&self, option: usize) -> usize {
        self.capacity[option]
    }

    /// Window length `q` of the given option.
    pub fn window(&self, option: usize) -> usize {
        self.window[option]
    }

    /// Returns `true` if the given class requires the given option.
    pub fn requires(&self, class: usize, option: usize) -> bool {
        self.requires[class][option]
    }

    /// Number of valid window start positions for the given option.
    ///
    /// Window starts range over `[0, slot_count - window(option)]`.
    pub fn window_starts(&self, option: usize) -> usize {
        self.slot_count - self.window[option] + 1
    }
}

/// Unvalidated mirror of [`Instance`] used as the serde entry point, so a
/// deserialized instance always passes through [`Instance::new`].
#[derive(Deserialize)]
struct RawInstance {
    slot_count: usize,
    demand: Vec<usize>,
    capacity: Vec<usize>,
    window: Vec<usize>,
    requires: Vec<Vec<bool>>,
}

impl TryFrom<RawInstance> for Instance {
    type Error = InstanceError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        Instance::new(
            raw.slot_count,
            raw.demand,
            raw.capacity,
            raw.window,
            raw.requires,
        )
    }
}
