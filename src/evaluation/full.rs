//! Full (from-scratch) evaluation.
//!
//! # Algorithm
//!
//! For each option, slide a window of length `q` across the sequence keeping
//! a running count of requiring cars: seed the count on the first window,
//! then add the entering slot and drop the leaving slot as the window
//! advances. Each window's excess is `max(0, count - p)`.
//!
//! # Complexity
//!
//! O(option_count × slot_count), independent of the window lengths.

use crate::models::Instance;

/// Evaluates a fully assigned sequence from scratch.
///
/// Returns the excess matrix (one row per option, one cell per valid window
/// start) and the fitness (sum of all cells). Deterministic: integer
/// summation order cannot affect the result.
///
/// The sequence must be fully assigned with in-range class ids; go through
/// [`crate::models::SequenceState::evaluated`] to validate untrusted input.
///
/// # Examples
///
/// ```
/// use car_seq::evaluation::full_evaluate;
/// use car_seq::models::Instance;
///
/// let instance = Instance::new(
///     5,
///     vec![3, 2],
///     vec![1],
///     vec![2],
///     vec![vec![true], vec![false]],
/// )
/// .unwrap();
///
/// // Requiring cars at slots 0, 1, and 3: only the first window overflows.
/// let (excess, fitness) = full_evaluate(&instance, &[0, 0, 1, 0, 1]);
/// assert_eq!(excess[0], vec![1, 0, 0, 0]);
/// assert_eq!(fitness, 1);
/// ```
pub fn full_evaluate(instance: &Instance, slots: &[usize]) -> (Vec<Vec<u32>>, u64) {
    debug_assert_eq!(slots.len(), instance.slot_count());
    let mut excess = Vec::with_capacity(instance.option_count());
    let mut fitness = 0u64;
    for option in 0..instance.option_count() {
        let q = instance.window(option);
        let capacity = instance.capacity(option) as u32;
        let starts = instance.window_starts(option);
        let mut row = vec![0u32; starts];

        let mut count = slots[..q]
            .iter()
            .filter(|&&class| instance.requires(class, option))
            .count() as u32;
        row[0] = count.saturating_sub(capacity);
        for w in 1..starts {
            if instance.requires(slots[w - 1], option) {
                count -= 1;
            }
            if instance.requires(slots[w + q - 1], option) {
                count += 1;
            }
            row[w] = count.saturating_sub(capacity);
        }

        fitness += row.iter().map(|&cell| u64::from(cell)).sum::<u64>();
        excess.push(row);
    }
    (excess, fitness)
}
