//! Delta evaluation for sub-range reversal moves.
//!
//! # Algorithm
//!
//! Reversing `[i, j]` maps the car at position `k` to position `i + j - k`,
//! so a window inside the range sees the member multiset of its *mirrored*
//! pre-move window, which differs in general; only a centered window is
//! guaranteed unchanged. Every window start whose span intersects `[i, j]`
//! is therefore recounted, clamped to the valid start range. Options for
//! which no position's requirement bit changed (the bit at `k` equals the
//! bit at its mirror) are skipped entirely.

use super::recompute_windows;
use crate::models::Instance;

/// Patches `excess` after the slot range `[i, j]` was reversed, returning
/// the signed fitness delta. Requires `i < j`.
pub(crate) fn reverse_delta(
    instance: &Instance,
    slots: &[usize],
    excess: &mut [Vec<u32>],
    i: usize,
    j: usize,
) -> i64 {
    let n = instance.slot_count();
    let mut delta = 0i64;
    for option in 0..instance.option_count() {
        // The bit at k moved in from the mirror position; if every bit
        // landed on an equal bit, no window count changed.
        let changed = (i..=j).any(|k| {
            instance.requires(slots[k], option) != instance.requires(slots[i + j - k], option)
        });
        if !changed {
            continue;
        }
        let q = instance.window(option);
        let lo = i.saturating_sub(q - 1);
        let hi = j.min(n - q);
        delta += recompute_windows(instance, slots, &mut excess[option], option, lo, hi);
    }
    delta
}
