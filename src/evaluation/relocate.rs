//! Delta evaluation for relocate moves.
//!
//! # Algorithm
//!
//! Relocating the car at `from` to `to` shifts every slot strictly between
//! the two positions by one index, so the disturbed span is the whole closed
//! interval between them. With the move already applied to the slot array:
//!
//! - Options whose requirement bit is uniform across the disturbed span are
//!   skipped: a relocate permutes the span, so a uniform span leaves every
//!   window count unchanged.
//! - When the two sites are more than one window apart, a window lying
//!   strictly inside the shifted interior contains the same cars as its
//!   pre-move neighbor window, merely renumbered. Those excess cells are
//!   rotated by one index (left for a rightward relocate, right for a
//!   leftward one, ordered so pre-move values are read before being
//!   overwritten), and only the two boundary ranges around the removal and
//!   insertion sites are recounted.
//! - When the two boundary ranges touch or overlap (`|from - to| <= q`),
//!   the rotation is skipped and the contiguous union of both ranges is
//!   recounted directly.

use super::{affected_range, recompute_windows};
use crate::models::Instance;

/// Patches `excess` after the car originally at `from` was reinserted at
/// `to`, returning the signed fitness delta.
pub(crate) fn relocate_delta(
    instance: &Instance,
    slots: &[usize],
    excess: &mut [Vec<u32>],
    from: usize,
    to: usize,
) -> i64 {
    let n = instance.slot_count();
    let lo_site = from.min(to);
    let hi_site = from.max(to);
    let mut delta = 0i64;
    for option in 0..instance.option_count() {
        let first = instance.requires(slots[lo_site], option);
        if slots[lo_site + 1..=hi_site]
            .iter()
            .all(|&class| instance.requires(class, option) == first)
        {
            continue;
        }
        let q = instance.window(option);
        let row = &mut excess[option];

        if hi_site - lo_site <= q {
            // Boundary ranges touch or overlap: recount the union.
            let lo = lo_site.saturating_sub(q - 1);
            let hi = hi_site.min(n - q);
            delta += recompute_windows(instance, slots, row, option, lo, hi);
        } else if from < to {
            // Interior windows see their pre-move right neighbor's cars.
            for w in from + 1..=to - q {
                delta += i64::from(row[w + 1]) - i64::from(row[w]);
                row[w] = row[w + 1];
            }
            let (lo_a, hi_a) = affected_range(from, q, n);
            delta += recompute_windows(instance, slots, row, option, lo_a, hi_a);
            delta += recompute_windows(instance, slots, row, option, to - q + 1, to.min(n - q));
        } else {
            // Interior windows see their pre-move left neighbor's cars;
            // walk right-to-left so each source cell is still pre-move.
            for w in (to + 1..=from - q).rev() {
                delta += i64::from(row[w - 1]) - i64::from(row[w]);
                row[w] = row[w - 1];
            }
            let (lo_b, hi_b) = affected_range(to, q, n);
            delta += recompute_windows(instance, slots, row, option, lo_b, hi_b);
            delta += recompute_windows(instance, slots, row, option, from - q + 1, from.min(n - q));
        }
    }
    delta
}
