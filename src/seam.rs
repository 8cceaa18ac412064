// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Recover the minimum-cost 8-connected vertical seam from a pathsum
//! map.
//!
//! Ported from `original_source/src/pathsum.c`'s `find_minseam`; the
//! tie-breaking rules below are load-bearing (spec.md §9, "Tie-breaking
//! in seam tracing") — change them and carving becomes non-deterministic
//! relative to any reference that preserves them.

use crate::image_buffer::ImageBuffer;
use crate::pixel::EnVal;

/// Trace the minimum-cost vertical seam through a pathsum map.
///
/// The last row is scanned for its minimum, breaking ties by keeping
/// the first (smallest-column) minimum. Walking upward from there,
/// each row picks whichever of its three candidate parents (upper-left,
/// upper-center, upper-right) has the smallest pathsum, breaking ties
/// by preferring center, then left.
pub fn trace(pathsum: &ImageBuffer<EnVal>) -> Vec<usize> {
    let width = pathsum.width();
    let height = pathsum.height();
    debug_assert!(height > 0);

    let mut seam = vec![0usize; height];

    let last_row = height - 1;
    let mut min_col = 0usize;
    let mut min_val = pathsum.get(last_row, 0);
    for col in 1..width {
        let v = pathsum.get(last_row, col);
        if v < min_val {
            min_val = v;
            min_col = col;
        }
    }
    seam[last_row] = min_col;

    for row in (0..last_row).rev() {
        let p = seam[row + 1];
        let center = pathsum.get(row, p);

        let left = if p > 0 { Some((p - 1, pathsum.get(row, p - 1))) } else { None };
        let right = if p + 1 < width { Some((p + 1, pathsum.get(row, p + 1))) } else { None };

        // Center-first, then left, then right: matches the reference
        // tie-breaking exactly (spec.md §4.5/§9).
        let mut best_col = p;
        let mut best_val = center;

        if let Some((col, val)) = left {
            if val < best_val {
                best_val = val;
                best_col = col;
            }
        }
        if let Some((col, val)) = right {
            if val < best_val {
                best_col = col;
            }
        }

        seam[row] = best_col;
    }

    seam
}
