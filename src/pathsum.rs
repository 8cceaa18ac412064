// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cumulative minimum energy along 8-connected vertical paths.
//!
//! Ported from `original_source/src/pathsum.c`'s `compute_pathsum` /
//! `compute_pathsum_partial` / `compute_pathsum_row`. The scalar
//! recurrence is the whole functional contract; the AVX2 path below is
//! the same "overlapping shifted loads, three-way min, add" trick the
//! original's inline-asm-adjacent C uses, translated into `std::arch`
//! intrinsics that operate in batches of 8 instead of the original's
//! unrolled-by-3 batches of 24.

use crate::image_buffer::ImageBuffer;
use crate::pixel::EnVal;

#[inline]
fn min3(a: EnVal, b: EnVal, c: EnVal) -> EnVal {
    a.min(b).min(c)
}

/// Recompute one row of the pathsum table over logical columns
/// `[j0, j0 + n)`, given that row `i - 1` is already valid. Row 0 is
/// just a copy of the energy map (spec.md §4.4's base case).
fn compute_row(energy: &ImageBuffer<EnVal>, pathsum: &mut ImageBuffer<EnVal>, i: usize, j0: usize, n: usize) {
    let width = energy.width();
    if i == 0 {
        for j in j0..j0 + n {
            pathsum.set(0, j, energy.get(0, j));
        }
        return;
    }

    for j in j0..j0 + n {
        let cc = pathsum.get(i - 1, j);
        let ll = if j > 0 { pathsum.get(i - 1, j - 1) } else { cc };
        let rr = if j < width - 1 { pathsum.get(i - 1, j + 1) } else { cc };
        pathsum.set(i, j, energy.get(i, j) + min3(ll, cc, rr));
    }
}

fn full_scalar(energy: &ImageBuffer<EnVal>, pathsum: &mut ImageBuffer<EnVal>) {
    let width = energy.width();
    let height = energy.height();
    for i in 0..height {
        compute_row(energy, pathsum, i, 0, width);
    }
}

/// Full recompute of the cumulative minimum path sum: row 0 is copied
/// straight from the energy map, every later row applies the
/// recurrence against the row above.
pub fn full(energy: &ImageBuffer<EnVal>) -> ImageBuffer<EnVal> {
    let mut out: ImageBuffer<EnVal> = ImageBuffer::new(energy.width(), energy.height());

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            unsafe { avx2::full(energy, &mut out) };
            return out;
        }
    }

    full_scalar(energy, &mut out);
    out
}

/// Partial recompute keyed on the seam that was just removed from
/// `energy`/`pathsum` (and whatever grayscale/RGB buffers accompany
/// them). Maintains a `[j0, j1)` cone over rows that widens by one
/// column per row, per spec.md §4.4; row 0 is never touched, since
/// `pathsum[0, j] == energy[0, j]` is preserved by construction (both
/// buffers are shrunk by the same seam before this runs — see
/// `DESIGN.md` Open Question 2).
///
/// Precondition: `pathsum` holds the table that was valid before
/// `removed_seam` was removed from `energy` and `pathsum` (and `energy`
/// itself is already up to date for the new, narrower width, e.g. via
/// [`crate::energy::partial`]).
pub fn partial(energy: &ImageBuffer<EnVal>, pathsum: &mut ImageBuffer<EnVal>, removed_seam: &[usize]) {
    let width = energy.width();
    let height = energy.height();
    debug_assert_eq!(removed_seam.len(), height);

    let mut j0 = width;
    let mut j1 = 0usize;

    for i in 1..height {
        let removed = removed_seam[i - 1];
        j0 = j0.min(if removed > 0 { removed - 1 } else { 0 });
        j1 = j1.max((removed + 1).min(width));
        debug_assert!(j1 > j0);
        compute_row(energy, pathsum, i, j0, j1 - j0);
        if j0 > 0 {
            j0 -= 1;
        }
        if j1 < width {
            j1 += 1;
        }
    }
}

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::compute_row;
    use crate::image_buffer::ImageBuffer;
    use crate::pixel::EnVal;
    use std::arch::x86_64::*;

    /// Batch width the fast path processes at once. The original C
    /// unrolls by 3 (24 cells); we keep it to one vector (8 cells) for
    /// clarity, trading some throughput for a much smaller unsafe
    /// surface.
    const LANES: usize = 8;

    #[target_feature(enable = "avx2")]
    pub unsafe fn full(energy: &ImageBuffer<EnVal>, out: &mut ImageBuffer<EnVal>) {
        let width = energy.width();
        let height = energy.height();

        compute_row(energy, out, 0, 0, width);
        if height == 1 {
            return;
        }

        for i in 1..height {
            // Column 0 is a scalar two-way min (no left neighbor).
            out.set(i, 0, {
                let cc = out.get(i - 1, 0);
                let rr = if width > 1 { out.get(i - 1, 1) } else { cc };
                energy.get(i, 0) + cc.min(rr)
            });

            let mut j = 1usize;
            while j + LANES + 1 <= width {
                let prev = out.row(i - 1);
                let ll = load8(prev, j - 1);
                let cc = load8(prev, j);
                let rr = load8(prev, j + 1);
                let cur = load8(energy.row(i), j);

                let minvals = _mm256_min_epi32(_mm256_min_epi32(ll, cc), rr);
                let sums = _mm256_add_epi32(minvals, cur);

                let dst = out.row_mut(i)[j..j + LANES].as_mut_ptr() as *mut __m256i;
                _mm256_storeu_si256(dst, sums);

                j += LANES;
            }

            while j < width {
                let cc = out.get(i - 1, j);
                let ll = if j > 0 { out.get(i - 1, j - 1) } else { cc };
                let rr = if j < width - 1 { out.get(i - 1, j + 1) } else { cc };
                out.set(i, j, energy.get(i, j) + ll.min(cc).min(rr));
                j += 1;
            }
        }
    }

    #[inline]
    unsafe fn load8(row: &[EnVal], offset: usize) -> __m256i {
        _mm256_loadu_si256(row[offset..offset + 8].as_ptr() as *const __m256i)
    }
}
