// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gradient-magnitude energy map via a separable Sobel filter.
//!
//! Ported from `original_source/src/energy.c`'s `conv2d`, generalized
//! from two passes of a generic NxM convolution down to the one 3x3
//! Kx/Ky pair spec.md actually calls for, with the scalar reference
//! kept alongside an AVX2 fast path for the interior of the image.

use crate::image_buffer::ImageBuffer;
use crate::pixel::{EnVal, PixVal};

const KX: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
const KY: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Clamp a 3-wide window's origin into `[0, dim - 3]`, per spec.md
/// §4.3: `clamp(i - 1, 0, dim - 3)`. Degrades to an origin of 0 for
/// `dim < 3` (the stencil then reads the same row/column more than
/// once, which is the best a 3-wide window can do against a
/// smaller-than-3 image).
#[inline]
fn clamp_origin(i: usize, dim: usize) -> usize {
    if dim <= 3 {
        return 0;
    }
    let max_origin = dim - 3;
    if i == 0 {
        0
    } else {
        (i - 1).min(max_origin)
    }
}

/// Compute the energy of a single pixel with the scalar reference
/// implementation. Used directly by the partial recompute, by the
/// full scalar fallback, and as the edge handler around the SIMD fast
/// path.
fn sobel_pixel(gray: &ImageBuffer<PixVal>, row: usize, col: usize) -> EnVal {
    let height = gray.height();
    let width = gray.width();
    let i0 = clamp_origin(row, height);
    let j0 = clamp_origin(col, width);

    let mut gx: i32 = 0;
    let mut gy: i32 = 0;
    for ii in 0..3 {
        let r = (i0 + ii).min(height - 1);
        for jj in 0..3 {
            let c = (j0 + jj).min(width - 1);
            let v = gray.get(r, c) as i32;
            gx += KX[ii][jj] * v;
            gy += KY[ii][jj] * v;
        }
    }
    (gx.abs() >> 4) + (gy.abs() >> 4)
}

fn full_scalar(gray: &ImageBuffer<PixVal>, out: &mut ImageBuffer<EnVal>) {
    let (width, height) = (gray.width(), gray.height());
    for row in 0..height {
        for col in 0..width {
            out.set(row, col, sobel_pixel(gray, row, col));
        }
    }
}

/// Full recompute of the energy map: every pixel, from scratch. Used
/// on the first carving iteration, and as the ground truth the
/// partial recompute must match (spec.md §8 property 6).
pub fn full(gray: &ImageBuffer<PixVal>) -> ImageBuffer<EnVal> {
    let mut out: ImageBuffer<EnVal> = ImageBuffer::new(gray.width(), gray.height());

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            unsafe { avx2::full(gray, &mut out) };
            return out;
        }
    }

    full_scalar(gray, &mut out);
    out
}

/// Partial recompute after a seam has been removed from the grayscale
/// buffer: only the eight-column strip per row starting at
/// `removed[row] - 3` (clamped into `[0, width)`) can have gone stale,
/// per spec.md §4.3's dependency-cone argument (see `DESIGN.md` Open
/// Question 1 for why eight columns is exactly enough).
///
/// Precondition: `energy` holds the energy map that was valid for
/// `gray` *before* `removed_seam` was removed from both buffers, and
/// `gray`/`energy` have already been shrunk by that same seam.
pub fn partial(gray: &ImageBuffer<PixVal>, energy: &mut ImageBuffer<EnVal>, removed_seam: &[usize]) {
    let width = gray.width();
    let height = gray.height();
    debug_assert_eq!(gray.height(), energy.height());
    debug_assert_eq!(gray.width(), energy.width());
    debug_assert_eq!(removed_seam.len(), height);

    for row in 0..height {
        let removed = removed_seam[row];
        // `removed` is a column index from the pre-removal (one-wider)
        // coordinate space; `removed == width` is valid whenever the
        // removed column was the old rightmost column (mirrors
        // `pathsum::partial`'s `(removed + 1).min(width)` clamp).
        debug_assert!(removed <= width);
        let start = removed.saturating_sub(3);
        let end = (start + 8).min(width);
        for col in start..end {
            energy.set(row, col, sobel_pixel(gray, row, col));
        }
    }
}

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::sobel_pixel;
    use crate::image_buffer::ImageBuffer;
    use crate::pixel::{EnVal, PixVal};
    use std::arch::x86_64::*;

    /// AVX2 fast path: true only for rows/columns whose 3x3 window
    /// needs no edge clamping, i.e. the interior of the image. Edge
    /// rows, edge columns, and any tail that doesn't fill a full
    /// 8-lane batch fall back to the scalar stencil, which is always
    /// correct (if slower) everywhere.
    #[target_feature(enable = "avx2")]
    pub unsafe fn full(gray: &ImageBuffer<PixVal>, out: &mut ImageBuffer<EnVal>) {
        let width = gray.width();
        let height = gray.height();

        // Top and bottom rows: always scalar, they have no row above
        // or below to avoid clamping.
        for row in [0usize, height.saturating_sub(1)].iter().copied() {
            for col in 0..width {
                out.set(row, col, sobel_pixel(gray, row, col));
            }
        }
        if height < 3 {
            return;
        }

        for row in 1..height - 1 {
            let top = gray.row(row - 1);
            let mid = gray.row(row);
            let bot = gray.row(row + 1);

            // Leading scalar boundary column (col 0).
            out.set(row, 0, sobel_pixel(gray, row, 0));

            let mut col = 1usize;
            while col + 8 + 1 <= width {
                let p00 = load8(top, col - 1);
                let p01 = load8(top, col);
                let p02 = load8(top, col + 1);
                let p10 = load8(mid, col - 1);
                let p12 = load8(mid, col + 1);
                let p20 = load8(bot, col - 1);
                let p21 = load8(bot, col);
                let p22 = load8(bot, col + 1);

                let diag = _mm256_sub_epi32(p22, p00);
                let x = _mm256_add_epi32(
                    _mm256_add_epi32(_mm256_slli_epi32(_mm256_sub_epi32(p21, p01), 1), diag),
                    _mm256_sub_epi32(p20, p02),
                );
                let y = _mm256_add_epi32(
                    _mm256_add_epi32(_mm256_slli_epi32(_mm256_sub_epi32(p12, p10), 1), diag),
                    _mm256_sub_epi32(p02, p20),
                );

                let energy = _mm256_add_epi32(
                    _mm256_srli_epi32(_mm256_abs_epi32(x), 4),
                    _mm256_srli_epi32(_mm256_abs_epi32(y), 4),
                );

                let dst = out.row_mut(row)[col..col + 8].as_mut_ptr() as *mut __m256i;
                _mm256_storeu_si256(dst, energy);

                col += 8;
            }

            // Scalar tail, including the trailing boundary column.
            while col < width {
                out.set(row, col, sobel_pixel(gray, row, col));
                col += 1;
            }
        }
    }

    /// Load 8 contiguous `u8` grayscale samples starting at `offset`
    /// and zero-extend them into 32-bit lanes.
    #[inline]
    unsafe fn load8(row: &[PixVal], offset: usize) -> __m256i {
        let ptr = row[offset..offset + 8].as_ptr() as *const __m128i;
        _mm256_cvtepu8_epi32(_mm_loadl_epi64(ptr))
    }
}
