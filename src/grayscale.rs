// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! One-shot RGB-to-grayscale reduction.

use crate::image_buffer::ImageBuffer;
use crate::pixel::{PixVal, RgbPixel};

/// Reduce an RGB image to an 8-bit luminance image.
///
/// Deliberately `r/3 + g/3 + b/3`, three *independent* integer
/// divisions, rather than `(r+g+b)/3` — this matches the reference's
/// chroma weighting and keeps the sum within `u8` without saturating.
/// Reimplementations that collapse this to a single division produce a
/// different (if close) energy map; don't.
pub fn reduce(rgb: &ImageBuffer<RgbPixel>) -> ImageBuffer<PixVal> {
    let (width, height) = (rgb.width(), rgb.height());
    let mut out: ImageBuffer<PixVal> = ImageBuffer::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let p = rgb.get(row, col);
            let v = p.r / 3 + p.g / 3 + p.b / 3;
            out.set(row, col, v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_channel_division_not_sum_then_divide() {
        let mut rgb: ImageBuffer<RgbPixel> = ImageBuffer::new(1, 1);
        // (1+1+1)/3 == 1, but 1/3+1/3+1/3 == 0: these must differ to
        // prove the per-channel division is actually what's computed.
        rgb.set(0, 0, RgbPixel::new(1, 1, 1));
        let gray = reduce(&rgb);
        assert_eq!(gray.get(0, 0), 0);
    }

    #[test]
    fn solid_gray_stays_flat() {
        let mut rgb: ImageBuffer<RgbPixel> = ImageBuffer::new(2, 2);
        for row in 0..2 {
            for col in 0..2 {
                rgb.set(row, col, RgbPixel::new(128, 128, 128));
            }
        }
        let gray = reduce(&rgb);
        for row in 0..2 {
            for col in 0..2 {
                assert_eq!(gray.get(row, col), 42 + 42 + 42);
            }
        }
    }

    #[test]
    fn max_channels_do_not_saturate() {
        let mut rgb: ImageBuffer<RgbPixel> = ImageBuffer::new(1, 1);
        rgb.set(0, 0, RgbPixel::new(255, 255, 255));
        let gray = reduce(&rgb);
        assert_eq!(gray.get(0, 0), 255);
    }

    /// Visualization helper mirroring the original's `gray2rgb` debug
    /// dump (`seam_carve_baseline.c`) — not part of the carving
    /// pipeline, only used to eyeball intermediate grayscale buffers
    /// while debugging a test failure.
    #[allow(dead_code)]
    fn to_rgb(gray: &ImageBuffer<PixVal>) -> ImageBuffer<RgbPixel> {
        let (width, height) = (gray.width(), gray.height());
        let mut out: ImageBuffer<RgbPixel> = ImageBuffer::new(width, height);
        for row in 0..height {
            for col in 0..width {
                let v = gray.get(row, col);
                out.set(row, col, RgbPixel::new(v, v, v));
            }
        }
        out
    }

    #[test]
    fn to_rgb_broadcasts_luma_to_all_channels() {
        let mut gray: ImageBuffer<PixVal> = ImageBuffer::new(1, 1);
        gray.set(0, 0, 77);
        let rgb = to_rgb(&gray);
        assert_eq!(rgb.get(0, 0), RgbPixel::new(77, 77, 77));
    }
}
