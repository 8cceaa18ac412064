// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The core's error taxonomy (spec.md §7).

use failure::Fail;

/// Everything that can make [`crate::carve::carve`] fail.
///
/// Internal invariant violations (buffer bounds, non-negative energy,
/// seam deltas within +-1) are *not* represented here: spec.md §7(c)
/// treats those as programmer errors, asserted via `debug_assert!` in
/// [`crate::image_buffer::ImageBuffer`] and friends, and left unchecked
/// in release builds.
#[derive(Debug, Fail)]
pub enum CarveError {
    /// `output.height() != input.height()`, or `output.width() >
    /// input.width()`. Detected at entry; neither buffer is touched.
    #[fail(
        display = "dimension mismatch: input {}x{}, output {}x{}",
        input_width, input_height, output_width, output_height
    )]
    DimensionMismatch {
        /// Input width.
        input_width: usize,
        /// Input height.
        input_height: usize,
        /// Requested output width.
        output_width: usize,
        /// Requested output height.
        output_height: usize,
    },

    /// An intermediate buffer's requested dimensions overflow `usize`
    /// before allocation is even attempted. Any buffers already
    /// allocated earlier in the same call are dropped automatically as
    /// this error unwinds, satisfying spec.md §7(b)'s "all prior
    /// intermediate buffers released before return".
    #[fail(display = "failed to allocate buffer: {}", buffer)]
    AllocationFailed {
        /// Which buffer could not be allocated. Currently only
        /// `"rgb working copy"` is ever produced, by [`crate::carve`]'s
        /// overflow-checked allocation of the working RGB copy; the
        /// grayscale, energy, and pathsum buffers are derived from it
        /// and so can never overflow independently.
        buffer: &'static str,
    },
}
