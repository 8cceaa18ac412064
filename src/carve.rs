// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The carving driver: orchestrates the per-seam pipeline spec.md §2
//! describes — full compute on the first iteration, partial thereafter
//! — and owns the loop variable (`ww`, spec.md's "State machine")
//! ranging from `input.width() - 1` down to `output.width()`.
//!
//! Grounded on `original_source/src/seam_carve_baseline.c`'s
//! `seam_carve_baseline`/`carve_one_seam`, reworked so the four working
//! buffers are shrunk in place via `ImageBuffer::remove_seam` instead of
//! reallocated every iteration (spec.md §3's whole point).

use log::{debug, info};

use crate::energy;
use crate::error::CarveError;
use crate::grayscale;
use crate::image_buffer::ImageBuffer;
use crate::pathsum;
use crate::pixel::{EnVal, PixVal, RgbPixel};
use crate::seam;

fn checked_new<T: Copy + Default>(
    width: usize,
    height: usize,
    buffer: &'static str,
) -> Result<ImageBuffer<T>, CarveError> {
    if width.checked_mul(height).is_none() {
        return Err(CarveError::AllocationFailed { buffer });
    }
    Ok(ImageBuffer::new(width, height))
}

/// Shrink an image's width by removing the lowest-energy seam
/// repeatedly until `output`'s width is reached.
///
/// Contract (spec.md §6): `output.height() == input.height()`;
/// `output.width() <= input.width()`. On success, `output`'s pixels
/// are overwritten with the carved image. On a validation or
/// allocation error, `output` is left untouched.
pub fn carve(input: &ImageBuffer<RgbPixel>, output: &mut ImageBuffer<RgbPixel>) -> Result<(), CarveError> {
    if input.height() != output.height() || output.width() > input.width() {
        return Err(CarveError::DimensionMismatch {
            input_width: input.width(),
            input_height: input.height(),
            output_width: output.width(),
            output_height: output.height(),
        });
    }

    info!(
        "carving {}x{} down to {}x{}",
        input.width(),
        input.height(),
        output.width(),
        output.height()
    );

    let target_width = output.width();
    let height = input.height();

    if target_width == input.width() {
        for row in 0..height {
            for col in 0..target_width {
                output.set(row, col, input.get(row, col));
            }
        }
        return Ok(());
    }

    let mut working: ImageBuffer<RgbPixel> = checked_new(input.width(), height, "rgb working copy")?;
    for row in 0..height {
        for col in 0..input.width() {
            working.set(row, col, input.get(row, col));
        }
    }

    let mut gray: ImageBuffer<PixVal> = grayscale::reduce(&working);
    let mut energy_map: ImageBuffer<EnVal>;
    let mut pathsum_map: ImageBuffer<EnVal>;
    let mut previous_seam: Option<Vec<usize>> = None;

    energy_map = energy::full(&gray);
    pathsum_map = pathsum::full(&energy_map);

    loop {
        let current_seam = seam::trace(&pathsum_map);
        debug!(
            "width {} -> {}: removing seam starting at column {}",
            working.width(),
            working.width() - 1,
            current_seam[0]
        );

        working.remove_seam(&current_seam);
        gray.remove_seam(&current_seam);
        energy_map.remove_seam(&current_seam);
        pathsum_map.remove_seam(&current_seam);
        previous_seam = Some(current_seam);

        if working.width() == target_width {
            break;
        }

        let removed = previous_seam.as_ref().unwrap();
        energy::partial(&gray, &mut energy_map, removed);
        pathsum::partial(&energy_map, &mut pathsum_map, removed);
    }

    for row in 0..height {
        for col in 0..target_width {
            output.set(row, col, working.get(row, col));
        }
    }

    info!("carve complete: {} seam(s) removed", input.width() - target_width);
    Ok(())
}
