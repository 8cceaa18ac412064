#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing, a.k.a. seam carving.
//!
//! Shrinks an image's width by repeatedly finding and removing the
//! *seam* — a connected, monotonically-vertical, one-pixel-wide path —
//! of least visual importance, so that low-energy regions of the image
//! are cropped out before high-energy ones are ever touched. The
//! technique is Avidan & Shamir's "seam carving"; this crate implements
//! the core per-iteration pipeline:
//!
//! 1. a gradient-magnitude energy map, via a separable Sobel filter
//!    ([`energy`]);
//! 2. a dynamic-programming cumulative minimum path sum over that map
//!    ([`pathsum`]);
//! 3. a seam trace recovering the column index of the minimum-cost
//!    vertical path per row ([`seam`]);
//! 4. in-place seam removal, shrinking the working RGB, grayscale,
//!    energy, and pathsum buffers without reallocating
//!    ([`image_buffer::ImageBuffer::remove_seam`]);
//! 5. incremental recomputation of energy and pathsum, touching only
//!    the cells a removed seam could have invalidated.
//!
//! Image decode/encode, command-line argument parsing, and cycle-level
//! timing instrumentation are this crate's external collaborators, not
//! its concern; see `src/bin/pnmseam.rs` for the former two.

extern crate image;

/// The pixel and cell element types that flow through the pipeline.
pub mod pixel;

/// The generic logical-window-over-physical-allocation buffer that
/// every stage of the pipeline reads and writes.
pub mod image_buffer;

/// RGB-to-grayscale reduction.
pub mod grayscale;

/// The Sobel energy engine (full and partial recompute).
pub mod energy;

/// The cumulative-minimum-path-sum engine (full and partial recompute).
pub mod pathsum;

/// Seam tracing from a pathsum map.
pub mod seam;

/// The carving driver and its error type.
pub mod carve;

/// The core's error taxonomy.
pub mod error;

pub use carve::carve;
pub use error::CarveError;
pub use image_buffer::ImageBuffer;
pub use pixel::{EnVal, PixVal, RgbPixel};
