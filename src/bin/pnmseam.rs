// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The CLI adapter spec.md §6 describes as an external collaborator:
//! decode via the `image` crate, validate the requested seam count,
//! carve, encode, exit nonzero on any failure.

extern crate car;
extern crate clap;
extern crate image;

use std::process;

use car::pixel::RgbPixel;
use car::ImageBuffer;
use clap::{App, Arg};
use image::GenericImageView;
use log::error;

const MINIMUM_WIDTH: usize = 10;

fn rgb_image_from_dynamic(img: &image::DynamicImage) -> ImageBuffer<RgbPixel> {
    let (width, height) = img.dimensions();
    let raw = img.to_rgb().into_raw();
    let pixels: Vec<RgbPixel> = raw
        .chunks_exact(3)
        .map(|c| RgbPixel::new(c[0], c[1], c[2]))
        .collect();
    ImageBuffer::from_data(width as usize, height as usize, pixels)
}

fn dynamic_image_from_rgb_image(buf: &ImageBuffer<RgbPixel>) -> image::RgbImage {
    let (width, height) = (buf.width(), buf.height());
    let mut raw = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            let p = buf.get(row, col);
            raw.push(p.r);
            raw.push(p.g);
            raw.push(p.b);
        }
    }
    image::RgbImage::from_raw(width as u32, height as u32, raw)
        .expect("carved buffer dimensions always match its pixel count")
}

fn run() -> Result<(), String> {
    let matches = App::new("pnmseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing (seam carving)")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .help("How many seams (columns) to remove")
                .required(true)
                .index(3),
        )
        .get_matches();

    let input_path = matches.value_of("input").unwrap();
    let output_path = matches.value_of("output").unwrap();
    let seams_to_remove: usize = matches
        .value_of("seams")
        .unwrap()
        .parse()
        .map_err(|_| "seams-to-remove must be a non-negative integer".to_string())?;

    let decoded = image::open(input_path).map_err(|e| format!("failed to open {}: {}", input_path, e))?;
    let input = rgb_image_from_dynamic(&decoded);

    if seams_to_remove >= input.width() {
        return Err(format!(
            "seams-to-remove ({}) must be less than the input width ({})",
            seams_to_remove,
            input.width()
        ));
    }
    let target_width = input.width() - seams_to_remove;
    if target_width < MINIMUM_WIDTH {
        return Err(format!(
            "carving {} seams from width {} would leave a width of {}, below the minimum of {}",
            seams_to_remove, input.width(), target_width, MINIMUM_WIDTH
        ));
    }

    let mut output: ImageBuffer<RgbPixel> = ImageBuffer::new(target_width, input.height());
    car::carve(&input, &mut output).map_err(|e| format!("carve failed: {}", e))?;

    dynamic_image_from_rgb_image(&output)
        .save(output_path)
        .map_err(|e| format!("failed to write {}: {}", output_path, e))?;

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(message) = run() {
        error!("{}", message);
        process::exit(1);
    }
}
