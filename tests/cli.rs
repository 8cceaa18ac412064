// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end tests against the `pnmseam` binary: write an image to a
//! temp file, invoke the CLI, check its exit status and the decoded
//! result. Grounded on `lovasoa-seamcarving/tests/resize.rs`'s
//! fixture style, run through `assert_cmd` instead of calling the
//! library directly.

use assert_cmd::Command;
use image::GenericImageView;
use predicates::str::contains;
use tempfile::tempdir;

fn write_checkerboard(path: &std::path::Path, width: u32, height: u32) {
    let mut img = image::RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let v = ((x * 37 + y * 19) % 251) as u8;
        *pixel = image::Rgb([v, v.wrapping_add(61), v.wrapping_add(131)]);
    }
    img.save(path).unwrap();
}

#[test]
fn carves_and_writes_a_smaller_image() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.png");
    let output_path = dir.path().join("output.png");
    write_checkerboard(&input_path, 20, 15);

    Command::cargo_bin("pnmseam")
        .unwrap()
        .arg(&input_path)
        .arg(&output_path)
        .arg("5")
        .assert()
        .success();

    let out = image::open(&output_path).unwrap();
    assert_eq!(out.dimensions(), (15, 15));
}

#[test]
fn rejects_seam_count_that_would_go_below_the_minimum_width() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.png");
    let output_path = dir.path().join("output.png");
    write_checkerboard(&input_path, 12, 6);

    Command::cargo_bin("pnmseam")
        .unwrap()
        .env("RUST_LOG", "error")
        .arg(&input_path)
        .arg(&output_path)
        .arg("4")
        .assert()
        .failure()
        .stderr(contains("below the minimum"));
}

#[test]
fn rejects_a_nonexistent_input_file() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output.png");

    Command::cargo_bin("pnmseam")
        .unwrap()
        .arg(dir.path().join("does-not-exist.png"))
        .arg(&output_path)
        .arg("1")
        .assert()
        .failure();
}
