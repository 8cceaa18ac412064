// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use car::pixel::RgbPixel;
use car::ImageBuffer;

fn checkerboard(width: usize, height: usize) -> ImageBuffer<RgbPixel> {
    let mut buf: ImageBuffer<RgbPixel> = ImageBuffer::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let v = ((row * 37 + col * 19) % 251) as u8;
            buf.set(row, col, RgbPixel::new(v, v.wrapping_add(61), v.wrapping_add(131)));
        }
    }
    buf
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("100x100 carve to 95x100", |b| {
        let input = black_box(checkerboard(100, 100));
        b.iter(|| {
            let mut output: ImageBuffer<RgbPixel> = ImageBuffer::new(95, 100);
            car::carve(&input, &mut output).unwrap();
        })
    });

    c.bench_function("100x100 carve to 50x100", |b| {
        let input = black_box(checkerboard(100, 100));
        b.iter(|| {
            let mut output: ImageBuffer<RgbPixel> = ImageBuffer::new(50, 100);
            car::carve(&input, &mut output).unwrap();
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
                .sample_size(20)
                .warm_up_time(Duration::from_secs(1));
    targets = criterion_benchmark
}

criterion_main!(benches);
