#[macro_use]
extern crate criterion;
extern crate mandelbrot;
extern crate num;

use criterion::{black_box, Criterion};
use mandelbrot::{Color, ColorMode, Fractal, Palette, RenderSpec, Renderer, Viewport};
use num::Complex;

/// A point inside the period-3 bulb: in the set, but not covered by
/// the cardioid/period-2 fast path, so the cap's worth of iterations
/// actually runs.
const RABBIT: (f64, f64) = (-0.122, 0.745);

fn escape_time_interior(c: &mut Criterion) {
    c.bench_function("escape_time interior orbit", |b| {
        let point = Complex::new(RABBIT.0, RABBIT.1);
        b.iter(|| Fractal::Mandelbrot.escape_time(black_box(point), None, 512, 4.0))
    });
}

fn escape_time_multibrot(c: &mut Criterion) {
    c.bench_function("escape_time multibrot power loop", |b| {
        let point = Complex::new(0.5, 0.5);
        let j = Some(Complex::new(0.0, 0.0));
        b.iter(|| Fractal::Multibrot(8).escape_time(black_box(point), j, 512, 4.0))
    });
}

fn full_frame(c: &mut Criterion) {
    c.bench_function("render 64x64 smooth frame", |b| {
        let spec = RenderSpec {
            viewport: Viewport::new(-0.5, 0.0, 3.0, 3.0, 64).unwrap(),
            fractal: Fractal::Mandelbrot,
            julia: None,
            imax: 256,
            radius: 2.0,
            mode: ColorMode::Smooth,
        };
        let palette = Palette::build(
            &[Color::new(0, 0, 0), Color::new(255, 255, 255)],
            Color::new(0, 0, 0),
        )
        .unwrap();
        let renderer = Renderer::new(&spec, &palette).unwrap();
        b.iter(|| {
            let mut bytes = 0usize;
            renderer.render(|_, _| {}, |r, g, b| bytes += r as usize + g as usize + b as usize);
            black_box(bytes)
        })
    });
}

criterion_group!(benches, escape_time_interior, escape_time_multibrot, full_frame);
criterion_main!(benches);
