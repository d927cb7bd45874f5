//! Compare normal and fast-load framing on the same cloud.

use anyhow::Result;
use cloudframe_core::Point3f;
use cloudframe_framing::{FramingConfig, FramingPipeline, ModelFraming};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn summarize(label: &str, framing: &ModelFraming, elapsed: std::time::Duration) {
    println!(
        "{:>7}: effective max dim {:.2}, radius {:.3}, axis confidence {:.1}, {:?}",
        label,
        framing.effective_bounds.max_dimension(),
        framing.sphere.radius,
        framing.axis.confidence,
        elapsed
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut points: Vec<Point3f> = (0..600_000)
        .map(|_| {
            Point3f::new(
                rng.gen_range(-5.0f32..5.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();
    // sensor noise far off to one side
    for i in 0..500 {
        points.push(Point3f::new(2000.0 + i as f32, 0.0, 0.0));
    }

    let normal = FramingPipeline::new(FramingConfig::default())?;
    let start = Instant::now();
    let precise = normal.frame(&points)?;
    summarize("normal", &precise, start.elapsed());

    let fast = FramingPipeline::new(FramingConfig {
        fast_mode: true,
        ..Default::default()
    })?;
    let start = Instant::now();
    let quick = fast.frame(&points)?;
    summarize("fast", &quick, start.elapsed());

    println!(
        "fast mode keeps the outliers: full box spans {:.0} vs trimmed {:.1}",
        quick.effective_bounds.max_dimension(),
        precise.effective_bounds.max_dimension()
    );

    Ok(())
}
