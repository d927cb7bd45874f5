//! Frame a synthetic outlier-corrupted cloud and print what the viewer
//! would show.

use anyhow::Result;
use cloudframe_core::{Point3f, PointCloud3f};
use cloudframe_framing::{FramingConfig, ViewSession};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    env_logger::init();

    // 10k points in a unit sphere plus a far-flung outlier cluster, the
    // kind of input a noisy scanner produces
    let mut rng = StdRng::seed_from_u64(42);
    let mut points = Vec::with_capacity(10_100);
    while points.len() < 10_000 {
        let p = Point3f::new(
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.coords.norm() <= 1.0 {
            points.push(p);
        }
    }
    for i in 0..100 {
        points.push(Point3f::new(1000.0 + i as f32 * 0.01, 0.0, 0.0));
    }

    let mut session = ViewSession::new(FramingConfig::default())?;
    let model = session.load(PointCloud3f::from_points(points), false)?;

    let framing = &model.framing;
    println!("points:            {}", model.cloud.len());
    println!(
        "full max dim:      {:.2}",
        framing.full_bounds.max_dimension()
    );
    println!(
        "effective max dim: {:.2}",
        framing.effective_bounds.max_dimension()
    );
    println!("inclusion:         {:.1}%", framing.inclusion * 100.0);
    println!("sphere radius:     {:.3}", framing.sphere.radius);
    println!(
        "axis:              {:?} (confidence {:.1})",
        framing.axis.direction, framing.axis.confidence
    );
    println!(
        "scale:             target {:.2}, factor {:.4}",
        framing.scale.target_size, framing.scale.factor
    );
    println!(
        "camera:            distance {:.2}, near {:.4}, far {:.2}",
        framing.camera.distance, framing.camera.near, framing.camera.far
    );
    for notice in &framing.notices {
        println!("notice:            {:?}", notice);
    }

    Ok(())
}
