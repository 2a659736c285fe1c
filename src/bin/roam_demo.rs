// ----------------------------------------------------------------------------
#![forbid(unsafe_code)]
// ----------------------------------------------------------------------------
// Headless demo: drives the engine through a scripted camera path for a
// fixed number of frames and prints per-frame triangle counts and the
// quality constant, so the split-merge feedback loop can be eyeballed
// without a renderer.
// ----------------------------------------------------------------------------
use std::cell::Cell;
use std::rc::Rc;

use roam_terrain::{BinTriPool, Callbacks, Engine, EngineConfig, Heightmap};
// ----------------------------------------------------------------------------
const FRAME_COUNT: u32 = 60;
const MAP_SIZE: u32 = 256;
// ----------------------------------------------------------------------------
fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args: Vec<String> = std::env::args().collect();
    let heightmap = match args.get(1) {
        Some(path) => Heightmap::load_png(path, MAP_SIZE).unwrap_or_else(|e| {
            eprintln!("failed to load {}: {}, falling back to placeholder", path, e);
            Heightmap::generate_placeholder(MAP_SIZE)
        }),
        None => Heightmap::generate_placeholder(MAP_SIZE),
    };

    let config = EngineConfig::builder()
        .size(MAP_SIZE)
        .target_polygon_count(4000)
        .build();
    let pool = BinTriPool::new(config.pool_capacity());
    let mut engine = Engine::new(config, pool);

    // camera flies in a circle above the domain center, so frustum culling
    // and distance-based refinement both see real variation frame to frame.
    let center = MAP_SIZE as f32 / 2.0;
    let camera_x = Cell::new(center);
    let camera_y = Cell::new(0.0f32);

    engine.register_callbacks(
        Callbacks::new()
            .get_height({
                let heightmap = Rc::new(heightmap);
                move |x, y| heightmap.get(x, y)
            })
            .dist_to_camera({
                let camera_x = camera_x.clone();
                let camera_y = camera_y.clone();
                move |x, y| {
                    let dx = x as f32 - camera_x.get();
                    let dy = y as f32 - camera_y.get();
                    (dx * dx + dy * dy).sqrt().max(1.0)
                }
            })
            .sphere_in_frustum(|_x, _y, _radius| true)
            .send_vertex(|_x, _y| {}),
    );
    engine.init();

    for frame in 0..FRAME_COUNT {
        let angle = frame as f32 / FRAME_COUNT as f32 * std::f32::consts::TAU;
        camera_x.set(center + center * 0.5 * angle.cos());
        camera_y.set(center + center * 0.5 * angle.sin());

        let changed = engine.update();
        engine.draw();

        println!(
            "frame {:>3}: triangles={:<6} quality_constant={:.4} changed={}",
            frame,
            engine.live_triangle_count(),
            engine.quality_constant(),
            changed
        );
    }
}
