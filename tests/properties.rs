// ----------------------------------------------------------------------------
// Property tests against the public `Engine` surface, driving randomized
// heightmaps and randomized camera paths and checking the structural
// invariants of spec §8 from the vertex stream `draw()` emits -- the only
// view of the mesh available outside the crate.
//
// Two invariants fall naturally out of one check on that vertex stream:
// summing signed-doubled-triangle-area over every emitted leaf recovers the
// tiling invariant (no gaps/overlaps), and counting how many triangles claim
// each edge recovers the no-T-junction / neighbor-symmetry invariant (every
// interior edge must be claimed by exactly two triangles; a T-junction would
// instead leave the coarse side's full edge claimed by only one).
// ----------------------------------------------------------------------------
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;
use roam_terrain::{BinTriPool, Callbacks, Engine, EngineConfig};
// ----------------------------------------------------------------------------
const SIZE: u32 = 16;
// ----------------------------------------------------------------------------
fn heightmap_strategy(size: u32) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), (size * size) as usize)
}
// ----------------------------------------------------------------------------
fn camera_path_strategy(frames: usize, size: u32) -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((0..size as i32, 0..size as i32).prop_map(|(x, y)| (x as f32, y as f32)), frames)
}
// ----------------------------------------------------------------------------
/// asserts the tiling and no-T-junction invariants against one frame's
/// `draw()` output. Panics (failing the proptest case, and letting proptest
/// shrink it) on violation.
fn assert_tiles_with_no_t_junctions(vertices: &[(i32, i32)], size: u32) {
    assert_eq!(vertices.len() % 3, 0, "draw() must emit whole triangles");

    let mut doubled_area_sum: i64 = 0;
    let mut edge_counts: HashMap<((i32, i32), (i32, i32)), u32> = HashMap::new();

    for tri in vertices.chunks(3) {
        let (ax, ay) = tri[0];
        let (bx, by) = tri[1];
        let (cx, cy) = tri[2];

        let area2 = (bx - ax) as i64 * (cy - ay) as i64 - (cx - ax) as i64 * (by - ay) as i64;
        doubled_area_sum += area2.abs();

        for &(p, q) in &[((ax, ay), (bx, by)), ((bx, by), (cx, cy)), ((cx, cy), (ax, ay))] {
            let key = if p <= q { (p, q) } else { (q, p) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    assert_eq!(
        doubled_area_sum,
        2 * (size as i64) * (size as i64),
        "leaf triangles must exactly tile the domain"
    );

    for (((px, py), (qx, qy)), count) in &edge_counts {
        let on_boundary = (*px == *qx && (*px == 0 || *px == size as i32)) || (*py == *qy && (*py == 0 || *py == size as i32));
        if on_boundary {
            assert_eq!(*count, 1, "domain-boundary edge ({},{})-({},{}) must be unshared", px, py, qx, qy);
        } else {
            assert_eq!(
                *count, 2,
                "interior edge ({},{})-({},{}) must be shared by exactly two triangles (no T-junction)",
                px, py, qx, qy
            );
        }
    }
}
// ----------------------------------------------------------------------------
fn engine_for_heights(heights: Vec<u8>, vertices: Rc<RefCell<Vec<(i32, i32)>>>, camera: Rc<RefCell<(f32, f32)>>) -> Engine {
    let config = EngineConfig::builder()
        .size(SIZE)
        .target_polygon_count(64)
        .pool_capacity(4096)
        .cull_suppresses_output(false)
        .build();
    let pool = BinTriPool::new(config.pool_capacity());
    let mut engine = Engine::new(config, pool);

    let heights = Rc::new(heights);
    engine.register_callbacks(
        Callbacks::new()
            .get_height({
                let heights = heights.clone();
                move |x, y| {
                    let x = x.clamp(0, SIZE as i32 - 1) as u32;
                    let y = y.clamp(0, SIZE as i32 - 1) as u32;
                    heights[(y * SIZE + x) as usize]
                }
            })
            .dist_to_camera({
                let camera = camera.clone();
                move |x, y| {
                    let (cx, cy) = *camera.borrow();
                    let dx = x as f32 - cx;
                    let dy = y as f32 - cy;
                    (dx * dx + dy * dy).sqrt().max(1.0)
                }
            })
            .sphere_in_frustum(|_, _, _| true)
            .send_vertex({
                let vertices = vertices.clone();
                move |x, y| vertices.borrow_mut().push((x, y))
            }),
    );
    engine.init();
    engine
}
// ----------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    /// invariants 1 (tiling) and 2/3 (no T-junctions / neighbor symmetry),
    /// observed through `draw()` after each of several randomized
    /// split/merge passes over a randomized heightmap and camera path.
    #[test]
    fn mesh_tiles_and_stays_crack_free(heights in heightmap_strategy(SIZE), camera_path in camera_path_strategy(6, SIZE)) {
        let vertices = Rc::new(RefCell::new(Vec::new()));
        let camera = Rc::new(RefCell::new((0.0f32, 0.0f32)));
        let mut engine = engine_for_heights(heights, vertices.clone(), camera.clone());

        for &(cx, cy) in &camera_path {
            *camera.borrow_mut() = (cx, cy);
            engine.update();
            vertices.borrow_mut().clear();
            engine.draw();
            assert_tiles_with_no_t_junctions(&vertices.borrow(), SIZE);
        }
    }

    /// S6: moving the camera far away from any mesh state collapses the
    /// triangulation back to the two roots within a bounded number of
    /// `update` calls.
    #[test]
    fn distant_camera_collapses_to_two_roots(heights in heightmap_strategy(SIZE)) {
        let vertices = Rc::new(RefCell::new(Vec::new()));
        let camera = Rc::new(RefCell::new((SIZE as f32 / 2.0, SIZE as f32 / 2.0)));
        let mut engine = engine_for_heights(heights, vertices.clone(), camera.clone());

        for _ in 0..8 {
            engine.update();
        }

        *camera.borrow_mut() = (1.0e6, 1.0e6);
        for _ in 0..64 {
            engine.update();
        }

        prop_assert_eq!(engine.live_triangle_count(), 2);
    }
}
// ----------------------------------------------------------------------------
/// invariant 6: over many consecutive frames with a static camera, the
/// average live-triangle count converges to within the configured dead band
/// of `target_polygon_count`. Deterministic (fixed seed) rather than a
/// property test, since convergence needs many frames per case and a single
/// representative heightmap is enough to exercise the feedback loop.
#[test]
fn quality_constant_tracks_triangle_budget_over_time() {
    use rand::{Rng, SeedableRng};

    let mut rng = rand::rngs::StdRng::seed_from_u64(0xC0FFEE);
    let heights: Vec<u8> = (0..(SIZE * SIZE)).map(|_| rng.gen()).collect();

    let vertices = Rc::new(RefCell::new(Vec::new()));
    let camera = Rc::new(RefCell::new((SIZE as f32 / 2.0, SIZE as f32 / 2.0)));
    let mut engine = engine_for_heights(heights, vertices, camera);

    const WARMUP: usize = 40;
    const SAMPLE: usize = 40;
    let mut total: u64 = 0;

    for frame in 0..(WARMUP + SAMPLE) {
        engine.update();
        if frame >= WARMUP {
            total += engine.live_triangle_count() as u64;
        }
    }

    let target = engine.config().target_polygon_count() as f64;
    let average = total as f64 / SAMPLE as f64;
    let band = engine.config().quality_dead_band() as f64;

    assert!(
        average >= target * (1.0 - 2.0 * band) && average <= target * (1.0 + 2.0 * band),
        "average live triangle count {} did not converge near target {}",
        average,
        target
    );
}
// ----------------------------------------------------------------------------
