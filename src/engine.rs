// ----------------------------------------------------------------------------
// Top-level entry point: owns the pool, the mesh, the precomputed tables, the
// registered callbacks, and the quality constant. Mirrors the original
// `SplitMergeROAM` class's `Init` / `Update` / `Draw` surface.
// ----------------------------------------------------------------------------
use tracing::{debug, info, warn};

use crate::callbacks::Callbacks;
use crate::config::EngineConfig;
use crate::hypo::HypotenuseLengthTable;
use crate::mesh::MeshState;
use crate::pool::BinTriPool;
use crate::splitmerge::recurse_tesselate;
use crate::variance::VarianceTree;
// ----------------------------------------------------------------------------
pub struct Engine {
    config: EngineConfig,
    pool: BinTriPool,
    callbacks: Callbacks,

    mesh: Option<MeshState>,
    variance: Option<VarianceTree>,
    hypo: Option<HypotenuseLengthTable>,

    quality_constant: f32,
    initialized: bool,
}
// ----------------------------------------------------------------------------
impl Engine {
    // ------------------------------------------------------------------------
    /// `pool` is host-constructed so callers can size and own the arena
    /// themselves; capacity should be at least 4x `target_polygon_count` to
    /// give the Quality Controller room to track the budget before the
    /// saturation cutoff kicks in (see [`crate::quality::adjust`]).
    pub fn new(config: EngineConfig, pool: BinTriPool) -> Self {
        Self {
            config,
            pool,
            callbacks: Callbacks::new(),
            mesh: None,
            variance: None,
            hypo: None,
            quality_constant: 1.0,
            initialized: false,
        }
    }
    // ------------------------------------------------------------------------
    pub fn register_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }
    // ------------------------------------------------------------------------
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    // ------------------------------------------------------------------------
    pub fn quality_constant(&self) -> f32 {
        self.quality_constant
    }
    // ------------------------------------------------------------------------
    /// triangle count proxy the Quality Controller tracks; exposed for
    /// demo/diagnostic use.
    pub fn live_triangle_count(&self) -> u32 {
        self.pool.next() - self.pool.free_count()
    }
    // ------------------------------------------------------------------------
    /// (re)builds the two roots and the variance tree from the currently
    /// registered `get_height` callback. Idempotent: calling it again resets
    /// the mesh to the two flat roots and recomputes variance, e.g. after
    /// loading a new heightmap.
    ///
    /// # Panics
    /// if callbacks are not fully registered, or `config().size()` is not a
    /// power of two (the builder already asserts the latter, so this can only
    /// trip a hand-built `EngineConfig`).
    pub fn init(&mut self) {
        assert!(
            self.callbacks.is_complete(),
            "Engine::init called before all four callbacks were registered"
        );
        assert!(self.config.size().is_power_of_two(), "size must be a power of two");

        self.pool.reset();
        let mesh = MeshState::build(&mut self.pool, self.config.size());

        let nw = {
            let tri = self.pool.get(mesh.nw_root);
            (tri.v0, tri.v1, tri.va)
        };
        let se = {
            let tri = self.pool.get(mesh.se_root);
            (tri.v0, tri.v1, tri.va)
        };
        let variance = VarianceTree::build(&self.config, nw, se, &mut |x, y| self.callbacks.call_get_height(x, y));
        let hypo = HypotenuseLengthTable::build(self.config.size(), self.config.max_levels());

        self.mesh = Some(mesh);
        self.variance = Some(variance);
        self.hypo = Some(hypo);
        self.quality_constant = 1.0;
        self.initialized = true;

        info!(size = self.config.size(), max_levels = self.config.max_levels(), "engine initialized");
    }
    // ------------------------------------------------------------------------
    /// one refinement pass over both roots plus a single quality-constant
    /// adjustment. Returns whether any split or merge occurred anywhere in
    /// the mesh.
    ///
    /// # Panics
    /// if called before [`Engine::init`].
    pub fn update(&mut self) -> bool {
        assert!(self.initialized, "Engine::update called before init");

        let mesh = self.mesh.as_ref().expect("initialized implies mesh is set");
        let variance = self.variance.as_ref().expect("initialized implies variance is set");
        let hypo = self.hypo.as_ref().expect("initialized implies hypo is set");
        let roots = mesh.roots();
        let max_levels = self.config.max_levels();
        let quality_constant = self.quality_constant;
        let cutoff = self.config.pool_saturation_cutoff();

        let mut changed = false;
        for root in roots {
            changed |= recurse_tesselate(
                &mut self.pool,
                variance,
                hypo,
                &mut self.callbacks,
                max_levels,
                quality_constant,
                cutoff,
                root,
                false,
            );
        }

        let live = self.pool.next();
        let saturated = self.pool.is_saturated(cutoff);
        self.quality_constant = crate::quality::adjust(self.quality_constant, live, saturated, &self.config);

        if saturated {
            warn!(live = self.live_triangle_count(), capacity = self.pool.capacity(), "pool nearing saturation");
        }

        debug!(changed, quality_constant = self.quality_constant, live = self.live_triangle_count(), "update pass complete");
        changed
    }
    // ------------------------------------------------------------------------
    /// pre-order traversal of every leaf, emitting its three vertices via the
    /// registered `send_vertex` callback. If `cull_suppresses_output` is set,
    /// a subtree failing the frustum test is skipped entirely rather than
    /// just having its refinement frozen.
    ///
    /// # Panics
    /// if called before [`Engine::init`].
    pub fn draw(&mut self) {
        assert!(self.initialized, "Engine::draw called before init");
        let mesh = self.mesh.as_ref().expect("initialized implies mesh is set");
        let hypo = self.hypo.as_ref().expect("initialized implies hypo is set");
        let cull_suppresses = self.config.cull_suppresses_output();

        for root in mesh.roots() {
            draw_recurse(&mut self.pool, hypo, &mut self.callbacks, cull_suppresses, root);
        }
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
fn draw_recurse(
    pool: &mut BinTriPool,
    hypo: &HypotenuseLengthTable,
    callbacks: &mut Callbacks,
    cull_suppresses: bool,
    id: crate::node_id::NodeId,
) {
    if cull_suppresses {
        let tri = pool.get(id);
        let center = tri.center();
        let radius = hypo.get(tri.level) * 0.5;
        if !callbacks.call_sphere_in_frustum(center.x as f32, center.y as f32, radius) {
            return;
        }
    }

    let tri = pool.get(id).clone();
    if tri.is_leaf() {
        callbacks.call_send_vertex(tri.va.x, tri.va.y);
        callbacks.call_send_vertex(tri.v0.x, tri.v0.y);
        callbacks.call_send_vertex(tri.v1.x, tri.v1.y);
    } else {
        draw_recurse(pool, hypo, callbacks, cull_suppresses, tri.left_child.unwrap());
        draw_recurse(pool, hypo, callbacks, cull_suppresses, tri.right_child.unwrap());
    }
}
