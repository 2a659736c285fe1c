// ----------------------------------------------------------------------------
#[allow(dead_code)]
const DEFAULT_POLYGON_TARGET: u32 = 10_000;
// ----------------------------------------------------------------------------
/// tunables for one [`crate::engine::Engine`] instance.
///
/// Constructed in Rust by the host; there is no file format or wire
/// representation (config is not this core's concern, see spec §6).
#[derive(Clone)]
pub struct EngineConfig {
    /// power-of-two side length of the square domain.
    size: u32,
    /// soft triangle-count budget the quality controller tracks toward.
    target_polygon_count: u32,
    /// upper bound on simultaneous live triangles; should be at least 4x
    /// `target_polygon_count`.
    pool_capacity: u32,
    /// depth cap of the bintree / variance tree.
    max_levels: u8,
    /// multiplicative step applied to the quality constant each frame.
    quality_k: f32,
    /// fraction around the target polygon count left unadjusted.
    quality_dead_band: f32,
    /// fraction of `pool_capacity` above which splits are refused
    /// regardless of metric, so allocation failure never dominates a frame.
    pool_saturation_cutoff: f32,
    /// whether a frustum-culled subtree also skips vertex emission, or only
    /// skips refinement (see spec §8 scenario S4).
    cull_suppresses_output: bool,
}
// ----------------------------------------------------------------------------
impl EngineConfig {
    // ------------------------------------------------------------------------
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
    // ------------------------------------------------------------------------
    pub fn size(&self) -> u32 {
        self.size
    }
    // ------------------------------------------------------------------------
    pub fn target_polygon_count(&self) -> u32 {
        self.target_polygon_count
    }
    // ------------------------------------------------------------------------
    pub fn pool_capacity(&self) -> u32 {
        self.pool_capacity
    }
    // ------------------------------------------------------------------------
    pub fn max_levels(&self) -> u8 {
        self.max_levels
    }
    // ------------------------------------------------------------------------
    pub fn quality_k(&self) -> f32 {
        self.quality_k
    }
    // ------------------------------------------------------------------------
    pub fn quality_dead_band(&self) -> f32 {
        self.quality_dead_band
    }
    // ------------------------------------------------------------------------
    pub fn pool_saturation_cutoff(&self) -> f32 {
        self.pool_saturation_cutoff
    }
    // ------------------------------------------------------------------------
    pub fn cull_suppresses_output(&self) -> bool {
        self.cull_suppresses_output
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
/// derives a bintree depth cap from `size`: each halving of the domain on
/// both axes adds two bintree levels (the square first splits into the two
/// root triangles, then each halving of the remaining leg recurses once per
/// triangle, twice per grid halving).
fn default_max_levels(size: u32) -> u8 {
    assert!(size.is_power_of_two(), "size must be a power of two");
    (2 * size.trailing_zeros()) as u8
}
// ----------------------------------------------------------------------------
pub struct EngineConfigBuilder {
    size: u32,
    target_polygon_count: u32,
    pool_capacity: u32,
    max_levels: Option<u8>,
    quality_k: f32,
    quality_dead_band: f32,
    pool_saturation_cutoff: f32,
    cull_suppresses_output: bool,
}
// ----------------------------------------------------------------------------
impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            size: 64,
            target_polygon_count: DEFAULT_POLYGON_TARGET,
            pool_capacity: 4 * DEFAULT_POLYGON_TARGET,
            max_levels: None,
            quality_k: 0.05,
            quality_dead_band: 0.1,
            pool_saturation_cutoff: 0.9,
            cull_suppresses_output: true,
        }
    }
}
// ----------------------------------------------------------------------------
impl EngineConfigBuilder {
    // ------------------------------------------------------------------------
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
    // ------------------------------------------------------------------------
    pub fn target_polygon_count(mut self, target: u32) -> Self {
        self.target_polygon_count = target;
        self
    }
    // ------------------------------------------------------------------------
    pub fn pool_capacity(mut self, capacity: u32) -> Self {
        self.pool_capacity = capacity;
        self
    }
    // ------------------------------------------------------------------------
    pub fn max_levels(mut self, max_levels: u8) -> Self {
        self.max_levels = Some(max_levels);
        self
    }
    // ------------------------------------------------------------------------
    pub fn quality_k(mut self, k: f32) -> Self {
        self.quality_k = k;
        self
    }
    // ------------------------------------------------------------------------
    pub fn quality_dead_band(mut self, band: f32) -> Self {
        self.quality_dead_band = band;
        self
    }
    // ------------------------------------------------------------------------
    pub fn pool_saturation_cutoff(mut self, cutoff: f32) -> Self {
        self.pool_saturation_cutoff = cutoff;
        self
    }
    // ------------------------------------------------------------------------
    pub fn cull_suppresses_output(mut self, suppress: bool) -> Self {
        self.cull_suppresses_output = suppress;
        self
    }
    // ------------------------------------------------------------------------
    pub fn build(self) -> EngineConfig {
        assert!(self.size.is_power_of_two(), "size must be a power of two");
        EngineConfig {
            size: self.size,
            target_polygon_count: self.target_polygon_count,
            pool_capacity: self.pool_capacity,
            max_levels: self.max_levels.unwrap_or_else(|| default_max_levels(self.size)),
            quality_k: self.quality_k,
            quality_dead_band: self.quality_dead_band,
            pool_saturation_cutoff: self.pool_saturation_cutoff,
            cull_suppresses_output: self.cull_suppresses_output,
        }
    }
    // ------------------------------------------------------------------------
}
