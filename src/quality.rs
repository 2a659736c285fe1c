// ----------------------------------------------------------------------------
// Quality Controller: a multiplicative scalar feedback loop that steers the
// live triangle count toward `target_polygon_count` without ever measuring
// anything more expensive than the pool's own high-water mark.
// ----------------------------------------------------------------------------
use tracing::debug;

use crate::config::EngineConfig;
// ----------------------------------------------------------------------------
/// adjusts `quality_constant` by one multiplicative step based on `live`, the
/// current triangle count proxy (`pool.next()`). Outside the dead band around
/// `target_polygon_count`, nudges the constant up (fewer splits allowed,
/// coarser mesh) or down (more splits allowed, finer mesh) by `quality_k`.
///
/// `saturated` reports that the pool itself is out of room regardless of
/// `target_polygon_count` (e.g. a `pool_capacity` set below the target). In
/// that case `live` being "under budget" is meaningless -- the mesh can't
/// grow any further no matter what the target says -- so saturation always
/// raises the constant, even overriding what the dead-band comparison alone
/// would have decided.
pub fn adjust(quality_constant: f32, live: u32, saturated: bool, config: &EngineConfig) -> f32 {
    let target = config.target_polygon_count() as f32;
    let band = config.quality_dead_band();
    let lower = target * (1.0 - band);
    let upper = target * (1.0 + band);
    let live_f = live as f32;

    let next = if saturated || live_f > upper {
        quality_constant * (1.0 + config.quality_k())
    } else if live_f < lower {
        quality_constant * (1.0 - config.quality_k())
    } else {
        quality_constant
    };

    debug!(live, target, saturated, quality_constant = next, "quality constant adjusted");
    next.max(f32::EPSILON)
}
