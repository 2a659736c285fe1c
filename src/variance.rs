// ----------------------------------------------------------------------------
// Precomputed, read-only-after-init upper bound on vertical error per
// possible triangle the recursive bisection can produce.
//
// Stored as two implicit binary heaps indexed by the triangle's `number`:
// root triangles start at `number = 1`, and splitting triangle `n` produces
// children `2*n` and `2*n + 1`. The max-propagation property (a node's
// variance is the max of its own local error and both children's variance)
// is what makes the stored value a valid upper bound for *any* descendant
// rendered flat, not just this triangle's own midpoint error.
//
// The NW and SE root triangles each number their own triangles independently
// starting at `number = 1`, so `number` alone does not identify a slot --
// every lookup and every build pass is additionally keyed by which root the
// triangle descends from, via [`Root`].
// ----------------------------------------------------------------------------
use glam::IVec2;

use crate::config::EngineConfig;
use crate::pool::Root;
// ----------------------------------------------------------------------------
pub struct VarianceTree {
    // indexed directly by `number`; slot 0 is unused (numbering starts at 1).
    // kept as two separate arrays, one per root, rather than one array the
    // two roots would otherwise collide in at identical `number`s.
    nw_variance: Vec<u8>,
    se_variance: Vec<u8>,
    max_level: u8,
}
// ----------------------------------------------------------------------------
impl VarianceTree {
    // ------------------------------------------------------------------------
    /// builds the tree from scratch by recursively bisecting both root
    /// triangles. `get_height` samples the heightmap at integer grid
    /// coordinates and must be in range for every point this recursion
    /// visits -- guaranteed by induction from the two root triangles, which
    /// span the full `[0, size]` domain.
    pub fn build(
        config: &EngineConfig,
        nw_root: (IVec2, IVec2, IVec2),
        se_root: (IVec2, IVec2, IVec2),
        get_height: &mut dyn FnMut(i32, i32) -> u8,
    ) -> Self {
        let max_level = config.max_levels();
        let node_count = 1usize << (max_level as u32 + 1);

        let mut tree = Self {
            nw_variance: vec![0u8; node_count],
            se_variance: vec![0u8; node_count],
            max_level,
        };

        tree.compute_variance(Root::Nw, 1, nw_root.0, nw_root.1, nw_root.2, 0, get_height);
        tree.compute_variance(Root::Se, 1, se_root.0, se_root.1, se_root.2, 0, get_height);

        tree
    }
    // ------------------------------------------------------------------------
    pub fn variance_of(&self, root: Root, number: u32) -> u8 {
        match root {
            Root::Nw => self.nw_variance[number as usize],
            Root::Se => self.se_variance[number as usize],
        }
    }
    // ------------------------------------------------------------------------
    pub fn max_level(&self) -> u8 {
        self.max_level
    }
    // ------------------------------------------------------------------------
    fn compute_variance(
        &mut self,
        root: Root,
        number: u32,
        v0: IVec2,
        v1: IVec2,
        va: IVec2,
        level: u8,
        get_height: &mut dyn FnMut(i32, i32) -> u8,
    ) -> u8 {
        let m = (v0 + v1) / 2;

        let local_variance = if v0 == v1 {
            // degenerate: reached single-pixel resolution.
            0
        } else {
            let h0 = get_height(v0.x, v0.y) as i32;
            let h1 = get_height(v1.x, v1.y) as i32;
            let h_mid_interp = (h0 + h1) / 2;
            let h_mid = get_height(m.x, m.y) as i32;
            (h_mid - h_mid_interp).unsigned_abs().min(u8::MAX as u32) as u8
        };

        let variance = if level < self.max_level {
            let left = self.compute_variance(root, 2 * number, va, v0, m, level + 1, get_height);
            let right = self.compute_variance(root, 2 * number + 1, v1, va, m, level + 1, get_height);
            local_variance.max(left).max(right)
        } else {
            local_variance
        };

        match root {
            Root::Nw => self.nw_variance[number as usize] = variance,
            Root::Se => self.se_variance[number as usize] = variance,
        }
        variance
    }
    // ------------------------------------------------------------------------
}
