// ----------------------------------------------------------------------------
// The current triangulation: two root triangles covering the NW/SE halves
// of the square domain, plus all their descendants, woven together by
// parent/child pointers and base/left/right neighbor pointers threaded
// through the BinTri Pool.
// ----------------------------------------------------------------------------
use glam::ivec2;

use crate::node_id::NodeId;
use crate::pool::{BinTriPool, Root};
// ----------------------------------------------------------------------------
pub struct MeshState {
    pub nw_root: NodeId,
    pub se_root: NodeId,
}
// ----------------------------------------------------------------------------
impl MeshState {
    // ------------------------------------------------------------------------
    /// allocates the two root triangles from `pool` and wires them as each
    /// other's base neighbor. `pool` must be freshly reset.
    pub fn build(pool: &mut BinTriPool, size: u32) -> Self {
        let s = size as i32;

        let nw_root = pool.alloc().expect("fresh pool must have room for both roots");
        let se_root = pool.alloc().expect("fresh pool must have room for both roots");

        {
            let nw = pool.get_mut(nw_root);
            nw.v0 = ivec2(0, 0);
            nw.v1 = ivec2(s, s);
            nw.va = ivec2(0, s);
            nw.level = 0;
            nw.number = 1;
            nw.root = Root::Nw;
            nw.base_neighbor = Some(se_root);
        }
        {
            let se = pool.get_mut(se_root);
            se.v0 = ivec2(s, s);
            se.v1 = ivec2(0, 0);
            se.va = ivec2(s, 0);
            se.level = 0;
            se.number = 1;
            se.root = Root::Se;
            se.base_neighbor = Some(nw_root);
        }

        Self { nw_root, se_root }
    }
    // ------------------------------------------------------------------------
    /// the two roots in the fixed processing order the spec requires
    /// (NW before SE).
    pub fn roots(&self) -> [NodeId; 2] {
        [self.nw_root, self.se_root]
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    // ------------------------------------------------------------------------
    #[test]
    fn roots_are_reciprocal_base_neighbors() {
        let mut pool = BinTriPool::new(8);
        let mesh = MeshState::build(&mut pool, 64);
        assert_eq!(pool.get(mesh.nw_root).base_neighbor, Some(mesh.se_root));
        assert_eq!(pool.get(mesh.se_root).base_neighbor, Some(mesh.nw_root));
    }
    // ------------------------------------------------------------------------
    #[test]
    fn roots_tile_the_domain_with_no_other_neighbors() {
        let mut pool = BinTriPool::new(8);
        let mesh = MeshState::build(&mut pool, 64);
        for root in mesh.roots() {
            let tri = pool.get(root);
            assert!(tri.left_neighbor.is_none());
            assert!(tri.right_neighbor.is_none());
            assert!(tri.parent.is_none());
            assert!(tri.is_leaf());
        }
    }
    // ------------------------------------------------------------------------
}
