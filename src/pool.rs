// ----------------------------------------------------------------------------
// Fixed-capacity arena for BinTri nodes.
//
// Per-frame split/merge churn is high; a general-purpose allocator would
// dominate the frame. A single contiguous block handed out as stable
// `NodeId` handles keeps neighbor pointers valid across many splits and lets
// the whole forest be reset in O(1).
// ----------------------------------------------------------------------------
use bitflags::bitflags;
use glam::IVec2;

use crate::node_id::NodeId;
// ----------------------------------------------------------------------------
bitflags! {
    /// Traversal-marking bitset, reserved for the output/quality passes.
    #[derive(Default)]
    pub struct TriFlags: u8 {
        /// set while a leaf has already been visited in the current pass.
        const VISITED = 0b0000_0001;
        /// set while this subtree is known to be entirely inside the frustum,
        /// so descendants can skip the bounding-sphere test.
        const ENTIRELY_IN_FRUSTUM = 0b0000_0010;
    }
}
// ----------------------------------------------------------------------------
/// which of the two domain-spanning root triangles a node descends from.
///
/// Both roots number their own triangles independently, each starting at
/// `number = 1` and doubling per level, so `number` alone cannot identify a
/// variance-tree slot -- `(root, number)` together can. Set once when a node
/// is built (root construction or split) and inherited unchanged by both
/// children on every subsequent split.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Root {
    Nw,
    Se,
}
// ----------------------------------------------------------------------------
impl Default for Root {
    fn default() -> Self {
        Root::Nw
    }
}
// ----------------------------------------------------------------------------
/// One right-isoceles triangle in the bintree. `v0 -> v1` is the hypotenuse,
/// `va` the apex.
#[derive(Clone)]
pub struct BinTri {
    pub v0: IVec2,
    pub v1: IVec2,
    pub va: IVec2,

    pub level: u8,
    /// implicit-heap index of this triangle's slot in the variance tree.
    pub number: u32,
    /// which root triangle this node descends from; see [`Root`].
    pub root: Root,

    pub parent: Option<NodeId>,
    pub left_child: Option<NodeId>,
    pub right_child: Option<NodeId>,

    pub base_neighbor: Option<NodeId>,
    pub left_neighbor: Option<NodeId>,
    pub right_neighbor: Option<NodeId>,

    pub flags: TriFlags,

    // free-list link; meaningless (and not cleared) while the node is live.
    free_link: Option<NodeId>,
}
// ----------------------------------------------------------------------------
impl Default for BinTri {
    fn default() -> Self {
        Self {
            v0: IVec2::ZERO,
            v1: IVec2::ZERO,
            va: IVec2::ZERO,
            level: 0,
            number: 0,
            root: Root::default(),
            parent: None,
            left_child: None,
            right_child: None,
            base_neighbor: None,
            left_neighbor: None,
            right_neighbor: None,
            flags: TriFlags::empty(),
            free_link: None,
        }
    }
}
// ----------------------------------------------------------------------------
impl BinTri {
    // ------------------------------------------------------------------------
    #[inline]
    pub fn is_leaf(&self) -> bool {
        debug_assert_eq!(self.left_child.is_some(), self.right_child.is_some());
        self.left_child.is_none()
    }
    // ------------------------------------------------------------------------
    /// grid-space center of the triangle, used as the distance-to-camera
    /// query point.
    #[inline]
    pub fn center(&self) -> IVec2 {
        (self.v0 + self.v1 + self.va) / 3
    }
    // ------------------------------------------------------------------------
    /// midpoint of the hypotenuse; also the new apex vertex on split.
    #[inline]
    pub fn hypotenuse_mid(&self) -> IVec2 {
        (self.v0 + self.v1) / 2
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
/// Fixed-capacity backing store; sole owner of every `BinTri`.
pub struct BinTriPool {
    nodes: Vec<BinTri>,
    capacity: u32,
    next: u32,
    free_list: Option<NodeId>,
    free_count: u32,
}
// ----------------------------------------------------------------------------
impl BinTriPool {
    // ------------------------------------------------------------------------
    pub fn new(capacity: u32) -> Self {
        Self {
            nodes: vec![BinTri::default(); capacity as usize],
            capacity,
            next: 0,
            free_list: None,
            free_count: 0,
        }
    }
    // ------------------------------------------------------------------------
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
    // ------------------------------------------------------------------------
    /// high-water index of ever-allocated slots; proportional to the live
    /// triangle count the Quality Controller tracks against its budget.
    pub fn next(&self) -> u32 {
        self.next
    }
    // ------------------------------------------------------------------------
    pub fn free_count(&self) -> u32 {
        self.free_count
    }
    // ------------------------------------------------------------------------
    pub(crate) fn get(&self, id: NodeId) -> &BinTri {
        &self.nodes[id.index()]
    }
    // ------------------------------------------------------------------------
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut BinTri {
        &mut self.nodes[id.index()]
    }
    // ------------------------------------------------------------------------
    /// returns an unused node with all links cleared, or `None` on
    /// exhaustion. Never fatal: callers treat exhaustion as "leave this
    /// triangle a leaf for this frame".
    pub(crate) fn alloc(&mut self) -> Option<NodeId> {
        if let Some(id) = self.free_list {
            self.free_list = self.nodes[id.index()].free_link;
            self.free_count -= 1;
            self.nodes[id.index()] = BinTri::default();
            return Some(id);
        }
        if self.next < self.capacity {
            let id = NodeId(self.next);
            self.next += 1;
            self.nodes[id.index()] = BinTri::default();
            return Some(id);
        }
        None
    }
    // ------------------------------------------------------------------------
    /// returns `tri` to the free-list. Caller must have already detached it
    /// from every parent/child/neighbor link that referenced it; double-free
    /// is a caller bug, not checked here.
    pub(crate) fn free(&mut self, id: NodeId) {
        self.nodes[id.index()].free_link = self.free_list;
        self.free_list = Some(id);
        self.free_count += 1;
    }
    // ------------------------------------------------------------------------
    /// logically empties the pool; O(1). Invalidates every outstanding
    /// `NodeId`.
    pub fn reset(&mut self) {
        self.next = 0;
        self.free_list = None;
        self.free_count = 0;
    }
    // ------------------------------------------------------------------------
    /// number of slots allocated beyond `cutoff_ratio * capacity`; used by
    /// the split-merge engine to refuse splits before the pool is actually
    /// full, so a single frame never thrashes against exhaustion.
    pub fn is_saturated(&self, cutoff_ratio: f32) -> bool {
        let live = self.next - self.free_count;
        live as f32 >= cutoff_ratio * self.capacity as f32
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    // ------------------------------------------------------------------------
    #[test]
    fn alloc_exhausts_at_capacity() {
        let mut pool = BinTriPool::new(2);
        let a = pool.alloc().expect("first alloc");
        let b = pool.alloc().expect("second alloc");
        assert!(pool.alloc().is_none());
        assert_ne!(a, b);
    }
    // ------------------------------------------------------------------------
    #[test]
    fn free_then_alloc_reuses_slot() {
        let mut pool = BinTriPool::new(1);
        let a = pool.alloc().unwrap();
        pool.free(a);
        assert_eq!(pool.free_count(), 1);
        let b = pool.alloc().unwrap();
        assert_eq!(pool.free_count(), 0);
        assert_eq!(a, b);
    }
    // ------------------------------------------------------------------------
    #[test]
    fn reset_invalidates_high_water_mark() {
        let mut pool = BinTriPool::new(4);
        pool.alloc().unwrap();
        pool.alloc().unwrap();
        pool.reset();
        assert_eq!(pool.next(), 0);
        assert_eq!(pool.free_count(), 0);
    }
    // ------------------------------------------------------------------------
    #[test]
    fn freshly_allocated_node_has_cleared_links() {
        let mut pool = BinTriPool::new(2);
        let a = pool.alloc().unwrap();
        pool.get_mut(a).level = 3;
        pool.get_mut(a).parent = Some(NodeId(0));
        pool.free(a);
        let b = pool.alloc().unwrap();
        assert_eq!(pool.get(b).level, 0);
        assert!(pool.get(b).parent.is_none());
    }
    // ------------------------------------------------------------------------
}
