// ----------------------------------------------------------------------------
/// Stable handle into a [`crate::pool::BinTriPool`].
///
/// Indices are never reused for different logical triangles within the same
/// generation of the pool's storage, but *are* reused for different physical
/// triangles across alloc/free cycles — callers must not hold a `NodeId`
/// across a `free` of the node it names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);
// ----------------------------------------------------------------------------
impl NodeId {
    // ------------------------------------------------------------------------
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
    // ------------------------------------------------------------------------
}
// ----------------------------------------------------------------------------
