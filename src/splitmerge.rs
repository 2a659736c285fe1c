// ----------------------------------------------------------------------------
// The per-frame refinement driver. Walks the current mesh deciding per
// triangle whether to split, merge, or leave it; maintains the no-T-junction
// invariant by forced split of base neighbors before a triangle with a
// coarser base can split itself.
// ----------------------------------------------------------------------------
use tracing::trace;

use crate::node_id::NodeId;
use crate::pool::BinTriPool;
// ----------------------------------------------------------------------------
/// retargets whichever of `of`'s leg-neighbor fields currently names `from`
/// to name `to` instead. Leg-to-leg (left/right) relationships are always
/// symmetric and same-level on both sides, so the match is always found in
/// `left_neighbor`/`right_neighbor`, never `base_neighbor`.
fn retarget_leg_neighbor(pool: &mut BinTriPool, of: Option<NodeId>, from: NodeId, to: NodeId) {
    let Some(of_id) = of else { return };
    let tri = pool.get_mut(of_id);
    if tri.left_neighbor == Some(from) {
        tri.left_neighbor = Some(to);
    } else if tri.right_neighbor == Some(from) {
        tri.right_neighbor = Some(to);
    }
}
// ----------------------------------------------------------------------------
/// allocates the two children of `id` (apex at the hypotenuse midpoint,
/// numbers `2n`/`2n+1`) without touching anything outside `id`'s own
/// subtree and its immediate leg neighbors. Returns the child ids, or
/// `None` (with no mutation at all) if the pool can't supply both.
fn alloc_children(pool: &mut BinTriPool, id: NodeId) -> Option<(NodeId, NodeId)> {
    let tri = pool.get(id).clone();
    let m = tri.hypotenuse_mid();

    let child_a = pool.alloc()?;
    let child_b = match pool.alloc() {
        Some(id) => id,
        None => {
            pool.free(child_a);
            return None;
        }
    };

    {
        let a = pool.get_mut(child_a);
        a.v0 = tri.va;
        a.v1 = tri.v0;
        a.va = m;
        a.level = tri.level + 1;
        a.number = 2 * tri.number;
        a.root = tri.root;
        a.parent = Some(id);
        a.base_neighbor = tri.left_neighbor;
        a.left_neighbor = Some(child_b);
    }
    {
        let b = pool.get_mut(child_b);
        b.v0 = tri.v1;
        b.v1 = tri.va;
        b.va = m;
        b.level = tri.level + 1;
        b.number = 2 * tri.number + 1;
        b.root = tri.root;
        b.parent = Some(id);
        b.base_neighbor = tri.right_neighbor;
        b.right_neighbor = Some(child_a);
    }

    retarget_leg_neighbor(pool, tri.left_neighbor, id, child_a);
    retarget_leg_neighbor(pool, tri.right_neighbor, id, child_b);

    let parent = pool.get_mut(id);
    parent.left_child = Some(child_a);
    parent.right_child = Some(child_b);

    Some((child_a, child_b))
}
// ----------------------------------------------------------------------------
/// cross-links the two outer half-hypotenuse edges shared between a pair of
/// triangles that just split together across their common base edge. See
/// DESIGN.md for the geometric derivation of which child pairs with which.
fn cross_link(pool: &mut BinTriPool, x_child_a: NodeId, x_child_b: NodeId, y_child_a: NodeId, y_child_b: NodeId) {
    pool.get_mut(x_child_a).right_neighbor = Some(y_child_b);
    pool.get_mut(y_child_b).left_neighbor = Some(x_child_a);
    pool.get_mut(x_child_b).left_neighbor = Some(y_child_a);
    pool.get_mut(y_child_a).right_neighbor = Some(x_child_b);
}
// ----------------------------------------------------------------------------
/// splits `id` alone (no base neighbor to keep in lockstep -- either it has
/// none, at the domain boundary, or the caller already force-split the base
/// neighbor up to the matching level in a previous recursive call).
fn split_no_base(pool: &mut BinTriPool, id: NodeId) -> bool {
    alloc_children(pool, id).is_some()
}
// ----------------------------------------------------------------------------
/// splits `t` and its base neighbor `b` together, since they match level,
/// then cross-links the four resulting children across the old shared
/// hypotenuse. Atomic: if either side's allocation fails, neither is split.
fn split_paired(pool: &mut BinTriPool, t: NodeId, b: NodeId) -> bool {
    let Some((ta, tb)) = alloc_children(pool, t) else {
        return false;
    };
    let Some((ba, bb)) = alloc_children(pool, b) else {
        // undo t's split: free its children, restore leg pointers, clear
        // the parent's child links so the abandoned attempt leaves no trace.
        undo_split(pool, t, ta, tb);
        return false;
    };
    cross_link(pool, ta, tb, ba, bb);
    true
}
// ----------------------------------------------------------------------------
fn undo_split(pool: &mut BinTriPool, id: NodeId, child_a: NodeId, child_b: NodeId) {
    let tri = pool.get(id).clone();
    retarget_leg_neighbor(pool, tri.left_neighbor, child_a, id);
    retarget_leg_neighbor(pool, tri.right_neighbor, child_b, id);
    pool.get_mut(id).left_child = None;
    pool.get_mut(id).right_child = None;
    pool.free(child_a);
    pool.free(child_b);
}
// ----------------------------------------------------------------------------
/// force-split protocol: `id` may only split once its base neighbor matches
/// its level. Recursion terminates because each step strictly reduces the
/// level gap between `id` and its base neighbor.
pub fn split(pool: &mut BinTriPool, id: NodeId) -> bool {
    match pool.get(id).base_neighbor {
        None => split_no_base(pool, id),
        Some(base_id) => {
            if pool.get(base_id).base_neighbor == Some(id) {
                split_paired(pool, id, base_id)
            } else {
                split(pool, base_id) && split(pool, id)
            }
        }
    }
}
// ----------------------------------------------------------------------------
pub fn good_for_merge(pool: &BinTriPool, id: NodeId) -> bool {
    let tri = pool.get(id);
    let (Some(lc), Some(rc)) = (tri.left_child, tri.right_child) else {
        return false;
    };
    if !pool.get(lc).is_leaf() || !pool.get(rc).is_leaf() {
        return false;
    }
    match tri.base_neighbor {
        None => true,
        Some(base_id) => match (pool.get(base_id).left_child, pool.get(base_id).right_child) {
            (Some(blc), Some(brc)) => pool.get(blc).is_leaf() && pool.get(brc).is_leaf(),
            _ => false,
        },
    }
}
// ----------------------------------------------------------------------------
/// frees `id`'s two children, restores `id` as a leaf, and repairs the leg
/// pointers that used to name the children. Symmetric to [`split`]: if
/// `id`'s base neighbor is also internal with leaf children (the matching
/// split-together pair), it is collapsed too.
pub fn merge(pool: &mut BinTriPool, id: NodeId) {
    debug_assert!(good_for_merge(pool, id));
    collapse_one(pool, id);
    if let Some(base_id) = pool.get(id).base_neighbor {
        if pool.get(base_id).left_child.is_some() {
            collapse_one(pool, base_id);
        }
    }
}
// ----------------------------------------------------------------------------
fn collapse_one(pool: &mut BinTriPool, id: NodeId) {
    let tri = pool.get(id).clone();
    let (lc, rc) = (tri.left_child.unwrap(), tri.right_child.unwrap());
    retarget_leg_neighbor(pool, tri.left_neighbor, lc, id);
    retarget_leg_neighbor(pool, tri.right_neighbor, rc, id);
    pool.free(lc);
    pool.free(rc);
    let tri_mut = pool.get_mut(id);
    tri_mut.left_child = None;
    tri_mut.right_child = None;
}
// ----------------------------------------------------------------------------
/// the recursion in spec §4.3: frustum test, then split/merge/descend
/// decision. Returns whether any split or merge happened anywhere in this
/// subtree, so the caller can report whether `update()` changed the mesh.
#[allow(clippy::too_many_arguments)]
pub fn recurse_tesselate(
    pool: &mut BinTriPool,
    variance: &crate::variance::VarianceTree,
    hypo: &crate::hypo::HypotenuseLengthTable,
    callbacks: &mut crate::callbacks::Callbacks,
    max_levels: u8,
    quality_constant: f32,
    saturation_cutoff: f32,
    id: NodeId,
    entirely_in_frustum: bool,
) -> bool {
    if !entirely_in_frustum {
        let tri = pool.get(id);
        let center = tri.center();
        let radius = hypo.get(tri.level) * 0.5;
        let visible = callbacks.call_sphere_in_frustum(center.x as f32, center.y as f32, radius);
        if !visible {
            trace!(number = tri.number, level = tri.level, "culled, outside frustum");
            return false;
        }
    }

    let tri = pool.get(id).clone();
    let center = tri.center();
    let dist = callbacks.call_dist_to_camera(center.x, center.y).max(f32::EPSILON);
    let metric = variance.variance_of(tri.root, tri.number) as f32 * hypo.get(tri.level) / dist;

    if metric > quality_constant && tri.level < max_levels && !pool.is_saturated(saturation_cutoff) {
        if split(pool, id) {
            let tri = pool.get(id).clone();
            let l = tri.left_child.unwrap();
            let r = tri.right_child.unwrap();
            recurse_tesselate(pool, variance, hypo, callbacks, max_levels, quality_constant, saturation_cutoff, l, entirely_in_frustum);
            recurse_tesselate(pool, variance, hypo, callbacks, max_levels, quality_constant, saturation_cutoff, r, entirely_in_frustum);
            return true;
        }
        // pool exhausted: treat tri as a leaf for this frame, fall through.
    }

    if tri.left_child.is_some() {
        if good_for_merge(pool, id) {
            merge(pool, id);
            return true;
        }
        let l = tri.left_child.unwrap();
        let r = tri.right_child.unwrap();
        let changed_l = recurse_tesselate(pool, variance, hypo, callbacks, max_levels, quality_constant, saturation_cutoff, l, entirely_in_frustum);
        let changed_r = recurse_tesselate(pool, variance, hypo, callbacks, max_levels, quality_constant, saturation_cutoff, r, entirely_in_frustum);
        return changed_l || changed_r;
    }

    false
}
