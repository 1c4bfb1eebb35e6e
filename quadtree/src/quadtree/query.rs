use super::*;
use common::shapes::{Rectangle, Shape, ShapeEnum};
use smallvec::smallvec;

impl<T> QuadTree<T> {
    /// Visits every item whose box intersects `shape`.
    ///
    /// Items lodged at a visited node are tested one by one. A child whose
    /// quadrant lies entirely inside `shape` has its whole subtree reported
    /// without further tests; a child whose quadrant misses `shape` is skipped.
    pub(crate) fn search_nodes<F>(&self, shape: &ShapeEnum, mut f: F)
    where
        F: FnMut(ItemKey),
    {
        let mut stack: NodeStack = smallvec![NodeId::ROOT];
        while let Some(node_id) = stack.pop() {
            let node = self.nodes.node(node_id);
            for &key in node.items.iter() {
                if let Ok(item) = self.items.get(key) {
                    if shape.intersects_rect(&item.bbox()) {
                        f(key);
                    }
                }
            }
            for (child_area, child) in node.child_areas.iter().zip(node.children.iter()) {
                let Some(child) = *child else {
                    continue;
                };
                if shape.contains_rect(child_area) {
                    self.for_each_in_subtree(child, &mut f);
                } else if shape.intersects_rect(child_area) {
                    stack.push(child);
                }
            }
        }
    }

    pub(crate) fn for_each_in_subtree<F>(&self, start: NodeId, f: &mut F)
    where
        F: FnMut(ItemKey),
    {
        let mut stack: NodeStack = smallvec![start];
        while let Some(node_id) = stack.pop() {
            let node = self.nodes.node(node_id);
            node.items.iter().copied().for_each(&mut *f);
            stack.extend(node.children.iter().flatten().copied());
        }
    }

    /// Quadrant rectangles of every node that has at least one child, parent
    /// before children.
    pub(crate) fn collect_areas(&self, node_id: NodeId, areas: &mut Vec<Rectangle>) {
        let node = self.nodes.node(node_id);
        if !node.has_children() {
            return;
        }
        areas.extend_from_slice(&node.child_areas);
        for &child in node.children.iter().flatten() {
            self.collect_areas(child, areas);
        }
    }
}
