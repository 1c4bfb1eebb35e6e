use super::*;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use fxhash::FxHashSet;
use smallvec::smallvec;
use tracing::trace;

impl<T> QuadTree<T> {
    pub(crate) fn remove_item(&mut self, key: ItemKey) -> QuadtreeResult<T> {
        self.detach(key)?;
        Ok(self.items.remove(key)?.into_value())
    }

    pub(crate) fn relocate_item(&mut self, key: ItemKey, bbox: Rectangle) -> QuadtreeResult<()> {
        validate_rect(&bbox)?;
        let item = self.items.get(key)?;
        let old = item.bbox();
        let node = self.nodes.node(item.node);

        // The item can only change owner when the verdict of its node's area,
        // or of one of that node's quadrants, flips between the old and new box.
        let area_unchanged = node.area.contains_rect(&old) == node.area.contains_rect(&bbox);
        let depth_capped = node.depth >= self.config.max_depth;
        let quadrants_unchanged = node
            .child_areas
            .iter()
            .all(|child_area| child_area.contains_rect(&old) == child_area.contains_rect(&bbox));

        if area_unchanged && (depth_capped || quadrants_unchanged) {
            self.items.get_mut(key)?.set_bbox(bbox);
            return Ok(());
        }

        trace!(?key, from = ?old, to = ?bbox, "relocating item through the root");
        let node_id = self.detach(key)?;
        if self.nodes.node(node_id).items.is_empty() {
            self.cleanup();
        }
        self.items.get_mut(key)?.set_bbox(bbox);
        self.warn_if_out_of_bounds(&bbox);
        self.node_insert(NodeId::ROOT, key)
    }

    /// Post-order pruning. Returns true when the subtree rooted at `node_id`
    /// holds no items, in which case every child below it has been released.
    pub(crate) fn cleanup_node(&mut self, node_id: NodeId) -> bool {
        let mut collapsible = true;
        for quadrant in 0..4 {
            let Some(child) = self.nodes.node(node_id).children[quadrant] else {
                continue;
            };
            if self.cleanup_node(child) {
                self.nodes.node_mut(node_id).children[quadrant] = None;
                self.nodes.release(child);
            } else {
                collapsible = false;
            }
        }
        collapsible && self.nodes.node(node_id).items.is_empty()
    }

    pub(crate) fn reset_storage(&mut self) {
        self.items.clear();
        self.nodes.reset(self.area);
    }

    pub(crate) fn validate_tree(&self) -> QuadtreeResult<()> {
        let corrupt = |reason: String| -> QuadtreeResult<()> {
            Err(QuadtreeError::CorruptIndex { reason })
        };
        let max_depth = self.config.max_depth;
        let mut seen: FxHashSet<ItemKey> = FxHashSet::default();
        let mut stack: NodeStack = smallvec![NodeId::ROOT];

        while let Some(node_id) = stack.pop() {
            let node = self.nodes.node(node_id);
            if node.depth > max_depth {
                return corrupt(format!(
                    "node {:?} at depth {} exceeds max depth {}",
                    node_id, node.depth, max_depth
                ));
            }

            for (position, &key) in node.items.iter().enumerate() {
                let Ok(item) = self.items.get(key) else {
                    return corrupt(format!("node {:?} holds removed item {:?}", node_id, key));
                };
                if item.node != node_id || item.position as usize != position {
                    return corrupt(format!(
                        "item {:?} points at node {:?} position {}, found in node {:?} position {}",
                        key, item.node, item.position, node_id, position
                    ));
                }
                if !seen.insert(key) {
                    return corrupt(format!("item {:?} is held by more than one node", key));
                }
                if node_id != NodeId::ROOT && !node.area.contains_rect(&item.bbox()) {
                    return corrupt(format!(
                        "item {:?} box {:?} is outside its node area {:?}",
                        key,
                        item.bbox(),
                        node.area
                    ));
                }
            }

            for (quadrant, child) in node.children.iter().enumerate() {
                let Some(child) = *child else {
                    continue;
                };
                let child_node = self.nodes.node(child);
                if child_node.depth != node.depth + 1
                    || child_node.area != node.child_areas[quadrant]
                {
                    return corrupt(format!(
                        "child {:?} does not match quadrant {} of node {:?}",
                        child, quadrant, node_id
                    ));
                }
                stack.push(child);
            }
        }

        if seen.len() != self.items.len() {
            return corrupt(format!(
                "{} items are stored but {} are reachable from the root",
                self.items.len(),
                seen.len()
            ));
        }
        Ok(())
    }
}
