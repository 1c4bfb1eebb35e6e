use super::*;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use tracing::warn;

impl<T> QuadTree<T> {
    pub fn new_with_config(area: Rectangle, config: Config) -> Self {
        Self {
            items: ItemStore::with_capacity(config.pool_size),
            nodes: NodeArena::new(area),
            area,
            config,
        }
    }

    pub fn new(area: Rectangle) -> Self {
        Self::new_with_config(area, Config::default())
    }

    /// Out-of-bounds items are still inserted; they can never fit a root
    /// quadrant, so they end up held at the root.
    pub(crate) fn warn_if_out_of_bounds(&self, bbox: &Rectangle) {
        let origin = bbox.top_left();
        if origin.x < self.area.left()
            || origin.x > self.area.right()
            || origin.y < self.area.top()
            || origin.y > self.area.bottom()
        {
            warn!(
                x = origin.x,
                y = origin.y,
                area = ?self.area,
                "item origin is outside the quadtree area, inserting anyway"
            );
        }
    }

    /// Descends from `start` into the deepest quadrant that fully holds the
    /// item's box (bounded by `max_depth`), creating children on the way, and
    /// lodges the item there.
    pub(crate) fn node_insert(&mut self, start: NodeId, key: ItemKey) -> QuadtreeResult<()> {
        let bbox = self.items.get(key)?.bbox();
        let max_depth = self.config.max_depth;
        let mut node_id = start;
        loop {
            let node = self.nodes.node(node_id);
            match node.quadrant_for(&bbox) {
                Some(quadrant) if node.depth < max_depth => {
                    node_id = self.child_or_create(node_id, quadrant);
                }
                _ => break,
            }
        }

        let position = self.nodes.node_mut(node_id).push_item(key);
        let item = self.items.get_mut(key)?;
        item.node = node_id;
        item.position = position;
        Ok(())
    }

    fn child_or_create(&mut self, parent: NodeId, quadrant: usize) -> NodeId {
        let node = self.nodes.node(parent);
        if let Some(child) = node.children[quadrant] {
            return child;
        }
        let depth = node.depth + 1;
        let area = node.child_areas[quadrant];
        let child = self.nodes.alloc(depth, area);
        self.nodes.node_mut(parent).children[quadrant] = Some(child);
        child
    }

    /// Unlinks the item from its node's list in O(1) and returns that node.
    /// The item itself stays in the store.
    pub(crate) fn detach(&mut self, key: ItemKey) -> QuadtreeResult<NodeId> {
        let item = self.items.get(key)?;
        let (node_id, position) = (item.node, item.position);
        let node = self.nodes.node_mut(node_id);
        let index = position as usize;
        if node.items.get(index) != Some(&key) {
            return Err(QuadtreeError::CorruptIndex {
                reason: format!(
                    "item {:?} is not at position {} of its node's list",
                    key, position
                ),
            });
        }
        node.items.swap_remove(index);
        if let Some(&moved) = node.items.get(index) {
            self.items.get_mut(moved)?.position = position;
        }
        Ok(node_id)
    }
}
