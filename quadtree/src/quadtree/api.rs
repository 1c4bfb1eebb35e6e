use super::*;
use crate::error::QuadtreeResult;
use common::shapes::{Rectangle, ShapeEnum};
use tracing::{debug, trace};

impl<T> QuadTree<T> {
    /// Stores `value` under `bbox` and returns its handle.
    ///
    /// A box whose origin lies outside the tree's area is logged and inserted
    /// anyway; it is held at the root.
    pub fn insert(&mut self, value: T, bbox: Rectangle) -> QuadtreeResult<ItemKey> {
        validate_rect(&bbox)?;
        self.warn_if_out_of_bounds(&bbox);
        let key = self.items.insert(Item::new(value, bbox));
        self.node_insert(NodeId::ROOT, key)?;
        Ok(key)
    }

    /// Removes the item and returns its payload. Emptied nodes are kept until
    /// the next [`cleanup`](Self::cleanup).
    pub fn remove(&mut self, key: ItemKey) -> QuadtreeResult<T> {
        self.remove_item(key)
    }

    /// Removes every item in `keys`, then prunes the tree once.
    pub fn remove_batch(&mut self, keys: &[ItemKey]) -> QuadtreeResult<Vec<T>> {
        let mut values = Vec::with_capacity(keys.len());
        let mut result = Ok(());
        for &key in keys {
            match self.remove_item(key) {
                Ok(value) => values.push(value),
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.cleanup();
        result.map(|()| values)
    }

    /// Moves the item to `bbox`. The handle stays valid.
    pub fn relocate(&mut self, key: ItemKey, bbox: Rectangle) -> QuadtreeResult<()> {
        self.relocate_item(key, bbox)
    }

    pub fn relocate_batch(&mut self, requests: &[RelocationRequest]) -> QuadtreeResult<()> {
        for request in requests {
            self.relocate_item(request.key, request.bbox)?;
        }
        Ok(())
    }

    /// Handles of every item whose box intersects `shape`.
    pub fn search(&self, shape: &ShapeEnum) -> QuadtreeResult<Vec<ItemKey>> {
        let mut found = Vec::new();
        self.search_into(shape, &mut found)?;
        Ok(found)
    }

    /// Like [`search`](Self::search) but appends to a caller-owned buffer.
    pub fn search_into(&self, shape: &ShapeEnum, found: &mut Vec<ItemKey>) -> QuadtreeResult<()> {
        self.search_with(shape, |key| found.push(key))
    }

    pub fn search_with<F>(&self, shape: &ShapeEnum, f: F) -> QuadtreeResult<()>
    where
        F: FnMut(ItemKey),
    {
        validate_shape(shape)?;
        self.search_nodes(shape, f);
        Ok(())
    }

    /// Releases every subtree that no longer holds any item.
    pub fn cleanup(&mut self) {
        let before = self.nodes.live_count();
        self.cleanup_node(NodeId::ROOT);
        trace!(
            pruned = before - self.nodes.live_count(),
            "pruned empty nodes"
        );
    }

    /// Discards all nodes and items and rebuilds an empty root over `area`.
    pub fn resize(&mut self, area: Rectangle) {
        debug!(from = ?self.area, to = ?area, items = self.items.len(), "resizing quadtree");
        self.area = area;
        self.reset_storage();
    }

    /// Discards all nodes and items, keeping the current area.
    pub fn reset(&mut self) {
        debug!(items = self.items.len(), "resetting quadtree");
        self.reset_storage();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.items.get(key).is_ok()
    }

    pub fn get(&self, key: ItemKey) -> QuadtreeResult<&Item<T>> {
        self.items.get(key)
    }

    /// Mutable access to the payload. The box can only change through
    /// [`relocate`](Self::relocate).
    pub fn get_mut(&mut self, key: ItemKey) -> QuadtreeResult<&mut Item<T>> {
        self.items.get_mut(key)
    }

    /// Quadrant boundaries of every node that has children, for debug overlays.
    pub fn areas(&self) -> Vec<Rectangle> {
        let mut areas = Vec::new();
        self.collect_areas(NodeId::ROOT, &mut areas);
        areas
    }

    /// All items in insertion order.
    pub fn items(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items.iter().map(|(key, _)| key)
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    pub fn node_count(&self) -> usize {
        self.nodes.live_count()
    }

    /// Checks the cross references between nodes and items.
    pub fn validate(&self) -> QuadtreeResult<()> {
        self.validate_tree()
    }
}
