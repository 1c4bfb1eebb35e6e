use super::*;
use crate::error::QuadtreeResult;
use common::shapes::Rectangle;

const NIL: u32 = u32::MAX;

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    prev: u32,
    next: u32,
    item: Option<Item<T>>,
}

/// Slot store for items.
///
/// Live slots are threaded on a doubly linked list so iteration follows
/// insertion order, and a freed slot is recycled with a bumped generation.
/// Erasing one item never moves or invalidates another.
#[derive(Clone, Debug)]
pub(crate) struct ItemStore<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    head: u32,
    tail: u32,
    len: usize,
}

impl<T> ItemStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn insert(&mut self, item: Item<T>) -> ItemKey {
        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.item = Some(item);
                slot.prev = self.tail;
                slot.next = NIL;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    prev: self.tail,
                    next: NIL,
                    item: Some(item),
                });
                (self.slots.len() - 1) as u32
            }
        };
        if self.tail == NIL {
            self.head = index;
        } else {
            self.slots[self.tail as usize].next = index;
        }
        self.tail = index;
        self.len += 1;
        ItemKey::new(index, self.slots[index as usize].generation)
    }

    pub(crate) fn remove(&mut self, key: ItemKey) -> QuadtreeResult<Item<T>> {
        self.get(key)?;
        let index = key.index();
        let slot = &mut self.slots[index as usize];
        let item = slot.item.take().ok_or_else(|| key.stale())?;
        slot.generation = slot.generation.wrapping_add(1);
        let (prev, next) = (slot.prev, slot.next);
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next as usize].prev = prev;
        }
        self.free.push(index);
        self.len -= 1;
        Ok(item)
    }

    pub(crate) fn get(&self, key: ItemKey) -> QuadtreeResult<&Item<T>> {
        self.slots
            .get(key.index() as usize)
            .filter(|slot| slot.generation == key.generation())
            .and_then(|slot| slot.item.as_ref())
            .ok_or_else(|| key.stale())
    }

    pub(crate) fn get_mut(&mut self, key: ItemKey) -> QuadtreeResult<&mut Item<T>> {
        self.slots
            .get_mut(key.index() as usize)
            .filter(|slot| slot.generation == key.generation())
            .and_then(|slot| slot.item.as_mut())
            .ok_or_else(|| key.stale())
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Drops every item. Slots are kept with bumped generations so that no
    /// handle issued before the clear can match an item inserted after it.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.item.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.prev = NIL;
            slot.next = NIL;
        }
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }
}

/// Live items in insertion order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    cursor: u32,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (ItemKey, &'a Item<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let index = self.cursor;
        let slot = &self.slots[index as usize];
        self.cursor = slot.next;
        self.remaining -= 1;
        let item = slot.item.as_ref()?;
        Some((ItemKey::new(index, slot.generation), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Node storage addressed by [`NodeId`]. Slot 0 is always the root.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new(root_area: Rectangle) -> Self {
        Self {
            nodes: vec![Node::new(0, root_area)],
            free: Vec::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn alloc(&mut self, depth: usize, area: Rectangle) -> NodeId {
        let node = Node::new(depth, area);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    /// Returns a detached, empty node to the free list.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(id != NodeId::ROOT);
        let node = &mut self.nodes[id.index()];
        debug_assert!(node.items.is_empty() && !node.has_children());
        node.items.clear();
        self.free.push(id);
    }

    /// Number of nodes currently linked into the tree, root included.
    pub(crate) fn live_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub(crate) fn reset(&mut self, root_area: Rectangle) {
        self.nodes.clear();
        self.free.clear();
        self.nodes.push(Node::new(0, root_area));
    }
}

/// Region quadtree over a fixed area, storing bounding boxes with payloads of type `T`.
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    pub(super) items: ItemStore<T>,
    pub(super) nodes: NodeArena,
    pub(super) area: Rectangle,
    pub(super) config: Config,
}
