use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Circle, Rectangle, ShapeEnum};
use smallvec::SmallVec;

pub(crate) type NodeItems = SmallVec<[ItemKey; 8]>;
pub(crate) type NodeStack = SmallVec<[NodeId; 64]>;

/// Generational handle to a stored item.
///
/// Stays valid until that item is removed. Removal bumps the slot's generation,
/// so a handle outliving its item is reported as [`QuadtreeError::StaleHandle`]
/// instead of aliasing whatever later reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    index: u32,
    generation: u32,
}

impl ItemKey {
    #[inline(always)]
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline(always)]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline(always)]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) fn stale(&self) -> QuadtreeError {
        QuadtreeError::StaleHandle {
            index: self.index,
            generation: self.generation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A payload together with its bounding box.
#[derive(Clone, Debug)]
pub struct Item<T> {
    value: T,
    bbox: Rectangle,
    pub(crate) node: NodeId,
    pub(crate) position: u32,
}

impl<T> Item<T> {
    pub(crate) fn new(value: T, bbox: Rectangle) -> Self {
        Self {
            value,
            bbox,
            node: NodeId::ROOT,
            position: 0,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn bbox(&self) -> Rectangle {
        self.bbox
    }

    pub(crate) fn set_bbox(&mut self, bbox: Rectangle) {
        self.bbox = bbox;
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) depth: usize,
    pub(crate) area: Rectangle,
    pub(crate) child_areas: [Rectangle; 4],
    pub(crate) children: [Option<NodeId>; 4],
    pub(crate) items: NodeItems,
}

impl Node {
    pub(crate) fn new(depth: usize, area: Rectangle) -> Self {
        Self {
            depth,
            area,
            child_areas: area.quadrants(),
            children: [None; 4],
            items: NodeItems::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Index of the first quadrant (NW, NE, SW, SE order) that fully holds `bbox`.
    #[inline(always)]
    pub(crate) fn quadrant_for(&self, bbox: &Rectangle) -> Option<usize> {
        self.child_areas
            .iter()
            .position(|child_area| child_area.contains_rect(bbox))
    }

    pub(crate) fn push_item(&mut self, key: ItemKey) -> u32 {
        self.items.push(key);
        (self.items.len() - 1) as u32
    }
}

#[inline(always)]
pub(crate) fn validate_rect(rect: &Rectangle) -> QuadtreeResult<()> {
    if !rect.x.is_finite() || !rect.y.is_finite() {
        return Err(QuadtreeError::InvalidRectangleOrigin {
            x: rect.x,
            y: rect.y,
        });
    }
    if !rect.width.is_finite() || !rect.height.is_finite() || rect.width < 0.0 || rect.height < 0.0
    {
        return Err(QuadtreeError::InvalidRectangleDims {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

#[inline(always)]
pub(crate) fn validate_circle(circle: &Circle) -> QuadtreeResult<()> {
    if !circle.center.is_finite() {
        return Err(QuadtreeError::InvalidCircleCenter {
            x: circle.center.x,
            y: circle.center.y,
        });
    }
    if !circle.radius.is_finite() || circle.radius < 0.0 {
        return Err(QuadtreeError::InvalidCircleRadius {
            radius: circle.radius,
        });
    }
    Ok(())
}

pub(crate) fn validate_shape(shape: &ShapeEnum) -> QuadtreeResult<()> {
    match shape {
        ShapeEnum::Rectangle(rect) => validate_rect(rect),
        ShapeEnum::Circle(circle) => validate_circle(circle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NW: usize = 0;
    const NE: usize = 1;
    const SW: usize = 2;
    const SE: usize = 3;

    #[test]
    fn quadrant_for_picks_the_holding_quadrant() {
        let node = Node::new(0, Rectangle::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(
            node.quadrant_for(&Rectangle::new(10.0, 10.0, 5.0, 5.0)),
            Some(NW)
        );
        assert_eq!(
            node.quadrant_for(&Rectangle::new(60.0, 10.0, 5.0, 5.0)),
            Some(NE)
        );
        assert_eq!(
            node.quadrant_for(&Rectangle::new(10.0, 60.0, 5.0, 5.0)),
            Some(SW)
        );
        assert_eq!(
            node.quadrant_for(&Rectangle::new(60.0, 60.0, 5.0, 5.0)),
            Some(SE)
        );
        // Touching the shared edge keeps the box out of the western quadrant.
        assert_eq!(
            node.quadrant_for(&Rectangle::new(45.0, 10.0, 5.0, 5.0)),
            None
        );
        assert_eq!(
            node.quadrant_for(&Rectangle::new(50.0, 10.0, 5.0, 5.0)),
            Some(NE)
        );
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        assert!(validate_rect(&Rectangle::new(0.0, 0.0, 0.0, 0.0)).is_ok());
        assert_eq!(
            validate_rect(&Rectangle::new(0.0, 0.0, -1.0, 2.0)),
            Err(QuadtreeError::InvalidRectangleDims {
                width: -1.0,
                height: 2.0
            })
        );
        assert!(matches!(
            validate_rect(&Rectangle::new(f32::NAN, 0.0, 1.0, 1.0)),
            Err(QuadtreeError::InvalidRectangleOrigin { .. })
        ));
        assert_eq!(
            validate_shape(&ShapeEnum::Circle(Circle::new(0.0, 0.0, -2.0))),
            Err(QuadtreeError::InvalidCircleRadius { radius: -2.0 })
        );
        assert!(matches!(
            validate_shape(&ShapeEnum::Circle(Circle::new(f32::INFINITY, 0.0, 2.0))),
            Err(QuadtreeError::InvalidCircleCenter { .. })
        ));
    }
}
