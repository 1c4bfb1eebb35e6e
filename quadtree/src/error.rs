use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QuadtreeError {
    InvalidRectangleDims { width: f32, height: f32 },
    InvalidRectangleOrigin { x: f32, y: f32 },
    InvalidCircleRadius { radius: f32 },
    InvalidCircleCenter { x: f32, y: f32 },
    /// The handle's item has been removed (or the tree was reset).
    StaleHandle { index: u32, generation: u32 },
    /// Reported by `QuadTree::validate` when the node/item cross references disagree.
    CorruptIndex { reason: String },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidRectangleDims { width, height } => {
                write!(
                    f,
                    "rectangle width/height must be finite and non-negative (width: {}, height: {})",
                    width, height
                )
            }
            QuadtreeError::InvalidRectangleOrigin { x, y } => {
                write!(f, "rectangle origin must be finite (x: {}, y: {})", x, y)
            }
            QuadtreeError::InvalidCircleRadius { radius } => {
                write!(
                    f,
                    "circle radius must be finite and non-negative (radius: {})",
                    radius
                )
            }
            QuadtreeError::InvalidCircleCenter { x, y } => {
                write!(f, "circle center must be finite (x: {}, y: {})", x, y)
            }
            QuadtreeError::StaleHandle { index, generation } => {
                write!(
                    f,
                    "item handle no longer refers to a live item (index: {}, generation: {})",
                    index, generation
                )
            }
            QuadtreeError::CorruptIndex { reason } => {
                write!(f, "quadtree is inconsistent: {}", reason)
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
