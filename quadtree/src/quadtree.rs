//! Region quadtree over axis-aligned bounding boxes.
//!
//! Each item lodges at the deepest node whose quadrant fully holds its box,
//! bounded by [`Config::max_depth`]. Boxes that straddle a quadrant edge stay
//! at the node above. Children are created on first use and only released by
//! [`QuadTree::cleanup`].

mod api;
mod config;
mod core;
mod maintenance;
mod query;
mod storage;
mod types;

pub use config::{Config, RelocationRequest};
pub use storage::{Iter, QuadTree};
pub use types::{Item, ItemKey};

use storage::{ItemStore, NodeArena};
use types::{validate_rect, validate_shape, Node, NodeId, NodeStack};
