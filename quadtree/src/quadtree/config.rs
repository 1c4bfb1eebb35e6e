use super::ItemKey;
use common::shapes::Rectangle;

#[derive(Debug, Clone)]
pub struct Config {
    /// Deepest level a node may live at; the root is depth 0.
    pub max_depth: usize,
    /// Item slots reserved up front.
    pub pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 6,
            pool_size: 256,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RelocationRequest {
    pub key: ItemKey,
    pub bbox: Rectangle,
}
