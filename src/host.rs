//! Host compositor contract
//!
//! The engine never talks to a compositor directly; everything it needs is
//! behind [`SceneHost`]: the upstream target's pixel size, the scene size,
//! and the scene-item placements of the filtered source. The demo binary and
//! the test mock both implement it.

use glam::Vec2;

/// Identifier for one scene-item placement of a source within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneItemId(pub u64);

/// Position and 2-D scale of a scene item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Top-left position of the item in scene pixels.
    pub position: Vec2,
    /// Per-axis scale from source pixels to scene pixels.
    pub scale: Vec2,
}

impl Default for ItemPlacement {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

/// Narrow view of the host compositor.
pub trait SceneHost {
    /// Pixel size of the filter's upstream target. `(0, 0)` means "no target
    /// yet" and is a per-frame no-op, not an error.
    fn target_size(&self) -> (u32, u32);

    /// Pixel size of the current scene.
    fn scene_size(&self) -> (u32, u32);

    /// All placements of the filtered source within the current scene.
    fn placements(&self) -> Vec<SceneItemId>;

    /// Position/scale of one placement, or `None` if the item is gone.
    fn placement(&self, item: SceneItemId) -> Option<ItemPlacement>;

    /// Whether the placement is currently visible in the scene.
    fn item_visible(&self, _item: SceneItemId) -> bool {
        true
    }
}

/// Mock scene for unit tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    pub struct MockScene {
        pub target: (u32, u32),
        pub scene: (u32, u32),
        pub items: HashMap<u64, ItemPlacement>,
        pub order: Vec<u64>,
    }

    impl MockScene {
        /// 1920x1080 source placed once, unscaled, at the scene origin.
        pub fn simple() -> Self {
            let mut items = HashMap::new();
            items.insert(1, ItemPlacement::default());
            Self {
                target: (1920, 1080),
                scene: (1920, 1080),
                items,
                order: vec![1],
            }
        }

        pub fn insert(&mut self, id: u64, placement: ItemPlacement) {
            self.items.insert(id, placement);
            self.order.push(id);
        }
    }

    impl SceneHost for MockScene {
        fn target_size(&self) -> (u32, u32) {
            self.target
        }

        fn scene_size(&self) -> (u32, u32) {
            self.scene
        }

        fn placements(&self) -> Vec<SceneItemId> {
            self.order.iter().map(|id| SceneItemId(*id)).collect()
        }

        fn placement(&self, item: SceneItemId) -> Option<ItemPlacement> {
            self.items.get(&item.0).copied()
        }
    }
}
