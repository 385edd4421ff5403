//! Static level geometry.
//!
//! The world collaborator owns the solid rectangles of the current level.
//! Systems borrow them read-only for the duration of one resolution pass;
//! nothing in the simulation core mutates them.

use bevy_ecs::prelude::Resource;

use crate::math::Rect;

#[derive(Resource, Debug, Clone, Default)]
pub struct LevelGeometry {
    pub colliders: Vec<Rect>,
}

impl LevelGeometry {
    pub fn new(colliders: Vec<Rect>) -> Self {
        Self { colliders }
    }

    /// Bounding box of all colliders, if any.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.colliders.first()?;
        let (mut left, mut top, mut right, mut bottom) =
            (first.left(), first.top(), first.right(), first.bottom());
        for r in &self.colliders[1..] {
            left = left.min(r.left());
            top = top.min(r.top());
            right = right.max(r.right());
            bottom = bottom.max(r.bottom());
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// A test room one and a half screens wide at the 320x180 internal
    /// resolution: floor, walls, and a few ledges.
    pub fn demo_room() -> Self {
        Self::new(vec![
            Rect::new(0.0, 164.0, 480.0, 16.0),
            Rect::new(0.0, 0.0, 8.0, 164.0),
            Rect::new(472.0, 0.0, 8.0, 164.0),
            Rect::new(48.0, 132.0, 48.0, 8.0),
            Rect::new(128.0, 108.0, 64.0, 8.0),
            Rect::new(224.0, 84.0, 48.0, 8.0),
            Rect::new(200.0, 140.0, 16.0, 24.0),
            Rect::new(320.0, 120.0, 32.0, 44.0),
            Rect::new(384.0, 96.0, 56.0, 8.0),
        ])
    }
}
