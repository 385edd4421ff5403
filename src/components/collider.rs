//! Kinematic body with axis-separated collision against static rectangles.
//!
//! A [`Collider`] keeps a float `position`, a `velocity`, and a pixel-snapped
//! `rect`. Each physics tick the owner calls [`Collider::apply_gravity`] and then
//! [`Collider::check_collisions`], which moves the body one axis at a time and
//! pushes the rectangle out of any static rect it ends up inside.
//!
//! The resolver only corrects the rectangle. Folding the correction back into
//! `position` and `velocity` is left to the caller (see
//! [`Player`](super::player::Player)), which knows whether a floor hit should
//! restore a jump or a wall hit should nudge the body by a tolerance.

use crate::error::ConfigError;
use crate::math::{Rect, Vector2, snap};

/// Which sides of the body touched static geometry during one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionSides {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// Sub-pixel position of the top-left corner.
    pub position: Vector2,
    /// Velocity in world units per second.
    pub velocity: Vector2,
    /// Bounding box, snapped to whole pixels from `position`.
    pub rect: Rect,
}

impl Collider {
    /// Create a body of the given size at `position`.
    pub fn new(position: Vector2, width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::DegenerateRect {
                w: width,
                h: height,
            });
        }
        Ok(Self {
            position,
            velocity: Vector2::zero(),
            rect: Rect::new(snap(position.x), snap(position.y), width, height),
        })
    }

    /// Accelerate downwards, never exceeding `max_fall`.
    pub fn apply_gravity(&mut self, dt: f32, gravity: f32, max_fall: f32) {
        self.velocity.y += gravity * dt;
        self.velocity.y = self.velocity.y.min(max_fall);
    }

    /// Static rects currently overlapping the body's rectangle.
    pub fn get_collisions<'a>(&self, colliders: &'a [Rect]) -> impl Iterator<Item = &'a Rect> {
        let rect = self.rect;
        colliders.iter().filter(move |other| rect.overlaps(other))
    }

    /// Move by `velocity * dt` and resolve against `colliders`, x axis first.
    ///
    /// Resolving x completely before y is what lets a falling body slide down a
    /// wall instead of snagging on the wall's top corner. When several rects
    /// overlap on the same axis the last one in `colliders` decides the final
    /// edge. A body that is not moving on an axis is never pushed on that axis.
    pub fn check_collisions(&mut self, dt: f32, colliders: &[Rect]) -> CollisionSides {
        let mut sides = CollisionSides::default();

        self.position.x += self.velocity.x * dt;
        self.rect.x = snap(self.position.x);
        for other in colliders {
            if !self.rect.overlaps(other) {
                continue;
            }
            if self.velocity.x > 0.0 {
                self.rect.set_right(other.left());
                sides.right = true;
            } else if self.velocity.x < 0.0 {
                self.rect.set_left(other.right());
                sides.left = true;
            }
        }

        self.position.y += self.velocity.y * dt;
        self.rect.y = snap(self.position.y);
        for other in colliders {
            if !self.rect.overlaps(other) {
                continue;
            }
            if self.velocity.y > 0.0 {
                self.rect.set_bottom(other.top());
                sides.bottom = true;
            } else if self.velocity.y < 0.0 {
                self.rect.set_top(other.bottom());
                sides.top = true;
            }
        }

        sides
    }

    /// Top-left corner at which to draw a `frame_w` x `frame_h` image so that it
    /// is centered horizontally on the body and rests on its bottom edge.
    pub fn draw_position(&self, frame_w: f32, frame_h: f32) -> Vector2 {
        Vector2::new(
            snap(self.position.x - (frame_w - self.rect.w) * 0.5),
            snap(self.position.y - (frame_h - self.rect.h)),
        )
    }
}
