//! Small 2D math toolkit shared by the simulation core.
//!
//! [`Vector2`] and [`Rect`] are plain `f32` value types so the core can be
//! built and tested without a graphics backend. With the `render` feature they
//! convert losslessly into raylib's `Vector2` and `Rectangle`.
//!
//! The free functions are pure helpers: range clamping and mapping, and
//! linear / quadratic / cubic Bezier interpolation.

use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Componentwise minimum.
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        lerp(self, other, t)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Self) -> Self::Output {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Self::Output {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// The edge setters move the rectangle and keep its size, so
/// `set_right(10.0)` places the right edge at 10 without shrinking it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Strict AABB overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Snap a coordinate to the pixel grid. Ties go to the even neighbour.
pub fn snap(n: f32) -> f32 {
    n.round_ties_even()
}

/// Clamp `n` into `[min_num, max_num]`.
pub fn limit_range(n: f32, max_num: f32, min_num: f32) -> f32 {
    n.min(max_num).max(min_num)
}

/// Map `n` from `[min_num, max_num]` onto `[0, new_range]`.
///
/// Values outside the source range map outside the target range; clamp
/// afterwards with [`limit_range`] if needed.
pub fn map_range(n: f32, max_num: f32, min_num: f32, new_range: f32) -> f32 {
    (n - min_num) / (max_num - min_num) * new_range
}

pub fn lerp(p1: Vector2, p2: Vector2, t: f32) -> Vector2 {
    p1 * (1.0 - t) + p2 * t
}

pub fn quad_bezier(points: &[Vector2; 3], t: f32) -> Vector2 {
    let u = 1.0 - t;
    points[0] * (u * u) + points[1] * (2.0 * u * t) + points[2] * (t * t)
}

pub fn cubic_bezier(points: &[Vector2; 4], t: f32) -> Vector2 {
    let u = 1.0 - t;
    points[0] * (u * u * u)
        + points[1] * (3.0 * u * u * t)
        + points[2] * (3.0 * u * t * t)
        + points[3] * (t * t * t)
}

/// Sample a quadratic curve into `num_points + 1` points.
///
/// The end points are the first and last control points exactly; the
/// interior samples sit at `t = k / num_points`.
pub fn create_quad_curve(points: &[Vector2; 3], num_points: usize) -> Vec<Vector2> {
    sample_curve(points[0], points[2], num_points, |t| quad_bezier(points, t))
}

/// Sample a cubic curve into `num_points + 1` points. See [`create_quad_curve`].
pub fn create_cubic_curve(points: &[Vector2; 4], num_points: usize) -> Vec<Vector2> {
    sample_curve(points[0], points[3], num_points, |t| cubic_bezier(points, t))
}

fn sample_curve(
    first: Vector2,
    last: Vector2,
    num_points: usize,
    curve: impl Fn(f32) -> Vector2,
) -> Vec<Vector2> {
    let num_points = num_points.max(1);
    let t_step = 1.0 / num_points as f32;
    let mut samples = Vec::with_capacity(num_points + 1);
    samples.push(first);
    samples.extend((1..num_points).map(|k| curve(k as f32 * t_step)));
    samples.push(last);
    samples
}

#[cfg(feature = "render")]
mod raylib_conv {
    use super::{Rect, Vector2};

    impl From<Vector2> for raylib::prelude::Vector2 {
        fn from(v: Vector2) -> Self {
            raylib::prelude::Vector2 { x: v.x, y: v.y }
        }
    }

    impl From<raylib::prelude::Vector2> for Vector2 {
        fn from(v: raylib::prelude::Vector2) -> Self {
            Vector2::new(v.x, v.y)
        }
    }

    impl From<Rect> for raylib::prelude::Rectangle {
        fn from(r: Rect) -> Self {
            raylib::prelude::Rectangle {
                x: r.x,
                y: r.y,
                width: r.w,
                height: r.h,
            }
        }
    }
}
