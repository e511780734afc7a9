//! Screen geometry: points, displacement vectors, regions and orientation.
//!
//! All coordinates are logical pixels in screen space with `y` growing
//! downwards, so an upward swipe has a negative `dy`.
//!
//! A player's region may be rotated so that the player sitting across the
//! table reads it upright. [`Orientation`] maps screen-space vectors into
//! the region's local frame; sides and swipe directions are always judged
//! in that local frame.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A position in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).length()
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Self::Output {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    /// Create a new vector.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Vector) -> f32 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Component-wise average of two vectors.
    #[must_use]
    pub fn average(self, other: Vector) -> Vector {
        Vector::new((self.dx + other.dx) / 2.0, (self.dy + other.dy) / 2.0)
    }

    /// Cosine of the angle between two vectors.
    ///
    /// Returns `None` when either vector has zero length.
    #[must_use]
    pub fn cos_angle(self, other: Vector) -> Option<f32> {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            None
        } else {
            Some(self.dot(other) / denom)
        }
    }
}

/// Compass direction of a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction of the dominant axis of a displacement.
    ///
    /// Ties between the axes resolve to the vertical axis.
    #[must_use]
    pub fn from_vector(v: Vector) -> Direction {
        if v.dx.abs() > v.dy.abs() {
            if v.dx < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if v.dy < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Is this `Up` or `Down`?
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Unit vector pointing in this direction (screen space).
    #[must_use]
    pub const fn unit(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0.0, -1.0),
            Direction::Down => Vector::new(0.0, 1.0),
            Direction::Left => Vector::new(-1.0, 0.0),
            Direction::Right => Vector::new(1.0, 0.0),
        }
    }
}

/// Half of a player's counter region.
///
/// The left half decrements, the right half increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// `-1` for the left side, `+1` for the right side.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// Rotation of a player's region relative to the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Reads upright.
    #[default]
    Upright,
    /// Rotated 180 degrees (player across the table).
    Inverted,
    /// Rotated 90 degrees clockwise.
    RotatedClockwise,
    /// Rotated 90 degrees counter-clockwise.
    RotatedCounterClockwise,
}

impl Orientation {
    /// Map a screen-space vector into the region's local frame.
    #[must_use]
    pub fn to_local(self, v: Vector) -> Vector {
        match self {
            Orientation::Upright => v,
            Orientation::Inverted => Vector::new(-v.dx, -v.dy),
            Orientation::RotatedClockwise => Vector::new(v.dy, -v.dx),
            Orientation::RotatedCounterClockwise => Vector::new(-v.dy, v.dx),
        }
    }

    /// Map a screen-space direction into the region's local frame.
    #[must_use]
    pub fn local_direction(self, screen: Direction) -> Direction {
        Direction::from_vector(self.to_local(screen.unit()))
    }
}

/// An axis-aligned screen region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    /// Does the rectangle contain `p` (edges inclusive)?
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }

    /// Which local half of the region `p` falls in.
    ///
    /// The exact center line counts as the right side.
    #[must_use]
    pub fn side_of(&self, p: Point, orientation: Orientation) -> Side {
        let local = orientation.to_local(p - self.center());
        if local.dx < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}
