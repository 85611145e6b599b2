//! World tile coordinates.

use serde::{Deserialize, Serialize};

/// A position in the game world, in tile units.
///
/// `plane` is the vertical level (0 = ground). Distance math treats the
/// plane as a unit-weighted third dimension alongside horizontal tiles;
/// a one-level plane change counts the same as a one-tile step. This is
/// kept for compatibility with historical capture data even though the
/// scales are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePoint {
    /// West-to-east tile coordinate.
    pub x: i32,
    /// South-to-north tile coordinate.
    pub y: i32,
    /// Vertical level, 0-indexed.
    pub plane: i32,
}

impl TilePoint {
    /// Create a tile point from its components.
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Euclidean distance to another point over the (x, y, plane) tuple.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        let dp = f64::from(other.plane) - f64::from(self.plane);
        dp.mul_add(dp, dx.mul_add(dx, dy * dy)).sqrt()
    }
}
