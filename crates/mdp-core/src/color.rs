// ABOUTME: Color representation for pane and divider fills.
// ABOUTME: Provides the default palette used by the split view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Header bar blue (#93c5fd)
    pub const HEADER: Self = Self::rgb(0.576, 0.773, 0.992);

    /// Resting divider gray (#d6d3d1)
    pub const DIVIDER: Self = Self::rgb(0.839, 0.827, 0.820);

    /// Divider under the pointer (#f8fafc)
    pub const DIVIDER_HOVER: Self = Self::rgb(0.973, 0.980, 0.988);

    /// Divider being dragged (#a8a29e)
    pub const DIVIDER_ACTIVE: Self = Self::rgb(0.659, 0.635, 0.620);

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
