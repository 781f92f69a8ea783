use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EulerAngles
// ---------------------------------------------------------------------------

/// An intrinsic-XYZ rotation triple in radians.
///
/// Used for the per-entry rotation offset. Components are kept in [-π, π];
/// [`clamped`](Self::clamped) re-establishes the range after arbitrary writes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerAngles {
    /// The zero rotation.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Exact-zero test.
    ///
    /// Intentionally not tolerance-based: a zero triple is the solver's
    /// "no offset needed" signal, and snapped jitter rounds to exactly 0.0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Each component clamped to [-π, π].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(-PI, PI),
            y: self.y.clamp(-PI, PI),
            z: self.z.clamp(-PI, PI),
        }
    }

    /// Components as an `[x, y, z]` array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for EulerAngles {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

// ---------------------------------------------------------------------------
// AxisMask
// ---------------------------------------------------------------------------

/// Per-axis enable flags for the location-copy constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMask {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisMask {
    /// All axes enabled.
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };

    #[must_use]
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Whether any axis is enabled.
    #[must_use]
    pub const fn any(self) -> bool {
        self.x || self.y || self.z
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<[bool; 3]> for AxisMask {
    fn from(v: [bool; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
