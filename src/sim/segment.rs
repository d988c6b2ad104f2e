//! Segment geometry for coral skeletons
//!
//! A segment is defined by:
//! - base: anchor point
//! - angle: direction from the horizontal (radians, normalized to (-π, π])
//! - length: distance from base to extremity

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::normalize_angle;

/// A straight segment anchored at its base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub base: DVec2,
    pub angle: f64,
    pub length: f64,
}

impl Segment {
    pub fn new(base: DVec2, angle: f64, length: f64) -> Self {
        Self {
            base,
            angle: normalize_angle(angle),
            length,
        }
    }

    /// Segment running from `from` to `to`
    pub fn between(from: DVec2, to: DVec2) -> Self {
        let d = to - from;
        Self::new(from, d.y.atan2(d.x), d.length())
    }

    /// Unit vector along the segment
    #[inline]
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin())
    }

    /// End point: base + length * (cos θ, sin θ)
    #[inline]
    pub fn extremity(&self) -> DVec2 {
        self.base + self.direction() * self.length
    }

    /// Copy of this segment turned by `delta` radians around its base
    pub fn rotated(&self, delta: f64) -> Self {
        Self::new(self.base, self.angle + delta, self.length)
    }

    /// Copy of this segment with a different length
    pub fn with_length(&self, length: f64) -> Self {
        Self { length, ..*self }
    }

    /// Point at distance `t` from the base along the segment
    pub fn point_at(&self, t: f64) -> DVec2 {
        self.base + self.direction() * t
    }
}
