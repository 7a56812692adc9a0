//! Color sample type.
//!
//! A [`Vec3f`] is one entry of a 3D LUT: the output color stored at a grid
//! point. Components are nominally in `[0, 1]` but nothing enforces it;
//! LUT files may legitimately carry values slightly outside that range.

use std::fmt;
use std::ops::{Add, Mul};

/// Three 32-bit float color components.
///
/// # Memory Layout
///
/// `#[repr(C)]` so a `&[Vec3f]` can be reinterpreted as packed `f32` triplets.
///
/// # Example
///
/// ```
/// use lutcam_core::Vec3f;
///
/// let c = Vec3f::new(0.25, 0.5, 0.75);
/// assert_eq!(c.mean(), 0.5);
/// assert_eq!(Vec3f::default(), Vec3f::splat(0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Vec3f {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Vec3f {
    /// Creates a sample from its components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a sample with all three components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Creates a sample from an `[r, g, b]` array.
    #[inline]
    pub const fn from_array(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    /// Returns the components as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Arithmetic mean of the three components.
    #[inline]
    pub fn mean(self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Clamps every component to `[0, 1]`.
    #[inline]
    pub fn saturate(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

impl From<[f32; 3]> for Vec3f {
    #[inline]
    fn from(rgb: [f32; 3]) -> Self {
        Self::from_array(rgb)
    }
}

impl From<Vec3f> for [f32; 3] {
    #[inline]
    fn from(v: Vec3f) -> Self {
        v.to_array()
    }
}

impl Add for Vec3f {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Vec3f {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl fmt::Display for Vec3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R={:.6}, G={:.6}, B={:.6}", self.r, self.g, self.b)
    }
}
