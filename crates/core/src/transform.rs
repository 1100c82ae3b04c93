//! 4x4 affine transform with chainable, order-sensitive composition.
//!
//! Each operation right-multiplies the accumulated matrix
//! (`m = m * op`), so operations apply to a point in reverse call order:
//! the most recently added operation acts on the point first. Writing
//! `translate → rotate → scale` therefore scales the object, rotates it,
//! then moves it into place.
//!
//! `Transform` is a value type. [`Transform::snapshot`] hands out an
//! independent copy so a child part can branch from an ancestor's matrix
//! without later ancestor mutations leaking into it.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A composable 4x4 affine transform.
///
/// Serializes as the 16 matrix entries in column-major order, which is also
/// the layout the shader uniform expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 16]", into = "[f32; 16]")]
pub struct Transform(Mat4);

impl Transform {
    pub const IDENTITY: Transform = Transform(Mat4::IDENTITY);

    /// The identity transform.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Resets to identity.
    pub fn set_identity(&mut self) -> &mut Self {
        self.0 = Mat4::IDENTITY;
        self
    }

    /// Appends a translation.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.0 *= Mat4::from_translation(Vec3::new(x, y, z));
        self
    }

    /// Appends a rotation of `degrees` about the axis `(x, y, z)`.
    ///
    /// The axis need not be normalized. A zero-length axis appends nothing.
    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let axis = Vec3::new(x, y, z);
        if let Some(axis) = axis.try_normalize() {
            self.0 *= Mat4::from_axis_angle(axis, degrees.to_radians());
        }
        self
    }

    /// Appends a non-uniform scale.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.0 *= Mat4::from_scale(Vec3::new(x, y, z));
        self
    }

    /// Independent copy of the current accumulated matrix.
    pub fn snapshot(&self) -> Transform {
        *self
    }

    /// Maps a point through the transform (w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.0.transform_point3(p)
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> Mat4 {
        self.0
    }

    /// Column-major entries, ready for `uniformMatrix4fv`.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Transform {
    fn from(m: Mat4) -> Self {
        Self(m)
    }
}

impl From<[f32; 16]> for Transform {
    fn from(cols: [f32; 16]) -> Self {
        Self(Mat4::from_cols_array(&cols))
    }
}

impl From<Transform> for [f32; 16] {
    fn from(t: Transform) -> Self {
        t.to_cols_array()
    }
}
