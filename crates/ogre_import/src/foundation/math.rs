//! Math utilities and types
//!
//! Vector aliases plus the two fixed conversions applied while ingesting OGRE
//! data: the axis remap from OGRE's Y-up frame into the target's Z-up frame,
//! and the vertical flip of texture coordinates.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Convert an OGRE-space vector into target space.
///
/// The mapping is the fixed permutation `(x, y, z) -> (x, -z, y)`. Positions
/// pass their scale factor; normals pass `1.0`.
pub fn remap_axes(x: f32, y: f32, z: f32, scale: f32) -> Vec3 {
    Vec3::new(x * scale, -z * scale, y * scale)
}

/// Flip a texture coordinate vertically.
///
/// OGRE puts the texture origin at the top left, the target at the bottom
/// left. Applying the flip twice yields the input again.
pub fn flip_uv(u: f32, v: f32) -> Vec2 {
    Vec2::new(u, 1.0 - v)
}

/// Convert a floating point RGBA colour to 8-bit channels.
///
/// Each channel is clamped to `[0, 1]` and truncated after scaling by 255.
pub fn colour_to_rgba8(colour: &Vec4) -> [u8; 4] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [
        channel(colour.x),
        channel(colour.y),
        channel(colour.z),
        channel(colour.w),
    ]
}
