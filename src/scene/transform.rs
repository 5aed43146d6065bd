//! Per-draw model transforms.

use glam::{Mat4, Vec3};

/// Scale, rotation and translation of one drawn object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation about the world X, Y and Z axes, in degrees.
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self::new(Vec3::ONE, Vec3::ZERO, Vec3::ZERO);

    pub const fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// Composes `translation * rotation_x * rotation_y * rotation_z * scale`.
    ///
    /// The rotation order is the same whichever angles are zero.
    pub fn model_matrix(&self) -> Mat4 {
        let radians = Vec3::new(
            self.rotation_degrees.x.to_radians(),
            self.rotation_degrees.y.to_radians(),
            self.rotation_degrees.z.to_radians(),
        );
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(radians.x)
            * Mat4::from_rotation_y(radians.y)
            * Mat4::from_rotation_z(radians.z)
            * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation_is_translate_times_scale() {
        let scale = Vec3::new(20.0, 1.0, 10.0);
        let translation = Vec3::new(-3.0, 0.63, 2.0);
        let matrix = Transform::new(scale, Vec3::ZERO, translation).model_matrix();
        let expected = Mat4::from_translation(translation) * Mat4::from_scale(scale);
        assert!(matrix.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_identity() {
        assert_eq!(Transform::default().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        // Rz first takes +X to +Y, then Rx takes +Y to +Z.
        let matrix =
            Transform::new(Vec3::ONE, Vec3::new(90.0, 0.0, 90.0), Vec3::ZERO).model_matrix();
        let moved = matrix.transform_point3(Vec3::X);
        assert!(moved.abs_diff_eq(Vec3::Z, 1e-6), "{moved:?}");
    }

    #[test]
    fn test_scale_applies_before_rotation_and_translation() {
        let transform = Transform::new(
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::new(0.0, 0.0, 90.0),
            Vec3::new(0.0, 0.0, 5.0),
        );
        let moved = transform.model_matrix().transform_point3(Vec3::X);
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 2.0, 5.0), 1e-5), "{moved:?}");
    }

    #[test]
    fn test_translation_is_linear() {
        let a = Transform::new(Vec3::ONE, Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)).model_matrix();
        let b = Transform::new(Vec3::ONE, Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)).model_matrix();
        let origin_a = a.transform_point3(Vec3::ZERO);
        let origin_b = b.transform_point3(Vec3::ZERO);
        assert!((origin_a * 2.0).abs_diff_eq(origin_b, 1e-6));
    }
}
