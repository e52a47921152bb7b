use crate::error::{Result, ShapeError};

use super::{Matrix3, Point3, Vector3, TOLERANCE};

/// A proper 3D rotation, stored as an orthonormal matrix with determinant +1.
///
/// Constructible from Euler angles, an axis-angle pair, or a general 3x3
/// matrix; every input form is normalized to the same canonical matrix
/// representation. All angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Matrix3);

impl Rotation {
    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Rotation by `angle` around the x axis.
    #[must_use]
    pub fn about_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        ))
    }

    /// Rotation by `angle` around the y axis.
    #[must_use]
    pub fn about_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        ))
    }

    /// Rotation by `angle` around the z axis.
    #[must_use]
    pub fn about_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Rotation from ZYX Euler angles: first around z, then y, then x.
    #[must_use]
    pub fn from_euler_zyx(z: f64, y: f64, x: f64) -> Self {
        Self(Self::about_z(z).0 * Self::about_y(y).0 * Self::about_x(x).0)
    }

    /// Rotation by `angle` around an arbitrary axis (Rodrigues' formula).
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is zero-length.
    pub fn about_axis(axis: Vector3, angle: f64) -> Result<Self> {
        let len = axis.norm();
        if len < TOLERANCE {
            return Err(
                ShapeError::InvalidArgument("rotation axis must be non-zero".into()).into(),
            );
        }
        let axis = axis / len;
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        #[allow(clippy::suspicious_operation_groupings)]
        Ok(Self(Matrix3::new(
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
        )))
    }

    /// Rotation from a general 3x3 matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not orthonormal with
    /// determinant +1.
    pub fn from_matrix(matrix: Matrix3) -> Result<Self> {
        let gram = matrix.transpose() * matrix;
        if (gram - Matrix3::identity()).abs().max() > 1e-9 {
            return Err(
                ShapeError::InvalidArgument("rotation matrix must be orthonormal".into()).into(),
            );
        }
        if (matrix.determinant() - 1.0).abs() > 1e-9 {
            return Err(ShapeError::InvalidArgument(
                "rotation matrix must have determinant +1".into(),
            )
            .into());
        }
        Ok(Self(matrix))
    }

    /// Returns the canonical matrix form.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.0
    }

    /// Applies the rotation to a vector.
    #[must_use]
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.0 * v
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// A rigid placement: rotation followed by translation, no scaling or shear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidTransform {
    rotation: Rotation,
    translation: Vector3,
}

impl RigidTransform {
    /// The identity placement.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a placement from a rotation and a translation.
    #[must_use]
    pub fn new(rotation: Rotation, translation: Vector3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            rotation: Rotation::identity(),
            translation,
        }
    }

    /// A pure rotation.
    #[must_use]
    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            rotation,
            translation: Vector3::zeros(),
        }
    }

    /// Returns the rotation part.
    #[must_use]
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Returns the translation part.
    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    /// Applies the placement to a point: rotate, then translate.
    #[must_use]
    pub fn apply_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotation.apply(&point.coords) + self.translation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn about_z_quarter_turn_maps_x_to_y() {
        let r = Rotation::about_z(FRAC_PI_2);
        let v = r.apply(&Vector3::x());
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn about_axis_matches_about_z() {
        let a = Rotation::about_axis(Vector3::z(), 0.7).unwrap();
        let b = Rotation::about_z(0.7);
        assert!((a.matrix() - b.matrix()).abs().max() < 1e-12);
    }

    #[test]
    fn zero_axis_is_rejected() {
        assert!(Rotation::about_axis(Vector3::zeros(), 1.0).is_err());
    }

    #[test]
    fn euler_zyx_composes_in_order() {
        let r = Rotation::from_euler_zyx(FRAC_PI_2, 0.0, FRAC_PI_2);
        let expected = Rotation::about_z(FRAC_PI_2).matrix() * Rotation::about_x(FRAC_PI_2).matrix();
        assert!((r.matrix() - expected).abs().max() < 1e-12);
    }

    #[test]
    fn from_matrix_accepts_rotation() {
        let m = *Rotation::about_y(1.2).matrix();
        let r = Rotation::from_matrix(m).unwrap();
        assert!((r.matrix() - m).abs().max() < 1e-12);
    }

    #[test]
    fn from_matrix_rejects_scaling() {
        let m = Matrix3::identity() * 2.0;
        assert!(Rotation::from_matrix(m).is_err());
    }

    #[test]
    fn from_matrix_rejects_reflection() {
        let mut m = Matrix3::identity();
        m[(0, 0)] = -1.0;
        assert!(Rotation::from_matrix(m).is_err());
    }

    #[test]
    fn transform_rotates_then_translates() {
        let tf = RigidTransform::new(Rotation::about_z(PI), Vector3::new(1.0, 0.0, 0.0));
        let p = tf.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!((p - Point3::origin()).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn default_is_identity() {
        let tf = RigidTransform::default();
        let p = Point3::new(3.0, -2.0, 5.0);
        assert!((tf.apply_point(&p) - p).norm() < 1e-12);
    }
}
