use std::f64::consts::TAU;

use crate::error::{Result, ShapeError};
use crate::math::Vector3;
use crate::shapes::{tags, GeometryStore, Primitive, ShapeGeometry, Solid};

/// Radian tolerance under which a phi range counts as a full revolution.
const FULL_PHI_EPSILON: f64 = 1e-5;

/// Creates a tube or tube segment.
///
/// A phi range within [`FULL_PHI_EPSILON`] of a full revolution is
/// widened to exactly `[startPhi, startPhi + 360]`, avoiding a degenerate
/// zero-width segment at the seam.
pub struct MakeTube {
    name: String,
    rmin: f64,
    rmax: f64,
    dz: f64,
    start_phi: f64,
    end_phi: f64,
}

impl MakeTube {
    /// Creates a new `MakeTube` operation. Phi angles are in degrees.
    #[must_use]
    pub fn new(rmin: f64, rmax: f64, dz: f64, start_phi: f64, end_phi: f64) -> Self {
        Self {
            name: String::new(),
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
        }
    }

    /// Creates a full-revolution tube.
    #[must_use]
    pub fn full(rmin: f64, rmax: f64, dz: f64) -> Self {
        Self::new(rmin, rmax, dz, 0.0, 360.0)
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the tube in the geometry store.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is negative or the radii are out of
    /// order.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rmin < 0.0 || self.rmax < 0.0 {
            return Err(
                ShapeError::InvalidArgument("tube radii must be non-negative".into()).into(),
            );
        }
        if self.rmin > self.rmax {
            return Err(ShapeError::InvalidArgument("tube requires rmin <= rmax".into()).into());
        }
        let start_phi = self.start_phi.to_radians();
        let mut end_phi = self.end_phi.to_radians();
        if (end_phi - start_phi - TAU).abs() < FULL_PHI_EPSILON {
            end_phi = start_phi + TAU;
        }
        Ok(store.insert(
            self.name.clone(),
            tags::TUBE,
            ShapeGeometry::Primitive(Primitive::Tube {
                rmin: self.rmin,
                rmax: self.rmax,
                dz: self.dz,
                start_phi,
                end_phi,
            }),
            true,
        ))
    }
}

/// Creates a tube segment whose end discs are cut by arbitrary planes.
pub struct MakeCutTube {
    name: String,
    rmin: f64,
    rmax: f64,
    dz: f64,
    start_phi: f64,
    end_phi: f64,
    low_normal: Vector3,
    high_normal: Vector3,
}

impl MakeCutTube {
    /// Creates a new `MakeCutTube` operation. Phi angles are in degrees;
    /// the normals are the outward normals of the cutting planes at -dz
    /// and +dz.
    #[must_use]
    pub fn new(
        rmin: f64,
        rmax: f64,
        dz: f64,
        start_phi: f64,
        end_phi: f64,
        low_normal: Vector3,
        high_normal: Vector3,
    ) -> Self {
        Self {
            name: String::new(),
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
            low_normal,
            high_normal,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the cut tube in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is negative, the radii are out of
    /// order, or a cut normal is zero.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rmin < 0.0 || self.rmax < 0.0 || self.rmin > self.rmax {
            return Err(
                ShapeError::InvalidArgument("cut tube requires 0 <= rmin <= rmax".into()).into(),
            );
        }
        if self.low_normal.norm() < crate::math::TOLERANCE
            || self.high_normal.norm() < crate::math::TOLERANCE
        {
            return Err(
                ShapeError::InvalidArgument("cut tube normals must be non-zero".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::CUT_TUBE,
            ShapeGeometry::Primitive(Primitive::CutTube {
                rmin: self.rmin,
                rmax: self.rmax,
                dz: self.dz,
                start_phi: self.start_phi.to_radians(),
                end_phi: self.end_phi.to_radians(),
                low_normal: self.low_normal,
                high_normal: self.high_normal,
            }),
            true,
        ))
    }
}

/// Creates a tube with an elliptical cross-section.
pub struct MakeEllipticalTube {
    name: String,
    a: f64,
    b: f64,
    dz: f64,
}

impl MakeEllipticalTube {
    /// Creates a new `MakeEllipticalTube` operation with semi-axes `a`
    /// (along x) and `b` (along y).
    #[must_use]
    pub fn new(a: f64, b: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            a,
            b,
            dz,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a semi-axis is not positive.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.a <= 0.0 || self.b <= 0.0 {
            return Err(ShapeError::InvalidArgument(
                "elliptical tube semi-axes must be positive".into(),
            )
            .into());
        }
        Ok(store.insert(
            self.name.clone(),
            tags::ELLIPTICAL_TUBE,
            ShapeGeometry::Primitive(Primitive::EllipticalTube {
                a: self.a,
                b: self.b,
                dz: self.dz,
            }),
            true,
        ))
    }
}

/// Creates a hyperbolic tube: inner and outer hyperboloid sheets with the
/// given stereo angles.
pub struct MakeHyperboloid {
    name: String,
    rin: f64,
    stereo_in: f64,
    rout: f64,
    stereo_out: f64,
    dz: f64,
}

impl MakeHyperboloid {
    /// Creates a new `MakeHyperboloid` operation. Stereo angles are in
    /// degrees.
    #[must_use]
    pub fn new(rin: f64, stereo_in: f64, rout: f64, stereo_out: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            rin,
            stereo_in,
            rout,
            stereo_out,
            dz,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is negative or the waist radii are out
    /// of order.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rin < 0.0 || self.rout < 0.0 || self.rin > self.rout {
            return Err(
                ShapeError::InvalidArgument("hyperboloid requires 0 <= rin <= rout".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::HYPERBOLOID,
            ShapeGeometry::Primitive(Primitive::Hyperboloid {
                rin: self.rin,
                stereo_in: self.stereo_in.to_radians(),
                rout: self.rout,
                stereo_out: self.stereo_out.to_radians(),
                dz: self.dz,
            }),
            true,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn near_full_revolution_snaps_to_seam() {
        let mut store = GeometryStore::new();
        let near = MakeTube::new(1.0, 2.0, 5.0, 0.0, 360.0 - 1e-7)
            .execute(&mut store)
            .unwrap();
        let full = MakeTube::new(1.0, 2.0, 5.0, 0.0, 360.0)
            .execute(&mut store)
            .unwrap();
        assert_eq!(
            near.dimensions(&store).unwrap(),
            full.dimensions(&store).unwrap()
        );
    }

    #[test]
    fn segment_phi_range_is_kept() {
        let mut store = GeometryStore::new();
        let solid = MakeTube::new(1.0, 2.0, 5.0, 30.0, 120.0)
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[3] - 30.0).abs() < 1e-9);
        assert!((dims[4] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_radii_fail() {
        let mut store = GeometryStore::new();
        assert!(MakeTube::full(3.0, 2.0, 5.0).execute(&mut store).is_err());
    }

    #[test]
    fn cut_tube_keeps_plane_normals() {
        let mut store = GeometryStore::new();
        let solid = MakeCutTube::new(
            1.0,
            2.0,
            5.0,
            0.0,
            360.0,
            Vector3::new(0.0, -0.5, -1.0),
            Vector3::new(0.0, 0.5, 1.0),
        )
        .execute(&mut store)
        .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert_eq!(dims.len(), 11);
        assert!((dims[6] + 0.5).abs() < 1e-12);
        assert!((dims[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn elliptical_tube_rejects_flat_axis() {
        let mut store = GeometryStore::new();
        assert!(MakeEllipticalTube::new(0.0, 1.0, 2.0)
            .execute(&mut store)
            .is_err());
    }

    #[test]
    fn hyperboloid_marshals_stereo_angles_in_degrees() {
        let mut store = GeometryStore::new();
        let solid = MakeHyperboloid::new(1.0, 10.0, 2.0, 20.0, 5.0)
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[1] - 10.0).abs() < 1e-9);
        assert!((dims[3] - 20.0).abs() < 1e-9);
    }
}
