use crate::error::{Result, ShapeError};
use crate::shapes::{tags, GeometryStore, Primitive, ShapeGeometry, Solid};

fn check_radial_pair(kind: &str, rmin: f64, rmax: f64) -> Result<()> {
    if rmin < 0.0 || rmax < 0.0 || rmin > rmax {
        return Err(ShapeError::InvalidArgument(format!(
            "{kind} requires 0 <= rmin <= rmax"
        ))
        .into());
    }
    Ok(())
}

/// Creates a full cone: two radial pairs at -dz and +dz.
pub struct MakeCone {
    name: String,
    dz: f64,
    rmin1: f64,
    rmax1: f64,
    rmin2: f64,
    rmax2: f64,
}

impl MakeCone {
    /// Creates a new `MakeCone` operation.
    #[must_use]
    pub fn new(dz: f64, rmin1: f64, rmax1: f64, rmin2: f64, rmax2: f64) -> Self {
        Self {
            name: String::new(),
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the cone in the geometry store.
    ///
    /// # Errors
    ///
    /// Returns an error if either radial pair is negative or out of order.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_radial_pair("cone", self.rmin1, self.rmax1)?;
        check_radial_pair("cone", self.rmin2, self.rmax2)?;
        Ok(store.insert(
            self.name.clone(),
            tags::CONE,
            ShapeGeometry::Primitive(Primitive::Cone {
                dz: self.dz,
                rmin1: self.rmin1,
                rmax1: self.rmax1,
                rmin2: self.rmin2,
                rmax2: self.rmax2,
            }),
            true,
        ))
    }
}

/// Creates a cone segment: a cone restricted to a phi range.
pub struct MakeConeSegment {
    name: String,
    dz: f64,
    rmin1: f64,
    rmax1: f64,
    rmin2: f64,
    rmax2: f64,
    start_phi: f64,
    end_phi: f64,
}

impl MakeConeSegment {
    /// Creates a new `MakeConeSegment` operation. Phi angles are in
    /// degrees.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        dz: f64,
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
        start_phi: f64,
        end_phi: f64,
    ) -> Self {
        Self {
            name: String::new(),
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
            start_phi,
            end_phi,
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
    /// Returns an error if either radial pair is negative or out of order.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_radial_pair("cone segment", self.rmin1, self.rmax1)?;
        check_radial_pair("cone segment", self.rmin2, self.rmax2)?;
        Ok(store.insert(
            self.name.clone(),
            tags::CONE_SEGMENT,
            ShapeGeometry::Primitive(Primitive::ConeSegment {
                dz: self.dz,
                rmin1: self.rmin1,
                rmax1: self.rmax1,
                rmin2: self.rmin2,
                rmax2: self.rmax2,
                start_phi: self.start_phi.to_radians(),
                end_phi: self.end_phi.to_radians(),
            }),
            true,
        ))
    }
}

/// Creates a spherical shell section.
pub struct MakeSphere {
    name: String,
    rmin: f64,
    rmax: f64,
    start_theta: f64,
    end_theta: f64,
    start_phi: f64,
    end_phi: f64,
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation. Theta and phi angles are in
    /// degrees.
    #[must_use]
    pub fn new(
        rmin: f64,
        rmax: f64,
        start_theta: f64,
        end_theta: f64,
        start_phi: f64,
        end_phi: f64,
    ) -> Self {
        Self {
            name: String::new(),
            rmin,
            rmax,
            start_theta,
            end_theta,
            start_phi,
            end_phi,
        }
    }

    /// Creates a full spherical shell.
    #[must_use]
    pub fn full(rmin: f64, rmax: f64) -> Self {
        Self::new(rmin, rmax, 0.0, 180.0, 0.0, 360.0)
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
    /// Returns an error if the radii are negative or out of order.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_radial_pair("sphere", self.rmin, self.rmax)?;
        Ok(store.insert(
            self.name.clone(),
            tags::SPHERE,
            ShapeGeometry::Primitive(Primitive::Sphere {
                rmin: self.rmin,
                rmax: self.rmax,
                start_theta: self.start_theta.to_radians(),
                end_theta: self.end_theta.to_radians(),
                start_phi: self.start_phi.to_radians(),
                end_phi: self.end_phi.to_radians(),
            }),
            true,
        ))
    }
}

/// Creates a torus section around the z axis.
pub struct MakeTorus {
    name: String,
    r: f64,
    rmin: f64,
    rmax: f64,
    start_phi: f64,
    delta_phi: f64,
}

impl MakeTorus {
    /// Creates a new `MakeTorus` operation with ring radius `r`. Phi
    /// angles are in degrees.
    #[must_use]
    pub fn new(r: f64, rmin: f64, rmax: f64, start_phi: f64, delta_phi: f64) -> Self {
        Self {
            name: String::new(),
            r,
            rmin,
            rmax,
            start_phi,
            delta_phi,
        }
    }

    /// Creates a full torus.
    #[must_use]
    pub fn full(r: f64, rmin: f64, rmax: f64) -> Self {
        Self::new(r, rmin, rmax, 0.0, 360.0)
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
    /// Returns an error if the tube radii are negative or out of order, or
    /// exceed the ring radius.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_radial_pair("torus", self.rmin, self.rmax)?;
        if self.rmax > self.r {
            return Err(ShapeError::InvalidArgument(
                "torus tube radius must not exceed ring radius".into(),
            )
            .into());
        }
        Ok(store.insert(
            self.name.clone(),
            tags::TORUS,
            ShapeGeometry::Primitive(Primitive::Torus {
                r: self.r,
                rmin: self.rmin,
                rmax: self.rmax,
                start_phi: self.start_phi.to_radians(),
                delta_phi: self.delta_phi.to_radians(),
            }),
            true,
        ))
    }
}

/// Creates an ellipsoid of revolution truncated at -dz and +dz, with
/// radii `rlo` and `rhi` at the cut planes.
pub struct MakeParaboloid {
    name: String,
    rlo: f64,
    rhi: f64,
    dz: f64,
}

impl MakeParaboloid {
    /// Creates a new `MakeParaboloid` operation.
    #[must_use]
    pub fn new(rlo: f64, rhi: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            rlo,
            rhi,
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
    /// Returns an error if a radius is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rlo < 0.0 || self.rhi < 0.0 {
            return Err(
                ShapeError::InvalidArgument("paraboloid radii must be non-negative".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::PARABOLOID,
            ShapeGeometry::Primitive(Primitive::Paraboloid {
                rlo: self.rlo,
                rhi: self.rhi,
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
    fn cone_segment_roundtrips_angles() {
        let mut store = GeometryStore::new();
        let solid = MakeConeSegment::new(5.0, 1.0, 2.0, 1.5, 2.5, 15.0, 205.0)
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[5] - 15.0).abs() < 1e-9);
        assert!((dims[6] - 205.0).abs() < 1e-9);
    }

    #[test]
    fn cone_inverted_radii_fail() {
        let mut store = GeometryStore::new();
        assert!(MakeCone::new(5.0, 2.0, 1.0, 0.0, 1.0)
            .execute(&mut store)
            .is_err());
    }

    #[test]
    fn full_sphere_spans_pi_theta() {
        let mut store = GeometryStore::new();
        let solid = MakeSphere::full(0.0, 7.0).execute(&mut store).unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[3] - 180.0).abs() < 1e-9);
        assert!((dims[5] - 360.0).abs() < 1e-9);
    }

    #[test]
    fn torus_tube_larger_than_ring_fails() {
        let mut store = GeometryStore::new();
        assert!(MakeTorus::full(2.0, 0.0, 3.0).execute(&mut store).is_err());
    }

    #[test]
    fn torus_bounding_box_covers_ring() {
        let mut store = GeometryStore::new();
        let solid = MakeTorus::full(10.0, 0.0, 2.0).execute(&mut store).unwrap();
        let bb = solid.bounding_box(&store).unwrap();
        assert!((bb.max.x - 12.0).abs() < 1e-12);
        assert!((bb.max.z - 2.0).abs() < 1e-12);
    }
}
