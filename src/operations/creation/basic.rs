use crate::error::{Result, ShapeError};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::shapes::{tags, GeometryStore, Primitive, ShapeGeometry, Solid};

/// Creates a box with the given half-lengths.
pub struct MakeBox {
    name: String,
    dx: f64,
    dy: f64,
    dz: f64,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            dx,
            dy,
            dz,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the box in the geometry store.
    ///
    /// # Errors
    ///
    /// Returns an error if any half-length is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.dx < 0.0 || self.dy < 0.0 || self.dz < 0.0 {
            return Err(
                ShapeError::InvalidArgument("box half-lengths must be non-negative".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::BOX,
            ShapeGeometry::Primitive(Primitive::Box {
                dx: self.dx,
                dy: self.dy,
                dz: self.dz,
            }),
            true,
        ))
    }
}

/// Creates a half-space: everything on the anti-normal side of the plane
/// through `point`.
pub struct MakeHalfSpace {
    name: String,
    point: Point3,
    normal: Vector3,
}

impl MakeHalfSpace {
    /// Creates a new `MakeHalfSpace` operation.
    #[must_use]
    pub fn new(point: Point3, normal: Vector3) -> Self {
        Self {
            name: String::new(),
            point,
            normal,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the half-space in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.normal.norm() < TOLERANCE {
            return Err(
                ShapeError::InvalidArgument("half-space normal must be non-zero".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::HALF_SPACE,
            ShapeGeometry::Primitive(Primitive::HalfSpace {
                point: self.point,
                normal: self.normal,
            }),
            true,
        ))
    }
}

/// Creates a shapeless placeholder, used as an assembly envelope.
pub struct MakeShapeless {
    name: String,
}

impl MakeShapeless {
    /// Creates a new `MakeShapeless` operation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
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
    /// Infallible today; kept fallible for factory uniformity.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        Ok(store.insert(
            self.name.clone(),
            tags::SHAPELESS,
            ShapeGeometry::Primitive(Primitive::Shapeless),
            true,
        ))
    }
}

impl Default for MakeShapeless {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a scaled view of an existing shape.
pub struct MakeScale {
    name: String,
    base: Solid,
    sx: f64,
    sy: f64,
    sz: f64,
}

impl MakeScale {
    /// Creates a new `MakeScale` operation.
    #[must_use]
    pub fn new(base: Solid, sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            name: String::new(),
            base,
            sx,
            sy,
            sz,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the scaled shape in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the base handle is unbound or a scale factor is
    /// zero.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        let base = self.base.require(store)?;
        if self.sx.abs() < TOLERANCE || self.sy.abs() < TOLERANCE || self.sz.abs() < TOLERANCE {
            return Err(
                ShapeError::InvalidArgument("scale factors must be non-zero".into()).into(),
            );
        }
        Ok(store.insert(
            self.name.clone(),
            tags::SCALE,
            ShapeGeometry::Scaled {
                base,
                sx: self.sx,
                sy: self.sy,
                sz: self.sz,
            },
            true,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn box_reads_back_dimensions() {
        let mut store = GeometryStore::new();
        let solid = MakeBox::new(1.0, 2.0, 3.0)
            .named("world")
            .execute(&mut store)
            .unwrap();
        assert_eq!(solid.title(&store).unwrap(), "Box");
        assert_eq!(solid.name(&store).unwrap(), "world");
        assert_eq!(solid.dimensions(&store).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_box_extent_fails() {
        let mut store = GeometryStore::new();
        assert!(MakeBox::new(-1.0, 2.0, 3.0).execute(&mut store).is_err());
    }

    #[test]
    fn half_space_zero_normal_fails() {
        let mut store = GeometryStore::new();
        let result = MakeHalfSpace::new(Point3::origin(), Vector3::zeros()).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn scale_of_unbound_base_fails() {
        let mut store = GeometryStore::new();
        let result = MakeScale::new(Solid::unbound(), 1.0, 1.0, 1.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn scale_marshals_factors() {
        let mut store = GeometryStore::new();
        let base = MakeBox::new(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let scaled = MakeScale::new(base, 2.0, 1.0, 0.5).execute(&mut store).unwrap();
        assert_eq!(scaled.dimensions(&store).unwrap(), vec![2.0, 1.0, 0.5]);
        let bb = scaled.bounding_box(&store).unwrap();
        assert!((bb.max.x - 2.0).abs() < 1e-12);
        assert!((bb.max.z - 0.5).abs() < 1e-12);
    }

    #[test]
    fn shapeless_has_empty_dimensions() {
        let mut store = GeometryStore::new();
        let solid = MakeShapeless::new().named("assembly").execute(&mut store).unwrap();
        assert!(solid.dimensions(&store).unwrap().is_empty());
    }
}
