use crate::error::{Result, ShapeError};
use crate::shapes::{tags, GeometryStore, Primitive, ShapeGeometry, Solid};

fn check_extents(kind: &str, extents: &[f64]) -> Result<()> {
    if extents.iter().any(|v| *v < 0.0) {
        return Err(ShapeError::InvalidArgument(format!(
            "{kind} half-lengths must be non-negative"
        ))
        .into());
    }
    Ok(())
}

/// Creates a trapezoid with one varying width: x widths `x1`/`x2` at
/// -dz/+dz, constant y half-width.
pub struct MakeTrd1 {
    name: String,
    x1: f64,
    x2: f64,
    y: f64,
    dz: f64,
}

impl MakeTrd1 {
    /// Creates a new `MakeTrd1` operation.
    #[must_use]
    pub fn new(x1: f64, x2: f64, y: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            x1,
            x2,
            y,
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
    /// Returns an error if a half-length is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_extents("Trd1", &[self.x1, self.x2, self.y, self.dz])?;
        Ok(store.insert(
            self.name.clone(),
            tags::TRD1,
            ShapeGeometry::Primitive(Primitive::Trd1 {
                x1: self.x1,
                x2: self.x2,
                y: self.y,
                dz: self.dz,
            }),
            true,
        ))
    }
}

/// Creates a trapezoid with two varying widths: x widths `x1`/`x2` and y
/// widths `y1`/`y2` at -dz/+dz.
pub struct MakeTrd2 {
    name: String,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    dz: f64,
}

impl MakeTrd2 {
    /// Creates a new `MakeTrd2` operation.
    #[must_use]
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, dz: f64) -> Self {
        Self {
            name: String::new(),
            x1,
            x2,
            y1,
            y2,
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
    /// Returns an error if a half-length is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_extents("Trd2", &[self.x1, self.x2, self.y1, self.y2, self.dz])?;
        Ok(store.insert(
            self.name.clone(),
            tags::TRD2,
            ShapeGeometry::Primitive(Primitive::Trd2 {
                x1: self.x1,
                x2: self.x2,
                y1: self.y1,
                y2: self.y2,
                dz: self.dz,
            }),
            true,
        ))
    }
}

/// Creates a general trapezoid: sheared trapezoidal faces at -dz and +dz
/// joined by a tilted axis.
pub struct MakeTrap {
    name: String,
    dz: f64,
    theta: f64,
    phi: f64,
    h1: f64,
    bl1: f64,
    tl1: f64,
    alpha1: f64,
    h2: f64,
    bl2: f64,
    tl2: f64,
    alpha2: f64,
}

impl MakeTrap {
    /// Creates a new `MakeTrap` operation. `theta`, `phi` and the two
    /// shear angles are in degrees.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        dz: f64,
        theta: f64,
        phi: f64,
        h1: f64,
        bl1: f64,
        tl1: f64,
        alpha1: f64,
        h2: f64,
        bl2: f64,
        tl2: f64,
        alpha2: f64,
    ) -> Self {
        Self {
            name: String::new(),
            dz,
            theta,
            phi,
            h1,
            bl1,
            tl1,
            alpha1,
            h2,
            bl2,
            tl2,
            alpha2,
        }
    }

    /// Convenience form from full outer extents: a right trapezoid with
    /// untilted axis, x widths `px` (at -y) and `pltx` (at +y).
    #[must_use]
    pub fn from_extents(pz: f64, py: f64, px: f64, pltx: f64) -> Self {
        let alpha = ((pltx - px) / py).to_degrees();
        Self::new(
            pz / 2.0,
            0.0,
            0.0,
            py / 2.0,
            px / 2.0,
            pltx / 2.0,
            alpha,
            py / 2.0,
            px / 2.0,
            pltx / 2.0,
            alpha,
        )
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
    /// Returns an error if a half-length is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        check_extents(
            "Trap",
            &[
                self.dz, self.h1, self.bl1, self.tl1, self.h2, self.bl2, self.tl2,
            ],
        )?;
        Ok(store.insert(
            self.name.clone(),
            tags::TRAP,
            ShapeGeometry::Primitive(Primitive::Trap {
                dz: self.dz,
                theta: self.theta.to_radians(),
                phi: self.phi.to_radians(),
                h1: self.h1,
                bl1: self.bl1,
                tl1: self.tl1,
                alpha1: self.alpha1.to_radians(),
                h2: self.h2,
                bl2: self.bl2,
                tl2: self.tl2,
                alpha2: self.alpha2.to_radians(),
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
    fn trd2_reads_back_dimensions() {
        let mut store = GeometryStore::new();
        let solid = MakeTrd2::new(3.0, 4.0, 2.0, 2.0, 5.0)
            .execute(&mut store)
            .unwrap();
        assert_eq!(
            solid.dimensions(&store).unwrap(),
            vec![3.0, 4.0, 2.0, 2.0, 5.0]
        );
    }

    #[test]
    fn trd1_negative_extent_fails() {
        let mut store = GeometryStore::new();
        assert!(MakeTrd1::new(1.0, -2.0, 1.0, 1.0)
            .execute(&mut store)
            .is_err());
    }

    #[test]
    fn trap_from_extents_halves_lengths() {
        let mut store = GeometryStore::new();
        let solid = MakeTrap::from_extents(10.0, 4.0, 6.0, 6.0)
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[0] - 5.0).abs() < 1e-12); // dz
        assert!((dims[3] - 2.0).abs() < 1e-12); // h1
        assert!((dims[4] - 3.0).abs() < 1e-12); // bl1
        assert!(dims[6].abs() < 1e-12); // alpha1, untapered
    }

    #[test]
    fn trap_bounding_box_covers_shear() {
        let mut store = GeometryStore::new();
        let solid = MakeTrap::new(
            5.0, 0.0, 0.0, 2.0, 1.0, 1.0, 45.0, 2.0, 1.0, 1.0, 45.0,
        )
        .execute(&mut store)
        .unwrap();
        let bb = solid.bounding_box(&store).unwrap();
        // Top edge sheared by h * tan(45) = 2.
        assert!((bb.max.x - 3.0).abs() < 1e-9);
    }
}
