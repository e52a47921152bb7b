use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::math::{RigidTransform, Rotation, Vector3};
use crate::operations::boolean::{compose, compose_tagged};
use crate::operations::creation::{MakeBox, MakeTrd2, MakeTube};
use crate::shapes::{tags, BooleanOp, GeometryStore, Solid};

use super::DerivationRecord;

/// Original construction parameters of a pseudo trapezoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoTrapParams {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub z: f64,
    pub r: f64,
    pub at_minus_z: bool,
}

/// Creates a pseudo trapezoid: a trapezoid whose -z or +z face is rounded
/// by a tube section.
///
/// The sign of `r` selects the mode: negative cuts a concave groove
/// (intersection with the tube), positive adds a convex bulge (union with
/// a trimmed tube). `at_minus_z` selects the rounded face; `x1`/`x2` are
/// the trapezoid's x half-widths there, and the rounding must span the
/// full face (`|r| >= x`).
pub struct MakePseudoTrap {
    name: String,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    z: f64,
    r: f64,
    at_minus_z: bool,
}

impl MakePseudoTrap {
    /// Creates a new `MakePseudoTrap` operation.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, z: f64, r: f64, at_minus_z: bool) -> Self {
        Self {
            name: String::new(),
            x1,
            x2,
            y1,
            y2,
            z,
            r,
            at_minus_z,
        }
    }

    /// Sets the composite name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the derivation, creating the composite in the store and
    /// recording the original parameters in its derivation side table.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters satisfy neither the intersection
    /// nor the union case (`r` zero, or `|r|` smaller than the rounded
    /// face's half-width).
    #[allow(clippy::similar_names)]
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        let x = if self.at_minus_z { self.x1 } else { self.x2 };
        let half_z = self.z;

        if self.r == 0.0 || self.r.abs() < x {
            return Err(
                ShapeError::ConstraintViolation("Check parameters of the PseudoTrap".into())
                    .into(),
            );
        }

        // Displacement of the tube w.r.t. the trapezoid and the opening
        // angle spanned by the rounded face.
        let delta = (self.r * self.r - x * x).sqrt();
        let half_opening = (x / self.r.abs()).asin().to_degrees();

        let (intersec, h, displacement, start_phi) = if self.r < 0.0 {
            // Tube half-height slightly above the taller face so the cut
            // covers it completely.
            let h = self.y1.max(self.y2) * 1.05;
            if self.at_minus_z {
                (true, h, -half_z - delta, 90.0 - half_opening)
            } else {
                (true, h, half_z + delta, -90.0 - half_opening)
            }
        } else if self.at_minus_z {
            (false, self.y1, -half_z + delta, 270.0 - half_opening)
        } else {
            (false, self.y2, half_z - delta, 90.0 - half_opening)
        };

        debug!(
            x1 = self.x1,
            x2 = self.x2,
            y1 = self.y1,
            y2 = self.y2,
            half_z,
            "pseudo trap trapezoid"
        );
        debug!(
            r = self.r.abs(),
            h,
            start_phi,
            end_phi = start_phi + 2.0 * half_opening,
            "pseudo trap tube segment"
        );

        let trap = MakeTrd2::new(self.x1, self.x2, self.y1, self.y2, half_z)
            .named(&format!("{}Trd2", self.name))
            .execute(store)?;
        let tubs = MakeTube::new(
            0.0,
            self.r.abs(),
            h,
            start_phi,
            start_phi + 2.0 * half_opening,
        )
        .named(&format!("{}Tubs", self.name))
        .execute(store)?;

        let placement = RigidTransform::new(
            Rotation::about_x(FRAC_PI_2),
            Vector3::new(0.0, 0.0, displacement),
        );
        let solid = if intersec {
            debug!(displacement, "pseudo trap intersection");
            compose_tagged(
                store,
                BooleanOp::Intersection,
                trap,
                tubs,
                RigidTransform::identity(),
                placement,
                &self.name,
                tags::PSEUDO_TRAP,
            )?
        } else {
            debug!(displacement, "pseudo trap union");
            // Trim the tube to the bulge before attaching it.
            let trim_box = MakeBox::new(1.1 * x, 1.1 * h, delta).execute(store)?;
            let trimmed = compose(
                store,
                BooleanOp::Subtraction,
                tubs,
                trim_box,
                RigidTransform::identity(),
                RigidTransform::from_rotation(Rotation::about_x(FRAC_PI_2)),
                &format!("{}Subs", self.name),
            )?;
            compose_tagged(
                store,
                BooleanOp::Union,
                trap,
                trimmed,
                RigidTransform::identity(),
                placement,
                &self.name,
                tags::PSEUDO_TRAP,
            )?
        };

        let id = solid.require(store)?;
        store.record_derivation(
            id,
            DerivationRecord::PseudoTrap(PseudoTrapParams {
                x1: self.x1,
                x2: self.x2,
                y1: self.y1,
                y2: self.y2,
                z: self.z,
                r: self.r,
                at_minus_z: self.at_minus_z,
            }),
        );
        Ok(solid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DetcsgError;
    use crate::shapes::Primitive;

    #[test]
    fn negative_radius_resolves_to_intersection() {
        let mut store = GeometryStore::new();
        let solid = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.0, 5.0, -10.0, true)
            .named("pt")
            .execute(&mut store)
            .unwrap();

        assert_eq!(solid.title(&store).unwrap(), "PseudoTrap");
        let node = solid.boolean_node(&store).unwrap();
        assert_eq!(node.op, crate::shapes::BooleanOp::Intersection);

        // start_phi = 90 - asin(x1 / |r|), x1 selected by at_minus_z.
        let expected_start = 90.0 - (3.0_f64 / 10.0).asin().to_degrees();
        let tubs = solid.right_shape(&store).unwrap();
        let dims = tubs.dimensions(&store).unwrap();
        assert!((dims[3] - expected_start).abs() < 1e-9);
        // Tube half-height enlarged over the taller face.
        assert!((dims[2] - 2.0 * 1.05).abs() < 1e-12);

        // Tube displaced below the -z face by delta.
        let delta = (100.0_f64 - 9.0).sqrt();
        let tf = solid.right_transform(&store).unwrap();
        assert!((tf.translation().z - (-5.0 - delta)).abs() < 1e-9);
    }

    #[test]
    fn positive_radius_resolves_to_union_of_trimmed_tube() {
        let mut store = GeometryStore::new();
        let solid = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.5, 5.0, 10.0, false)
            .execute(&mut store)
            .unwrap();

        let node = solid.boolean_node(&store).unwrap();
        assert_eq!(node.op, crate::shapes::BooleanOp::Union);

        // The right child is the tube with the trimming box subtracted.
        let trimmed = solid.right_shape(&store).unwrap();
        assert_eq!(trimmed.title(&store).unwrap(), "Subtraction");
        let tubs = trimmed.left_shape(&store).unwrap();
        let dims = tubs.dimensions(&store).unwrap();
        // h = y2 at the +z face.
        assert!((dims[2] - 2.5).abs() < 1e-12);
        let expected_start = 90.0 - (4.0_f64 / 10.0).asin().to_degrees();
        assert!((dims[3] - expected_start).abs() < 1e-9);

        let delta = (100.0_f64 - 16.0).sqrt();
        let tf = solid.right_transform(&store).unwrap();
        assert!((tf.translation().z - (5.0 - delta)).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_violates_case_table() {
        let mut store = GeometryStore::new();
        let result = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.0, 5.0, 0.0, true).execute(&mut store);
        assert!(matches!(
            result,
            Err(DetcsgError::Shape(ShapeError::ConstraintViolation(_)))
        ));
    }

    #[test]
    fn radius_smaller_than_face_violates_case_table() {
        let mut store = GeometryStore::new();
        let result = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.0, 5.0, 2.0, true).execute(&mut store);
        assert!(matches!(
            result,
            Err(DetcsgError::Shape(ShapeError::ConstraintViolation(_)))
        ));
    }

    #[test]
    fn trapezoid_child_keeps_face_widths() {
        let mut store = GeometryStore::new();
        let solid = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.0, 5.0, -10.0, true)
            .execute(&mut store)
            .unwrap();
        let trap = solid.left_shape(&store).unwrap();
        match trap.access(&store).unwrap().geometry() {
            crate::shapes::ShapeGeometry::Primitive(Primitive::Trd2 {
                x1,
                x2,
                y1,
                y2,
                dz,
            }) => {
                assert_eq!(
                    (x1, x2, y1, y2, dz),
                    (&3.0, &4.0, &2.0, &2.0, &5.0)
                );
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn parameters_read_back_exactly() {
        let mut store = GeometryStore::new();
        let solid = MakePseudoTrap::new(3.0, 4.0, 2.0, 2.0, 5.0, -10.0, true)
            .execute(&mut store)
            .unwrap();
        let p = store.pseudo_trap_params(solid).unwrap();
        assert_eq!(
            *p,
            PseudoTrapParams {
                x1: 3.0,
                x2: 4.0,
                y1: 2.0,
                y2: 2.0,
                z: 5.0,
                r: -10.0,
                at_minus_z: true,
            }
        );
    }
}
