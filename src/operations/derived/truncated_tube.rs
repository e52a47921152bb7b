use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::math::{RigidTransform, Rotation, Vector3};
use crate::operations::boolean::compose_tagged;
use crate::operations::creation::{MakeBox, MakeTube};
use crate::shapes::{tags, BooleanOp, GeometryStore, Solid};

use super::DerivationRecord;

/// Original construction parameters of a truncated tube. Phi angles are
/// in degrees, as at the construction boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedTubeParams {
    pub dz: f64,
    pub rmin: f64,
    pub rmax: f64,
    pub start_phi: f64,
    pub delta_phi: f64,
    pub cut_at_start: f64,
    pub cut_at_delta: f64,
    pub cut_inside: bool,
}

/// Creates a truncated tube: a tube segment sliced by a planar cut.
///
/// The cut plane meets the segment's start edge at radius `cut_at_start`
/// and its end edge at radius `cut_at_delta`; `cut_inside` selects which
/// side of the plane is removed. The composite is a subtraction of an
/// oversized cutting box, oriented by trigonometric case analysis, from
/// the plain tube segment.
pub struct MakeTruncatedTube {
    name: String,
    dz: f64,
    rmin: f64,
    rmax: f64,
    start_phi: f64,
    delta_phi: f64,
    cut_at_start: f64,
    cut_at_delta: f64,
    cut_inside: bool,
}

impl MakeTruncatedTube {
    /// Creates a new `MakeTruncatedTube` operation. Phi angles are in
    /// degrees.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        dz: f64,
        rmin: f64,
        rmax: f64,
        start_phi: f64,
        delta_phi: f64,
        cut_at_start: f64,
        cut_at_delta: f64,
        cut_inside: bool,
    ) -> Self {
        Self {
            name: String::new(),
            dz,
            rmin,
            rmax,
            start_phi,
            delta_phi,
            cut_at_start,
            cut_at_delta,
            cut_inside,
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
    /// Returns an error if a radius or cut radius is not positive, the
    /// radii are out of order, or a nonzero start phi is requested.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rmin <= 0.0
            || self.rmax <= 0.0
            || self.cut_at_start <= 0.0
            || self.cut_at_delta <= 0.0
        {
            return Err(ShapeError::InvalidArgument(
                "0 <= rIn,cut_atStart,rOut,cut_atDelta,rOut violated".into(),
            )
            .into());
        }
        if self.rmin >= self.rmax {
            return Err(ShapeError::InvalidArgument("rIn<rOut violated".into()).into());
        }
        if self.start_phi != 0.0 {
            return Err(ShapeError::Unsupported("start_phi != 0 not supported".into()).into());
        }

        let r = self.cut_at_start;
        let big_r = self.cut_at_delta;
        let delta_phi = self.delta_phi.to_radians();

        // Orientation of the cutting plane w.r.t. the segment.
        let cath = r - big_r * delta_phi.cos();
        let hypo = (r * r + big_r * big_r - 2.0 * r * big_r * delta_phi.cos()).sqrt();
        let alpha = (cath / hypo).acos();
        let sin_alpha = alpha.abs().sin();

        // Oversize the box so its edge cannot graze the segment at large
        // delta-phi values; only its flat face realizes the cut.
        let box_x = 1.1 * self.rmax + self.rmax / sin_alpha;
        let box_y = self.rmax;
        let box_z = 1.1 * self.dz;
        let x_box = if self.cut_inside {
            r - box_y / sin_alpha
        } else {
            r + box_y / sin_alpha
        };
        debug!(alpha, x_box, box_x, box_z, "truncated tube cutting box");

        let tubs = MakeTube::new(
            self.rmin,
            self.rmax,
            self.dz,
            self.start_phi,
            self.start_phi + self.delta_phi,
        )
        .named(&format!("{}Tubs", self.name))
        .execute(store)?;
        let cut_box = MakeBox::new(box_x, box_y, box_z)
            .named(&format!("{}Box", self.name))
            .execute(store)?;

        let placement = RigidTransform::new(
            Rotation::about_z(-alpha),
            Vector3::new(x_box, 0.0, 0.0),
        );
        let solid = compose_tagged(
            store,
            BooleanOp::Subtraction,
            tubs,
            cut_box,
            RigidTransform::identity(),
            placement,
            &self.name,
            tags::TRUNCATED_TUBE,
        )?;

        let id = solid.require(store)?;
        store.record_derivation(
            id,
            DerivationRecord::TruncatedTube(TruncatedTubeParams {
                dz: self.dz,
                rmin: self.rmin,
                rmax: self.rmax,
                start_phi: self.start_phi,
                delta_phi: self.delta_phi,
                cut_at_start: self.cut_at_start,
                cut_at_delta: self.cut_at_delta,
                cut_inside: self.cut_inside,
            }),
        );
        Ok(solid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{DetcsgError, HandleError};
    use crate::shapes::ShapeKind;

    fn reference() -> MakeTruncatedTube {
        MakeTruncatedTube::new(10.0, 5.0, 8.0, 0.0, 90.0, 6.0, 7.0, true)
    }

    #[test]
    fn parameters_read_back_exactly() {
        let mut store = GeometryStore::new();
        let solid = reference().named("trunc").execute(&mut store).unwrap();
        let p = store.truncated_tube_params(solid).unwrap();
        assert!((p.dz - 10.0).abs() < f64::EPSILON);
        assert!((p.rmin - 5.0).abs() < f64::EPSILON);
        assert!((p.rmax - 8.0).abs() < f64::EPSILON);
        assert!(p.start_phi.abs() < f64::EPSILON);
        assert!((p.delta_phi - 90.0).abs() < f64::EPSILON);
        assert!((p.cut_at_start - 6.0).abs() < f64::EPSILON);
        assert!((p.cut_at_delta - 7.0).abs() < f64::EPSILON);
        assert!(p.cut_inside);
    }

    #[test]
    fn composite_is_a_tagged_subtraction() {
        let mut store = GeometryStore::new();
        let solid = reference().execute(&mut store).unwrap();
        assert_eq!(solid.title(&store).unwrap(), "TruncatedTube");
        assert_eq!(solid.kind(&store).unwrap(), ShapeKind::Boolean);
        assert_eq!(
            solid.boolean_node(&store).unwrap().op,
            crate::shapes::BooleanOp::Subtraction
        );
        assert_eq!(
            solid.left_shape(&store).unwrap().title(&store).unwrap(),
            "Tube"
        );
        assert_eq!(
            solid.right_shape(&store).unwrap().title(&store).unwrap(),
            "Box"
        );
    }

    #[test]
    fn cutting_box_placement_matches_derivation() {
        let mut store = GeometryStore::new();
        let solid = reference().execute(&mut store).unwrap();

        let delta_phi = 90.0_f64.to_radians();
        let (r, big_r, rmax) = (6.0, 7.0, 8.0);
        let cath = r - big_r * delta_phi.cos();
        let hypo: f64 = (r * r + big_r * big_r - 2.0 * r * big_r * delta_phi.cos()).sqrt();
        let alpha = (cath / hypo).acos();
        let expected_x = r - rmax / alpha.sin();

        let tf = solid.right_transform(&store).unwrap();
        assert!((tf.translation().x - expected_x).abs() < 1e-9);
        let expected_rot = Rotation::about_z(-alpha);
        assert!((tf.rotation().matrix() - expected_rot.matrix()).abs().max() < 1e-9);
    }

    #[test]
    fn each_domain_violation_is_rejected() {
        let mut store = GeometryStore::new();
        for op in [
            MakeTruncatedTube::new(10.0, 0.0, 8.0, 0.0, 90.0, 6.0, 7.0, true),
            MakeTruncatedTube::new(10.0, 5.0, 0.0, 0.0, 90.0, 6.0, 7.0, true),
            MakeTruncatedTube::new(10.0, 5.0, 8.0, 0.0, 90.0, 0.0, 7.0, true),
            MakeTruncatedTube::new(10.0, 5.0, 8.0, 0.0, 90.0, 6.0, 0.0, true),
            MakeTruncatedTube::new(10.0, 8.0, 5.0, 0.0, 90.0, 6.0, 7.0, true),
        ] {
            let result = op.execute(&mut store);
            assert!(matches!(
                result,
                Err(DetcsgError::Shape(ShapeError::InvalidArgument(_)))
            ));
        }
    }

    #[test]
    fn nonzero_start_phi_is_unsupported() {
        let mut store = GeometryStore::new();
        let result =
            MakeTruncatedTube::new(10.0, 5.0, 8.0, 15.0, 90.0, 6.0, 7.0, true).execute(&mut store);
        assert!(matches!(
            result,
            Err(DetcsgError::Shape(ShapeError::Unsupported(_)))
        ));
    }

    #[test]
    fn metadata_string_roundtrips_through_store() {
        let mut store = GeometryStore::new();
        let solid = reference().execute(&mut store).unwrap();
        let text = store.derivation_metadata(solid).unwrap().unwrap();
        store.set_derivation_metadata(solid, &text).unwrap();
        let p = store.truncated_tube_params(solid).unwrap();
        assert!((p.delta_phi - 90.0).abs() < f64::EPSILON);
        assert!(p.cut_inside);
    }

    #[test]
    fn unbound_handle_has_no_parameters() {
        let store = GeometryStore::new();
        let result = store.truncated_tube_params(Solid::unbound());
        assert!(matches!(
            result,
            Err(DetcsgError::Handle(HandleError::Unbound))
        ));
    }
}
