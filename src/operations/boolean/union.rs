use crate::error::Result;
use crate::math::{RigidTransform, Rotation, Vector3};
use crate::shapes::{BooleanOp, GeometryStore, Solid};

use super::engine::compose;

/// Computes the boolean union of two solids, the right one under an
/// optional placement.
pub struct Union {
    left: Solid,
    right: Solid,
    placement: RigidTransform,
    name: String,
}

impl Union {
    /// Creates a new `Union` with both children in place.
    #[must_use]
    pub fn new(left: Solid, right: Solid) -> Self {
        Self::placed(left, right, RigidTransform::identity())
    }

    /// Creates a new `Union` with the right child under a general
    /// placement.
    #[must_use]
    pub fn placed(left: Solid, right: Solid, placement: RigidTransform) -> Self {
        Self {
            left,
            right,
            placement,
            name: String::new(),
        }
    }

    /// Creates a new `Union` with the right child translated.
    #[must_use]
    pub fn at(left: Solid, right: Solid, position: Vector3) -> Self {
        Self::placed(left, right, RigidTransform::from_translation(position))
    }

    /// Creates a new `Union` with the right child rotated in place.
    #[must_use]
    pub fn rotated(left: Solid, right: Solid, rotation: Rotation) -> Self {
        Self::placed(left, right, RigidTransform::from_rotation(rotation))
    }

    /// Sets the composite name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the union, creating the composite in the geometry store.
    ///
    /// # Errors
    ///
    /// Returns an error if either child handle is unbound.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        compose(
            store,
            BooleanOp::Union,
            self.left,
            self.right,
            RigidTransform::identity(),
            self.placement,
            &self.name,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeBox;

    #[test]
    fn union_occupies_same_region_either_way() {
        let mut store = GeometryStore::new();
        let a = MakeBox::new(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let b = MakeBox::new(2.0, 1.0, 1.0).execute(&mut store).unwrap();
        let shift = Vector3::new(3.0, 0.0, 0.0);

        let ab = Union::at(a, b, shift).execute(&mut store).unwrap();
        let ba = Union::at(b, a, -shift).execute(&mut store).unwrap();

        // Child order and transforms differ, the net occupied region does
        // not: compare through the bounding boxes of both composites.
        let bb_ab = ab.bounding_box(&store).unwrap();
        let bb_ba = ba.bounding_box(&store).unwrap();
        let extent_ab = bb_ab.max - bb_ab.min;
        let extent_ba = bb_ba.max - bb_ba.min;
        assert!((extent_ab - extent_ba).norm() < 1e-12);
    }
}
