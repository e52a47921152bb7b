use crate::error::Result;
use crate::math::{RigidTransform, Rotation, Vector3};
use crate::shapes::{BooleanOp, GeometryStore, Solid};

use super::engine::compose;

/// Computes the boolean intersection of two solids, the right one under
/// an optional placement.
pub struct Intersection {
    left: Solid,
    right: Solid,
    placement: RigidTransform,
    name: String,
}

impl Intersection {
    /// Creates a new `Intersection` with both children in place.
    #[must_use]
    pub fn new(left: Solid, right: Solid) -> Self {
        Self::placed(left, right, RigidTransform::identity())
    }

    /// Creates a new `Intersection` with the right child under a general
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

    /// Creates a new `Intersection` with the right child translated.
    #[must_use]
    pub fn at(left: Solid, right: Solid, position: Vector3) -> Self {
        Self::placed(left, right, RigidTransform::from_translation(position))
    }

    /// Creates a new `Intersection` with the right child rotated in place.
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

    /// Executes the intersection, creating the composite in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either child handle is unbound.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        compose(
            store,
            BooleanOp::Intersection,
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
    fn intersection_shrinks_to_overlap() {
        let mut store = GeometryStore::new();
        let a = MakeBox::new(2.0, 2.0, 2.0).execute(&mut store).unwrap();
        let b = MakeBox::new(2.0, 2.0, 2.0).execute(&mut store).unwrap();
        let lens = Intersection::at(a, b, Vector3::new(2.0, 0.0, 0.0))
            .execute(&mut store)
            .unwrap();
        let bb = lens.bounding_box(&store).unwrap();
        assert!((bb.min.x - 0.0).abs() < 1e-12);
        assert!((bb.max.x - 2.0).abs() < 1e-12);
    }
}
