use crate::error::Result;
use crate::math::{RigidTransform, Rotation, Vector3};
use crate::shapes::{BooleanOp, GeometryStore, Solid};

use super::engine::compose;

/// Subtracts the right solid, under an optional placement, from the left.
pub struct Subtraction {
    left: Solid,
    right: Solid,
    placement: RigidTransform,
    name: String,
}

impl Subtraction {
    /// Creates a new `Subtraction` with both children in place.
    #[must_use]
    pub fn new(left: Solid, right: Solid) -> Self {
        Self::placed(left, right, RigidTransform::identity())
    }

    /// Creates a new `Subtraction` with the right child under a general
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

    /// Creates a new `Subtraction` with the right child translated.
    #[must_use]
    pub fn at(left: Solid, right: Solid, position: Vector3) -> Self {
        Self::placed(left, right, RigidTransform::from_translation(position))
    }

    /// Creates a new `Subtraction` with the right child rotated in place.
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

    /// Executes the subtraction, creating the composite in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either child handle is unbound.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        compose(
            store,
            BooleanOp::Subtraction,
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
    use crate::operations::creation::MakeTube;

    #[test]
    fn subtraction_keeps_left_extent() {
        let mut store = GeometryStore::new();
        let outer = MakeTube::full(0.0, 5.0, 10.0).execute(&mut store).unwrap();
        let hole = MakeTube::full(0.0, 1.0, 12.0).execute(&mut store).unwrap();
        let pierced = Subtraction::new(outer, hole).execute(&mut store).unwrap();
        let bb = pierced.bounding_box(&store).unwrap();
        assert!((bb.max.x - 5.0).abs() < 1e-12);
        assert!((bb.max.z - 10.0).abs() < 1e-12);
    }
}
