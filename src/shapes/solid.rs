use crate::error::{HandleError, Result, ShapeError};
use crate::math::RigidTransform;

use super::bbox::{self, Aabb};
use super::dims;
use super::store::{GeometryStore, ShapeData, ShapeId};
use super::{BooleanNode, ShapeKind};

/// A typed, nullable handle to a constructed shape.
///
/// A handle starts out unbound; a successful factory or derivation call
/// returns a bound one. There is no transition back short of
/// reassignment. Two accessor modes exist: the raw [`id`](Self::id) /
/// [`is_bound`](Self::is_bound) pair for existence checks, and the
/// validating [`access`](Self::access), which every read operation goes
/// through and which fails with [`HandleError::Unbound`] for unbound or
/// stale handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Solid(Option<ShapeId>);

impl Solid {
    /// A handle bound to nothing.
    #[must_use]
    pub fn unbound() -> Self {
        Self(None)
    }

    pub(crate) fn bound(id: ShapeId) -> Self {
        Self(Some(id))
    }

    /// Raw accessor: the underlying shape id, if the handle is bound.
    #[must_use]
    pub fn id(&self) -> Option<ShapeId> {
        self.0
    }

    /// Whether the handle is bound to a shape id. Does not check that the
    /// id is still live in a store.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn require(&self, store: &GeometryStore) -> Result<ShapeId> {
        match self.0 {
            Some(id) if store.get(id).is_some() => Ok(id),
            _ => Err(HandleError::Unbound.into()),
        }
    }

    /// Validating accessor: the underlying shape data.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] if the handle is unbound or
    /// refers to a shape no longer in the store.
    pub fn access<'a>(&self, store: &'a GeometryStore) -> Result<&'a ShapeData> {
        self.0
            .and_then(|id| store.get(id))
            .ok_or_else(|| HandleError::Unbound.into())
    }

    /// The shape's name; empty for anonymous shapes.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn name<'a>(&self, store: &'a GeometryStore) -> Result<&'a str> {
        Ok(self.access(store)?.name())
    }

    /// Renames the shape.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn set_name(&self, store: &mut GeometryStore, name: &str) -> Result<()> {
        let id = self.require(store)?;
        let data = store.get_mut(id).ok_or(HandleError::Unbound)?;
        data.name = name.to_owned();
        Ok(())
    }

    /// The shape's type tag (e.g. `"Box"`, `"Subtraction"`).
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn title(&self, store: &GeometryStore) -> Result<&'static str> {
        Ok(self.access(store)?.tag())
    }

    /// Primitive or boolean.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn kind(&self, store: &GeometryStore) -> Result<ShapeKind> {
        Ok(self.access(store)?.kind())
    }

    /// Whether the shape is a leaf primitive.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn is_primitive(&self, store: &GeometryStore) -> Result<bool> {
        Ok(self.kind(store)? == ShapeKind::Primitive)
    }

    /// Whether the shape is a boolean composite.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn is_boolean(&self, store: &GeometryStore) -> Result<bool> {
        Ok(self.kind(store)? == ShapeKind::Boolean)
    }

    /// Reads the shape's dimension vector; the exact inverse of
    /// [`set_dimensions`](Self::set_dimensions).
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn dimensions(&self, store: &GeometryStore) -> Result<Vec<f64>> {
        Ok(dims::dimensions(self.access(store)?.geometry()))
    }

    /// Writes a dimension vector into the shape's native fields and
    /// recomputes its bounding box.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle, an arity
    /// error on a length mismatch, or
    /// [`HandleError::ImmutableDimensions`] for kinds that cannot be
    /// reassigned in place.
    pub fn set_dimensions(&self, store: &mut GeometryStore, params: &[f64]) -> Result<()> {
        let id = self.require(store)?;
        store.apply_dimensions(id, params)
    }

    /// The shape's bounding box, computed on demand if the factory
    /// deferred it.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle.
    pub fn bounding_box(&self, store: &GeometryStore) -> Result<Aabb> {
        let data = self.access(store)?;
        Ok(data
            .bbox()
            .unwrap_or_else(|| bbox::compute(store, data.geometry())))
    }

    /// The boolean node of a composite shape.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an invalid handle or
    /// [`ShapeError::InvalidArgument`] if the shape is not a boolean.
    pub fn boolean_node<'a>(&self, store: &'a GeometryStore) -> Result<&'a BooleanNode> {
        match self.access(store)?.geometry() {
            super::ShapeGeometry::Boolean(node) => Ok(node),
            _ => Err(ShapeError::InvalidArgument("shape is not a boolean composite".into()).into()),
        }
    }

    /// Left child of a boolean composite.
    ///
    /// # Errors
    ///
    /// See [`boolean_node`](Self::boolean_node).
    pub fn left_shape(&self, store: &GeometryStore) -> Result<Solid> {
        Ok(Solid::bound(self.boolean_node(store)?.left))
    }

    /// Right child of a boolean composite.
    ///
    /// # Errors
    ///
    /// See [`boolean_node`](Self::boolean_node).
    pub fn right_shape(&self, store: &GeometryStore) -> Result<Solid> {
        Ok(Solid::bound(self.boolean_node(store)?.right))
    }

    /// Placement of the left child of a boolean composite.
    ///
    /// # Errors
    ///
    /// See [`boolean_node`](Self::boolean_node).
    pub fn left_transform(&self, store: &GeometryStore) -> Result<RigidTransform> {
        Ok(self.boolean_node(store)?.left_transform)
    }

    /// Placement of the right child of a boolean composite.
    ///
    /// # Errors
    ///
    /// See [`boolean_node`](Self::boolean_node).
    pub fn right_transform(&self, store: &GeometryStore) -> Result<RigidTransform> {
        Ok(self.boolean_node(store)?.right_transform)
    }
}
