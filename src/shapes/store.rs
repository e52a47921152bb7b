use slotmap::{SecondaryMap, SlotMap};

use crate::error::{HandleError, Result, ShapeError};
use crate::operations::derived::{DerivationRecord, PseudoTrapParams, TruncatedTubeParams};
use crate::shapes::tags;

use super::bbox::{self, Aabb};
use super::dims;
use super::solid::Solid;
use super::{ShapeGeometry, ShapeKind};

slotmap::new_key_type! {
    /// Unique identifier for a shape in the geometry store.
    pub struct ShapeId;
}

/// A constructed shape: identity metadata plus its native geometry.
///
/// The name may change after construction; the tag, geometry kind and
/// child structure are fixed.
#[derive(Debug, Clone)]
pub struct ShapeData {
    pub(crate) name: String,
    pub(crate) tag: &'static str,
    pub(crate) geometry: ShapeGeometry,
    pub(crate) bbox: Option<Aabb>,
}

impl ShapeData {
    /// The shape's name; empty for anonymous shapes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shape's type tag (e.g. `"Box"`, `"Subtraction"`).
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The shape's native geometry.
    #[must_use]
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Primitive or boolean.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// The cached bounding box, if one has been computed.
    #[must_use]
    pub fn bbox(&self) -> Option<Aabb> {
        self.bbox
    }
}

/// Central arena that owns all constructed shapes and the side table of
/// derived-composite parameters.
///
/// Shapes reference each other via [`ShapeId`]; the store outlives every
/// handle derived from it. Construction is single-threaded: the store has
/// no interior mutability, callers serialize mutation through `&mut`.
#[derive(Debug, Default)]
pub struct GeometryStore {
    shapes: SlotMap<ShapeId, ShapeData>,
    derivations: SecondaryMap<ShapeId, DerivationRecord>,
}

impl GeometryStore {
    /// Creates a new, empty geometry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes in the store, sub-shapes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the store holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registers a shape and returns a bound handle. With `cbbox` the
    /// bounding box is computed eagerly so the fresh shape is queryable
    /// without a separate finalize step.
    pub(crate) fn insert(
        &mut self,
        name: String,
        tag: &'static str,
        geometry: ShapeGeometry,
        cbbox: bool,
    ) -> Solid {
        let bbox = cbbox.then(|| bbox::compute(self, &geometry));
        let id = self.shapes.insert(ShapeData {
            name,
            tag,
            geometry,
            bbox,
        });
        Solid::bound(id)
    }

    /// Looks up a shape by id. Plain nullable lookup, no validation.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&ShapeData> {
        self.shapes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ShapeId) -> Option<&mut ShapeData> {
        self.shapes.get_mut(id)
    }

    /// Writes a dimension vector into a shape and recomputes its bounding
    /// box.
    pub(crate) fn apply_dimensions(&mut self, id: ShapeId, params: &[f64]) -> Result<()> {
        let data = self.shapes.get_mut(id).ok_or(HandleError::Unbound)?;
        dims::apply_dimensions(&mut data.geometry, data.tag, params)?;
        let bbox = {
            #[allow(clippy::unwrap_used)]
            let data = self.shapes.get(id).unwrap();
            bbox::compute(self, &data.geometry)
        };
        #[allow(clippy::unwrap_used)]
        let data = self.shapes.get_mut(id).unwrap();
        data.bbox = Some(bbox);
        Ok(())
    }

    pub(crate) fn record_derivation(&mut self, id: ShapeId, record: DerivationRecord) {
        self.derivations.insert(id, record);
    }

    /// The derivation record of a derived composite, if the solid has one.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an unbound handle.
    pub fn derivation(&self, solid: Solid) -> Result<Option<&DerivationRecord>> {
        let id = solid.require(self)?;
        Ok(self.derivations.get(id))
    }

    /// The original construction parameters of a truncated tube.
    ///
    /// # Errors
    ///
    /// Fails on an unbound handle, or if the solid was not built by
    /// [`crate::operations::derived::MakeTruncatedTube`].
    pub fn truncated_tube_params(&self, solid: Solid) -> Result<&TruncatedTubeParams> {
        match self.derivation(solid)? {
            Some(DerivationRecord::TruncatedTube(params)) => Ok(params),
            _ => Err(ShapeError::InvalidArgument(
                "solid carries no TruncatedTube parameters".into(),
            )
            .into()),
        }
    }

    /// The original construction parameters of a pseudo trapezoid.
    ///
    /// # Errors
    ///
    /// Fails on an unbound handle, or if the solid was not built by
    /// [`crate::operations::derived::MakePseudoTrap`].
    pub fn pseudo_trap_params(&self, solid: Solid) -> Result<&PseudoTrapParams> {
        match self.derivation(solid)? {
            Some(DerivationRecord::PseudoTrap(params)) => Ok(params),
            _ => Err(ShapeError::InvalidArgument(
                "solid carries no PseudoTrap parameters".into(),
            )
            .into()),
        }
    }

    /// The serialized derivation metadata of a solid, if it has any.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an unbound handle.
    pub fn derivation_metadata(&self, solid: Solid) -> Result<Option<String>> {
        Ok(self.derivation(solid)?.map(DerivationRecord::encode))
    }

    /// Replaces a solid's derivation metadata from its serialized form,
    /// parsed according to the solid's type tag.
    ///
    /// # Errors
    ///
    /// Fails on an unbound handle, a tag without a metadata format, or
    /// malformed text.
    pub fn set_derivation_metadata(&mut self, solid: Solid, text: &str) -> Result<()> {
        let id = solid.require(self)?;
        let tag = solid.access(self)?.tag();
        let record = DerivationRecord::parse(tag, text)?;
        self.derivations.insert(id, record);
        Ok(())
    }

    /// Whether a solid was produced by a derived-composite algorithm.
    ///
    /// # Errors
    ///
    /// Fails with [`HandleError::Unbound`] on an unbound handle.
    pub fn is_derived(&self, solid: Solid) -> Result<bool> {
        let data = solid.access(self)?;
        Ok(matches!(
            data.tag(),
            tags::TRUNCATED_TUBE | tags::PSEUDO_TRAP
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shapes::Primitive;

    fn unit_box(store: &mut GeometryStore) -> Solid {
        store.insert(
            "b".into(),
            tags::BOX,
            ShapeGeometry::Primitive(Primitive::Box {
                dx: 1.0,
                dy: 1.0,
                dz: 1.0,
            }),
            true,
        )
    }

    #[test]
    fn insert_with_cbbox_caches_bounding_box() {
        let mut store = GeometryStore::new();
        let solid = unit_box(&mut store);
        let data = store.get(solid.id().unwrap()).unwrap();
        assert!(data.bbox().is_some());
    }

    #[test]
    fn apply_dimensions_recomputes_bounding_box() {
        let mut store = GeometryStore::new();
        let solid = unit_box(&mut store);
        let id = solid.id().unwrap();
        store.apply_dimensions(id, &[2.0, 3.0, 4.0]).unwrap();
        let bb = store.get(id).unwrap().bbox().unwrap();
        assert!((bb.max.x - 2.0).abs() < 1e-12);
        assert!((bb.max.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn derivation_lookup_on_plain_solid_is_none() {
        let mut store = GeometryStore::new();
        let solid = unit_box(&mut store);
        assert!(store.derivation(solid).unwrap().is_none());
        assert!(store.truncated_tube_params(solid).is_err());
    }

    #[test]
    fn derivation_lookup_on_unbound_handle_fails() {
        let store = GeometryStore::new();
        assert!(store.derivation(Solid::unbound()).is_err());
    }

    #[test]
    fn metadata_on_plain_tag_is_rejected() {
        let mut store = GeometryStore::new();
        let solid = unit_box(&mut store);
        assert!(store.set_derivation_metadata(solid, "1\n2\n").is_err());
    }
}
