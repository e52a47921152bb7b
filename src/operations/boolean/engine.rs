use crate::error::Result;
use crate::math::RigidTransform;
use crate::shapes::{BooleanNode, BooleanOp, GeometryStore, ShapeGeometry, Solid};

/// Combines two placed solids into a composite under `op`.
///
/// The composite's own dimension vector is empty; its geometry lives in
/// the children. No shape compatibility is checked (overlap and adjacency
/// are the kernel's concern); the only local invariant is that both
/// children are bound handles.
///
/// # Errors
///
/// Returns an error if either child handle is unbound.
pub fn compose(
    store: &mut GeometryStore,
    op: BooleanOp,
    left: Solid,
    right: Solid,
    left_transform: RigidTransform,
    right_transform: RigidTransform,
    name: &str,
) -> Result<Solid> {
    compose_tagged(
        store,
        op,
        left,
        right,
        left_transform,
        right_transform,
        name,
        op.tag(),
    )
}

/// [`compose`] with an explicit type tag, used by derived composites that
/// carry their own tag instead of the plain operator tag.
#[allow(clippy::too_many_arguments)]
pub(crate) fn compose_tagged(
    store: &mut GeometryStore,
    op: BooleanOp,
    left: Solid,
    right: Solid,
    left_transform: RigidTransform,
    right_transform: RigidTransform,
    name: &str,
    tag: &'static str,
) -> Result<Solid> {
    let left = left.require(store)?;
    let right = right.require(store)?;
    Ok(store.insert(
        name.to_owned(),
        tag,
        ShapeGeometry::Boolean(BooleanNode {
            op,
            left,
            right,
            left_transform,
            right_transform,
        }),
        true,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::creation::MakeBox;
    use crate::shapes::ShapeKind;

    #[test]
    fn compose_rejects_unbound_children() {
        let mut store = GeometryStore::new();
        let bound = MakeBox::new(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let result = compose(
            &mut store,
            BooleanOp::Union,
            bound,
            Solid::unbound(),
            RigidTransform::identity(),
            RigidTransform::identity(),
            "",
        );
        assert!(result.is_err());
    }

    #[test]
    fn composite_carries_children_and_transforms() {
        let mut store = GeometryStore::new();
        let a = MakeBox::new(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let b = MakeBox::new(2.0, 2.0, 2.0).execute(&mut store).unwrap();
        let shift = RigidTransform::from_translation(Vector3::new(0.0, 0.0, 3.0));
        let solid = compose(
            &mut store,
            BooleanOp::Subtraction,
            a,
            b,
            RigidTransform::identity(),
            shift,
            "cut",
        )
        .unwrap();

        assert_eq!(solid.kind(&store).unwrap(), ShapeKind::Boolean);
        assert_eq!(solid.title(&store).unwrap(), "Subtraction");
        assert_eq!(solid.name(&store).unwrap(), "cut");
        assert!(solid.dimensions(&store).unwrap().is_empty());
        assert_eq!(solid.left_shape(&store).unwrap().id(), a.id());
        assert_eq!(solid.right_shape(&store).unwrap().id(), b.id());
        assert_eq!(solid.right_transform(&store).unwrap(), shift);
    }
}
