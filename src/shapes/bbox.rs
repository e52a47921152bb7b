//! Conservative axis-aligned bounding boxes for every shape kind.
//!
//! Revolution solids use their radial extents and ignore phi/theta cuts;
//! the box may overestimate but never underestimates the shape.

use crate::math::{Point3, RigidTransform};

use super::store::{GeometryStore, ShapeId};
use super::{BooleanNode, BooleanOp, Primitive, ShapeGeometry};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// A box centred on the origin with the given half-extents.
    #[must_use]
    pub fn from_half_extents(hx: f64, hy: f64, hz: f64) -> Self {
        Self {
            min: Point3::new(-hx, -hy, -hz),
            max: Point3::new(hx, hy, hz),
        }
    }

    /// The degenerate box containing only the origin.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_half_extents(0.0, 0.0, 0.0)
    }

    /// The box covering all of space.
    #[must_use]
    pub fn infinite() -> Self {
        Self::from_half_extents(f64::INFINITY, f64::INFINITY, f64::INFINITY)
    }

    /// The tightest box around a non-empty point set. Returns `None` for
    /// an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.min = Point3::new(aabb.min.x.min(p.x), aabb.min.y.min(p.y), aabb.min.z.min(p.z));
            aabb.max = Point3::new(aabb.max.x.max(p.x), aabb.max.y.max(p.y), aabb.max.z.max(p.z));
        }
        Some(aabb)
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// The intersection of both boxes, collapsed to a degenerate box when
    /// they are disjoint.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Self {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x).max(min.x),
            self.max.y.min(other.max.y).max(min.y),
            self.max.z.min(other.max.z).max(min.z),
        );
        Self { min, max }
    }

    /// The box around this box placed by a rigid transform.
    #[must_use]
    pub fn transform(&self, tf: &RigidTransform) -> Self {
        if !self.min.coords.iter().all(|v| v.is_finite())
            || !self.max.coords.iter().all(|v| v.is_finite())
        {
            return Self::infinite();
        }
        let corners = [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ];
        Self::from_points(corners.iter().map(|c| tf.apply_point(c))).unwrap_or_else(Self::zero)
    }

    /// The box scaled componentwise about the origin.
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Self {
        let a = Point3::new(self.min.x * sx, self.min.y * sy, self.min.z * sz);
        let b = Point3::new(self.max.x * sx, self.max.y * sy, self.max.z * sz);
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }
}

/// Computes the bounding box of a shape, resolving child shapes through
/// the store.
#[must_use]
pub(crate) fn compute(store: &GeometryStore, geometry: &ShapeGeometry) -> Aabb {
    match geometry {
        ShapeGeometry::Primitive(primitive) => primitive_bbox(primitive),
        ShapeGeometry::Scaled { base, sx, sy, sz } => shape_bbox(store, *base).scale(*sx, *sy, *sz),
        ShapeGeometry::Boolean(node) => boolean_bbox(store, node),
    }
}

/// Bounding box of a stored shape, computing on demand when the factory
/// deferred it.
pub(crate) fn shape_bbox(store: &GeometryStore, id: ShapeId) -> Aabb {
    store.get(id).map_or_else(Aabb::zero, |data| {
        data.bbox()
            .unwrap_or_else(|| compute(store, data.geometry()))
    })
}

fn boolean_bbox(store: &GeometryStore, node: &BooleanNode) -> Aabb {
    let left = shape_bbox(store, node.left).transform(&node.left_transform);
    let right = shape_bbox(store, node.right).transform(&node.right_transform);
    match node.op {
        BooleanOp::Union => left.merge(&right),
        // Subtraction can only shrink the left operand.
        BooleanOp::Subtraction => left,
        BooleanOp::Intersection => left.overlap(&right),
    }
}

#[allow(clippy::similar_names)]
fn primitive_bbox(primitive: &Primitive) -> Aabb {
    match primitive {
        Primitive::Box { dx, dy, dz } => Aabb::from_half_extents(*dx, *dy, *dz),
        Primitive::HalfSpace { .. } => Aabb::infinite(),
        Primitive::Tube { rmax, dz, .. } | Primitive::CutTube { rmax, dz, .. } => {
            Aabb::from_half_extents(*rmax, *rmax, *dz)
        }
        Primitive::EllipticalTube { a, b, dz } => Aabb::from_half_extents(*a, *b, *dz),
        Primitive::Hyperboloid {
            rout,
            stereo_out,
            dz,
            ..
        } => {
            let r_end = rout.hypot(dz * stereo_out.tan());
            Aabb::from_half_extents(r_end, r_end, *dz)
        }
        Primitive::Cone {
            dz, rmax1, rmax2, ..
        }
        | Primitive::ConeSegment {
            dz, rmax1, rmax2, ..
        } => {
            let r = rmax1.max(*rmax2);
            Aabb::from_half_extents(r, r, *dz)
        }
        Primitive::Sphere { rmax, .. } => Aabb::from_half_extents(*rmax, *rmax, *rmax),
        Primitive::Torus { r, rmax, .. } => {
            Aabb::from_half_extents(r + rmax, r + rmax, *rmax)
        }
        Primitive::Trd1 { x1, x2, y, dz } => Aabb::from_half_extents(x1.max(*x2), *y, *dz),
        Primitive::Trd2 { x1, x2, y1, y2, dz } => {
            Aabb::from_half_extents(x1.max(*x2), y1.max(*y2), *dz)
        }
        Primitive::Trap {
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
        } => {
            let mut corners = Vec::with_capacity(8);
            let faces = [
                (-*dz, *h1, *bl1, *tl1, *alpha1),
                (*dz, *h2, *bl2, *tl2, *alpha2),
            ];
            for (z, h, bl, tl, alpha) in faces {
                let xc = z * theta.tan() * phi.cos();
                let yc = z * theta.tan() * phi.sin();
                for sy in [-1.0, 1.0] {
                    let half_width = if sy < 0.0 { bl } else { tl };
                    let shear = sy * h * alpha.tan();
                    for sx in [-1.0, 1.0] {
                        corners.push(Point3::new(
                            xc + shear + sx * half_width,
                            yc + sy * h,
                            z,
                        ));
                    }
                }
            }
            Aabb::from_points(corners).unwrap_or_else(Aabb::zero)
        }
        Primitive::Paraboloid { rlo, rhi, dz } => {
            let r = rlo.max(*rhi);
            Aabb::from_half_extents(r, r, *dz)
        }
        Primitive::Polycone { planes, .. } => planes_bbox(planes, 1.0),
        Primitive::Polyhedra { nsides, planes, .. } => {
            // Flat sides: the circumscribed corner radius exceeds rmax.
            let corner = 1.0 / (std::f64::consts::PI / f64::from((*nsides).max(3))).cos();
            planes_bbox(planes, corner)
        }
        Primitive::ExtrudedPolygon { points, sections } => {
            let corners = sections.iter().flat_map(|s| {
                points
                    .iter()
                    .map(move |p| Point3::new(s.x0 + s.scale * p.x, s.y0 + s.scale * p.y, s.z))
            });
            Aabb::from_points(corners).unwrap_or_else(Aabb::zero)
        }
        Primitive::EightPointSolid { dz, vertices } => {
            let corners = vertices.iter().enumerate().map(|(i, v)| {
                let z = if i < 4 { -*dz } else { *dz };
                Point3::new(v[0], v[1], z)
            });
            Aabb::from_points(corners).unwrap_or_else(Aabb::zero)
        }
        Primitive::Tessellated { facets } => {
            let corners = facets.iter().flat_map(|f| [f.a, f.b, f.c]);
            Aabb::from_points(corners).unwrap_or_else(Aabb::zero)
        }
        Primitive::Shapeless => Aabb::zero(),
    }
}

fn planes_bbox(planes: &[super::ZPlane], radial_factor: f64) -> Aabb {
    let mut rmax: f64 = 0.0;
    let mut zmin = f64::INFINITY;
    let mut zmax = f64::NEG_INFINITY;
    for plane in planes {
        rmax = rmax.max(plane.rmax * radial_factor);
        zmin = zmin.min(plane.z);
        zmax = zmax.max(plane.z);
    }
    if planes.is_empty() {
        return Aabb::zero();
    }
    Aabb {
        min: Point3::new(-rmax, -rmax, zmin),
        max: Point3::new(rmax, rmax, zmax),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::math::{Rotation, Vector3};
    use crate::shapes::ZPlane;

    #[test]
    fn tube_box_covers_radius() {
        let bb = primitive_bbox(&Primitive::Tube {
            rmin: 1.0,
            rmax: 4.0,
            dz: 2.0,
            start_phi: 0.0,
            end_phi: FRAC_PI_2,
        });
        assert!((bb.max.x - 4.0).abs() < 1e-12);
        assert!((bb.max.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn polycone_box_uses_plane_extremes() {
        let bb = primitive_bbox(&Primitive::Polycone {
            start_phi: 0.0,
            delta_phi: std::f64::consts::TAU,
            planes: vec![
                ZPlane {
                    z: -3.0,
                    rmin: 0.0,
                    rmax: 2.0,
                },
                ZPlane {
                    z: 7.0,
                    rmin: 0.0,
                    rmax: 5.0,
                },
            ],
        });
        assert!((bb.min.z + 3.0).abs() < 1e-12);
        assert!((bb.max.z - 7.0).abs() < 1e-12);
        assert!((bb.max.x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn polyhedra_box_reaches_corners() {
        let bb = primitive_bbox(&Primitive::Polyhedra {
            start_phi: 0.0,
            delta_phi: std::f64::consts::TAU,
            nsides: 4,
            planes: vec![
                ZPlane {
                    z: -1.0,
                    rmin: 0.0,
                    rmax: 1.0,
                },
                ZPlane {
                    z: 1.0,
                    rmin: 0.0,
                    rmax: 1.0,
                },
            ],
        });
        // Square with apothem 1 has corners at sqrt(2).
        assert!((bb.max.x - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn transform_rotates_extents() {
        let bb = Aabb::from_half_extents(4.0, 1.0, 1.0);
        let rotated = bb.transform(&RigidTransform::from_rotation(Rotation::about_z(
            FRAC_PI_2,
        )));
        assert!((rotated.max.y - 4.0).abs() < 1e-9);
        assert!((rotated.max.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn transform_keeps_infinite_box_infinite() {
        let bb = Aabb::infinite();
        let moved = bb.transform(&RigidTransform::from_translation(Vector3::x()));
        assert!(moved.max.x.is_infinite());
    }

    #[test]
    fn overlap_of_disjoint_boxes_is_degenerate() {
        let a = Aabb::from_half_extents(1.0, 1.0, 1.0);
        let b = a.transform(&RigidTransform::from_translation(Vector3::new(
            10.0, 0.0, 0.0,
        )));
        let overlap = a.overlap(&b);
        assert!((overlap.max.x - overlap.min.x).abs() < 1e-12);
    }
}
