//! Bidirectional mapping between a shape's native fields and the flat
//! ordered dimension vector used at the public parameter boundary.
//!
//! The vector order is fixed per kind. Angle-valued entries cross the
//! boundary in degrees and are stored in radians; the conversion factor is
//! fixed per field. For every marshalable kind, applying the vector read
//! back from a shape is a no-op.

use crate::error::{HandleError, Result, ShapeError};
use crate::math::{Point2, Point3, Vector3};

use super::{Primitive, ShapeGeometry, ZPlane, ZSection};

/// Reads the dimension vector of a shape. Boolean and tessellated shapes
/// have an empty vector: their geometry lives in children or facets.
#[must_use]
pub(crate) fn dimensions(geometry: &ShapeGeometry) -> Vec<f64> {
    match geometry {
        ShapeGeometry::Primitive(primitive) => primitive_dimensions(primitive),
        ShapeGeometry::Scaled { sx, sy, sz, .. } => vec![*sx, *sy, *sz],
        ShapeGeometry::Boolean(_) => Vec::new(),
    }
}

/// Writes `params` into the shape's native fields, in the same order used
/// by [`dimensions`].
///
/// # Errors
///
/// Fails with an arity error if `params` does not match the kind's
/// required length, or with [`HandleError::ImmutableDimensions`] for kinds
/// that cannot be reassigned in place.
pub(crate) fn apply_dimensions(
    geometry: &mut ShapeGeometry,
    tag: &'static str,
    params: &[f64],
) -> Result<()> {
    match geometry {
        ShapeGeometry::Primitive(primitive) => apply_primitive(primitive, tag, params),
        ShapeGeometry::Scaled { sx, sy, sz, .. } => {
            check_arity(tag, 3, params.len())?;
            *sx = params[0];
            *sy = params[1];
            *sz = params[2];
            Ok(())
        }
        ShapeGeometry::Boolean(_) => Err(HandleError::ImmutableDimensions(tag).into()),
    }
}

fn check_arity(kind: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(ShapeError::DimensionArity {
            kind,
            expected,
            got,
        }
        .into())
    }
}

#[allow(clippy::cast_precision_loss)]
fn primitive_dimensions(primitive: &Primitive) -> Vec<f64> {
    match primitive {
        Primitive::Box { dx, dy, dz } => vec![*dx, *dy, *dz],
        Primitive::HalfSpace { point, normal } => {
            vec![point.x, point.y, point.z, normal.x, normal.y, normal.z]
        }
        Primitive::Tube {
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
        } => vec![
            *rmin,
            *rmax,
            *dz,
            start_phi.to_degrees(),
            end_phi.to_degrees(),
        ],
        Primitive::CutTube {
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
            low_normal,
            high_normal,
        } => vec![
            *rmin,
            *rmax,
            *dz,
            start_phi.to_degrees(),
            end_phi.to_degrees(),
            low_normal.x,
            low_normal.y,
            low_normal.z,
            high_normal.x,
            high_normal.y,
            high_normal.z,
        ],
        Primitive::EllipticalTube { a, b, dz } => vec![*a, *b, *dz],
        Primitive::Hyperboloid {
            rin,
            stereo_in,
            rout,
            stereo_out,
            dz,
        } => vec![
            *rin,
            stereo_in.to_degrees(),
            *rout,
            stereo_out.to_degrees(),
            *dz,
        ],
        Primitive::Cone {
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
        } => vec![*dz, *rmin1, *rmax1, *rmin2, *rmax2],
        Primitive::ConeSegment {
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
            start_phi,
            end_phi,
        } => vec![
            *dz,
            *rmin1,
            *rmax1,
            *rmin2,
            *rmax2,
            start_phi.to_degrees(),
            end_phi.to_degrees(),
        ],
        Primitive::Sphere {
            rmin,
            rmax,
            start_theta,
            end_theta,
            start_phi,
            end_phi,
        } => vec![
            *rmin,
            *rmax,
            start_theta.to_degrees(),
            end_theta.to_degrees(),
            start_phi.to_degrees(),
            end_phi.to_degrees(),
        ],
        Primitive::Torus {
            r,
            rmin,
            rmax,
            start_phi,
            delta_phi,
        } => vec![
            *r,
            *rmin,
            *rmax,
            start_phi.to_degrees(),
            delta_phi.to_degrees(),
        ],
        Primitive::Trd1 { x1, x2, y, dz } => vec![*x1, *x2, *y, *dz],
        Primitive::Trd2 { x1, x2, y1, y2, dz } => vec![*x1, *x2, *y1, *y2, *dz],
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
        } => vec![
            *dz,
            theta.to_degrees(),
            phi.to_degrees(),
            *h1,
            *bl1,
            *tl1,
            alpha1.to_degrees(),
            *h2,
            *bl2,
            *tl2,
            alpha2.to_degrees(),
        ],
        Primitive::Paraboloid { rlo, rhi, dz } => vec![*rlo, *rhi, *dz],
        Primitive::Polycone {
            start_phi,
            delta_phi,
            planes,
        } => {
            let mut params = Vec::with_capacity(3 + 3 * planes.len());
            params.push(start_phi.to_degrees());
            params.push(delta_phi.to_degrees());
            params.push(planes.len() as f64);
            for plane in planes {
                params.push(plane.z);
                params.push(plane.rmin);
                params.push(plane.rmax);
            }
            params
        }
        Primitive::Polyhedra {
            start_phi,
            delta_phi,
            nsides,
            planes,
        } => {
            let mut params = Vec::with_capacity(4 + 3 * planes.len());
            params.push(start_phi.to_degrees());
            params.push(delta_phi.to_degrees());
            params.push(f64::from(*nsides));
            params.push(planes.len() as f64);
            for plane in planes {
                params.push(plane.z);
                params.push(plane.rmin);
                params.push(plane.rmax);
            }
            params
        }
        Primitive::ExtrudedPolygon { points, sections } => {
            let mut params = Vec::with_capacity(2 + 2 * points.len() + 4 * sections.len());
            params.push(points.len() as f64);
            params.push(sections.len() as f64);
            for point in points {
                params.push(point.x);
                params.push(point.y);
            }
            for section in sections {
                params.push(section.z);
                params.push(section.x0);
                params.push(section.y0);
                params.push(section.scale);
            }
            params
        }
        Primitive::EightPointSolid { dz, vertices } => {
            let mut params = Vec::with_capacity(17);
            params.push(*dz);
            for vertex in vertices {
                params.push(vertex[0]);
                params.push(vertex[1]);
            }
            params
        }
        Primitive::Tessellated { .. } | Primitive::Shapeless => Vec::new(),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines
)]
fn apply_primitive(primitive: &mut Primitive, tag: &'static str, params: &[f64]) -> Result<()> {
    match primitive {
        Primitive::Box { dx, dy, dz } => {
            check_arity(tag, 3, params.len())?;
            *dx = params[0];
            *dy = params[1];
            *dz = params[2];
        }
        Primitive::HalfSpace { point, normal } => {
            check_arity(tag, 6, params.len())?;
            *point = Point3::new(params[0], params[1], params[2]);
            *normal = Vector3::new(params[3], params[4], params[5]);
        }
        Primitive::Tube {
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
        } => {
            check_arity(tag, 5, params.len())?;
            *rmin = params[0];
            *rmax = params[1];
            *dz = params[2];
            *start_phi = params[3].to_radians();
            *end_phi = params[4].to_radians();
        }
        Primitive::CutTube {
            rmin,
            rmax,
            dz,
            start_phi,
            end_phi,
            low_normal,
            high_normal,
        } => {
            check_arity(tag, 11, params.len())?;
            *rmin = params[0];
            *rmax = params[1];
            *dz = params[2];
            *start_phi = params[3].to_radians();
            *end_phi = params[4].to_radians();
            *low_normal = Vector3::new(params[5], params[6], params[7]);
            *high_normal = Vector3::new(params[8], params[9], params[10]);
        }
        Primitive::EllipticalTube { a, b, dz } => {
            check_arity(tag, 3, params.len())?;
            *a = params[0];
            *b = params[1];
            *dz = params[2];
        }
        Primitive::Hyperboloid {
            rin,
            stereo_in,
            rout,
            stereo_out,
            dz,
        } => {
            check_arity(tag, 5, params.len())?;
            *rin = params[0];
            *stereo_in = params[1].to_radians();
            *rout = params[2];
            *stereo_out = params[3].to_radians();
            *dz = params[4];
        }
        Primitive::Cone {
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
        } => {
            check_arity(tag, 5, params.len())?;
            *dz = params[0];
            *rmin1 = params[1];
            *rmax1 = params[2];
            *rmin2 = params[3];
            *rmax2 = params[4];
        }
        Primitive::ConeSegment {
            dz,
            rmin1,
            rmax1,
            rmin2,
            rmax2,
            start_phi,
            end_phi,
        } => {
            check_arity(tag, 7, params.len())?;
            *dz = params[0];
            *rmin1 = params[1];
            *rmax1 = params[2];
            *rmin2 = params[3];
            *rmax2 = params[4];
            *start_phi = params[5].to_radians();
            *end_phi = params[6].to_radians();
        }
        Primitive::Sphere {
            rmin,
            rmax,
            start_theta,
            end_theta,
            start_phi,
            end_phi,
        } => {
            check_arity(tag, 6, params.len())?;
            *rmin = params[0];
            *rmax = params[1];
            *start_theta = params[2].to_radians();
            *end_theta = params[3].to_radians();
            *start_phi = params[4].to_radians();
            *end_phi = params[5].to_radians();
        }
        Primitive::Torus {
            r,
            rmin,
            rmax,
            start_phi,
            delta_phi,
        } => {
            check_arity(tag, 5, params.len())?;
            *r = params[0];
            *rmin = params[1];
            *rmax = params[2];
            *start_phi = params[3].to_radians();
            *delta_phi = params[4].to_radians();
        }
        Primitive::Trd1 { x1, x2, y, dz } => {
            check_arity(tag, 4, params.len())?;
            *x1 = params[0];
            *x2 = params[1];
            *y = params[2];
            *dz = params[3];
        }
        Primitive::Trd2 { x1, x2, y1, y2, dz } => {
            check_arity(tag, 5, params.len())?;
            *x1 = params[0];
            *x2 = params[1];
            *y1 = params[2];
            *y2 = params[3];
            *dz = params[4];
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
            check_arity(tag, 11, params.len())?;
            *dz = params[0];
            *theta = params[1].to_radians();
            *phi = params[2].to_radians();
            *h1 = params[3];
            *bl1 = params[4];
            *tl1 = params[5];
            *alpha1 = params[6].to_radians();
            *h2 = params[7];
            *bl2 = params[8];
            *tl2 = params[9];
            *alpha2 = params[10].to_radians();
        }
        Primitive::Paraboloid { rlo, rhi, dz } => {
            check_arity(tag, 3, params.len())?;
            *rlo = params[0];
            *rhi = params[1];
            *dz = params[2];
        }
        Primitive::Polycone {
            start_phi,
            delta_phi,
            planes,
        } => {
            if params.len() < 3 {
                return Err(ShapeError::DimensionArity {
                    kind: tag,
                    expected: 3,
                    got: params.len(),
                }
                .into());
            }
            let count = params[2] as usize;
            check_arity(tag, 3 + 3 * count, params.len())?;
            if count < 2 {
                return Err(
                    ShapeError::InvalidArgument("Polycone needs at least 2 z-planes".into())
                        .into(),
                );
            }
            *start_phi = params[0].to_radians();
            *delta_phi = params[1].to_radians();
            *planes = read_planes(&params[3..], count);
        }
        Primitive::Polyhedra {
            start_phi,
            delta_phi,
            nsides,
            planes,
        } => {
            if params.len() < 4 {
                return Err(ShapeError::DimensionArity {
                    kind: tag,
                    expected: 4,
                    got: params.len(),
                }
                .into());
            }
            let count = params[3] as usize;
            check_arity(tag, 4 + 3 * count, params.len())?;
            if count < 2 {
                return Err(
                    ShapeError::InvalidArgument("Polyhedra needs at least 2 z-planes".into())
                        .into(),
                );
            }
            *start_phi = params[0].to_radians();
            *delta_phi = params[1].to_radians();
            *nsides = params[2] as u32;
            *planes = read_planes(&params[4..], count);
        }
        Primitive::ExtrudedPolygon { points, sections } => {
            if params.len() < 2 {
                return Err(ShapeError::DimensionArity {
                    kind: tag,
                    expected: 2,
                    got: params.len(),
                }
                .into());
            }
            let npoints = params[0] as usize;
            let nsections = params[1] as usize;
            check_arity(tag, 2 + 2 * npoints + 4 * nsections, params.len())?;
            let mut new_points = Vec::with_capacity(npoints);
            for chunk in params[2..2 + 2 * npoints].chunks_exact(2) {
                new_points.push(Point2::new(chunk[0], chunk[1]));
            }
            let mut new_sections = Vec::with_capacity(nsections);
            for chunk in params[2 + 2 * npoints..].chunks_exact(4) {
                new_sections.push(ZSection {
                    z: chunk[0],
                    x0: chunk[1],
                    y0: chunk[2],
                    scale: chunk[3],
                });
            }
            *points = new_points;
            *sections = new_sections;
        }
        Primitive::EightPointSolid { dz, vertices } => {
            check_arity(tag, 17, params.len())?;
            *dz = params[0];
            for (vertex, chunk) in vertices.iter_mut().zip(params[1..].chunks_exact(2)) {
                vertex[0] = chunk[0];
                vertex[1] = chunk[1];
            }
        }
        Primitive::Tessellated { .. } => {
            return Err(HandleError::ImmutableDimensions(tag).into());
        }
        Primitive::Shapeless => {
            check_arity(tag, 0, params.len())?;
        }
    }
    Ok(())
}

fn read_planes(values: &[f64], count: usize) -> Vec<ZPlane> {
    let mut planes = Vec::with_capacity(count);
    for chunk in values.chunks_exact(3) {
        planes.push(ZPlane {
            z: chunk[0],
            rmin: chunk[1],
            rmax: chunk[2],
        });
    }
    planes
}
