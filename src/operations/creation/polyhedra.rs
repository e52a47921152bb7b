use crate::error::{Result, ShapeError};
use crate::math::{Point2, Point3};
use crate::shapes::{
    tags, Facet, GeometryStore, Primitive, ShapeGeometry, Solid, ZPlane, ZSection,
};

fn build_planes(
    kind: &str,
    z: &[f64],
    rmin: &[f64],
    rmax: &[f64],
    check_radii: bool,
) -> Result<Vec<ZPlane>> {
    if rmin.len() < 2 {
        return Err(ShapeError::InvalidArgument(format!(
            "{kind}: not enough z-planes, minimum is 2"
        ))
        .into());
    }
    if z.len() != rmin.len() || z.len() != rmax.len() {
        return Err(ShapeError::InvalidArgument(format!(
            "{kind}: vectors z ({}), rmin ({}), rmax ({}) not of same length",
            z.len(),
            rmin.len(),
            rmax.len()
        ))
        .into());
    }
    let mut planes = Vec::with_capacity(z.len());
    for i in 0..z.len() {
        if check_radii && (rmin[i] < 0.0 || rmin[i] > rmax[i]) {
            return Err(ShapeError::InvalidArgument(format!(
                "{kind}: illegal radii rmin={} rmax={} at plane {i}",
                rmin[i], rmax[i]
            ))
            .into());
        }
        planes.push(ZPlane {
            z: z[i],
            rmin: rmin[i],
            rmax: rmax[i],
        });
    }
    Ok(planes)
}

/// Creates a polycone: a solid of revolution over a piecewise-linear
/// radial profile.
pub struct MakePolycone {
    name: String,
    start_phi: f64,
    delta_phi: f64,
    rmin: Vec<f64>,
    rmax: Vec<f64>,
    z: Vec<f64>,
}

impl MakePolycone {
    /// Creates a new `MakePolycone` operation. Phi angles are in degrees;
    /// the three sequences give inner radius, outer radius and position of
    /// each z-plane.
    #[must_use]
    pub fn new(
        start_phi: f64,
        delta_phi: f64,
        rmin: Vec<f64>,
        rmax: Vec<f64>,
        z: Vec<f64>,
    ) -> Self {
        Self {
            name: String::new(),
            start_phi,
            delta_phi,
            rmin,
            rmax,
            z,
        }
    }

    /// Convenience form for a solid polycone: inner radius zero
    /// everywhere.
    #[must_use]
    pub fn from_radii(start_phi: f64, delta_phi: f64, r: Vec<f64>, z: Vec<f64>) -> Self {
        let rmin = vec![0.0; r.len()];
        Self::new(start_phi, delta_phi, rmin, r, z)
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation, creating the polycone in the store.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than 2 z-planes or sequences of
    /// different length.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        let planes = build_planes("Polycone", &self.z, &self.rmin, &self.rmax, false)?;
        Ok(store.insert(
            self.name.clone(),
            tags::POLYCONE,
            ShapeGeometry::Primitive(Primitive::Polycone {
                start_phi: self.start_phi.to_radians(),
                delta_phi: self.delta_phi.to_radians(),
                planes,
            }),
            false,
        ))
    }
}

/// Appends z-planes to an existing polycone.
pub struct AddZPlanes {
    solid: Solid,
    rmin: Vec<f64>,
    rmax: Vec<f64>,
    z: Vec<f64>,
}

impl AddZPlanes {
    /// Creates a new `AddZPlanes` operation.
    #[must_use]
    pub fn new(solid: Solid, rmin: Vec<f64>, rmax: Vec<f64>, z: Vec<f64>) -> Self {
        Self {
            solid,
            rmin,
            rmax,
            z,
        }
    }

    /// Executes the operation, growing the polycone through the dimension
    /// marshaling path.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not a bound polycone, fewer than
    /// 2 planes are added, or the sequences differ in length.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, store: &mut GeometryStore) -> Result<()> {
        let added = build_planes("Polycone", &self.z, &self.rmin, &self.rmax, false)?;
        if self.solid.title(store)? != tags::POLYCONE {
            return Err(
                ShapeError::InvalidArgument("z-planes can only be added to a Polycone".into())
                    .into(),
            );
        }
        let mut params = self.solid.dimensions(store)?;
        params[2] += added.len() as f64;
        for plane in added {
            params.push(plane.z);
            params.push(plane.rmin);
            params.push(plane.rmax);
        }
        self.solid.set_dimensions(store, &params)
    }
}

/// Creates a regular polyhedron: `nsides` flat sides between two z-planes
/// at -zlen/2 and +zlen/2, full revolution.
pub struct MakePolyhedraRegular {
    name: String,
    nsides: u32,
    rmin: f64,
    rmax: f64,
    zlen: f64,
}

impl MakePolyhedraRegular {
    /// Creates a new `MakePolyhedraRegular` operation. Radii are measured
    /// to the flat sides.
    #[must_use]
    pub fn new(nsides: u32, rmin: f64, rmax: f64, zlen: f64) -> Self {
        Self {
            name: String::new(),
            nsides,
            rmin,
            rmax,
            zlen,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if `rmin`/`rmax` are negative or out of order, or
    /// with fewer than 3 sides.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.rmin < 0.0 || self.rmin > self.rmax {
            return Err(ShapeError::InvalidArgument(format!(
                "PolyhedraRegular: illegal radii rmin={} rmax={}",
                self.rmin, self.rmax
            ))
            .into());
        }
        if self.nsides < 3 {
            return Err(ShapeError::InvalidArgument(
                "PolyhedraRegular: at least 3 sides required".into(),
            )
            .into());
        }
        let half = self.zlen / 2.0;
        Ok(store.insert(
            self.name.clone(),
            tags::POLYHEDRA,
            ShapeGeometry::Primitive(Primitive::Polyhedra {
                start_phi: 0.0,
                delta_phi: std::f64::consts::TAU,
                nsides: self.nsides,
                planes: vec![
                    ZPlane {
                        z: -half,
                        rmin: self.rmin,
                        rmax: self.rmax,
                    },
                    ZPlane {
                        z: half,
                        rmin: self.rmin,
                        rmax: self.rmax,
                    },
                ],
            }),
            false,
        ))
    }
}

/// Creates a general polyhedron: `nsides` flat sides over a piecewise
/// radial profile.
pub struct MakePolyhedra {
    name: String,
    nsides: u32,
    start_phi: f64,
    delta_phi: f64,
    z: Vec<f64>,
    rmin: Vec<f64>,
    rmax: Vec<f64>,
}

impl MakePolyhedra {
    /// Creates a new `MakePolyhedra` operation. Phi angles are in degrees.
    #[must_use]
    pub fn new(
        nsides: u32,
        start_phi: f64,
        delta_phi: f64,
        z: Vec<f64>,
        rmin: Vec<f64>,
        rmax: Vec<f64>,
    ) -> Self {
        Self {
            name: String::new(),
            nsides,
            start_phi,
            delta_phi,
            z,
            rmin,
            rmax,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error on sequences of different length, radii that are
    /// negative or out of order, or fewer than 3 sides.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.nsides < 3 {
            return Err(ShapeError::InvalidArgument(
                "Polyhedra: at least 3 sides required".into(),
            )
            .into());
        }
        let planes = build_planes("Polyhedra", &self.z, &self.rmin, &self.rmax, true)?;
        Ok(store.insert(
            self.name.clone(),
            tags::POLYHEDRA,
            ShapeGeometry::Primitive(Primitive::Polyhedra {
                start_phi: self.start_phi.to_radians(),
                delta_phi: self.delta_phi.to_radians(),
                nsides: self.nsides,
                planes,
            }),
            false,
        ))
    }
}

/// Creates an extruded polygon: a 2D outline swept through scaled and
/// offset cross-sections along z.
pub struct MakeExtrudedPolygon {
    name: String,
    points: Vec<Point2>,
    sections: Vec<ZSection>,
}

impl MakeExtrudedPolygon {
    /// Creates a new `MakeExtrudedPolygon` operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, sections: Vec<ZSection>) -> Self {
        Self {
            name: String::new(),
            points,
            sections,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than 3 polygon points or fewer than 2
    /// sections.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.points.len() < 3 {
            return Err(ShapeError::InvalidArgument(
                "ExtrudedPolygon: outline needs at least 3 points".into(),
            )
            .into());
        }
        if self.sections.len() < 2 {
            return Err(ShapeError::InvalidArgument(
                "ExtrudedPolygon: at least 2 z-sections required".into(),
            )
            .into());
        }
        Ok(store.insert(
            self.name.clone(),
            tags::EXTRUDED_POLYGON,
            ShapeGeometry::Primitive(Primitive::ExtrudedPolygon {
                points: self.points.clone(),
                sections: self.sections.clone(),
            }),
            false,
        ))
    }
}

/// Creates an arbitrary hexahedron from its eight (x, y) vertices, four
/// on each z face.
pub struct MakeEightPointSolid {
    name: String,
    dz: f64,
    vertices: [[f64; 2]; 8],
}

impl MakeEightPointSolid {
    /// Creates a new `MakeEightPointSolid` operation. The first four
    /// vertices lie at -dz, the last four at +dz, counter-clockwise as
    /// seen from +z.
    #[must_use]
    pub fn new(dz: f64, vertices: [[f64; 2]; 8]) -> Self {
        Self {
            name: String::new(),
            dz,
            vertices,
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-length is negative.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.dz < 0.0 {
            return Err(ShapeError::InvalidArgument(
                "EightPointSolid: half-length must be non-negative".into(),
            )
            .into());
        }
        Ok(store.insert(
            self.name.clone(),
            tags::EIGHT_POINT_SOLID,
            ShapeGeometry::Primitive(Primitive::EightPointSolid {
                dz: self.dz,
                vertices: self.vertices,
            }),
            true,
        ))
    }
}

/// Creates a tessellated solid from triangular facets.
pub struct MakeTessellatedSolid {
    name: String,
    facets: Vec<Facet>,
}

impl MakeTessellatedSolid {
    /// Creates a new, empty `MakeTessellatedSolid` operation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            facets: Vec::new(),
        }
    }

    /// Sets the shape name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Adds a triangular facet.
    #[must_use]
    pub fn add_facet(mut self, a: Point3, b: Point3, c: Point3) -> Self {
        self.facets.push(Facet { a, b, c });
        self
    }

    /// Adds a quadrilateral facet, stored as two triangles.
    #[must_use]
    pub fn add_quad(self, a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        self.add_facet(a, b, c).add_facet(a, c, d)
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if no facet was added.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Solid> {
        if self.facets.is_empty() {
            return Err(ShapeError::InvalidArgument(
                "TessellatedSolid: at least one facet required".into(),
            )
            .into());
        }
        Ok(store.insert(
            self.name.clone(),
            tags::TESSELLATED_SOLID,
            ShapeGeometry::Primitive(Primitive::Tessellated {
                facets: self.facets.clone(),
            }),
            false,
        ))
    }
}

impl Default for MakeTessellatedSolid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn polycone_single_plane_fails() {
        let mut store = GeometryStore::new();
        let result = MakePolycone::new(0.0, 360.0, vec![1.0], vec![2.0], vec![0.0])
            .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn polycone_mismatched_lengths_fail() {
        let mut store = GeometryStore::new();
        let result = MakePolycone::new(
            0.0,
            360.0,
            vec![1.0, 1.0, 1.0],
            vec![2.0, 2.0],
            vec![-1.0, 0.0, 1.0],
        )
        .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn polycone_marshals_plane_list() {
        let mut store = GeometryStore::new();
        let solid = MakePolycone::new(
            0.0,
            360.0,
            vec![1.0, 1.5],
            vec![3.0, 4.0],
            vec![-5.0, 5.0],
        )
        .execute(&mut store)
        .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[2] - 2.0).abs() < 1e-12);
        assert_eq!(dims.len(), 3 + 3 * 2);
    }

    #[test]
    fn add_z_planes_extends_profile() {
        let mut store = GeometryStore::new();
        let solid = MakePolycone::new(
            0.0,
            360.0,
            vec![0.0, 0.0],
            vec![2.0, 2.0],
            vec![-4.0, 0.0],
        )
        .execute(&mut store)
        .unwrap();
        AddZPlanes::new(solid, vec![0.0, 0.0], vec![3.0, 1.0], vec![2.0, 6.0])
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        assert!((dims[2] - 4.0).abs() < 1e-12);
        let bb = solid.bounding_box(&store).unwrap();
        assert!((bb.max.z - 6.0).abs() < 1e-12);
        assert!((bb.max.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn add_z_planes_rejects_other_kinds() {
        let mut store = GeometryStore::new();
        let solid = crate::operations::creation::MakeBox::new(1.0, 1.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let result = AddZPlanes::new(solid, vec![0.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0])
            .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn polyhedra_inverted_radii_fail() {
        let mut store = GeometryStore::new();
        let result = MakePolyhedra::new(
            6,
            0.0,
            360.0,
            vec![-1.0, 1.0],
            vec![2.0, 2.0],
            vec![1.0, 1.0],
        )
        .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn regular_polyhedron_splits_zlen() {
        let mut store = GeometryStore::new();
        let solid = MakePolyhedraRegular::new(6, 1.0, 2.0, 10.0)
            .execute(&mut store)
            .unwrap();
        let dims = solid.dimensions(&store).unwrap();
        // start, delta, nsides, nz, then planes at -5 and +5
        assert!((dims[2] - 6.0).abs() < 1e-12);
        assert!((dims[4] + 5.0).abs() < 1e-12);
        assert!((dims[7] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn extruded_polygon_two_point_outline_fails() {
        let mut store = GeometryStore::new();
        let result = MakeExtrudedPolygon::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            vec![
                ZSection {
                    z: -1.0,
                    x0: 0.0,
                    y0: 0.0,
                    scale: 1.0,
                },
                ZSection {
                    z: 1.0,
                    x0: 0.0,
                    y0: 0.0,
                    scale: 1.0,
                },
            ],
        )
        .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn tessellated_quad_becomes_two_facets() {
        let mut store = GeometryStore::new();
        let solid = MakeTessellatedSolid::new()
            .add_quad(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .execute(&mut store)
            .unwrap();
        match solid.access(&store).unwrap().geometry() {
            ShapeGeometry::Primitive(Primitive::Tessellated { facets }) => {
                assert_eq!(facets.len(), 2);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
