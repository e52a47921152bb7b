pub mod bbox;
pub mod dims;
pub mod solid;
pub mod store;

pub use bbox::Aabb;
pub use solid::Solid;
pub use store::{GeometryStore, ShapeData, ShapeId};

use crate::math::{Point2, Point3, RigidTransform, Vector3};

/// Type tags attached to every constructed shape.
///
/// The tag identifies the construction recipe, not the storage variant:
/// derived composites carry their own tag (`TruncatedTube`, `PseudoTrap`)
/// even though they are stored as boolean nodes.
pub mod tags {
    pub const BOX: &str = "Box";
    pub const HALF_SPACE: &str = "HalfSpace";
    pub const TUBE: &str = "Tube";
    pub const CUT_TUBE: &str = "CutTube";
    pub const ELLIPTICAL_TUBE: &str = "EllipticalTube";
    pub const HYPERBOLOID: &str = "Hyperboloid";
    pub const CONE: &str = "Cone";
    pub const CONE_SEGMENT: &str = "ConeSegment";
    pub const SPHERE: &str = "Sphere";
    pub const TORUS: &str = "Torus";
    pub const TRD1: &str = "Trd1";
    pub const TRD2: &str = "Trd2";
    pub const TRAP: &str = "Trap";
    pub const PARABOLOID: &str = "Paraboloid";
    pub const POLYCONE: &str = "Polycone";
    pub const POLYHEDRA: &str = "Polyhedra";
    pub const EXTRUDED_POLYGON: &str = "ExtrudedPolygon";
    pub const EIGHT_POINT_SOLID: &str = "EightPointSolid";
    pub const TESSELLATED_SOLID: &str = "TessellatedSolid";
    pub const SCALE: &str = "Scale";
    pub const SHAPELESS: &str = "Shapeless";
    pub const UNION: &str = "Union";
    pub const SUBTRACTION: &str = "Subtraction";
    pub const INTERSECTION: &str = "Intersection";
    pub const TRUNCATED_TUBE: &str = "TruncatedTube";
    pub const PSEUDO_TRAP: &str = "PseudoTrap";
}

/// Coarse classification of a shape: a leaf primitive or a boolean node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Primitive,
    Boolean,
}

/// The boolean set operation of a composite shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtraction,
    Intersection,
}

impl BooleanOp {
    /// The type tag a plain composite of this operation carries.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Union => tags::UNION,
            Self::Subtraction => tags::SUBTRACTION,
            Self::Intersection => tags::INTERSECTION,
        }
    }
}

/// A boolean node: two placed child shapes combined by a set operation.
///
/// The operator and children are fixed at construction; only the child
/// shapes' own dimensions may change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanNode {
    pub op: BooleanOp,
    pub left: ShapeId,
    pub right: ShapeId,
    pub left_transform: RigidTransform,
    pub right_transform: RigidTransform,
}

/// A z-plane of a polycone or polyhedra: inner and outer radius at `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZPlane {
    pub z: f64,
    pub rmin: f64,
    pub rmax: f64,
}

/// One cross-section of an extruded polygon: the polygon is placed at
/// offset (`x0`, `y0`), scaled by `scale`, at height `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZSection {
    pub z: f64,
    pub x0: f64,
    pub y0: f64,
    pub scale: f64,
}

/// A triangular facet of a tessellated solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

/// Native dimensions of every primitive kind.
///
/// All stored angles are in radians; the degree representation used at the
/// public parameter boundary is produced by the marshaling layer. Linear
/// extents are half-lengths unless noted otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Box {
        dx: f64,
        dy: f64,
        dz: f64,
    },
    HalfSpace {
        point: Point3,
        normal: Vector3,
    },
    Tube {
        rmin: f64,
        rmax: f64,
        dz: f64,
        start_phi: f64,
        end_phi: f64,
    },
    /// A tube segment cut by two non-perpendicular planes at -dz and +dz.
    CutTube {
        rmin: f64,
        rmax: f64,
        dz: f64,
        start_phi: f64,
        end_phi: f64,
        low_normal: Vector3,
        high_normal: Vector3,
    },
    EllipticalTube {
        a: f64,
        b: f64,
        dz: f64,
    },
    Hyperboloid {
        rin: f64,
        stereo_in: f64,
        rout: f64,
        stereo_out: f64,
        dz: f64,
    },
    Cone {
        dz: f64,
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
    },
    ConeSegment {
        dz: f64,
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
        start_phi: f64,
        end_phi: f64,
    },
    Sphere {
        rmin: f64,
        rmax: f64,
        start_theta: f64,
        end_theta: f64,
        start_phi: f64,
        end_phi: f64,
    },
    Torus {
        r: f64,
        rmin: f64,
        rmax: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    Trd1 {
        x1: f64,
        x2: f64,
        y: f64,
        dz: f64,
    },
    Trd2 {
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
        dz: f64,
    },
    /// General trapezoid: two parallel faces at -dz and +dz, each an
    /// alpha-sheared trapezoid, with the line joining the face centres
    /// tilted by (theta, phi).
    Trap {
        dz: f64,
        theta: f64,
        phi: f64,
        h1: f64,
        bl1: f64,
        tl1: f64,
        alpha1: f64,
        h2: f64,
        bl2: f64,
        tl2: f64,
        alpha2: f64,
    },
    Paraboloid {
        rlo: f64,
        rhi: f64,
        dz: f64,
    },
    Polycone {
        start_phi: f64,
        delta_phi: f64,
        planes: Vec<ZPlane>,
    },
    Polyhedra {
        start_phi: f64,
        delta_phi: f64,
        nsides: u32,
        planes: Vec<ZPlane>,
    },
    ExtrudedPolygon {
        points: Vec<Point2>,
        sections: Vec<ZSection>,
    },
    /// Arbitrary hexahedron: eight (x, y) vertices, four on each z face,
    /// counter-clockwise as seen from +z.
    EightPointSolid {
        dz: f64,
        vertices: [[f64; 2]; 8],
    },
    Tessellated {
        facets: Vec<Facet>,
    },
    /// Placeholder without own geometry, used for assembly envelopes.
    Shapeless,
}

impl Primitive {
    /// The type tag of this primitive kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Box { .. } => tags::BOX,
            Self::HalfSpace { .. } => tags::HALF_SPACE,
            Self::Tube { .. } => tags::TUBE,
            Self::CutTube { .. } => tags::CUT_TUBE,
            Self::EllipticalTube { .. } => tags::ELLIPTICAL_TUBE,
            Self::Hyperboloid { .. } => tags::HYPERBOLOID,
            Self::Cone { .. } => tags::CONE,
            Self::ConeSegment { .. } => tags::CONE_SEGMENT,
            Self::Sphere { .. } => tags::SPHERE,
            Self::Torus { .. } => tags::TORUS,
            Self::Trd1 { .. } => tags::TRD1,
            Self::Trd2 { .. } => tags::TRD2,
            Self::Trap { .. } => tags::TRAP,
            Self::Paraboloid { .. } => tags::PARABOLOID,
            Self::Polycone { .. } => tags::POLYCONE,
            Self::Polyhedra { .. } => tags::POLYHEDRA,
            Self::ExtrudedPolygon { .. } => tags::EXTRUDED_POLYGON,
            Self::EightPointSolid { .. } => tags::EIGHT_POINT_SOLID,
            Self::Tessellated { .. } => tags::TESSELLATED_SOLID,
            Self::Shapeless => tags::SHAPELESS,
        }
    }
}

/// Storage-level geometry of a shape: a leaf primitive, a scaled view of
/// another shape, or a boolean node over two placed children.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Primitive(Primitive),
    Scaled {
        base: ShapeId,
        sx: f64,
        sy: f64,
        sz: f64,
    },
    Boolean(BooleanNode),
}

impl ShapeGeometry {
    /// The coarse kind of this geometry. Scaled views count as primitives:
    /// they have no boolean children of their own.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Primitive(_) | Self::Scaled { .. } => ShapeKind::Primitive,
            Self::Boolean(_) => ShapeKind::Boolean,
        }
    }
}
