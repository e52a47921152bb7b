//! Primitive factories: one construction operation per shape kind.
//!
//! Every factory validates its domain constraints before touching the
//! store, registers the kind's type tag, and computes the bounding box
//! eagerly unless the kind defers it (plane-list and facet shapes), so a
//! freshly built shape is queryable without a separate finalize step.
//! Angle-valued parameters are in degrees.

mod basic;
mod cones;
mod polyhedra;
mod trapezoids;
mod tubes;

pub use basic::{MakeBox, MakeHalfSpace, MakeScale, MakeShapeless};
pub use cones::{MakeCone, MakeConeSegment, MakeParaboloid, MakeSphere, MakeTorus};
pub use polyhedra::{
    AddZPlanes, MakeEightPointSolid, MakeExtrudedPolygon, MakePolycone, MakePolyhedra,
    MakePolyhedraRegular, MakeTessellatedSolid,
};
pub use trapezoids::{MakeTrap, MakeTrd1, MakeTrd2};
pub use tubes::{MakeCutTube, MakeEllipticalTube, MakeHyperboloid, MakeTube};
