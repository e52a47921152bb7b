//! Derived composite shapes: composites synthesized from high-level
//! physical parameters.
//!
//! The kernel representation of a derived composite is an ordinary boolean
//! node; the original parameters are not recoverable from it. They are
//! kept in a typed side table on the [`crate::GeometryStore`], keyed by
//! the composite's shape id, with a line-delimited string serialization
//! whose parser is the exact inverse of its formatter.

mod pseudo_trap;
mod truncated_tube;

pub use pseudo_trap::{MakePseudoTrap, PseudoTrapParams};
pub use truncated_tube::{MakeTruncatedTube, TruncatedTubeParams};

use crate::error::{Result, ShapeError};
use crate::shapes::tags;

/// Original construction parameters of a derived composite.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationRecord {
    TruncatedTube(TruncatedTubeParams),
    PseudoTrap(PseudoTrapParams),
}

impl DerivationRecord {
    /// The type tag of the composite this record belongs to.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TruncatedTube(_) => tags::TRUNCATED_TUBE,
            Self::PseudoTrap(_) => tags::PSEUDO_TRAP,
        }
    }

    /// Serializes the record: one value per line, in declared parameter
    /// order, booleans as `1`/`0`.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::TruncatedTube(p) => {
                format!(
                    "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
                    p.dz,
                    p.rmin,
                    p.rmax,
                    p.start_phi,
                    p.delta_phi,
                    p.cut_at_start,
                    p.cut_at_delta,
                    u8::from(p.cut_inside)
                )
            }
            Self::PseudoTrap(p) => {
                format!(
                    "{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
                    p.x1,
                    p.x2,
                    p.y1,
                    p.y2,
                    p.z,
                    p.r,
                    u8::from(p.at_minus_z)
                )
            }
        }
    }

    /// Parses a record serialized by [`encode`](Self::encode), dispatching
    /// on the composite's type tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag names no derived composite or the text
    /// does not hold the expected number of numeric values.
    pub fn parse(tag: &str, text: &str) -> Result<Self> {
        match tag {
            tags::TRUNCATED_TUBE => {
                let v = parse_values(tag, text, 8)?;
                Ok(Self::TruncatedTube(TruncatedTubeParams {
                    dz: v[0],
                    rmin: v[1],
                    rmax: v[2],
                    start_phi: v[3],
                    delta_phi: v[4],
                    cut_at_start: v[5],
                    cut_at_delta: v[6],
                    cut_inside: v[7].abs() > f64::EPSILON,
                }))
            }
            tags::PSEUDO_TRAP => {
                let v = parse_values(tag, text, 7)?;
                Ok(Self::PseudoTrap(PseudoTrapParams {
                    x1: v[0],
                    x2: v[1],
                    y1: v[2],
                    y2: v[3],
                    z: v[4],
                    r: v[5],
                    at_minus_z: v[6].abs() > f64::EPSILON,
                }))
            }
            other => Err(ShapeError::InvalidArgument(format!(
                "no derivation metadata format for shape tag {other}"
            ))
            .into()),
        }
    }
}

fn parse_values(tag: &str, text: &str, expected: usize) -> Result<Vec<f64>> {
    let values: Vec<f64> = text
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| {
            ShapeError::InvalidArgument(format!("malformed {tag} metadata: {e}"))
        })?;
    if values.len() != expected {
        return Err(ShapeError::InvalidArgument(format!(
            "{tag} metadata holds {} values, expected {expected}",
            values.len()
        ))
        .into());
    }
    Ok(values)
}
