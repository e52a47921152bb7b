pub mod error;
pub mod math;
pub mod operations;
pub mod shapes;

pub use error::{DetcsgError, Result};
pub use shapes::{GeometryStore, ShapeId, Solid};
