mod coordinate;
pub(crate) mod error;
mod geometry;
mod interval;
mod multi_polygon;

pub use coordinate::Coordinate2D;
pub use error::PrimitivesError;
pub use geometry::Geometry;
pub use interval::{Interval, TimeGranularity};
pub use multi_polygon::{MultiPolygon, Polygon, Ring};
