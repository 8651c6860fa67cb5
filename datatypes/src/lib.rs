pub mod dataset;
pub mod error;
pub mod primitives;
pub mod util;
