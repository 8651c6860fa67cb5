mod identifiers;
mod result;

pub use result::Result;
