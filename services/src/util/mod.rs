pub mod http;
pub mod parsing;
