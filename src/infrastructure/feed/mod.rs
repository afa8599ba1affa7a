pub mod parser;
pub mod sanitizer;

pub use parser::parse;
pub use sanitizer::sanitize;
