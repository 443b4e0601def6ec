//! Response parsing.

mod parser;

pub use parser::{ParsedResponse, parse_response};
