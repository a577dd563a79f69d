//! Decoding helpers for structured oracle answers

mod parser;
mod response;

pub use parser::parse_with_fallback;
pub use response::LlmResponse;
