//! Template adapter: Liquid source text to tag tree.
//!
//! Covers the subset of Liquid needed for dependency analysis:
//! - `assign` tags with filter chains
//! - `if` / `unless` / `case` branch structure
//! - block tags (`for`, `capture`, `raw`, ...) kept as opaque nodes
//!
//! Expressions are never evaluated here; the adapter only classifies tokens
//! as literals or identifiers.

mod lexer;
mod parser;
mod value;

pub use lexer::{tokenize, RawTag, Segment};
pub use parser::{parse_template, parse_template_with};
pub use value::{is_literal, parse_value};
