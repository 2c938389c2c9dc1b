//! # S-Expression Scanner
//!
//! Buffer and structural scanning primitives for symbolic-expression text.
//!
//! ## Philosophy
//!
//! - **Mechanism over policy**: The scanner answers structural queries
//!   (atom bounds, expression traversal, string state); callers decide
//!   what to edit.
//! - **Deterministic**: Same buffer and offset => same answer. Nothing is
//!   cached across edits; every span is recomputed fresh.
//! - **Dialect as data**: The "symbol constituent" character class and the
//!   delimiter/comment/string syntax live in an explicit [`SyntaxSpec`]
//!   table, not in scattered `match` arms.
//! - **No parser**: Traversal works on balanced delimiters, string regions
//!   and constituent runs. There is no AST and no reader.
//!
//! ## Key Types
//!
//! - [`EditBuffer`]: offset-addressed mutable character buffer
//! - [`Span`]: half-open char-offset range, invalidated by any edit
//! - [`SyntaxSpec`]: per-dialect character classification
//! - [`Scanner`]: cursor-relative structural queries over a buffer

pub mod buffer;
pub mod scan;
pub mod syntax;

pub use buffer::{EditBuffer, Span};
pub use scan::{Direction, ScanError, Scanner};
pub use syntax::{SyntaxClass, SyntaxSpec};
