//! Lexer and parser for the **Vitrine frame-grid descriptor** (`.grid`).
//!
//! A descriptor lists the frames of one repeating gallery section. Each frame
//! is one line (or a `;`-separated segment):
//!
//! ```text
//! columns 12
//! // row col span aspect orientation
//! 1 1 4 3:4 v
//! 1 6 7 16:9 horizontal
//! ```
//!
//! This crate is intentionally dependency-free so it can be consumed by
//! layout tooling without pulling in any engine or GPU code.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `GridDocument`, `FrameSpec`, `Orientation` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{FrameSpec, GridDocument, Orientation};
pub use error::ParseError;
pub use parser::parse_str;
