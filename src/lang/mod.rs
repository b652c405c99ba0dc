/*!
# Rust Language Module

This Rust module provides lexical analysis, parsing, and rendering
of the BASIC language. A [`Line`] is the unit of work: the scanner
turns its text into tokens one at a time, the parser builds the
statement chain from them, and `Display` renders it back to the
canonical text used by `LIST` and `SAVE`.

*/

/// ## Line number of a program line
///
/// `None` is the direct (immediate) line which is never stored.
pub type LineNumber = Option<u16>;

/// ## Character range in the source text
pub type Column = std::ops::Range<usize>;

pub trait MaxValue<T> {
    fn max_value() -> T;
}

impl MaxValue<u16> for LineNumber {
    fn max_value() -> u16 {
        65529
    }
}

/// Longest text any single token may carry.
pub const MAX_TOKEN_LEN: usize = 128;

#[macro_use]
mod error;
mod format;
mod ident;
mod lex;
mod line;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::Ident;
pub use lex::Scanner;
pub use line::Line;
pub use parse::parse;
pub use token::{Operator, Token, Word};

pub mod ast;
