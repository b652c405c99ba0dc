//! # BASIC
//!
//! An interactive, line-numbered BASIC in the style of the late 1970s.
//!
//! Lines typed with a leading number are stored in the program.
//! Any other line runs at once. The interpreter walks the syntax tree
//! of each stored line; nothing is compiled ahead of time.
//!
//! ```text
//! READY.
//! 10 FOR I=1 TO 3
//! 20 PRINT I;
//! 30 NEXT I
//! RUN
//! 123
//! READY.
//! ```
//!
//! Run the `basic` binary for a console session. Set `BASIC_LOG=debug`
//! to trace program edits and runtime errors on stderr.

pub mod lang;
pub mod mach;
pub mod term;
