/*!
## Rust Machine Module

This Rust module walks the syntax tree of each line directly.
There is no compile step: the runtime keeps a cursor into the
stored program and executes one statement per cycle.

*/

mod data;
mod exec;
mod function;
mod listing;
mod operation;
mod runtime;
mod stack;
mod val;
mod var;

pub use data::DataBank;
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Address;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
