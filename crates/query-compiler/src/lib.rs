//! Lowers parsed filter expressions and sort clauses into the search
//! backend's nested boolean query and sort document shapes.

pub mod errors;
pub mod lower;
pub mod query;
pub mod render;
pub mod sort;

pub use errors::CompileError;
pub use lower::{compile_filter, lower};
pub use sort::{compile_sort, compile_sort_strings};
