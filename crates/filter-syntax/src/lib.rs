//! Grammar, parser and field classification for the run filter language.
//!
//! A filter string such as `metrics.accuracy >= 0.9 AND params.model = "resnet"`
//! is parsed into an immutable [`ast::expr::Expression`] tree; field tokens are
//! classified into nested attributes (`namespace.key`) or fixed top-level
//! columns. Compilation into a backend query lives in the `query-compiler`
//! crate.

pub mod ast;
pub mod builder;
pub mod errors;
pub mod parser;

pub use builder::{parse_filter, parse_query};
