pub mod expr;
pub mod field;
pub mod literal;
pub mod operator;
pub mod query;
pub mod sort;
pub mod span;
