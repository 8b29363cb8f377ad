//! Composes the experiment scope, a compiled filter and sort specification
//! and a result-size bound into one backend-ready search request, and maps
//! raw result documents back into flat run records.

pub mod documents;
pub mod errors;
pub mod executor;
pub mod request;

pub use documents::{RunDocument, RunRecord};
pub use errors::{ExecutorError, RequestError, SearchError};
pub use executor::{RunSearcher, SearchExecutor};
pub use request::{SearchRequest, compile_query_string, compile_search};
