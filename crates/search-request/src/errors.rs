use query_compiler::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("search request requires a non-empty experiment scope")]
    MissingScope,

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Failure reported by the injected search backend.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("search backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("failed to decode result document: {0}")]
    Decode(#[from] serde_json::Error),
}
