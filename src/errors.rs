use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CasGraphError {
    #[error("duplicate vertex: {0}")]
    DuplicateVertex(String),
    #[error("vertex not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("script error: {0}")]
    ScriptError(String),
}

impl CasGraphError {
    pub fn duplicate_vertex<T: Into<String>>(msg: T) -> Self {
        CasGraphError::DuplicateVertex(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CasGraphError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        CasGraphError::InvalidInput(msg.into())
    }

    pub fn script<T: Into<String>>(msg: T) -> Self {
        CasGraphError::ScriptError(msg.into())
    }
}
