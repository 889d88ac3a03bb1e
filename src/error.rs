use thiserror::Error;

/// A method name that is not one of the supported HTTP methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method '{0}'; expected one of get, post, put, patch, delete")]
pub struct UnknownMethod(pub String);

/// Errors returned by index-based edits on an [`EndpointStore`](crate::EndpointStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no parameter at index {index} (endpoint has {len})")]
    ParameterOutOfRange { index: usize, len: usize },
    #[error("no response at index {index} (endpoint has {len})")]
    ResponseOutOfRange { index: usize, len: usize },
    #[error("no body field at path {path:?}")]
    FieldNotFound { path: Vec<usize> },
    #[error("body field at path {path:?} is not an array or object")]
    NotAContainer { path: Vec<usize> },
}

/// Errors raised while reading or writing an endpoint document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON endpoint document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML endpoint document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DocumentError {
    /// One-based `(line, column)` of the error when the parser reported one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            DocumentError::Json(err) if err.line() > 0 => Some((err.line(), err.column())),
            DocumentError::Json(_) => None,
            DocumentError::Yaml(err) => err
                .location()
                .map(|location| (location.line(), location.column())),
        }
    }
}
