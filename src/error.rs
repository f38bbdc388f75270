//! Error types for cwctl operations.
//!
//! Two layers live here:
//!
//! - [`ApiError`] is the structured error returned by every call that talks
//!   to a remote service or the container runtime. It carries a [`ErrorKind`],
//!   a short operation tag, a human description and the underlying cause.
//! - [`CwctlError`] is the top-level error used by the CLI layer. It wraps
//!   `ApiError`, registry failures and I/O.
//!
//! Errors are only turned into JSON at the output boundary via
//! [`ApiError::to_json`].

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Boxed cause carried by an [`ApiError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Description used when a remote service answers 404.
pub const TEXT_API_NOT_FOUND: &str = "Resource not found";

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure, rejected dispatch, or unexpected HTTP status.
    Request,
    /// The remote service reported the resource absent.
    NotFound,
    /// The response body did not match the expected JSON shape.
    Parse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "request"),
            Self::NotFound => write!(f, "not found"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from a remote call.
#[derive(Debug, Error)]
#[error("{op}: {description}")]
pub struct ApiError {
    kind: ErrorKind,
    op: &'static str,
    description: String,
    #[source]
    source: Option<BoxError>,
}

/// JSON shape of an [`ApiError`] at the output boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutput {
    /// Operation tag.
    #[serde(rename = "error")]
    pub operation: String,
    /// Human readable description.
    #[serde(rename = "error_description")]
    pub description: String,
}

impl ApiError {
    /// Create an error from its parts.
    pub fn new(
        kind: ErrorKind,
        op: &'static str,
        description: impl Into<String>,
        source: Option<BoxError>,
    ) -> Self {
        Self {
            kind,
            op,
            description: description.into(),
            source,
        }
    }

    /// Transport-level failure; the description is taken from the cause.
    pub fn request(op: &'static str, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        Self::new(ErrorKind::Request, op, cause.to_string(), Some(cause))
    }

    /// A request failure with a custom description and no cause.
    pub fn request_msg(op: &'static str, description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Request, op, description, None)
    }

    /// Unexpected (non-2xx, non-404) HTTP status.
    pub fn status(op: &'static str, status: u16) -> Self {
        Self::new(
            ErrorKind::Request,
            op,
            format!("Unexpected HTTP status {}", status),
            None,
        )
    }

    /// The remote service reported the resource absent.
    pub fn not_found(op: &'static str) -> Self {
        Self::new(ErrorKind::NotFound, op, TEXT_API_NOT_FOUND, None)
    }

    /// The body could not be decoded.
    pub fn parse(op: &'static str, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        Self::new(ErrorKind::Parse, op, cause.to_string(), Some(cause))
    }

    /// Re-tag the error with the caller's operation.
    pub fn with_op(mut self, op: &'static str) -> Self {
        self.op = op;
        self
    }

    /// Error classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Operation tag, e.g. `ver_request`.
    pub fn op(&self) -> &'static str {
        self.op
    }

    /// Human readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the remote service reported the resource absent.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Boundary representation of this error.
    pub fn to_output(&self) -> ErrorOutput {
        ErrorOutput {
            operation: self.op.to_string(),
            description: self.description.clone(),
        }
    }

    /// Serialize as `{"error": ..., "error_description": ...}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_output()).unwrap_or_else(|_| self.to_string())
    }
}

/// Top-level error type for cwctl.
#[derive(Debug, Error)]
pub enum CwctlError {
    /// A remote or runtime call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The connections file could not be read.
    #[error("Failed to load connections from {path}: {message}")]
    ConnectionsLoad { path: String, message: String },

    /// The connections file is not valid JSON of the expected shape.
    #[error("Failed to parse connections at {path}: {message}")]
    ConnectionsParse { path: String, message: String },

    /// No connection with the requested id exists.
    #[error("Target connection not found: {id}")]
    ConnectionNotFound { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CwctlError {
    /// Operation tag used when rendering this error as JSON.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Api(e) => e.op(),
            Self::ConnectionsLoad { .. } => "con_load",
            Self::ConnectionsParse { .. } => "con_parse",
            Self::ConnectionNotFound { .. } => "con_not_found",
            Self::Io(_) | Self::Other(_) => "cwctl_error",
        }
    }

    /// Serialize as `{"error": ..., "error_description": ...}`.
    pub fn to_json(&self) -> String {
        match self {
            Self::Api(e) => e.to_json(),
            other => {
                let out = ErrorOutput {
                    operation: other.op().to_string(),
                    description: other.to_string(),
                };
                serde_json::to_string(&out).unwrap_or_else(|_| other.to_string())
            }
        }
    }
}

/// Result type alias for cwctl operations.
pub type Result<T> = std::result::Result<T, CwctlError>;
