use hyper::StatusCode;
use std::net::SocketAddr;
use thiserror::Error;

/// The error type a route handler may fail with once it has been boxed by the router.
pub type RouteError = Box<dyn std::error::Error + Send + Sync>;

/// All errors produced by the router, its compiler and the server.
///
/// Registration errors (`InvalidPath`, `InvalidMethod`) surface from
/// [`RouterBuilder::build`](./struct.RouterBuilder.html#method.build) and must stop the application from starting.
/// Per-request errors (`ParamMismatch`, `PathDecode`, `Handler`) are contained to the request that caused them and
/// are turned into a response by the router's error handler.
#[derive(Debug, Error)]
pub enum Error {
    /// A route path template could not be compiled.
    #[error("Invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A route was registered with a string that is not a valid HTTP method token.
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// A compiled route matched but the number of captured values disagrees with the declared parameters.
    ///
    /// This never happens as long as the compiler emits exactly one capture group per parameter.
    #[error("URL parameter mismatch for route {path:?}: {declared} declared, {captured} captured")]
    ParamMismatch {
        path: String,
        declared: usize,
        captured: usize,
    },

    /// The request path was not valid percent-encoded UTF-8.
    #[error("Couldn't percent decode request path: {0}")]
    PathDecode(#[from] std::str::Utf8Error),

    /// The configured listen address could not be parsed.
    #[error("Invalid listen address {0:?}")]
    InvalidAddr(String),

    /// The server could not bind its listening socket.
    #[error("Couldn't bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A route handler returned an error.
    #[error("Handler error: {0}")]
    Handler(RouteError),
}

impl Error {
    pub(crate) fn invalid_path<P: Into<String>, R: ToString>(path: P, reason: R) -> Error {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The status code the default error handler answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::PathDecode(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for errors raised while registering routes.
    pub fn is_registration_error(&self) -> bool {
        matches!(self, Error::InvalidPath { .. } | Error::InvalidMethod(_))
    }
}
