//! Error types for the texload crate.

use std::{fmt, path::Path};

use texload_decode::DecodeError;

/// Result type for texload operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a texture.
#[derive(Debug)]
pub enum Error {
    /// HTTP client setup or request failed.
    Http {
        /// The URL that failed, empty when building the client failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// Reading a file or stream failed.
    Io {
        /// The path or source that failed.
        path: String,
        /// The error message.
        message: String,
    },
    /// The container could not be parsed.
    Container {
        /// Context for where the error occurred.
        context: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// Decoding the container into image data failed.
    Decode(DecodeError),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, error: &std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().display().to_string(),
            message: error.to_string(),
        }
    }

    pub(crate) fn container(context: &'static str, detail: impl Into<String>) -> Self {
        Error::Container {
            context,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http { url, message } if url.is_empty() => {
                write!(f, "http client setup failed: {message}")
            }
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Error::Container { context, detail } => write!(f, "invalid {context}: {detail}"),
            Error::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<ktx2::ParseError> for Error {
    fn from(e: ktx2::ParseError) -> Self {
        Error::Container {
            context: "ktx2 container",
            detail: e.to_string(),
        }
    }
}
