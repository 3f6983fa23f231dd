use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by scanning, rendering and path building
#[derive(Debug, Error)]
pub enum Error {
    /// A placeholder had no entry in the supplied values
    #[error("missing parameter `{name}` for route `{pattern}`")]
    MissingParameter { pattern: String, name: String },

    #[error("path segment `{value}` is not valid percent-encoded UTF-8")]
    InvalidEncoding { value: String },

    #[error("route `{pattern}` could not be compiled: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unreadable directory or file during a scan; the whole scan fails
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory name is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown route `{route}`")]
    UnknownRoute { route: String },

    /// A directory path repeats a placeholder name, e.g. `/[id]/x/[id]`
    #[error("placeholder `{name}` appears more than once in route `{pattern}` ({})", source_file.display())]
    DuplicateParameter {
        pattern: String,
        name: String,
        source_file: PathBuf,
    },

    #[error("invalid exclude glob `{glob}`: {message}")]
    InvalidGlob { glob: String, message: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
