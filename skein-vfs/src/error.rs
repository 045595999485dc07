//! VFS Error Types

use std::fmt;

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// Error type for VFS operations
#[derive(Debug, Clone, PartialEq)]
pub enum VfsError {
    /// File or directory not found
    NotFound { path: String },

    /// Permission denied
    PermissionDenied { path: String },

    /// Invalid path
    InvalidPath { path: String, reason: String },

    /// IO error
    Io { path: String, message: String },
}

impl VfsError {
    /// Map an OS error for `path` onto the VFS taxonomy.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let path = path.to_string_lossy().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => VfsError::PermissionDenied { path },
            _ => VfsError::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::NotFound { path } => write!(f, "Path not found: {}", path),
            VfsError::PermissionDenied { path } => write!(f, "Permission denied: {}", path),
            VfsError::InvalidPath { path, reason } => {
                write!(f, "Invalid path '{}': {}", path, reason)
            }
            VfsError::Io { path, message } => write!(f, "IO error on '{}': {}", path, message),
        }
    }
}

impl std::error::Error for VfsError {}

impl From<std::io::Error> for VfsError {
    /// Conversion for errors not tied to a path; the path is left empty.
    fn from(err: std::io::Error) -> Self {
        VfsError::from_io(std::path::Path::new(""), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_io_keeps_kind() {
        let err: VfsError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err, VfsError::NotFound { path: String::new() });

        let err = VfsError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(
            err,
            VfsError::Io {
                path: String::new(),
                message: "disk full".to_string()
            }
        );
    }

    #[test]
    fn test_from_io_with_path() {
        let err = VfsError::from_io(
            std::path::Path::new("/a.js"),
            io::Error::new(io::ErrorKind::PermissionDenied, "no"),
        );
        assert_eq!(err.to_string(), "Permission denied: /a.js");
    }
}
