//! VirtualFileSystem trait definition

use crate::error::VfsResult;
use std::path::Path;
use std::time::SystemTime;

/// Virtual File System trait
///
/// Provides a unified interface for file operations, decoupling the build
/// orchestrator from specific file system implementations. Implementations
/// are shared across build threads, hence `Send + Sync`.
///
/// # Implementations
/// - `MemoryFileSystem`: In-memory file system with a logical clock
/// - `NativeFileSystem`: Native OS file system rooted at a base directory
pub trait VirtualFileSystem: Send + Sync {
    /// Read file contents
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Write file contents
    ///
    /// Creates the file if it doesn't exist, truncates it if it does.
    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()>;

    /// Last modification time of a file
    ///
    /// Fails with `VfsError::NotFound` when the file does not exist; this is
    /// the existence check the build relies on.
    fn modified(&self, path: &Path) -> VfsResult<SystemTime>;

    /// Create a directory and all of its parents
    fn create_dir_all(&self, path: &Path) -> VfsResult<()>;

    /// Copy a file, overwriting the destination
    fn copy_file(&self, from: &Path, to: &Path) -> VfsResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)
    }

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;
}
