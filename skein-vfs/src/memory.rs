//! In-memory file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};

/// An in-memory file system implementation.
///
/// Files are stored in a `BTreeMap` keyed by their normalized, root-absolute
/// path. Modification times come from a logical clock that advances on every
/// write or [`touch`](MemoryFileSystem::touch), so tests can change a file's
/// mtime without sleeping.
///
/// # Example
/// ```
/// use skein_vfs::{MemoryFileSystem, VirtualFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.write_file(Path::new("/test.txt"), b"hello").unwrap();
/// let content = fs.read_file(Path::new("test.txt")).unwrap();
/// assert_eq!(content, b"hello");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    files: Arc<RwLock<BTreeMap<String, MemoryFile>>>,
    clock: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    modified: SystemTime,
}

impl MemoryFileSystem {
    /// Create a new empty memory file system.
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
            clock: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a new memory file system pre-populated with files.
    ///
    /// # Arguments
    /// * `files` - Iterator of (path, content) tuples
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: AsRef<str>,
    {
        let fs = Self::new();
        for (path, content) in files {
            fs.insert(normalize_path(Path::new(path.as_ref())), content);
        }
        fs
    }

    /// Advance a file's modification time without changing its content.
    pub fn touch(&self, path: &Path) -> VfsResult<()> {
        let normalized = normalize_path(path);
        let stamp = self.tick();
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        match files.get_mut(&normalized) {
            Some(file) => {
                file.modified = stamp;
                Ok(())
            }
            None => Err(VfsError::NotFound { path: normalized }),
        }
    }

    /// Delete a file.
    pub fn remove_file(&self, path: &Path) -> VfsResult<()> {
        let normalized = normalize_path(path);
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        match files.remove(&normalized) {
            Some(_) => Ok(()),
            None => Err(VfsError::NotFound { path: normalized }),
        }
    }

    /// All stored paths, in order.
    pub fn paths(&self) -> Vec<String> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.keys().cloned().collect()
    }

    fn tick(&self) -> SystemTime {
        let now = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(now)
    }

    fn insert(&self, normalized: String, content: Vec<u8>) {
        let modified = self.tick();
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.insert(normalized, MemoryFile { content, modified });
    }
}

/// Normalize a path for internal storage: forward slashes, `.` and `..`
/// folded, always rooted at `/`.
fn normalize_path(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let normalized = normalize_path(path);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .get(&normalized)
            .map(|file| file.content.clone())
            .ok_or(VfsError::NotFound { path: normalized })
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        self.insert(normalize_path(path), content.to_vec());
        Ok(())
    }

    fn modified(&self, path: &Path) -> VfsResult<SystemTime> {
        let normalized = normalize_path(path);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .get(&normalized)
            .map(|file| file.modified)
            .ok_or(VfsError::NotFound { path: normalized })
    }

    fn create_dir_all(&self, _path: &Path) -> VfsResult<()> {
        // directories are implicit in the key space
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.contains_key(&normalized)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_fs_is_empty() {
        let fs = MemoryFileSystem::new();
        assert!(!fs.exists(Path::new("/anything.txt")));
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/test.txt");

        fs.write_file(path, b"hello world").unwrap();

        let content = fs.read_file(path).unwrap();
        assert_eq!(content, b"hello world");
    }

    #[test]
    fn test_paths_are_normalized() {
        let fs = MemoryFileSystem::new();
        fs.write_file(Path::new("build/bundle.js"), b"x").unwrap();

        assert!(fs.exists(Path::new("/build/bundle.js")));
        assert!(fs.exists(Path::new("./build/./bundle.js")));
        assert!(fs.exists(Path::new("/src/../build/bundle.js")));
        assert_eq!(fs.paths(), vec!["/build/bundle.js".to_string()]);
    }

    #[test]
    fn test_read_nonexistent() {
        let fs = MemoryFileSystem::new();
        let result = fs.read_file(Path::new("/nonexistent.txt"));

        assert!(matches!(result.unwrap_err(), VfsError::NotFound { .. }));
    }

    #[test]
    fn test_modified_advances_on_write() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/a.js");

        fs.write_file(path, b"1").unwrap();
        let first = fs.modified(path).unwrap();
        fs.write_file(path, b"2").unwrap();
        let second = fs.modified(path).unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_touch_keeps_content() {
        let fs = MemoryFileSystem::with_files([("/a.js", b"same".to_vec())]);
        let path = Path::new("/a.js");
        let before = fs.modified(path).unwrap();

        fs.touch(path).unwrap();

        assert!(fs.modified(path).unwrap() > before);
        assert_eq!(fs.read_file(path).unwrap(), b"same");
        assert!(matches!(
            fs.touch(Path::new("/missing.js")),
            Err(VfsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_modified_missing_file() {
        let fs = MemoryFileSystem::new();
        assert_eq!(
            fs.modified(Path::new("/gone.js")),
            Err(VfsError::NotFound {
                path: "/gone.js".to_string()
            })
        );
    }

    #[test]
    fn test_copy_file() {
        let fs = MemoryFileSystem::with_files([("/img/logo.png", vec![0x89, b'P', b'N', b'G'])]);

        fs.copy_file(Path::new("/img/logo.png"), Path::new("/build/_img_logo_png.png"))
            .unwrap();

        assert_eq!(
            fs.read_file(Path::new("/build/_img_logo_png.png")).unwrap(),
            vec![0x89, b'P', b'N', b'G']
        );
    }

    #[test]
    fn test_remove_file() {
        let fs = MemoryFileSystem::with_files([("/a.js", b"a".to_vec())]);
        fs.remove_file(Path::new("/a.js")).unwrap();
        assert!(!fs.exists(Path::new("/a.js")));
        assert!(fs.remove_file(Path::new("/a.js")).is_err());
    }

    #[test]
    fn test_clone_shares_data() {
        let fs1 = MemoryFileSystem::new();
        let path = Path::new("/shared.txt");

        fs1.write_file(path, b"shared").unwrap();

        let fs2 = fs1.clone();
        fs2.write_file(path, b"modified").unwrap();
        assert_eq!(fs1.read_file(path).unwrap(), b"modified");
    }

    #[test]
    fn test_concurrent_reads() {
        let fs = MemoryFileSystem::with_files([("/test.txt", b"concurrent".to_vec())]);
        let mut handles = vec![];

        for _ in 0..10 {
            let fs_clone = fs.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    let content = fs_clone.read_file(Path::new("/test.txt")).unwrap();
                    assert_eq!(content, b"concurrent");
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
