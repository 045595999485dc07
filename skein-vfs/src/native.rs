//! Native file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// A native OS file system implementation.
///
/// Wraps `std::fs`. With a base directory, every path (absolute or relative)
/// is interpreted inside that directory, so module identities such as
/// `/src/app.js` map to `<base>/src/app.js`.
///
/// # Example
/// ```
/// use skein_vfs::NativeFileSystem;
/// use std::path::Path;
///
/// let fs = NativeFileSystem::with_base(Path::new("/project"));
/// assert_eq!(fs.real_path(Path::new("/src/app.js")), Path::new("/project/src/app.js"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeFileSystem {
    base: Option<PathBuf>,
}

impl NativeFileSystem {
    /// Create a native file system that uses paths unchanged.
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Create a native file system rooted at `base`.
    pub fn with_base(base: &Path) -> Self {
        Self {
            base: Some(base.to_path_buf()),
        }
    }

    /// Map a virtual path onto the OS path it refers to.
    pub fn real_path(&self, path: &Path) -> PathBuf {
        let Some(base) = &self.base else {
            return path.to_path_buf();
        };
        let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::ParentDir => {
                    parts.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        parts.iter().fold(base.clone(), |acc, part| acc.join(part))
    }
}

impl VirtualFileSystem for NativeFileSystem {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let real = self.real_path(path);
        std::fs::read(&real).map_err(|e| VfsError::from_io(path, e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let real = self.real_path(path);
        std::fs::write(&real, content).map_err(|e| VfsError::from_io(path, e))
    }

    fn modified(&self, path: &Path) -> VfsResult<SystemTime> {
        let real = self.real_path(path);
        std::fs::metadata(&real)
            .and_then(|meta| meta.modified())
            .map_err(|e| VfsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> VfsResult<()> {
        let real = self.real_path(path);
        std::fs::create_dir_all(&real).map_err(|e| VfsError::from_io(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> VfsResult<()> {
        let source = self.real_path(from);
        let target = self.real_path(to);
        std::fs::copy(&source, &target)
            .map(|_| ())
            .map_err(|e| VfsError::from_io(from, e))
    }

    fn exists(&self, path: &Path) -> bool {
        self.real_path(path).exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.real_path(path).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_path_without_base() {
        let fs = NativeFileSystem::new();
        assert_eq!(fs.real_path(Path::new("/tmp/a.js")), Path::new("/tmp/a.js"));
    }

    #[test]
    fn test_real_path_with_base() {
        let fs = NativeFileSystem::with_base(Path::new("/project"));
        assert_eq!(fs.real_path(Path::new("/a/b.js")), Path::new("/project/a/b.js"));
        assert_eq!(fs.real_path(Path::new("build/x")), Path::new("/project/build/x"));
        // never escapes the base
        assert_eq!(fs.real_path(Path::new("/../../etc")), Path::new("/project/etc"));
    }

    #[test]
    fn test_native_read_write() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem::with_base(dir.path());

        fs.write_file(Path::new("/hello.js"), b"hello native").unwrap();

        assert_eq!(fs.read_file(Path::new("/hello.js")).unwrap(), b"hello native");
        assert!(dir.path().join("hello.js").is_file());
        assert!(fs.exists(Path::new("/hello.js")));
        assert!(fs.is_file(Path::new("/hello.js")));
    }

    #[test]
    fn test_native_read_nonexistent() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem::with_base(dir.path());

        let result = fs.read_file(Path::new("/missing.js"));
        assert_eq!(
            result.unwrap_err(),
            VfsError::NotFound {
                path: "/missing.js".to_string()
            }
        );
        assert!(matches!(
            fs.modified(Path::new("/missing.js")),
            Err(VfsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_native_modified() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem::with_base(dir.path());
        fs.write_file(Path::new("/a.js"), b"1").unwrap();

        let stamp = fs.modified(Path::new("/a.js")).unwrap();
        let expected = std::fs::metadata(dir.path().join("a.js"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(stamp, expected);
    }

    #[test]
    fn test_native_dirs_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem::with_base(dir.path());
        fs.write_file(Path::new("/logo.svg"), b"<svg/>").unwrap();

        fs.create_dir_all(Path::new("/build/assets")).unwrap();
        fs.copy_file(Path::new("/logo.svg"), Path::new("/build/assets/_logo_svg.svg"))
            .unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("build/assets/_logo_svg.svg")).unwrap(),
            b"<svg/>"
        );
    }
}
