//! Skein Virtual File System
//!
//! A virtual file system abstraction with an in-memory backend for tests
//! and a native backend rooted at a project directory.
//!
//! # Usage
//! ```rust
//! use skein_vfs::{VirtualFileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new();
//! fs.write_file(Path::new("/index.js"), b"export default 1").unwrap();
//! let before = fs.modified(Path::new("/index.js")).unwrap();
//! fs.touch(Path::new("/index.js")).unwrap();
//! assert!(fs.modified(Path::new("/index.js")).unwrap() > before);
//! ```

mod error;
mod memory;
mod native;
mod r#trait;

pub use error::{VfsError, VfsResult};
pub use memory::MemoryFileSystem;
pub use native::NativeFileSystem;
pub use r#trait::VirtualFileSystem;
