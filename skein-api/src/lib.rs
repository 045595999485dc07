//! Skein API - build orchestration layer
//!
//! Provides the build entry point, including:
//! - Concurrent dependency traversal and artifact assembly (`build`)
//! - Per-file build cache with optional on-disk snapshot (`BuildCache`)
//! - Explicit run configuration (`RunConfig`)
//! - Unified error handling (`BuildError`)
//! - Change detection for watch mode (`changed_files`, `ChangeWatcher`)
//!
//! The cache is owned by the caller and passed into every build, so that a
//! long-running watcher keeps compiled modules across rebuilds.

pub mod bundle;
pub mod cache;
pub mod config;
pub mod error;
pub mod order;
pub mod watch;

pub use bundle::{build, BuildReport};
pub use cache::{BuildCache, Claim, FileCacheEntry};
pub use config::{RunConfig, ARTIFACT_NAME};
pub use error::{BuildError, ErrorReport, ParserError, VfsError};
pub use order::{invocation_order, InvocationOrder};
pub use watch::{changed_files, ChangeWatcher};

// Re-export crates used in the public API
pub use skein_config;
pub use skein_config::{BundleConfig, Phase};
pub use skein_vfs;
pub use skein_vfs::{MemoryFileSystem, NativeFileSystem, VirtualFileSystem};
