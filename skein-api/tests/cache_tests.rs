//! 缓存持久化集成测试（真实文件系统）

use skein_api::{build, BuildCache, ChangeWatcher, RunConfig};
use skein_vfs::{NativeFileSystem, VirtualFileSystem};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn cached_config() -> RunConfig {
    RunConfig {
        cache_dir: Some(PathBuf::from(".skein-cache")),
        ..RunConfig::default()
    }
}

#[test]
fn test_snapshot_survives_restart() {
    let dir = project(&[
        ("index.js", "import v from './lib/m.js'\nuse(v)"),
        ("lib/m.js", "export default 42"),
    ]);
    let vfs = NativeFileSystem::with_base(dir.path());
    let config = cached_config();
    let cache_dir = config.cache_dir.clone().unwrap();

    let cache = BuildCache::new();
    let first = build(&cache, &vfs, &config).unwrap();
    assert_eq!(first.compiled, 2);
    cache.save(&vfs, &cache_dir).unwrap();
    assert!(dir.path().join(".skein-cache/cache").is_file());
    assert!(dir.path().join("build/bundle.js").is_file());

    // 新进程：从快照恢复
    let restored = BuildCache::load(&vfs, &cache_dir);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.get("/lib/m.js"), cache.get("/lib/m.js"));
    let second = build(&restored, &vfs, &config).unwrap();
    assert_eq!((second.compiled, second.cache_hits), (0, 2));
    assert_eq!(second.order, vec!["/lib/m.js", "/index.js"]);
}

#[test]
fn test_snapshot_stores_seconds_and_nanos() {
    let dir = project(&[("index.js", "export default 1")]);
    let vfs = NativeFileSystem::with_base(dir.path());
    let cache = BuildCache::new();
    build(&cache, &vfs, &RunConfig::default()).unwrap();
    cache.save(&vfs, Path::new(".skein-cache")).unwrap();

    let text = fs::read_to_string(dir.path().join(".skein-cache/cache")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let modified = &json["files"]["/index.js"]["modified"];
    assert!(modified["secs_since_epoch"].is_u64());
    assert!(modified["nanos_since_epoch"].is_u64());
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = project(&[(".skein-cache/cache", "{\"files\": 12")]);
    let vfs = NativeFileSystem::with_base(dir.path());
    let cache = BuildCache::load(&vfs, Path::new(".skein-cache"));
    assert!(cache.is_empty());
}

#[test]
fn test_missing_snapshot_starts_empty() {
    let dir = project(&[]);
    let vfs = NativeFileSystem::with_base(dir.path());
    assert!(BuildCache::load(&vfs, Path::new(".skein-cache")).is_empty());
}

#[test]
fn test_watcher_sees_rewritten_file() {
    let dir = project(&[("index.js", "export default 1")]);
    let vfs = NativeFileSystem::with_base(dir.path());
    let cache = BuildCache::new();
    build(&cache, &vfs, &RunConfig::default()).unwrap();

    let mut watcher = ChangeWatcher::new();
    assert!(watcher.poll(&cache, &vfs).is_empty());

    // 部分文件系统的时间精度较粗，直接把修改时间设为更晚
    let later = vfs.modified(Path::new("/index.js")).unwrap() + std::time::Duration::from_secs(5);
    let file = fs::File::options()
        .write(true)
        .open(dir.path().join("index.js"))
        .unwrap();
    file.set_modified(later).unwrap();

    assert_eq!(watcher.poll(&cache, &vfs), vec!["/index.js"]);
    let report = build(&cache, &vfs, &RunConfig::default()).unwrap();
    assert_eq!(report.compiled, 1);
    assert!(watcher.poll(&cache, &vfs).is_empty());
}
