//! 构建缓存
//!
//! 以模块标识为键保存每个文件上次的编译结果。缓存由调用方持有，跨多次构建复用，
//! 可选地以 JSON 快照持久化到 `<dir>/cache`。

use crate::config::SNAPSHOT_NAME;
use serde::{Deserialize, Serialize};
use skein_vfs::{VfsError, VirtualFileSystem};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// 单个文件的缓存条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCacheEntry {
    /// 编译时文件的修改时间
    pub modified: SystemTime,
    /// 打印出的注册表片段；资源文件为空
    pub output: String,
    /// 已解析的依赖标识，按首次出现的顺序
    pub dependencies: Vec<String>,
    /// 本次构建是否已到达
    pub reachable: bool,
}

impl FileCacheEntry {
    pub fn new(modified: SystemTime, output: String, dependencies: Vec<String>) -> Self {
        Self {
            modified,
            output,
            dependencies,
            reachable: true,
        }
    }

    /// 首次认领的文件在编译完成前的占位
    fn placeholder() -> Self {
        Self::new(SystemTime::UNIX_EPOCH, String::new(), Vec::new())
    }
}

/// 认领结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// 本次构建中已有线程处理过该文件
    AlreadyClaimed,
    /// 认领成功，附带上一次的条目（如果有）
    Claimed(Option<FileCacheEntry>),
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    files: BTreeMap<String, FileCacheEntry>,
}

/// Build cache shared by all threads of a build
#[derive(Debug, Default)]
pub struct BuildCache {
    files: RwLock<HashMap<String, FileCacheEntry>>,
}

impl BuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// 构建开始时把所有条目标记为未到达
    pub fn reset_reachability(&self) {
        for entry in self.write().values_mut() {
            entry.reachable = false;
        }
    }

    /// 在写锁下认领一个文件，保证每次构建中每个标识最多编译一次
    pub fn claim(&self, identity: &str) -> Claim {
        let mut files = self.write();
        match files.get_mut(identity) {
            Some(entry) if entry.reachable => Claim::AlreadyClaimed,
            Some(entry) => {
                entry.reachable = true;
                Claim::Claimed(Some(entry.clone()))
            }
            None => {
                files.insert(identity.to_string(), FileCacheEntry::placeholder());
                Claim::Claimed(None)
            }
        }
    }

    /// 写入编译结果
    pub fn store(&self, identity: &str, entry: FileCacheEntry) {
        self.write().insert(identity.to_string(), entry);
    }

    pub fn get(&self, identity: &str) -> Option<FileCacheEntry> {
        self.read().get(identity).cloned()
    }

    /// 本次构建到达的文件及其缓存的修改时间
    pub fn reachable_files(&self) -> Vec<(String, SystemTime)> {
        let mut files: Vec<_> = self
            .read()
            .iter()
            .filter(|(_, entry)| entry.reachable)
            .map(|(identity, entry)| (identity.clone(), entry.modified))
            .collect();
        files.sort();
        files
    }

    /// 到达文件的依赖图
    pub fn dependency_graph(&self) -> HashMap<String, Vec<String>> {
        self.read()
            .iter()
            .filter(|(_, entry)| entry.reachable)
            .map(|(identity, entry)| (identity.clone(), entry.dependencies.clone()))
            .collect()
    }

    /// 从 `<dir>/cache` 读取快照；缺失或损坏时返回空缓存
    pub fn load(vfs: &dyn VirtualFileSystem, dir: &Path) -> Self {
        let path = dir.join(SNAPSHOT_NAME);
        let bytes = match vfs.read_file(&path) {
            Ok(bytes) => bytes,
            Err(VfsError::NotFound { .. }) => {
                debug!(target: "skein::cache", path = %path.display(), "No cache snapshot");
                return Self::new();
            }
            Err(e) => {
                warn!(target: "skein::cache", error = %e, "Failed to read cache snapshot");
                return Self::new();
            }
        };
        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) => {
                info!(target: "skein::cache", files = snapshot.files.len(), "Loaded cache snapshot");
                Self {
                    files: RwLock::new(snapshot.files.into_iter().collect()),
                }
            }
            Err(e) => {
                warn!(target: "skein::cache", path = %path.display(), error = %e, "Corrupt cache snapshot, starting empty");
                Self::new()
            }
        }
    }

    /// 把缓存写入 `<dir>/cache`
    pub fn save(&self, vfs: &dyn VirtualFileSystem, dir: &Path) -> Result<(), VfsError> {
        let path = dir.join(SNAPSHOT_NAME);
        let snapshot = Snapshot {
            files: self.read().clone().into_iter().collect(),
        };
        let json = serde_json::to_vec(&snapshot).map_err(|e| VfsError::Io {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;
        vfs.create_dir_all(dir)?;
        vfs.write_file(&path, &json)?;
        debug!(target: "skein::cache", files = snapshot.files.len(), path = %path.display(), "Saved cache snapshot");
        Ok(())
    }

    /// 保存快照，失败只记录警告
    pub fn persist(&self, vfs: &dyn VirtualFileSystem, dir: &Path) {
        if let Err(e) = self.save(vfs, dir) {
            warn!(target: "skein::cache", error = %e, "Failed to save cache snapshot");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, FileCacheEntry>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, FileCacheEntry>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_vfs::MemoryFileSystem;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_claim_new_file_once() {
        let cache = BuildCache::new();
        assert_eq!(cache.claim("/a.js"), Claim::Claimed(None));
        assert_eq!(cache.claim("/a.js"), Claim::AlreadyClaimed);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_claim_keeps_previous_entry() {
        let cache = BuildCache::new();
        let entry = FileCacheEntry::new(at(3), "out".to_string(), vec!["/b.js".to_string()]);
        cache.store("/a.js", entry.clone());
        cache.reset_reachability();
        assert!(cache.reachable_files().is_empty());

        match cache.claim("/a.js") {
            Claim::Claimed(Some(previous)) => {
                assert_eq!(previous.output, "out");
                assert_eq!(previous.dependencies, entry.dependencies);
                assert!(previous.reachable);
            }
            other => panic!("unexpected claim: {other:?}"),
        }
        assert_eq!(cache.reachable_files(), vec![("/a.js".to_string(), at(3))]);
    }

    #[test]
    fn test_dependency_graph_only_reachable() {
        let cache = BuildCache::new();
        cache.store("/a.js", FileCacheEntry::new(at(1), String::new(), vec!["/b.js".into()]));
        cache.store("/old.js", FileCacheEntry::new(at(1), String::new(), Vec::new()));
        cache.reset_reachability();
        cache.claim("/a.js");
        let graph = cache.dependency_graph();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph["/a.js"], vec!["/b.js".to_string()]);
    }

    #[test]
    fn test_snapshot_round_trip_in_memory() {
        let fs = MemoryFileSystem::new();
        let cache = BuildCache::new();
        cache.store("/a.js", FileCacheEntry::new(at(7), "x".to_string(), Vec::new()));
        cache.save(&fs, Path::new("/.cache")).unwrap();
        assert!(fs.paths().contains(&"/.cache/cache".to_string()));

        let loaded = BuildCache::load(&fs, Path::new("/.cache"));
        assert_eq!(loaded.get("/a.js"), cache.get("/a.js"));
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let fs = MemoryFileSystem::new();
        assert!(BuildCache::load(&fs, Path::new("/.cache")).is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_empty() {
        let fs = MemoryFileSystem::with_files([("/.cache/cache", b"{not json".to_vec())]);
        assert!(BuildCache::load(&fs, Path::new("/.cache")).is_empty());
    }
}
