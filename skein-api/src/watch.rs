//! 变更检测
//!
//! `changed_files` 比较缓存的修改时间与磁盘上的修改时间；
//! `ChangeWatcher` 在此之上记住已经报告过的状态，失败的构建不会被反复触发。

use crate::bundle::BuildReport;
use crate::cache::BuildCache;
use crate::error::BuildError;
use skein_vfs::VirtualFileSystem;
use std::collections::HashMap;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// 修改时间与缓存不一致的到达文件；已删除的文件也算作变更
pub fn changed_files(cache: &BuildCache, vfs: &dyn VirtualFileSystem) -> Vec<String> {
    cache
        .reachable_files()
        .into_iter()
        .filter(|(identity, cached)| {
            vfs.modified(Path::new(identity))
                .map_or(true, |modified| modified != *cached)
        })
        .map(|(identity, _)| identity)
        .collect()
}

/// Poll-driven change detector for the watch loop
#[derive(Debug, Default)]
pub struct ChangeWatcher {
    /// 已报告过的文件及报告时的磁盘修改时间
    seen: HashMap<String, Option<SystemTime>>,
    /// 构建失败时无法解析的文件，等它出现
    missing: HashMap<String, Option<SystemTime>>,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次构建之后调用
    ///
    /// 成功时清空已见状态，之后任何与缓存不一致的文件都会被报告；
    /// 失败时记录失败并吸收当前的过期文件，直到它们再次变化。
    pub fn after_build(
        &mut self,
        result: &Result<BuildReport, BuildError>,
        cache: &BuildCache,
        vfs: &dyn VirtualFileSystem,
    ) {
        match result {
            Ok(_) => {
                self.seen.clear();
                self.missing.clear();
            }
            Err(e) => {
                self.record_failure(e, vfs);
                self.settle(cache, vfs);
            }
        }
    }

    /// 记录构建失败；无法解析的文件加入等待列表
    pub fn record_failure(&mut self, error: &BuildError, vfs: &dyn VirtualFileSystem) {
        if let BuildError::Resolution { path, .. } = error {
            let current = vfs.modified(Path::new(path)).ok();
            self.missing.insert(path.clone(), current);
        }
    }

    /// 把当前所有过期文件记为已见，失败的构建不会立即再次触发
    pub fn settle(&mut self, cache: &BuildCache, vfs: &dyn VirtualFileSystem) {
        self.seen = changed_files(cache, vfs)
            .into_iter()
            .map(|identity| {
                let current = vfs.modified(Path::new(&identity)).ok();
                (identity, current)
            })
            .collect();
    }

    /// 自上次轮询以来新出现的变更
    pub fn poll(&mut self, cache: &BuildCache, vfs: &dyn VirtualFileSystem) -> Vec<String> {
        let stale = changed_files(cache, vfs);
        self.seen.retain(|identity, _| stale.contains(identity));

        let mut changed = Vec::new();
        for identity in stale {
            let current = vfs.modified(Path::new(&identity)).ok();
            if self.seen.get(&identity) != Some(&current) {
                self.seen.insert(identity.clone(), current);
                changed.push(identity);
            }
        }

        self.missing.retain(|identity, before| {
            let current = vfs.modified(Path::new(identity)).ok();
            if current == *before {
                return true;
            }
            changed.push(identity.clone());
            false
        });

        if !changed.is_empty() {
            debug!(target: "skein::watch", files = ?changed, "Detected changes");
        }
        changed
    }
}
