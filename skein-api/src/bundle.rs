//! 构建编排
//!
//! Reset → Traverse → Finalize：
//! 1. 所有缓存条目标记为未到达；
//! 2. 从入口并发遍历依赖，每层扇出一个作用域线程，命中缓存则复用，否则编译或复制；
//! 3. 计算调用顺序，拼出产物并写入 `<bundle_dir>/bundle.js`。
//!
//! 产物只在整个构建成功后写入，失败的构建不会覆盖上一次的产物。

use crate::cache::{BuildCache, Claim, FileCacheEntry};
use crate::config::RunConfig;
use crate::error::BuildError;
use crate::order::{invocation_order, InvocationOrder};
use skein_core::{asset_file_name, is_asset, load_file, quote};
use skein_vfs::{VfsError, VirtualFileSystem};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info};

/// 一次构建的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// 构建耗时
    pub elapsed: Duration,
    /// 模块调用顺序
    pub order: Vec<String>,
    /// 发现的循环依赖
    pub cycles: Vec<Vec<String>>,
    /// 实际编译或复制的文件数
    pub compiled: usize,
    /// 复用缓存的文件数
    pub cache_hits: usize,
}

/// 构建依赖图并写出产物
pub fn build(
    cache: &BuildCache,
    vfs: &dyn VirtualFileSystem,
    config: &RunConfig,
) -> Result<BuildReport, BuildError> {
    let started = Instant::now();
    info!(target: "skein::build", entry = %config.entry, "Build started");

    cache.reset_reachability();
    let context = BuildContext {
        cache,
        vfs,
        config,
        output: Mutex::new(String::new()),
        compiled: AtomicUsize::new(0),
        cache_hits: AtomicUsize::new(0),
    };
    context.add_file(&config.entry, None)?;

    let InvocationOrder { order, cycles } =
        invocation_order(&config.entry, &cache.dependency_graph());
    let fragments = context
        .output
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    let artifact = assemble(&fragments, &order, &config.node_env);

    let artifact_path = config.artifact_path();
    vfs.create_dir_all(&config.bundle_dir)
        .and_then(|()| vfs.write_file(&artifact_path, artifact.as_bytes()))
        .map_err(|source| BuildError::Io {
            path: artifact_path.to_string_lossy().to_string(),
            source,
        })?;

    let report = BuildReport {
        elapsed: started.elapsed(),
        order,
        cycles,
        compiled: context.compiled.into_inner(),
        cache_hits: context.cache_hits.into_inner(),
    };
    info!(
        target: "skein::build",
        modules = report.order.len(),
        compiled = report.compiled,
        cache_hits = report.cache_hits,
        elapsed = ?report.elapsed,
        "Build finished"
    );
    Ok(report)
}

/// 产物：前言 + 各模块片段 + 按顺序调用
fn assemble(fragments: &str, order: &[String], node_env: &str) -> String {
    let mut artifact = format!(
        "var moduleFns={{}},modules={{}};var process={{env:{{NODE_ENV:{}}}}};\n",
        quote(node_env)
    );
    artifact.push_str(fragments);
    let quoted: Vec<String> = order.iter().map(|identity| quote(identity)).collect();
    artifact.push_str(&format!(
        "var moduleOrder=[{}];moduleOrder.forEach((moduleName)=>modules[moduleName]=moduleFns[moduleName]());\n",
        quoted.join(",")
    ));
    artifact
}

/// 一次构建期间所有线程共享的状态
struct BuildContext<'a> {
    cache: &'a BuildCache,
    vfs: &'a dyn VirtualFileSystem,
    config: &'a RunConfig,
    output: Mutex<String>,
    compiled: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl BuildContext<'_> {
    fn add_file(&self, identity: &str, importer: Option<&str>) -> Result<(), BuildError> {
        let modified = self
            .vfs
            .modified(Path::new(identity))
            .map_err(|source| match source {
                VfsError::NotFound { .. } => BuildError::Resolution {
                    path: identity.to_string(),
                    importer: importer.map(str::to_string),
                },
                source => BuildError::Io {
                    path: identity.to_string(),
                    source,
                },
            })?;

        let previous = match self.cache.claim(identity) {
            Claim::AlreadyClaimed => return Ok(()),
            Claim::Claimed(previous) => previous,
        };

        let entry = match previous.filter(|entry| entry.modified == modified) {
            Some(cached) => {
                debug!(target: "skein::build", %identity, "Cache hit");
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                cached
            }
            None => {
                let entry = self.compile(identity, modified)?;
                self.compiled.fetch_add(1, Ordering::Relaxed);
                self.cache.store(identity, entry.clone());
                entry
            }
        };

        if !entry.output.is_empty() {
            let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
            output.push_str(&entry.output);
            output.push('\n');
        }
        self.add_files(&entry.dependencies, identity)
    }

    /// 每个依赖一个作用域线程；收齐全部结果，返回第一个错误
    fn add_files(&self, dependencies: &[String], importer: &str) -> Result<(), BuildError> {
        if dependencies.is_empty() {
            return Ok(());
        }
        let (sender, receiver) = mpsc::channel();
        thread::scope(|scope| {
            for dependency in dependencies {
                let sender = sender.clone();
                scope.spawn(move || {
                    let result = self.add_file(dependency, Some(importer));
                    if sender.send(result).is_err() {
                        debug!(target: "skein::build", %dependency, "Result receiver closed");
                    }
                });
            }
            drop(sender);

            let mut first_error = None;
            for result in receiver.iter().take(dependencies.len()) {
                if let Err(e) = result {
                    first_error.get_or_insert(e);
                }
            }
            first_error.map_or(Ok(()), Err)
        })
    }

    fn compile(&self, identity: &str, modified: SystemTime) -> Result<FileCacheEntry, BuildError> {
        let path = Path::new(identity);
        let io_error = |source| BuildError::Io {
            path: identity.to_string(),
            source,
        };

        if is_asset(identity) {
            let bundle_dir = &self.config.bundle_dir;
            let target = bundle_dir.join(asset_file_name(identity));
            self.vfs.create_dir_all(bundle_dir).map_err(io_error)?;
            self.vfs.copy_file(path, &target).map_err(io_error)?;
            debug!(target: "skein::build", %identity, to = %target.display(), "Copied asset");
            return Ok(FileCacheEntry::new(modified, String::new(), Vec::new()));
        }

        let bytes = self.vfs.read_file(path).map_err(io_error)?;
        let source = String::from_utf8_lossy(&bytes);
        let module = load_file(&source, identity).map_err(|source| BuildError::Parse {
            path: identity.to_string(),
            source,
        })?;
        debug!(
            target: "skein::build",
            %identity,
            dependencies = module.dependencies.len(),
            "Compiled"
        );
        Ok(FileCacheEntry::new(
            modified,
            module.output,
            module.dependencies,
        ))
    }
}
