//! 测试辅助工具
//!
//! 提供基于内存文件系统的构建辅助函数

#![allow(dead_code)]

use skein_api::{build, BuildCache, BuildError, BuildReport, RunConfig};
use skein_vfs::{MemoryFileSystem, VirtualFileSystem};
use std::path::Path;

/// 默认配置下产物在内存文件系统中的路径
pub const ARTIFACT: &str = "/build/bundle.js";

/// 创建测试用的内存文件系统
pub fn create_test_fs(files: &[(&str, &str)]) -> MemoryFileSystem {
    MemoryFileSystem::with_files(
        files
            .iter()
            .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec())),
    )
}

/// 用默认配置（入口 `/index.js`）构建
pub fn build_default(
    cache: &BuildCache,
    fs: &MemoryFileSystem,
) -> Result<BuildReport, BuildError> {
    build(cache, fs, &RunConfig::default())
}

/// 新缓存上构建一次，构建必须成功
pub fn build_files(files: &[(&str, &str)]) -> (MemoryFileSystem, BuildCache, BuildReport) {
    let fs = create_test_fs(files);
    let cache = BuildCache::new();
    let report = build_default(&cache, &fs).unwrap_or_else(|e| panic!("build failed: {e}"));
    (fs, cache, report)
}

/// 读取产物，不存在时为 None
pub fn read_artifact(fs: &MemoryFileSystem) -> Option<String> {
    fs.read_file(Path::new(ARTIFACT))
        .ok()
        .map(|bytes| String::from_utf8(bytes).expect("artifact is utf-8"))
}

/// 替换文件内容（会推进修改时间）
pub fn edit(fs: &MemoryFileSystem, path: &str, content: &str) {
    fs.write_file(Path::new(path), content.as_bytes())
        .expect("write file");
}
