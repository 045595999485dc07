//! API 层配置
//!
//! RunConfig 是一次构建所需的全部显式配置，由调用方持有并按引用传入 `build`。

use skein_config::BundleConfig;
use skein_core::entry_identity;
use std::path::PathBuf;

/// 产物文件名
pub const ARTIFACT_NAME: &str = "bundle.js";

/// 缓存快照文件名（位于缓存目录下）
pub const SNAPSHOT_NAME: &str = "cache";

/// Build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// 入口模块标识（`/index.js`）
    pub entry: String,
    /// 产物与资源文件的输出目录
    pub bundle_dir: PathBuf,
    /// 持久缓存目录；`None` 表示不落盘
    pub cache_dir: Option<PathBuf>,
    /// 构建后是否继续监听
    pub watch: bool,
    /// 注入到 `process.env.NODE_ENV` 的值
    pub node_env: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entry: entry_identity("index.js"),
            bundle_dir: PathBuf::from("build"),
            cache_dir: None,
            watch: false,
            node_env: "development".to_string(),
        }
    }
}

impl RunConfig {
    /// 从配置文件内容解析出运行配置
    pub fn from_bundle_config(config: &BundleConfig) -> Self {
        let cache = &config.permanent_cache;
        Self {
            entry: entry_identity(&config.entry),
            bundle_dir: PathBuf::from(&config.bundle_dir),
            cache_dir: cache.enable.then(|| PathBuf::from(&cache.dir_name)),
            watch: config.watch_files,
            node_env: config.node_env.clone(),
        }
    }

    /// 产物路径：`<bundle_dir>/bundle.js`
    pub fn artifact_path(&self) -> PathBuf {
        self.bundle_dir.join(ARTIFACT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_config::PermanentCache;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.entry, "/index.js");
        assert_eq!(cfg.artifact_path(), PathBuf::from("build/bundle.js"));
        assert!(cfg.cache_dir.is_none());
        assert!(!cfg.watch);
    }

    #[test]
    fn test_from_bundle_config() {
        let bundle = BundleConfig {
            entry: "./src/main.js".to_string(),
            bundle_dir: "dist".to_string(),
            watch_files: true,
            permanent_cache: PermanentCache {
                enable: true,
                dir_name: ".cache".to_string(),
            },
            node_env: "production".to_string(),
            ..BundleConfig::default()
        };
        let cfg = RunConfig::from_bundle_config(&bundle);
        assert_eq!(cfg.entry, "/src/main.js");
        assert_eq!(cfg.bundle_dir, PathBuf::from("dist"));
        assert_eq!(cfg.cache_dir, Some(PathBuf::from(".cache")));
        assert!(cfg.watch);
        assert_eq!(cfg.node_env, "production");
    }

    #[test]
    fn test_disabled_cache_has_no_dir() {
        let cfg = RunConfig::from_bundle_config(&BundleConfig::default());
        assert!(cfg.cache_dir.is_none());
    }
}
