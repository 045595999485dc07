//! CLI 配置
//!
//! 读取项目配置文件，并把其中的日志设置转换为分阶段日志级别

use skein_config::{BundleConfig, LogSettings, Phase};
use std::path::Path;
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub global: Level,
    pub lexer: Option<Level>,
    pub parser: Option<Level>,
    pub transform: Option<Level>,
    pub build: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            lexer: None,
            parser: None,
            transform: None,
            build: None,
        }
    }
}

impl LogConfig {
    /// 从配置文件的 `log` 段构建；无法识别的级别忽略
    pub fn from_settings(settings: &LogSettings) -> Self {
        let level = |value: &Option<String>| value.as_deref().and_then(parse_log_level);
        Self {
            global: level(&settings.level).unwrap_or(Level::INFO),
            lexer: level(&settings.lexer),
            parser: level(&settings.parser),
            transform: level(&settings.transform),
            build: level(&settings.build),
        }
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        let phase = Phase::ALL.into_iter().find(|phase| phase.target() == target);
        let level = match phase {
            Some(Phase::Lexer) => self.lexer,
            Some(Phase::Parser) => self.parser,
            Some(Phase::Transform) => self.transform,
            Some(Phase::Build) => self.build,
            _ => None,
        };
        level.unwrap_or(self.global)
    }
}

/// Parse log level string
pub fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" => Some(Level::ERROR), // silent = only errors
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// 读取配置文件；文件不存在返回 `Ok(None)`
pub fn read_bundle_config(path: &Path) -> Result<Option<BundleConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("无法读取 '{}': {}", path.display(), e))?;
    BundleConfig::from_json(&content)
        .map(Some)
        .map_err(|e| format!("解析 '{}' 失败: {}", path.display(), e))
}
