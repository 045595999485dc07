//! Skein Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Skein crates.

use serde::{Deserialize, Serialize};

/// Project configuration, usually read from `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleConfig {
    /// Entry file, relative to the project root
    pub entry: String,
    /// Output directory; the artifact is written to `<bundle_dir>/bundle.js`
    pub bundle_dir: String,
    /// Keep polling reachable files and rebuild on change
    pub watch_files: bool,
    /// On-disk build cache
    pub permanent_cache: PermanentCache,
    /// Value of `process.env.NODE_ENV` in the artifact
    pub node_env: String,
    /// Logging levels
    pub log: LogSettings,
}

/// On-disk cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermanentCache {
    pub enable: bool,
    pub dir_name: String,
}

/// Log levels as written in the config file (`"error"`, `"warn"`, `"info"`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Global level
    pub level: Option<String>,
    pub lexer: Option<String>,
    pub parser: Option<String>,
    pub transform: Option<String>,
    pub build: Option<String>,
    /// Mirror log output into this file
    pub file: Option<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            entry: "index.js".to_string(),
            bundle_dir: "build".to_string(),
            watch_files: false,
            permanent_cache: PermanentCache::default(),
            node_env: "development".to_string(),
            log: LogSettings::default(),
        }
    }
}

impl Default for PermanentCache {
    fn default() -> Self {
        Self {
            enable: false,
            dir_name: ".skein-cache".to_string(),
        }
    }
}

impl BundleConfig {
    /// Parse a config document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Pipeline phase, used for phase-specific log levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Parser,
    Transform,
    Build,
    Cache,
    Watch,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Lexer,
        Phase::Parser,
        Phase::Transform,
        Phase::Build,
        Phase::Cache,
        Phase::Watch,
    ];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Parser => "parser",
            Phase::Transform => "transform",
            Phase::Build => "build",
            Phase::Cache => "cache",
            Phase::Watch => "watch",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("skein::{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bundle_config() {
        let cfg = BundleConfig::default();
        assert_eq!(cfg.entry, "index.js");
        assert_eq!(cfg.bundle_dir, "build");
        assert!(!cfg.watch_files);
        assert!(!cfg.permanent_cache.enable);
        assert_eq!(cfg.permanent_cache.dir_name, ".skein-cache");
        assert_eq!(cfg.node_env, "development");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = BundleConfig::from_json(
            r#"{ "entry": "src/main.js", "permanentCache": { "enable": true } }"#,
        )
        .unwrap();
        assert_eq!(cfg.entry, "src/main.js");
        assert_eq!(cfg.bundle_dir, "build");
        assert!(cfg.permanent_cache.enable);
        assert_eq!(cfg.permanent_cache.dir_name, ".skein-cache");
    }

    #[test]
    fn test_log_settings() {
        let cfg = BundleConfig::from_json(r#"{ "log": { "level": "warn", "parser": "trace" } }"#)
            .unwrap();
        assert_eq!(cfg.log.level.as_deref(), Some("warn"));
        assert_eq!(cfg.log.parser.as_deref(), Some("trace"));
        assert_eq!(cfg.log.lexer, None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(BundleConfig::from_json("{ entry: ").is_err());
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Lexer.as_str(), "lexer");
        assert_eq!(Phase::Transform.target(), "skein::transform");
        assert_eq!(Phase::ALL.len(), 6);
    }
}
