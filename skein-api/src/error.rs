//! API 错误类型
//!
//! 提供统一的构建错误和结构化错误报告。

use serde::Serialize;
use skein_config::Phase;
use thiserror::Error;

/// 语法错误（结构化）
pub use skein_core::ParserError;

/// 文件系统错误
pub use skein_vfs::VfsError;

/// 构建错误
#[derive(Error, Debug, Clone)]
pub enum BuildError {
    /// 源文件无法解析
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParserError,
    },

    /// 依赖无法解析到磁盘上的文件
    #[error("cannot resolve '{path}'{}", imported_from(.importer))]
    Resolution {
        path: String,
        importer: Option<String>,
    },

    /// 读写文件失败
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: VfsError,
    },
}

fn imported_from(importer: &Option<String>) -> String {
    match importer {
        Some(importer) => format!(" (imported from '{importer}')"),
        None => String::new(),
    }
}

impl BuildError {
    /// 出错的阶段
    pub fn phase(&self) -> Phase {
        match self {
            BuildError::Parse { .. } => Phase::Parser,
            BuildError::Resolution { .. } | BuildError::Io { .. } => Phase::Build,
        }
    }

    /// 出错文件的标识
    pub fn path(&self) -> &str {
        match self {
            BuildError::Parse { path, .. }
            | BuildError::Resolution { path, .. }
            | BuildError::Io { path, .. } => path,
        }
    }

    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            BuildError::Parse { source, .. } => Some(source.line()),
            _ => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            BuildError::Parse { source, .. } => Some(source.column()),
            _ => None,
        }
    }

    /// 转换为结构化报告
    pub fn to_report(&self) -> ErrorReport {
        let error_kind = match self {
            BuildError::Parse { source, .. } => format!("{:?}", source.kind),
            BuildError::Resolution { .. } => "Resolution".to_string(),
            BuildError::Io { .. } => "Io".to_string(),
        };
        ErrorReport {
            phase: self.phase().as_str(),
            path: self.path().to_string(),
            line: self.line(),
            column: self.column(),
            error_kind,
            message: self.to_string(),
        }
    }
}

/// 结构化错误报告
///
/// 上层应用（CLI、编辑器插件）可以根据自己的需求格式化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: parser, build
    pub phase: &'static str,
    /// 出错文件
    pub path: String,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}
