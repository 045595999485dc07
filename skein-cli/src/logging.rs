//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。

use crate::config::LogConfig;
use skein_config::Phase;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// 日志输出格式
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 每个阶段一个 target，其余沿用全局级别
pub fn targets(log_config: &LogConfig) -> Targets {
    Phase::ALL
        .into_iter()
        .map(|phase| phase.target())
        .fold(Targets::new().with_default(log_config.global), |targets, target| {
            let level = log_config.level_for(&target);
            targets.with_target(target, level)
        })
        .with_target("skein::cli", log_config.global)
}

/// 使用指定格式和日志配置初始化日志系统；`file` 打不开时只输出到控制台
pub fn init_with_file(log_config: &LogConfig, format: LogFormat, file: Option<&Path>) {
    let targets = targets(log_config);
    let stdout_layer = create_format_layer(format, io::stdout).with_filter(targets.clone());

    let opened = file.map(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("无法打开日志文件 '{}': {}", path.display(), e))
    });

    match opened {
        Some(Ok(handle)) => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(handle))
                .with_filter(targets);
            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(file_layer)
                .init();
        }
        Some(Err(message)) => {
            tracing_subscriber::registry().with(stdout_layer).init();
            tracing::warn!(target: "skein::cli", "{}", message);
        }
        None => {
            tracing_subscriber::registry().with(stdout_layer).init();
        }
    }
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
