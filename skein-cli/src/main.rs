//! Skein CLI - Command line interface
//!
//! Project-based bundling - all configuration from config.json

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod logging;
mod platform;

use crate::config::{read_bundle_config, LogConfig};
use crate::logging::{init_with_file, LogFormat};
use crate::platform::print_build_error;
use skein_api::{
    build, BuildCache, BuildError, BuildReport, BundleConfig, ChangeWatcher, NativeFileSystem,
    RunConfig, VirtualFileSystem,
};

/// 监听模式下的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "skein",
    about = "Skein - bundle a module graph into a single script",
    version
)]
struct Cli {
    /// Configuration file path (default: ./config.json)
    #[arg(value_name = "CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Keep watching reachable files and rebuild on change
    #[arg(long)]
    watch: bool,

    /// Ignore the permanent cache setting
    #[arg(long)]
    no_cache: bool,
}

fn main() {
    let cli = Cli::parse();

    // Read config.json
    let bundle = match read_bundle_config(&cli.config) {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let missing_config = bundle.is_none();
    let bundle = bundle.unwrap_or_default();

    let log_config = LogConfig::from_settings(&bundle.log);
    init_with_file(
        &log_config,
        cli.log_format,
        bundle.log.file.as_deref().map(Path::new),
    );
    if missing_config {
        warn!(
            target: "skein::cli",
            "未找到 '{}'，使用默认配置",
            cli.config.display()
        );
    }

    let run_config = build_run_config(&cli, &bundle);
    let vfs = NativeFileSystem::with_base(project_dir(&cli.config));
    let cache = match &run_config.cache_dir {
        Some(dir) => BuildCache::load(&vfs, dir),
        None => BuildCache::new(),
    };

    let result = run_build(&cache, &vfs, &run_config, cli.log_format);
    if run_config.watch {
        watch(&cache, &vfs, &run_config, cli.log_format, result);
    } else if result.is_err() {
        process::exit(1);
    }
}

/// Resolve the project directory (the config file's directory)
fn project_dir(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Build run configuration from config.json and command line overrides
fn build_run_config(cli: &Cli, bundle: &BundleConfig) -> RunConfig {
    let mut run_config = RunConfig::from_bundle_config(bundle);
    if cli.watch {
        run_config.watch = true;
    }
    if cli.no_cache {
        run_config.cache_dir = None;
    }
    run_config
}

/// 构建一次并报告结果；启用缓存时写回快照
fn run_build(
    cache: &BuildCache,
    vfs: &dyn VirtualFileSystem,
    config: &RunConfig,
    format: LogFormat,
) -> Result<BuildReport, BuildError> {
    let result = build(cache, vfs, config);
    match &result {
        Ok(report) => println!("Build finished in {:?}", report.elapsed),
        Err(e) if format == LogFormat::Json => eprintln!("{}", e.to_report().to_json()),
        Err(e) => print_build_error(e, vfs),
    }
    if let Some(dir) = &config.cache_dir {
        cache.persist(vfs, dir);
    }
    result
}

/// 轮询到达文件的修改时间，变化时重新构建
fn watch(
    cache: &BuildCache,
    vfs: &dyn VirtualFileSystem,
    config: &RunConfig,
    format: LogFormat,
    mut last: Result<BuildReport, BuildError>,
) -> ! {
    info!(target: "skein::cli", "Watching for changes");
    let mut watcher = ChangeWatcher::new();
    loop {
        watcher.after_build(&last, cache, vfs);

        let changed = loop {
            thread::sleep(POLL_INTERVAL);
            let changed = watcher.poll(cache, vfs);
            if !changed.is_empty() {
                break changed;
            }
        };
        info!(target: "skein::watch", files = ?changed, "Rebuilding");
        last = run_build(cache, vfs, config, format);
    }
}
