//! 命令行端到端测试

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn skein(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skein"))
        .current_dir(root)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_builds_project_from_config() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "config.json",
        r#"{"entry": "src/index.js", "bundleDir": "dist", "nodeEnv": "production", "log": {"level": "error"}}"#,
    );
    write(dir.path(), "src/index.js", "import v from './m.js'\nconsole.log(v)");
    write(dir.path(), "src/m.js", "export default 42");

    let output = skein(dir.path(), &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Build finished in"));

    let artifact = fs::read_to_string(dir.path().join("dist/bundle.js")).unwrap();
    assert!(artifact.contains("NODE_ENV:'production'"));
    assert!(artifact.contains("var moduleOrder=['/src/m.js','/src/index.js'];"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.js", "export default 1");

    let output = skein(dir.path(), &["--log-format", "compact"]);
    assert!(output.status.success());
    assert!(dir.path().join("build/bundle.js").is_file());
}

#[test]
fn test_parse_error_exits_non_zero() {
    let dir = tempdir().unwrap();
    write(dir.path(), "config.json", r#"{"log": {"level": "silent"}}"#);
    write(dir.path(), "index.js", "var a = 1;\nvar b = 'abc;\n");

    let output = skein(dir.path(), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/index.js: [2:9]"));
    assert!(stderr.contains("2 | var b = 'abc;"));
    assert!(!dir.path().join("build/bundle.js").exists());
}

#[test]
fn test_json_error_report() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.js", "import x from './missing.js'");

    let output = skein(dir.path(), &["--log-format", "json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr.lines().last().unwrap();
    let report: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(report["phase"], "build");
    assert_eq!(report["path"], "/missing.js");
    assert_eq!(report["error_kind"], "Resolution");
}

#[test]
fn test_permanent_cache_is_written() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "config.json",
        r#"{"permanentCache": {"enable": true, "dirName": ".cache"}}"#,
    );
    write(dir.path(), "index.js", "export default 1");

    assert!(skein(dir.path(), &[]).status.success());
    assert!(dir.path().join(".cache/cache").is_file());

    fs::remove_dir_all(dir.path().join(".cache")).unwrap();
    assert!(skein(dir.path(), &["--no-cache"]).status.success());
    assert!(!dir.path().join(".cache").exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    write(dir.path(), "config.json", "{ nope");
    let output = skein(dir.path(), &[]);
    assert!(!output.status.success());
}
