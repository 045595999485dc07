//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use skein_api::{BuildError, VirtualFileSystem};
use std::path::Path;

/// 打印构建错误；语法错误附带源代码上下文
pub fn print_build_error(e: &BuildError, vfs: &dyn VirtualFileSystem) {
    eprintln!("❌ {}", e);

    if let (Some(error_line), Some(col)) = (e.line(), e.column()) {
        if let Ok(bytes) = vfs.read_file(Path::new(e.path())) {
            let source = String::from_utf8_lossy(&bytes);
            eprint!("{}", source_context(&source, error_line, col));
        }
    }
}

/// 源代码上下文（错误行前后几行），错误列下方带 `^`
pub fn source_context(source: &str, error_line: usize, error_col: usize) -> String {
    const CONTEXT_LINES: usize = 5; // 错误行前后显示的上下文行数

    let mut lines: Vec<&str> = source.lines().collect();
    // 文件末尾的错误落在最后一行之后
    if error_line == lines.len() + 1 {
        lines.push("");
    }
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let mut out = format!("{}|--\n", separator);
    for (line_idx, content) in lines
        .iter()
        .enumerate()
        .map(|(i, content)| (i + 1, content))
        .take(end_line)
        .skip(start_line - 1)
    {
        out.push_str(&format!("{:>width$} | {}\n", line_idx, content));
        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            out.push_str(&format!("{} | {}^\n", " ".repeat(width), marker));
        }
    }
    out.push_str(&format!("{}|--\n", separator));
    out
}
