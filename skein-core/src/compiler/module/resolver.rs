//! 模块路径解析
//!
//! 将 import 路径映射为模块标识：以 `/` 开头、相对于项目根目录的规范路径。
//!
//! # 解析规则
//! - `'/lib/a'` → `/lib/a.js`
//! - `'./a'`、`'../a'` → 相对导入者所在目录
//! - `'lodash'` → `/node_modules/lodash/index.js`
//! - `'lodash/fp'` → `/node_modules/lodash/fp.js`
//!
//! 解析是幂等的：已解析的标识再次解析结果不变。

/// 去掉一层成对的引号
pub fn trim_quotes(spec: &str) -> &str {
    let mut chars = spec.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close))
            if open == close && matches!(open, '\'' | '"' | '`') && spec.len() >= 2 =>
        {
            &spec[1..spec.len() - 1]
        }
        _ => spec,
    }
}

/// 解析 import 路径，`importer` 为导入者的模块标识
pub fn resolve(spec: &str, importer: &str) -> String {
    let spec = trim_quotes(spec);
    let path = if spec.starts_with('/') {
        spec.to_string()
    } else if is_relative(spec) {
        format!("{}/{}", directory_of(importer), spec)
    } else {
        let segments = spec.split('/').filter(|s| !s.is_empty()).count();
        let package_root = segments == 1 || (spec.starts_with('@') && segments == 2);
        if package_root {
            format!("/node_modules/{spec}/index.js")
        } else {
            format!("/node_modules/{spec}")
        }
    };

    let mut segments = normalize(&path);
    match segments.last() {
        None => return "/index.js".to_string(),
        Some(last) if !last.contains('.') => {
            let with_extension = format!("{last}.js");
            segments.pop();
            return join(&segments, &with_extension);
        }
        Some(_) => {}
    }
    join(&segments, "")
}

/// 入口文件的模块标识（相对项目根目录）
pub fn entry_identity(entry: &str) -> String {
    if entry.starts_with('/') || is_relative(entry) {
        resolve(entry, "/")
    } else {
        resolve(&format!("./{entry}"), "/")
    }
}

fn is_relative(spec: &str) -> bool {
    spec == "." || spec == ".." || spec.starts_with("./") || spec.starts_with("../")
}

fn directory_of(identity: &str) -> &str {
    identity.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// 折叠 `.` 与 `..`；`..` 不会越过根目录
fn normalize(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments
}

fn join(segments: &[&str], last: &str) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    if !last.is_empty() {
        path.push('/');
        path.push_str(last);
    }
    path
}

/// 非 `.js` 的依赖作为资源文件原样复制
pub fn is_asset(identity: &str) -> bool {
    !identity.ends_with(".js")
}

/// 最后一段中的扩展名（含 `.`），没有则为空
pub fn extension(identity: &str) -> &str {
    let name = identity.rsplit('/').next().unwrap_or(identity);
    name.rfind('.').map_or("", |dot| &name[dot..])
}

/// 非 ASCII 字母数字的字符替换为 `_`
pub fn mangle(identity: &str) -> String {
    identity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// 资源文件在打包目录中的文件名，也是替换 import 的字符串值
pub fn asset_file_name(identity: &str) -> String {
    format!("{}{}", mangle(identity), extension(identity))
}

/// 单引号字符串字面量
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("'./a.js'"), "./a.js");
        assert_eq!(trim_quotes("\"x\""), "x");
        assert_eq!(trim_quotes("'"), "'");
        assert_eq!(trim_quotes("plain"), "plain");
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve("'./m.js'", "/index.js"), "/m.js");
        assert_eq!(resolve("'./util'", "/src/app.js"), "/src/util.js");
        assert_eq!(resolve("'../lib/x.js'", "/src/app.js"), "/lib/x.js");
        assert_eq!(resolve("'../../../x'", "/src/app.js"), "/x.js");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve("'/lib/./a'", "/src/app.js"), "/lib/a.js");
        assert_eq!(resolve("'/'", "/src/app.js"), "/index.js");
    }

    #[test]
    fn test_resolve_packages() {
        assert_eq!(resolve("'react'", "/src/app.js"), "/node_modules/react/index.js");
        assert_eq!(resolve("'lodash/fp'", "/a.js"), "/node_modules/lodash/fp.js");
        assert_eq!(
            resolve("'@scope/pkg'", "/a.js"),
            "/node_modules/@scope/pkg/index.js"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let once = resolve("'./a/../b/c'", "/src/index.js");
        assert_eq!(once, "/src/b/c.js");
        assert_eq!(resolve(&once, "/elsewhere/file.js"), once);
    }

    #[test]
    fn test_entry_identity() {
        assert_eq!(entry_identity("index.js"), "/index.js");
        assert_eq!(entry_identity("src/main"), "/src/main.js");
        assert_eq!(entry_identity("./app.js"), "/app.js");
    }

    #[test]
    fn test_assets() {
        assert!(is_asset("/img/logo.png"));
        assert!(!is_asset("/a.js"));
        assert_eq!(extension("/img/logo.png"), ".png");
        assert_eq!(extension("/dir.d/file"), "");
        assert_eq!(mangle("/img/logo.png"), "_img_logo_png");
        assert_eq!(asset_file_name("/img/logo.png"), "_img_logo_png.png");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("/a.js"), "'/a.js'");
        assert_eq!(quote("it's"), "'it\\'s'");
    }
}
