//! 单个源文件的编译流水线：扫描 → 解析 → 改写 → 打印

use super::transform::{transform, TransformOutput};
use crate::compiler::lexer::tokenize;
use crate::compiler::parser::{parse, ParserError};
use crate::compiler::printer::print;
use tracing::debug;

/// 编译后的模块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    /// 注册到 `moduleFns` 的代码片段
    pub output: String,
    /// 依赖的模块标识
    pub dependencies: Vec<String>,
}

/// 编译一个 `.js` 源文件
pub fn load_file(src: &str, identity: &str) -> Result<LoadedModule, ParserError> {
    let tokens = tokenize(src);
    let program = parse(&tokens)?;
    let TransformOutput {
        program,
        dependencies,
    } = transform(program, identity);
    let output = print(&program);
    debug!(
        target: "skein::transform",
        module = identity,
        bytes = output.len(),
        "Loaded module"
    );
    Ok(LoadedModule {
        output,
        dependencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file() {
        let module = load_file("import v from './m.js'\nconsole.log(v)\n", "/index.js").unwrap();
        assert_eq!(module.dependencies, vec!["/m.js"]);
        assert_eq!(
            module.output,
            "moduleFns['/index.js'] = function () {\n  var exports = {};\n  console.log(modules['/m.js'].default);\n  return exports;\n};"
        );
    }

    #[test]
    fn test_load_file_reports_parse_errors() {
        let err = load_file("let s = 'oops\n", "/bad.js").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 9));
    }
}
