//! 测试辅助工具
//!
//! 解析、打印与改写的便捷入口，以及把语法树渲染成 S 表达式的函数

#![allow(dead_code)]

use skein_core::{parse, print, tokenize, transform, Node, NodeKind, ParserError};

/// 解析源码
pub fn parse_code(code: &str) -> Result<Node, ParserError> {
    let tokens = tokenize(code);
    parse(&tokens)
}

/// 解析后重新打印
pub fn reprint(code: &str) -> String {
    let program = parse_code(code).unwrap_or_else(|e| panic!("parse failed: {e}"));
    print(&program)
}

/// 第一条表达式语句中的表达式
pub fn first_expression(code: &str) -> Node {
    let mut program = parse_code(code).unwrap_or_else(|e| panic!("parse failed: {e}"));
    let statement = program.children.remove(0);
    assert_eq!(statement.kind, NodeKind::ExpressionStatement);
    statement.children.into_iter().next().expect("expression")
}

/// 改写模块并打印，返回包装函数体（去掉首尾与一层缩进）和依赖
pub fn transform_body(code: &str, identity: &str) -> (String, Vec<String>) {
    let program = parse_code(code).unwrap_or_else(|e| panic!("parse failed: {e}"));
    let output = transform(program, identity);
    let printed = print(&output.program);
    let lines: Vec<&str> = printed.lines().collect();
    let body = lines[2..lines.len() - 2]
        .iter()
        .map(|line| line.strip_prefix("  ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    (body, output.dependencies)
}

/// S 表达式：`a + b * c` → `(+ a (* b c))`
pub fn sexpr(node: &Node) -> String {
    match node.kind {
        NodeKind::Name
        | NodeKind::Number
        | NodeKind::String
        | NodeKind::Bool
        | NodeKind::Null
        | NodeKind::This => node.value.clone(),
        NodeKind::Parens => node.children.first().map(sexpr).unwrap_or_default(),
        NodeKind::Binary
        | NodeKind::Assignment
        | NodeKind::UnaryPrefix
        | NodeKind::UnaryPostfix => {
            let parts: Vec<String> = node.children.iter().map(sexpr).collect();
            format!("({} {})", node.value, parts.join(" "))
        }
        NodeKind::Empty => "_".to_string(),
        kind => {
            let parts: Vec<String> = node.children.iter().map(sexpr).collect();
            if parts.is_empty() {
                format!("({kind:?})")
            } else {
                format!("({kind:?} {})", parts.join(" "))
            }
        }
    }
}
