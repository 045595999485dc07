//! 语法树 → 源码
//!
//! 语句之间换行，代码块内缩进两个空格。表达式按优先级在需要时补括号，
//! 源码中的括号以 `Parens` 节点保留，因此不会丢失。

use super::parser::{Node, NodeFlags, NodeKind};

const INDENT: &str = "  ";

/// 打印任意节点：程序、单条语句或表达式
pub fn print(node: &Node) -> String {
    let mut printer = Printer::default();
    match node.kind {
        NodeKind::Program => printer.program(&node.children),
        kind if is_statement(kind) => printer.statement(node),
        _ => printer.expression(node, 0),
    }
    printer.out
}

fn is_statement(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::VariableDeclaration
            | NodeKind::FunctionDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::Block
            | NodeKind::EmptyStatement
            | NodeKind::ExpressionStatement
            | NodeKind::If
            | NodeKind::For
            | NodeKind::ForIn
            | NodeKind::ForOf
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::Return
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::Throw
            | NodeKind::Try
            | NodeKind::Switch
            | NodeKind::Labeled
            | NodeKind::Debugger
            | NodeKind::MultiStatement
            | NodeKind::Import
            | NodeKind::ExportDefault
            | NodeKind::ExportDeclaration
            | NodeKind::ExportNamed
    )
}

/// 展开 MultiStatement 并去掉空节点
fn flatten<'a>(statements: &'a [Node], into: &mut Vec<&'a Node>) {
    for statement in statements {
        match statement.kind {
            NodeKind::Empty => {}
            NodeKind::MultiStatement => flatten(&statement.children, into),
            _ => into.push(statement),
        }
    }
}

fn binary_precedence(op: &str) -> u8 {
    match op {
        "??" | "||" => 4,
        "&&" => 5,
        "|" => 6,
        "^" => 7,
        "&" => 8,
        "==" | "!=" | "===" | "!==" => 9,
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => 10,
        "<<" | ">>" | ">>>" => 11,
        "+" | "-" => 12,
        "*" | "/" | "%" => 13,
        _ => 14,
    }
}

/// 表达式的结合强度，子表达式低于要求时加括号
fn precedence(node: &Node) -> u8 {
    match node.kind {
        NodeKind::Sequence => 1,
        NodeKind::Assignment | NodeKind::ArrowFunction | NodeKind::Yield => 2,
        NodeKind::Conditional => 3,
        NodeKind::Binary => binary_precedence(&node.value),
        NodeKind::UnaryPrefix => 15,
        NodeKind::UnaryPostfix => 16,
        NodeKind::New if node.child(1).map_or(true, Node::is_empty) => 17,
        NodeKind::Call => 18,
        NodeKind::Member | NodeKind::ComputedMember | NodeKind::New | NodeKind::TaggedTemplate => {
            19
        }
        _ => 20,
    }
}

/// 表达式语句不能以这些节点开头，否则会被当成声明或代码块
fn starts_ambiguously(node: &Node) -> bool {
    match node.kind {
        NodeKind::ObjectLiteral
        | NodeKind::ObjectPattern
        | NodeKind::FunctionExpression
        | NodeKind::ClassExpression => true,
        NodeKind::Binary
        | NodeKind::Assignment
        | NodeKind::Conditional
        | NodeKind::Sequence
        | NodeKind::Call
        | NodeKind::Member
        | NodeKind::ComputedMember
        | NodeKind::UnaryPostfix
        | NodeKind::TaggedTemplate => node.child(0).is_some_and(starts_ambiguously),
        _ => false,
    }
}

fn is_word_operator(op: &str) -> bool {
    op.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn program(&mut self, statements: &[Node]) {
        let mut flat = Vec::new();
        flatten(statements, &mut flat);
        for (i, statement) in flat.into_iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.statement(statement);
        }
    }

    fn block(&mut self, statements: &[Node]) {
        let mut flat = Vec::new();
        flatten(statements, &mut flat);
        if flat.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for statement in flat {
            self.newline();
            self.statement(statement);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    /// 循环体、if 分支等位置上的语句
    fn body(&mut self, node: &Node) {
        self.push(" ");
        self.statement(node);
    }

    fn statement(&mut self, node: &Node) {
        match node.kind {
            NodeKind::VariableDeclaration => {
                self.declaration(node);
                self.push(";");
            }
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => self.function(node),
            NodeKind::ClassDeclaration | NodeKind::ClassExpression => self.class(node),
            NodeKind::Block => self.block(&node.children),
            NodeKind::EmptyStatement => self.push(";"),
            NodeKind::ExpressionStatement => {
                if let Some(expression) = node.child(0) {
                    if starts_ambiguously(expression) {
                        self.push("(");
                        self.expression(expression, 0);
                        self.push(")");
                    } else {
                        self.expression(expression, 0);
                    }
                }
                self.push(";");
            }
            NodeKind::If => {
                self.push("if (");
                self.child_expression(node, 0, 0);
                self.push(")");
                if let Some(consequent) = node.child(1) {
                    self.body(consequent);
                }
                if let Some(alternate) = node.child(2).filter(|n| !n.is_empty()) {
                    self.push(" else");
                    self.body(alternate);
                }
            }
            NodeKind::For => {
                self.push("for (");
                if let Some(init) = node.child(0) {
                    self.for_head(init);
                }
                for part in [1, 2] {
                    self.push(";");
                    if let Some(child) = node.child(part).filter(|n| !n.is_empty()) {
                        self.push(" ");
                        self.expression(child, 0);
                    }
                }
                self.push(")");
                if let Some(body) = node.child(3) {
                    self.body(body);
                }
            }
            NodeKind::ForIn | NodeKind::ForOf => {
                self.push(if node.has_flag(NodeFlags::ASYNC) { "for await (" } else { "for (" });
                if let Some(left) = node.child(0) {
                    self.for_head(left);
                }
                self.push(if node.is(NodeKind::ForIn) { " in " } else { " of " });
                self.child_expression(node, 1, 2);
                self.push(")");
                if let Some(body) = node.child(2) {
                    self.body(body);
                }
            }
            NodeKind::While => {
                self.push("while (");
                self.child_expression(node, 0, 0);
                self.push(")");
                if let Some(body) = node.child(1) {
                    self.body(body);
                }
            }
            NodeKind::DoWhile => {
                self.push("do");
                if let Some(body) = node.child(0) {
                    self.body(body);
                }
                self.push(" while (");
                self.child_expression(node, 1, 0);
                self.push(");");
            }
            NodeKind::Return | NodeKind::Throw => {
                self.push(if node.is(NodeKind::Return) { "return" } else { "throw" });
                if let Some(argument) = node.child(0).filter(|n| !n.is_empty()) {
                    self.push(" ");
                    self.expression(argument, 0);
                }
                self.push(";");
            }
            NodeKind::Break | NodeKind::Continue => {
                self.push(if node.is(NodeKind::Break) { "break" } else { "continue" });
                if !node.value.is_empty() {
                    self.push(" ");
                    self.push(&node.value);
                }
                self.push(";");
            }
            NodeKind::Try => self.try_statement(node),
            NodeKind::Switch => self.switch(node),
            NodeKind::Labeled => {
                self.push(&node.value);
                self.push(":");
                if let Some(body) = node.child(0) {
                    self.body(body);
                }
            }
            NodeKind::Debugger => self.push("debugger;"),
            NodeKind::MultiStatement => {
                let mut flat = Vec::new();
                flatten(&node.children, &mut flat);
                for (i, statement) in flat.into_iter().enumerate() {
                    if i > 0 {
                        self.newline();
                    }
                    self.statement(statement);
                }
            }
            NodeKind::Import => self.import(node),
            NodeKind::ExportDefault => {
                self.push("export default ");
                if let Some(value) = node.child(0) {
                    match value.kind {
                        NodeKind::FunctionDeclaration
                        | NodeKind::FunctionExpression
                        | NodeKind::ClassDeclaration
                        | NodeKind::ClassExpression => self.statement(value),
                        _ => {
                            self.expression(value, 2);
                            self.push(";");
                        }
                    }
                }
            }
            NodeKind::ExportDeclaration => {
                self.push("export ");
                if let Some(declaration) = node.child(0) {
                    self.statement(declaration);
                }
            }
            NodeKind::ExportNamed => self.export_named(node),
            NodeKind::Empty => {}
            _ => {
                self.expression(node, 0);
                self.push(";");
            }
        }
    }

    /// 不带分号的变量声明
    fn declaration(&mut self, node: &Node) {
        self.push(&node.value);
        self.push(" ");
        for (i, declarator) in node.children.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.child_expression(declarator, 0, 0);
            if let Some(init) = declarator.child(1).filter(|n| !n.is_empty()) {
                self.push(" = ");
                self.expression(init, 2);
            }
        }
    }

    fn for_head(&mut self, node: &Node) {
        match node.kind {
            NodeKind::VariableDeclaration => self.declaration(node),
            NodeKind::Empty => {}
            _ => self.expression(node, 0),
        }
    }

    fn try_statement(&mut self, node: &Node) {
        self.push("try ");
        if let Some(block) = node.child(0) {
            self.block(&block.children);
        }
        if let Some(handler) = node.child(1).filter(|n| !n.is_empty()) {
            self.push(" catch ");
            if let Some(param) = handler.child(0).filter(|n| !n.is_empty()) {
                self.push("(");
                self.expression(param, 0);
                self.push(") ");
            }
            if let Some(body) = handler.child(1) {
                self.block(&body.children);
            }
        }
        if let Some(finalizer) = node.child(2).filter(|n| !n.is_empty()) {
            self.push(" finally ");
            self.block(&finalizer.children);
        }
    }

    fn switch(&mut self, node: &Node) {
        self.push("switch (");
        self.child_expression(node, 0, 0);
        self.push(") {");
        self.indent += 1;
        for case in node.children.iter().skip(1) {
            self.newline();
            match case.child(0).filter(|n| !n.is_empty()) {
                Some(test) => {
                    self.push("case ");
                    self.expression(test, 0);
                    self.push(":");
                }
                None => self.push("default:"),
            }
            let mut flat = Vec::new();
            flatten(case.children.get(1..).unwrap_or(&[]), &mut flat);
            self.indent += 1;
            for statement in flat {
                self.newline();
                self.statement(statement);
            }
            self.indent -= 1;
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn import(&mut self, node: &Node) {
        self.push("import ");
        if node.children.is_empty() {
            self.push(&node.value);
            self.push(";");
            return;
        }
        let mut named = Vec::new();
        let mut first = true;
        for specifier in &node.children {
            match specifier.kind {
                NodeKind::ImportDefault | NodeKind::ImportNamespace => {
                    if !first {
                        self.push(", ");
                    }
                    if specifier.is(NodeKind::ImportNamespace) {
                        self.push("* as ");
                    }
                    self.push(&specifier.value);
                    first = false;
                }
                _ => named.push(specifier),
            }
        }
        if !named.is_empty() {
            if !first {
                self.push(", ");
            }
            self.push("{ ");
            for (i, specifier) in named.into_iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.alias(specifier);
            }
            self.push(" }");
        }
        self.push(" from ");
        self.push(&node.value);
        self.push(";");
    }

    /// `a` 或 `a as b`
    fn alias(&mut self, specifier: &Node) {
        let (Some(from), Some(to)) = (specifier.child(0), specifier.child(1)) else {
            return;
        };
        self.push(&from.value);
        if from.value != to.value {
            self.push(" as ");
            self.push(&to.value);
        }
    }

    fn export_named(&mut self, node: &Node) {
        self.push("export ");
        if node.has_flag(NodeFlags::EXPORT_ALL) {
            self.push("*");
            if let Some(alias) = node.child(0) {
                self.push(" as ");
                self.push(&alias.value);
            }
        } else if node.children.is_empty() {
            self.push("{}");
        } else {
            self.push("{ ");
            for (i, specifier) in node.children.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.alias(specifier);
            }
            self.push(" }");
        }
        if !node.value.is_empty() {
            self.push(" from ");
            self.push(&node.value);
        }
        self.push(";");
    }

    fn child_expression(&mut self, node: &Node, index: usize, min: u8) {
        if let Some(child) = node.child(index) {
            self.expression(child, min);
        }
    }

    fn expression(&mut self, node: &Node, min: u8) {
        if precedence(node) < min {
            self.push("(");
            self.expression_inner(node);
            self.push(")");
        } else {
            self.expression_inner(node);
        }
    }

    fn list(&mut self, nodes: &[Node], min: u8) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expression(node, min);
        }
    }

    fn expression_inner(&mut self, node: &Node) {
        match node.kind {
            NodeKind::Sequence => self.list(&node.children, 2),
            NodeKind::Assignment => {
                self.child_expression(node, 0, 3);
                self.push(" ");
                self.push(&node.value);
                self.push(" ");
                self.child_expression(node, 1, 2);
            }
            NodeKind::Conditional => {
                self.child_expression(node, 0, 4);
                self.push(" ? ");
                self.child_expression(node, 1, 2);
                self.push(" : ");
                self.child_expression(node, 2, 2);
            }
            NodeKind::Binary => {
                let own = binary_precedence(&node.value);
                let (left, right) = if node.value == "**" {
                    (own + 1, own)
                } else {
                    (own, own + 1)
                };
                self.child_expression(node, 0, left);
                self.push(" ");
                self.push(&node.value);
                self.push(" ");
                self.child_expression(node, 1, right);
            }
            NodeKind::UnaryPrefix => {
                self.push(&node.value);
                let start = self.out.len();
                self.child_expression(node, 0, 15);
                let operand_sign = self.out[start..].chars().next().filter(|c| matches!(c, '+' | '-'));
                let needs_space = is_word_operator(&node.value)
                    || operand_sign.is_some_and(|c| node.value.starts_with(c));
                if needs_space {
                    self.out.insert(start, ' ');
                }
            }
            NodeKind::UnaryPostfix => {
                self.child_expression(node, 0, 17);
                self.push(&node.value);
            }
            NodeKind::Yield => {
                self.push(&node.value);
                if let Some(argument) = node.child(0).filter(|n| !n.is_empty()) {
                    self.push(" ");
                    self.expression(argument, 2);
                }
            }
            NodeKind::Call => {
                self.child_expression(node, 0, 18);
                if node.has_flag(NodeFlags::OPTIONAL) {
                    self.push("?.");
                }
                self.child_expression(node, 1, 0);
            }
            NodeKind::New => {
                self.push("new ");
                self.child_expression(node, 0, 19);
                if let Some(arguments) = node.child(1).filter(|n| !n.is_empty()) {
                    self.expression(arguments, 0);
                }
            }
            NodeKind::Arguments => {
                self.push("(");
                self.list(&node.children, 2);
                self.push(")");
            }
            NodeKind::Member => {
                match node.child(0) {
                    Some(object) if object.is(NodeKind::Number) => {
                        self.push("(");
                        self.push(&object.value);
                        self.push(")");
                    }
                    Some(object) => self.expression(object, 18),
                    None => {}
                }
                self.push(if node.has_flag(NodeFlags::OPTIONAL) { "?." } else { "." });
                self.child_expression(node, 1, 0);
            }
            NodeKind::ComputedMember => {
                self.child_expression(node, 0, 18);
                self.push(if node.has_flag(NodeFlags::OPTIONAL) { "?.[" } else { "[" });
                self.child_expression(node, 1, 0);
                self.push("]");
            }
            NodeKind::TaggedTemplate => {
                self.child_expression(node, 0, 18);
                self.child_expression(node, 1, 0);
            }
            NodeKind::Parens => {
                self.push("(");
                self.child_expression(node, 0, 0);
                self.push(")");
            }
            NodeKind::Spread | NodeKind::Rest => {
                self.push("...");
                self.child_expression(node, 0, 2);
            }
            NodeKind::Template => {
                self.push("`");
                for part in &node.children {
                    if part.is(NodeKind::TemplateText) {
                        self.push(&part.value);
                    } else {
                        self.push("${");
                        self.expression(part, 0);
                        self.push("}");
                    }
                }
                self.push("`");
            }
            NodeKind::ArrayLiteral | NodeKind::ArrayPattern => {
                self.push("[");
                self.list(&node.children, 2);
                if node.children.last().is_some_and(Node::is_empty) {
                    self.push(",");
                }
                self.push("]");
            }
            NodeKind::ObjectLiteral | NodeKind::ObjectPattern => {
                if node.children.is_empty() {
                    self.push("{}");
                } else {
                    self.push("{ ");
                    self.list(&node.children, 2);
                    self.push(" }");
                }
            }
            NodeKind::Property => {
                if node.has_flag(NodeFlags::SHORTHAND) {
                    self.child_expression(node, 1, 2);
                } else {
                    self.child_expression(node, 0, 0);
                    self.push(": ");
                    self.child_expression(node, 1, 2);
                }
            }
            NodeKind::ComputedKey => {
                self.push("[");
                self.child_expression(node, 0, 2);
                self.push("]");
            }
            NodeKind::AssignmentPattern => {
                self.child_expression(node, 0, 0);
                self.push(" = ");
                self.child_expression(node, 1, 2);
            }
            NodeKind::ObjectMethod | NodeKind::ClassMethod => self.method(node),
            NodeKind::FunctionExpression | NodeKind::FunctionDeclaration => self.function(node),
            NodeKind::ArrowFunction => self.arrow(node),
            NodeKind::FunctionParameters => {
                self.push("(");
                self.list(&node.children, 2);
                self.push(")");
            }
            NodeKind::ClassExpression | NodeKind::ClassDeclaration => self.class(node),
            NodeKind::Empty => {}
            kind if is_statement(kind) => self.statement(node),
            // 名字与字面量按原文输出
            _ => self.push(&node.value),
        }
    }

    fn modifiers(&mut self, node: &Node) {
        if node.has_flag(NodeFlags::STATIC) {
            self.push("static ");
        }
        if node.has_flag(NodeFlags::ASYNC) {
            self.push("async ");
        }
    }

    fn function(&mut self, node: &Node) {
        self.modifiers(node);
        self.push("function");
        if node.has_flag(NodeFlags::GENERATOR) {
            self.push("*");
        }
        self.push(" ");
        self.push(&node.value);
        self.child_expression(node, 0, 0);
        self.push(" ");
        if let Some(body) = node.child(1) {
            self.block(&body.children);
        }
    }

    fn arrow(&mut self, node: &Node) {
        self.modifiers(node);
        match node.child(0) {
            Some(params)
                if params.children.len() == 1 && params.children[0].is(NodeKind::Name) =>
            {
                self.push(&params.children[0].value);
            }
            Some(params) => self.expression(params, 0),
            None => {}
        }
        self.push(" => ");
        match node.child(1) {
            Some(body) if body.is(NodeKind::Block) => self.block(&body.children),
            Some(body) if starts_ambiguously(body) => {
                self.push("(");
                self.expression(body, 0);
                self.push(")");
            }
            Some(body) => self.expression(body, 2),
            None => {}
        }
    }

    fn method(&mut self, node: &Node) {
        self.modifiers(node);
        if node.has_flag(NodeFlags::GENERATOR) {
            self.push("*");
        }
        if node.value == "get" || node.value == "set" {
            self.push(&node.value);
            self.push(" ");
        }
        self.child_expression(node, 0, 0);
        self.child_expression(node, 1, 0);
        self.push(" ");
        if let Some(body) = node.child(2) {
            self.block(&body.children);
        }
    }

    fn class(&mut self, node: &Node) {
        self.push("class");
        if !node.value.is_empty() {
            self.push(" ");
            self.push(&node.value);
        }
        if let Some(heritage) = node.child(0).filter(|n| !n.is_empty()) {
            self.push(" extends ");
            self.expression(heritage, 18);
        }
        self.push(" ");
        let members = node.child(1).map_or(&[][..], |body| &body.children[..]);
        if members.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for member in members {
            self.newline();
            match member.kind {
                NodeKind::ClassField => {
                    self.modifiers(member);
                    self.child_expression(member, 0, 0);
                    if let Some(init) = member.child(1).filter(|n| !n.is_empty()) {
                        self.push(" = ");
                        self.expression(init, 2);
                    }
                    self.push(";");
                }
                NodeKind::StaticBlock => {
                    self.push("static ");
                    if let Some(block) = member.child(0) {
                        self.block(&block.children);
                    }
                }
                _ => self.expression(member, 0),
            }
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::tokenize;
    use crate::compiler::parser::parse;

    fn reprint(code: &str) -> String {
        let tokens = tokenize(code);
        print(&parse(&tokens).unwrap())
    }

    #[test]
    fn test_statements_and_indentation() {
        assert_eq!(
            reprint("function add(a, b) { if (a) { return a + b } return b }"),
            "function add(a, b) {\n  if (a) {\n    return a + b;\n  }\n  return b;\n}"
        );
    }

    #[test]
    fn test_anonymous_function_spacing() {
        assert_eq!(reprint("f(function () {})"), "f(function () {});");
    }

    #[test]
    fn test_object_and_array_literals() {
        assert_eq!(reprint("x = { a: 1, b }"), "x = { a: 1, b };");
        assert_eq!(reprint("x = {}"), "x = {};");
        assert_eq!(reprint("x = [1, , 2, ,]"), "x = [1, , 2, ,];");
    }

    #[test]
    fn test_unary_spacing() {
        assert_eq!(reprint("a = - -b"), "a = - -b;");
        assert_eq!(reprint("a = -b"), "a = -b;");
        assert_eq!(reprint("typeof x === 'string'"), "typeof x === 'string';");
    }

    #[test]
    fn test_new_without_arguments() {
        assert_eq!(reprint("new Date"), "new Date;");
        assert_eq!(reprint("new Date()"), "new Date();");
    }

    #[test]
    fn test_parens_preserved() {
        assert_eq!(reprint("(a + b) * c"), "(a + b) * c;");
        assert_eq!(reprint("({}).toString()"), "({}).toString();");
    }

    #[test]
    fn test_generated_nodes_get_parens() {
        let product = Node::new(
            NodeKind::Binary,
            "*",
            vec![
                Node::new(NodeKind::Binary, "+", vec![Node::name("a"), Node::name("b")]),
                Node::name("c"),
            ],
        );
        assert_eq!(print(&product), "(a + b) * c");
    }

    #[test]
    fn test_empty_statements_skipped() {
        let program = Node::branch(
            NodeKind::Program,
            vec![
                Node::empty(),
                Node::leaf(NodeKind::EmptyStatement, ""),
                Node::branch(
                    NodeKind::MultiStatement,
                    vec![Node::leaf(NodeKind::Debugger, ""), Node::empty()],
                ),
            ],
        );
        assert_eq!(print(&program), ";\ndebugger;");
    }

    #[test]
    fn test_module_syntax_round_trip() {
        let code = "import a, { b as c } from './m.js';\nexport { a as default, c };\nexport * as ns from './n.js';";
        assert_eq!(reprint(code), code);
    }

    #[test]
    fn test_switch_and_try() {
        assert_eq!(
            reprint("switch (x) { case 1: a(); break; default: b() }"),
            "switch (x) {\n  case 1:\n    a();\n    break;\n  default:\n    b();\n}"
        );
        assert_eq!(
            reprint("try { a() } catch { b() } finally {}"),
            "try {\n  a();\n} catch {\n  b();\n} finally {}"
        );
    }

    #[test]
    fn test_template_and_arrow() {
        assert_eq!(reprint("f = x => `v=${x + 1}`"), "f = x => `v=${x + 1}`;");
        assert_eq!(reprint("g = (a, b) => ({ a })"), "g = (a, b) => ({ a });");
    }
}
