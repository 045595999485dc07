//! 模块改写
//!
//! 把一个模块的语法树改写为注册到 `moduleFns` 的工厂函数：
//!
//! ```text
//! moduleFns['/id.js'] = function () {
//!   var exports = {};
//!   ...
//!   return exports;
//! };
//! ```
//!
//! import 绑定的名字在引用处替换为 `modules['/dep.js'].name`，
//! export 变为对 `exports` 的赋值，`require('x')` 变为注册表引用。
//! 顶层 import 在改写任何语句之前先收集（提升）。

use super::resolver::{asset_file_name, is_asset, quote, resolve, trim_quotes};
use super::scope::ScopeTable;
use crate::compiler::parser::{bound_names, Node, NodeFlags, NodeKind};
use std::collections::HashSet;
use tracing::{debug, warn};

/// 改写结果
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// 只含一条注册语句的程序
    pub program: Node,
    /// 依赖的模块标识，去重后按首次出现排序
    pub dependencies: Vec<String>,
}

/// 改写模块，`identity` 为模块标识（如 `/index.js`）
pub fn transform(program: Node, identity: &str) -> TransformOutput {
    Transformer {
        identity,
        scopes: ScopeTable::new(),
        dependencies: Vec::new(),
        seen: HashSet::new(),
    }
    .run(program)
}

struct Transformer<'a> {
    identity: &'a str,
    scopes: ScopeTable,
    dependencies: Vec<String>,
    seen: HashSet<String>,
}

fn split_pair(children: Vec<Node>) -> (Node, Node) {
    let mut children = children.into_iter();
    let first = children.next().unwrap_or_else(Node::empty);
    let second = children.next().unwrap_or_else(Node::empty);
    (first, second)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// `object.name`，名字不是标识符时用 `object['name']`
fn member(object: Node, name: &str) -> Node {
    if is_identifier(name) {
        Node::branch(NodeKind::Member, vec![object, Node::name(name)])
    } else {
        Node::branch(
            NodeKind::ComputedMember,
            vec![object, Node::leaf(NodeKind::String, quote(name))],
        )
    }
}

/// `modules['<identity>']`
fn registry(identity: &str) -> Node {
    Node::branch(
        NodeKind::ComputedMember,
        vec![
            Node::name("modules"),
            Node::leaf(NodeKind::String, quote(identity)),
        ],
    )
}

fn assign(target: Node, value: Node) -> Node {
    Node::new(NodeKind::Assignment, "=", vec![target, value])
}

fn expression_statement(expression: Node) -> Node {
    Node::branch(NodeKind::ExpressionStatement, vec![expression])
}

/// `exports.a = x, exports.b = y;`
fn export_assignments(pairs: Vec<(String, Node)>) -> Node {
    let mut assignments: Vec<Node> = pairs
        .into_iter()
        .map(|(name, value)| assign(member(Node::name("exports"), &name), value))
        .collect();
    match assignments.len() {
        0 => Node::empty(),
        1 => expression_statement(assignments.remove(0)),
        _ => expression_statement(Node::branch(NodeKind::Sequence, assignments)),
    }
}

/// 导出名字：标识符或字符串字面量
fn export_name(node: &Node) -> String {
    trim_quotes(&node.value).to_string()
}

fn wrap(identity: &str, body: Vec<Node>) -> Node {
    let exports = Node::new(
        NodeKind::VariableDeclaration,
        "var",
        vec![Node::branch(
            NodeKind::Declarator,
            vec![
                Node::name("exports"),
                Node::branch(NodeKind::ObjectLiteral, Vec::new()),
            ],
        )],
    );
    let mut statements = Vec::with_capacity(body.len() + 2);
    statements.push(exports);
    statements.extend(body);
    statements.push(Node::branch(NodeKind::Return, vec![Node::name("exports")]));

    let factory = Node::branch(
        NodeKind::FunctionExpression,
        vec![
            Node::branch(NodeKind::FunctionParameters, Vec::new()),
            Node::branch(NodeKind::Block, statements),
        ],
    );
    let slot = Node::branch(
        NodeKind::ComputedMember,
        vec![
            Node::name("moduleFns"),
            Node::leaf(NodeKind::String, quote(identity)),
        ],
    );
    Node::branch(
        NodeKind::Program,
        vec![expression_statement(assign(slot, factory))],
    )
}

impl<'a> Transformer<'a> {
    fn run(mut self, program: Node) -> TransformOutput {
        let statements = program.children;
        self.declare_var_scoped(&statements);
        self.declare_lexical(&statements);
        // 导入在本地声明之后绑定，同名时导入优先
        self.hoist_imports(&statements);

        let body: Vec<Node> = statements.into_iter().map(|s| self.rewrite(s)).collect();
        debug_assert_eq!(self.scopes.depth(), 0, "unbalanced scopes");
        debug!(
            target: "skein::transform",
            module = self.identity,
            dependencies = self.dependencies.len(),
            "Transformed module"
        );
        TransformOutput {
            program: wrap(self.identity, body),
            dependencies: self.dependencies,
        }
    }

    /// 记录依赖并返回其标识
    fn depend(&mut self, spec: &str) -> String {
        let identity = resolve(spec, self.identity);
        if self.seen.insert(identity.clone()) {
            debug!(
                target: "skein::transform",
                module = self.identity,
                dependency = %identity,
                "Found dependency"
            );
            self.dependencies.push(identity.clone());
        }
        identity
    }

    /// 导入名字的替换表达式；`name` 为 `None` 表示整个命名空间
    fn import_binding(&self, identity: &str, name: Option<&str>) -> Node {
        if is_asset(identity) {
            return Node::leaf(NodeKind::String, quote(&asset_file_name(identity)));
        }
        match name {
            Some(name) => member(registry(identity), name),
            None => registry(identity),
        }
    }

    fn hoist_imports(&mut self, statements: &[Node]) {
        for statement in statements.iter().filter(|s| s.is(NodeKind::Import)) {
            let identity = self.depend(&statement.value);
            for specifier in &statement.children {
                match specifier.kind {
                    NodeKind::ImportDefault => {
                        let replacement = self.import_binding(&identity, Some("default"));
                        self.scopes.bind_import(specifier.value.clone(), replacement);
                    }
                    NodeKind::ImportNamespace => {
                        let replacement = self.import_binding(&identity, None);
                        self.scopes.bind_import(specifier.value.clone(), replacement);
                    }
                    NodeKind::ImportSpecifier => {
                        let (Some(imported), Some(local)) = (specifier.child(0), specifier.child(1))
                        else {
                            continue;
                        };
                        let replacement =
                            self.import_binding(&identity, Some(&export_name(imported)));
                        self.scopes.bind_import(local.value.clone(), replacement);
                    }
                    _ => {}
                }
            }
        }
    }

    // ===== 声明收集 =====

    fn declare_pattern(&mut self, pattern: Option<&Node>) {
        if let Some(pattern) = pattern {
            for name in bound_names(pattern) {
                self.scopes.declare(name);
            }
        }
    }

    /// 函数级声明：`var` 与函数声明，穿过代码块但不进入嵌套函数
    fn declare_var_scoped(&mut self, statements: &[Node]) {
        for statement in statements {
            match statement.kind {
                NodeKind::VariableDeclaration if statement.value == "var" => {
                    for declarator in &statement.children {
                        self.declare_pattern(declarator.child(0));
                    }
                }
                NodeKind::FunctionDeclaration => self.scopes.declare(statement.value.clone()),
                NodeKind::Block
                | NodeKind::If
                | NodeKind::For
                | NodeKind::ForIn
                | NodeKind::ForOf
                | NodeKind::While
                | NodeKind::DoWhile
                | NodeKind::Try
                | NodeKind::CatchClause
                | NodeKind::Switch
                | NodeKind::SwitchCase
                | NodeKind::Labeled
                | NodeKind::MultiStatement
                | NodeKind::ExportDeclaration
                | NodeKind::ExportDefault => self.declare_var_scoped(&statement.children),
                _ => {}
            }
        }
    }

    /// 块级声明：`let`、`const`、类和块内函数
    fn declare_lexical(&mut self, statements: &[Node]) {
        for statement in statements {
            match statement.kind {
                NodeKind::VariableDeclaration if statement.value != "var" => {
                    for declarator in &statement.children {
                        self.declare_pattern(declarator.child(0));
                    }
                }
                NodeKind::ClassDeclaration | NodeKind::FunctionDeclaration => {
                    self.scopes.declare(statement.value.clone())
                }
                NodeKind::ExportDeclaration | NodeKind::ExportDefault => {
                    self.declare_lexical(&statement.children)
                }
                _ => {}
            }
        }
    }

    // ===== 改写 =====

    fn rewrite_all(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        nodes.into_iter().map(|n| self.rewrite(n)).collect()
    }

    fn rewrite_children(&mut self, mut node: Node) -> Node {
        let children = std::mem::take(&mut node.children);
        node.children = self.rewrite_all(children);
        node
    }

    fn rewrite(&mut self, node: Node) -> Node {
        match node.kind {
            NodeKind::Name => match self.scopes.replacement(&node.value) {
                Some(replacement) => replacement.clone(),
                None => node,
            },
            NodeKind::Member => self.rewrite_member(node),
            NodeKind::Call => self.rewrite_call(node),
            NodeKind::Property => self.rewrite_property(node),
            NodeKind::ObjectMethod | NodeKind::ClassMethod => self.rewrite_method(node),
            NodeKind::FunctionDeclaration
            | NodeKind::FunctionExpression
            | NodeKind::ArrowFunction => self.rewrite_function(node),
            NodeKind::ClassExpression if !node.value.is_empty() => {
                self.scopes.enter();
                self.scopes.declare(node.value.clone());
                let node = self.rewrite_children(node);
                self.scopes.exit();
                node
            }
            NodeKind::VariableDeclaration => {
                let mut node = node;
                let declarators = std::mem::take(&mut node.children);
                node.children = declarators
                    .into_iter()
                    .map(|declarator| {
                        let (target, init) = split_pair(declarator.children);
                        Node::branch(
                            NodeKind::Declarator,
                            vec![self.rewrite_pattern(target), self.rewrite(init)],
                        )
                    })
                    .collect();
                node
            }
            NodeKind::Block => {
                self.scopes.enter();
                self.declare_lexical(&node.children);
                let node = self.rewrite_children(node);
                self.scopes.exit();
                node
            }
            NodeKind::For | NodeKind::ForIn | NodeKind::ForOf => {
                self.scopes.enter();
                if let Some(head) = node.child(0).filter(|h| h.is(NodeKind::VariableDeclaration)) {
                    if head.value != "var" {
                        for declarator in &head.children {
                            self.declare_pattern(declarator.child(0));
                        }
                    }
                }
                let node = self.rewrite_children(node);
                self.scopes.exit();
                node
            }
            NodeKind::CatchClause => {
                let mut node = node;
                let (param, body) = split_pair(std::mem::take(&mut node.children));
                self.scopes.enter();
                self.declare_pattern(Some(&param));
                node.children = vec![self.rewrite_pattern(param), self.rewrite(body)];
                self.scopes.exit();
                node
            }
            NodeKind::Switch => self.rewrite_switch(node),
            NodeKind::Import => {
                self.depend(&node.value);
                Node::empty()
            }
            NodeKind::ExportDefault => self.rewrite_export_default(node),
            NodeKind::ExportDeclaration => self.rewrite_export_declaration(node),
            NodeKind::ExportNamed => self.rewrite_export_named(node),
            _ => self.rewrite_children(node),
        }
    }

    /// 绑定位置：名字本身不替换，只改写默认值与计算属性名
    fn rewrite_pattern(&mut self, node: Node) -> Node {
        match node.kind {
            NodeKind::Name | NodeKind::Empty => node,
            NodeKind::AssignmentPattern => {
                let mut node = node;
                let (target, default) = split_pair(std::mem::take(&mut node.children));
                node.children = vec![self.rewrite_pattern(target), self.rewrite(default)];
                node
            }
            NodeKind::ArrayPattern | NodeKind::Rest => {
                let mut node = node;
                let elements = std::mem::take(&mut node.children);
                node.children = elements
                    .into_iter()
                    .map(|e| self.rewrite_pattern(e))
                    .collect();
                node
            }
            NodeKind::ObjectPattern => {
                let mut node = node;
                let properties = std::mem::take(&mut node.children);
                node.children = properties
                    .into_iter()
                    .map(|property| {
                        if !property.is(NodeKind::Property) {
                            return self.rewrite_pattern(property);
                        }
                        let mut property = property;
                        let (key, value) = split_pair(std::mem::take(&mut property.children));
                        property.children = vec![self.rewrite(key), self.rewrite_pattern(value)];
                        property
                    })
                    .collect();
                node
            }
            _ => self.rewrite(node),
        }
    }

    /// `.` 之后的属性名不改写；全局 `module.exports` 变为 `exports.default`
    fn rewrite_member(&mut self, mut node: Node) -> Node {
        let (object, property) = split_pair(std::mem::take(&mut node.children));
        if object.is(NodeKind::Name)
            && object.value == "module"
            && property.value == "exports"
            && self.scopes.is_global("module")
        {
            return member(Node::name("exports"), "default");
        }
        node.children = vec![self.rewrite(object), property];
        node
    }

    fn rewrite_call(&mut self, node: Node) -> Node {
        let is_require = node
            .child(0)
            .is_some_and(|callee| callee.is(NodeKind::Name) && callee.value == "require")
            && self.scopes.is_global("require");
        if !is_require {
            return self.rewrite_children(node);
        }

        let literal = node
            .child(1)
            .filter(|arguments| arguments.children.len() == 1)
            .and_then(|arguments| arguments.child(0))
            .filter(|argument| argument.is(NodeKind::String))
            .map(|argument| argument.value.clone());
        match literal {
            Some(spec) => {
                let identity = self.depend(&spec);
                self.import_binding(&identity, Some("default"))
            }
            None => {
                warn!(
                    target: "skein::transform",
                    module = self.identity,
                    "require() without a single string literal argument is left untouched"
                );
                self.rewrite_children(node)
            }
        }
    }

    /// 简写属性 `{ a }` 中的 `a` 是导入时展开为 `{ a: <替换> }`
    fn rewrite_property(&mut self, mut node: Node) -> Node {
        let (key, value) = split_pair(std::mem::take(&mut node.children));
        if !node.has_flag(NodeFlags::SHORTHAND) {
            node.children = vec![self.rewrite(key), self.rewrite(value)];
            return node;
        }
        match value.kind {
            NodeKind::Name => match self.scopes.replacement(&value.value) {
                Some(replacement) => {
                    node.children = vec![key, replacement.clone()];
                    node.flags = node.flags.without(NodeFlags::SHORTHAND);
                }
                None => node.children = vec![key, value],
            },
            _ => node.children = vec![key, self.rewrite_pattern(value)],
        }
        node
    }

    fn rewrite_method(&mut self, mut node: Node) -> Node {
        let mut parts = std::mem::take(&mut node.children).into_iter();
        let key = parts.next().unwrap_or_else(Node::empty);
        let params = parts.next().unwrap_or_else(Node::empty);
        let body = parts.next().unwrap_or_else(Node::empty);
        let key = self.rewrite(key);
        self.scopes.enter();
        let (params, body) = self.rewrite_callable(params, body);
        self.scopes.exit();
        node.children = vec![key, params, body];
        node
    }

    fn rewrite_function(&mut self, mut node: Node) -> Node {
        let (params, body) = split_pair(std::mem::take(&mut node.children));
        self.scopes.enter();
        if node.is(NodeKind::FunctionExpression) && !node.value.is_empty() {
            self.scopes.declare(node.value.clone());
        }
        let (params, body) = self.rewrite_callable(params, body);
        self.scopes.exit();
        node.children = vec![params, body];
        node
    }

    /// 在已进入的函数作用域中改写参数与函数体
    fn rewrite_callable(&mut self, mut params: Node, mut body: Node) -> (Node, Node) {
        for param in &params.children {
            self.declare_pattern(Some(param));
        }
        let block_body = body.is(NodeKind::Block);
        if block_body {
            self.declare_var_scoped(&body.children);
            self.declare_lexical(&body.children);
        }

        let list = std::mem::take(&mut params.children);
        params.children = list.into_iter().map(|p| self.rewrite_pattern(p)).collect();
        let body = if block_body {
            let statements = std::mem::take(&mut body.children);
            body.children = self.rewrite_all(statements);
            body
        } else {
            self.rewrite(body)
        };
        (params, body)
    }

    fn rewrite_switch(&mut self, mut node: Node) -> Node {
        let mut children = std::mem::take(&mut node.children).into_iter();
        let discriminant = children.next().unwrap_or_else(Node::empty);
        let discriminant = self.rewrite(discriminant);
        let cases: Vec<Node> = children.collect();

        self.scopes.enter();
        for case in &cases {
            self.declare_lexical(case.children.get(1..).unwrap_or(&[]));
        }
        let mut rewritten = vec![discriminant];
        rewritten.extend(cases.into_iter().map(|case| self.rewrite_children(case)));
        self.scopes.exit();

        node.children = rewritten;
        node
    }

    // ===== 导出 =====

    fn rewrite_export_default(&mut self, node: Node) -> Node {
        let value = node.children.into_iter().next().unwrap_or_else(Node::empty);
        match value.kind {
            NodeKind::FunctionDeclaration | NodeKind::ClassDeclaration => {
                let name = value.value.clone();
                let declaration = self.rewrite(value);
                let assignment =
                    export_assignments(vec![("default".to_string(), Node::name(name))]);
                Node::branch(NodeKind::MultiStatement, vec![declaration, assignment])
            }
            _ => {
                let value = self.rewrite(value);
                export_assignments(vec![("default".to_string(), value)])
            }
        }
    }

    fn rewrite_export_declaration(&mut self, node: Node) -> Node {
        let declaration = node.children.into_iter().next().unwrap_or_else(Node::empty);
        let names: Vec<String> = match declaration.kind {
            NodeKind::VariableDeclaration => declaration
                .children
                .iter()
                .filter_map(|d| d.child(0))
                .flat_map(bound_names)
                .collect(),
            NodeKind::FunctionDeclaration | NodeKind::ClassDeclaration => {
                vec![declaration.value.clone()]
            }
            _ => Vec::new(),
        };
        let declaration = self.rewrite(declaration);
        let pairs = names
            .into_iter()
            .map(|name| {
                let value = self.rewrite(Node::name(name.clone()));
                (name, value)
            })
            .collect();
        Node::branch(
            NodeKind::MultiStatement,
            vec![declaration, export_assignments(pairs)],
        )
    }

    fn rewrite_export_named(&mut self, node: Node) -> Node {
        if node.has_flag(NodeFlags::EXPORT_ALL) {
            let identity = self.depend(&node.value);
            let namespace = self.import_binding(&identity, None);
            return match node.child(0) {
                Some(alias) => export_assignments(vec![(export_name(alias), namespace)]),
                None => {
                    let object_assign = member(Node::name("Object"), "assign");
                    let arguments = Node::branch(
                        NodeKind::Arguments,
                        vec![Node::name("exports"), namespace],
                    );
                    expression_statement(Node::branch(
                        NodeKind::Call,
                        vec![object_assign, arguments],
                    ))
                }
            };
        }

        let source = (!node.value.is_empty()).then(|| self.depend(&node.value));
        let mut pairs = Vec::with_capacity(node.children.len());
        for specifier in &node.children {
            let (Some(local), Some(exported)) = (specifier.child(0), specifier.child(1)) else {
                continue;
            };
            let local = export_name(local);
            let value = match &source {
                Some(identity) => self.import_binding(identity, Some(&local)),
                None => self.rewrite(Node::name(local)),
            };
            pairs.push((export_name(exported), value));
        }
        export_assignments(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::tokenize;
    use crate::compiler::parser::parse;
    use crate::compiler::printer::print;

    fn body(code: &str, identity: &str) -> (String, Vec<String>) {
        let tokens = tokenize(code);
        let output = transform(parse(&tokens).unwrap(), identity);
        let printed = print(&output.program);
        let inner: Vec<&str> = printed.lines().collect();
        // 去掉包装的首尾三行并取消缩进
        let body = inner[2..inner.len() - 2]
            .iter()
            .map(|line| line.strip_prefix("  ").unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");
        (body, output.dependencies)
    }

    #[test]
    fn test_wrapper_shape() {
        let tokens = tokenize("");
        let output = transform(parse(&tokens).unwrap(), "/index.js");
        assert_eq!(
            print(&output.program),
            "moduleFns['/index.js'] = function () {\n  var exports = {};\n  return exports;\n};"
        );
    }

    #[test]
    fn test_export_default_expression() {
        let (body, deps) = body("export default 42", "/m.js");
        assert_eq!(body, "exports.default = 42;");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_default_import_substitution() {
        let (body, deps) = body("import v from './m.js'\nconsole.log(v)", "/index.js");
        assert_eq!(body, "console.log(modules['/m.js'].default);");
        assert_eq!(deps, vec!["/m.js"]);
    }

    #[test]
    fn test_named_and_namespace_imports() {
        let (body, _) = body(
            "import { a, b as c } from './x.js'\nimport * as ns from './y.js'\nf(a, c, ns)",
            "/index.js",
        );
        assert_eq!(
            body,
            "f(modules['/x.js'].a, modules['/x.js'].b, modules['/y.js']);"
        );
    }

    #[test]
    fn test_local_binding_shadows_import() {
        let (body, _) = body(
            "import a from './a.js'\nfunction f(a) { return a }\nfunction g() { return a }",
            "/index.js",
        );
        assert!(body.contains("function f(a) {\n  return a;\n}"));
        assert!(body.contains("return modules['/a.js'].default;"));
    }

    #[test]
    fn test_property_names_never_rewritten() {
        let (body, _) = body("import a from './a.js'\nx.a = { a: 1 }", "/index.js");
        assert_eq!(body, "x.a = { a: 1 };");
    }

    #[test]
    fn test_shorthand_property_expanded() {
        let (body, _) = body("import a from './a.js'\nx = { a }", "/index.js");
        assert_eq!(body, "x = { a: modules['/a.js'].default };");
    }

    #[test]
    fn test_require_rewritten_and_deduplicated() {
        let (body, deps) = body(
            "function f() { return [require('./m.js'), require('./m.js')] }",
            "/index.js",
        );
        assert_eq!(body.matches("modules['/m.js'].default").count(), 2);
        assert_eq!(deps, vec!["/m.js"]);
    }

    #[test]
    fn test_non_literal_require_left_untouched() {
        let (body, deps) = body("require(name)", "/index.js");
        assert_eq!(body, "require(name);");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_local_require_not_rewritten() {
        let (body, deps) = body("function require(x) {}\nrequire('./m.js')", "/index.js");
        assert!(body.ends_with("require('./m.js');"));
        assert!(deps.is_empty());
    }

    #[test]
    fn test_module_exports() {
        let (body, _) = self::body("module.exports = 1", "/m.js");
        assert_eq!(body, "exports.default = 1;");
        let (body, _) = self::body("var module = {}\nmodule.exports = 1", "/m.js");
        assert!(body.ends_with("module.exports = 1;"));
    }

    #[test]
    fn test_export_declarations() {
        let (body, _) = self::body("export const { a, b: [c] } = o, d = 1", "/m.js");
        assert_eq!(
            body,
            "const { a, b: [c] } = o, d = 1;\nexports.a = a, exports.c = c, exports.d = d;"
        );
        let (body, _) = self::body("export function f() {}", "/m.js");
        assert_eq!(body, "function f() {}\nexports.f = f;");
        let (body, _) = self::body("export default class C {}", "/m.js");
        assert_eq!(body, "class C {}\nexports.default = C;");
    }

    #[test]
    fn test_export_lists() {
        let (body, _) = self::body("import x from './x.js'\nconst a = 1\nexport { a, x as c }", "/m.js");
        assert!(body.ends_with("exports.a = a, exports.c = modules['/x.js'].default;"));
        let (body, deps) = self::body("export { a as b, default } from './x.js'", "/m.js");
        assert_eq!(
            body,
            "exports.b = modules['/x.js'].a, exports.default = modules['/x.js'].default;"
        );
        assert_eq!(deps, vec!["/x.js"]);
    }

    #[test]
    fn test_export_star() {
        let (body, _) = self::body("export * from './x.js'", "/m.js");
        assert_eq!(body, "Object.assign(exports, modules['/x.js']);");
        let (body, _) = self::body("export * as ns from './x.js'", "/m.js");
        assert_eq!(body, "exports.ns = modules['/x.js'];");
    }

    #[test]
    fn test_asset_import() {
        let (body, deps) = body("import logo from './img/logo.png'\nshow(logo)", "/index.js");
        assert_eq!(body, "show('_img_logo_png.png');");
        assert_eq!(deps, vec!["/img/logo.png"]);
    }

    #[test]
    fn test_template_substitutions_rewritten() {
        let (body, _) = body("import a from './a.js'\nx = `v${a}`", "/index.js");
        assert_eq!(body, "x = `v${modules['/a.js'].default}`;");
    }
}
