//! 语法树
//!
//! 所有产生式共用一个节点结构：`kind` 是封闭的产生式标签，`value` 保存
//! 名字、字面量原文或运算符，`children` 按产生式约定的顺序排列。
//! 约定缺省子节点用 `NodeKind::Empty` 占位，使子节点位置固定。

use std::ops::BitOr;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// 顶层语句列表
    Program,

    // ===== 声明 =====
    /// value = `var` / `let` / `const`；children = Declarator*
    VariableDeclaration,
    /// [binding target, initializer | Empty]
    Declarator,
    /// value = name；[FunctionParameters, Block]
    FunctionDeclaration,
    /// value = name（可为空）；[FunctionParameters, Block]
    FunctionExpression,
    /// [FunctionParameters, Block | expression]
    ArrowFunction,
    /// children = 参数模式
    FunctionParameters,
    /// value = name；[heritage | Empty, ClassBody]
    ClassDeclaration,
    /// value = name（可为空）；[heritage | Empty, ClassBody]
    ClassExpression,
    ClassBody,
    /// value = `method` / `get` / `set`；[key, FunctionParameters, Block]
    ClassMethod,
    /// [key, initializer | Empty]
    ClassField,
    /// [Block]
    StaticBlock,

    // ===== 语句 =====
    Block,
    EmptyStatement,
    ExpressionStatement,
    /// [test, consequent, alternate | Empty]
    If,
    /// [init | Empty, test | Empty, update | Empty, body]
    For,
    /// [left, right, body]
    ForIn,
    /// [left, right, body]
    ForOf,
    /// [test, body]
    While,
    /// [body, test]
    DoWhile,
    /// [argument | Empty]
    Return,
    /// value = label
    Break,
    /// value = label
    Continue,
    /// [argument]
    Throw,
    /// [Block, CatchClause | Empty, Block | Empty]
    Try,
    /// [param | Empty, Block]
    CatchClause,
    /// [discriminant, SwitchCase*]
    Switch,
    /// value = `case` / `default`；[test | Empty, statements...]
    SwitchCase,
    /// value = label；[statement]
    Labeled,
    Debugger,
    /// 多条语句展开输出，不引入作用域
    MultiStatement,

    // ===== 模块 =====
    /// value = 路径原文（含引号）；children = ImportDefault | ImportNamespace | ImportSpecifier
    Import,
    /// value = 本地名
    ImportDefault,
    /// value = 本地名
    ImportNamespace,
    /// [imported (Name | String), local Name]
    ImportSpecifier,
    /// [expression | FunctionDeclaration | ClassDeclaration]
    ExportDefault,
    /// [declaration]
    ExportDeclaration,
    /// value = 来源路径原文或空；children = ExportSpecifier*，
    /// 带 `EXPORT_ALL` 时为 `export *`，可有一个 Name 子节点作为命名空间别名
    ExportNamed,
    /// [local (Name | String), exported (Name | String)]
    ExportSpecifier,

    // ===== 表达式 =====
    Sequence,
    /// value = 运算符；[target, value]
    Assignment,
    /// [test, consequent, alternate]
    Conditional,
    /// value = 运算符；[left, right]
    Binary,
    /// value = 运算符；[argument]
    UnaryPrefix,
    /// value = 运算符；[argument]
    UnaryPostfix,
    /// value = `yield` / `yield*`；[argument | Empty]
    Yield,
    /// [callee, Arguments]
    Call,
    /// [callee, Arguments | Empty]
    New,
    Arguments,
    /// [object, Name]
    Member,
    /// [object, expression]
    ComputedMember,
    /// [tag, Template]
    TaggedTemplate,
    /// [expression]
    Parens,
    /// [argument]
    Spread,
    /// [target]
    Rest,

    // ===== 字面量 =====
    Name,
    Number,
    /// value = 原文（含引号）
    String,
    /// children = TemplateText 与插值表达式交替
    Template,
    /// value = 原文
    TemplateText,
    Regex,
    Null,
    /// value = `true` / `false`
    Bool,
    This,
    Super,
    /// children = 元素，空位用 Empty
    ArrayLiteral,
    ObjectLiteral,
    /// [key, value]；带 `SHORTHAND` 时 value 为 Name 或 AssignmentPattern
    Property,
    /// value = `method` / `get` / `set`；[key, FunctionParameters, Block]
    ObjectMethod,
    /// value = 原文（名字、字符串或数字）
    PropertyName,
    /// [expression]
    ComputedKey,

    // ===== 解构模式 =====
    /// children = Property | Rest
    ObjectPattern,
    /// children = 模式，空位用 Empty
    ArrayPattern,
    /// [target, default]
    AssignmentPattern,

    /// 占位
    Empty,
}

/// 节点修饰位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const NONE: NodeFlags = NodeFlags(0);
    /// 剩余参数 / 剩余元素
    pub const REST: NodeFlags = NodeFlags(1);
    /// `export * from`
    pub const EXPORT_ALL: NodeFlags = NodeFlags(1 << 1);
    /// `?.` 可选链
    pub const OPTIONAL: NodeFlags = NodeFlags(1 << 2);
    pub const ASYNC: NodeFlags = NodeFlags(1 << 3);
    pub const GENERATOR: NodeFlags = NodeFlags(1 << 4);
    pub const STATIC: NodeFlags = NodeFlags(1 << 5);
    /// 对象简写属性 `{ a }`
    pub const SHORTHAND: NodeFlags = NodeFlags(1 << 6);

    pub fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 & !other.0)
    }
}

impl BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

/// 语法树节点；每个节点独占其子节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub value: String,
    pub children: Vec<Node>,
    pub flags: NodeFlags,
}

impl Node {
    pub fn new(kind: NodeKind, value: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind,
            value: value.into(),
            children,
            flags: NodeFlags::NONE,
        }
    }

    /// 无值节点
    pub fn branch(kind: NodeKind, children: Vec<Node>) -> Self {
        Self::new(kind, String::new(), children)
    }

    /// 无子节点
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, Vec::new())
    }

    pub fn empty() -> Self {
        Self::leaf(NodeKind::Empty, "")
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Name, name)
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = self.flags | flags;
        self
    }

    pub fn has_flag(&self, flag: NodeFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind == NodeKind::Empty
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }
}

/// 模式中绑定的所有名字，按出现顺序
pub fn bound_names(pattern: &Node) -> Vec<String> {
    let mut names = Vec::new();
    collect_bound_names(pattern, &mut names);
    names
}

fn collect_bound_names(pattern: &Node, names: &mut Vec<String>) {
    match pattern.kind {
        NodeKind::Name => names.push(pattern.value.clone()),
        NodeKind::ObjectPattern | NodeKind::ArrayPattern => {
            for child in &pattern.children {
                collect_bound_names(child, names);
            }
        }
        // [key, value]，只有 value 是绑定
        NodeKind::Property => {
            if let Some(value) = pattern.child(1) {
                collect_bound_names(value, names);
            }
        }
        NodeKind::AssignmentPattern | NodeKind::Rest => {
            if let Some(target) = pattern.child(0) {
                collect_bound_names(target, names);
            }
        }
        _ => {}
    }
}
