//! 作用域表
//!
//! 所有作用域存放在一个数组里，通过父下标链接。查找从当前作用域逐级向上，
//! 找不到即为全局名字。

use crate::compiler::parser::Node;
use std::collections::HashMap;

/// 名字绑定
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// 导入的名字，引用处替换为注册表表达式
    Imported(Node),
    /// 本地声明，遮蔽外层的导入
    Local,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<usize>,
    bindings: HashMap<String, Binding>,
}

#[derive(Debug)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    current: usize,
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTable {
    /// 只含根作用域的表
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            current: 0,
        }
    }

    pub fn enter(&mut self) {
        self.scopes.push(Scope {
            parent: Some(self.current),
            bindings: HashMap::new(),
        });
        self.current = self.scopes.len() - 1;
    }

    /// 退出当前作用域
    ///
    /// # Panics
    /// 在根作用域上调用说明进入/退出不配对，属于实现错误。
    pub fn exit(&mut self) {
        match self.scopes[self.current].parent {
            Some(parent) => self.current = parent,
            None => panic!("scope table: exit called on the root scope"),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>) {
        self.scopes[self.current]
            .bindings
            .insert(name.into(), Binding::Local);
    }

    pub fn bind_import(&mut self, name: impl Into<String>, replacement: Node) {
        self.scopes[self.current]
            .bindings
            .insert(name.into(), Binding::Imported(replacement));
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let mut index = Some(self.current);
        while let Some(i) = index {
            let scope = &self.scopes[i];
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding);
            }
            index = scope.parent;
        }
        None
    }

    /// 导入名字的替换表达式；本地名字与全局名字返回 `None`
    pub fn replacement(&self, name: &str) -> Option<&Node> {
        match self.lookup(name) {
            Some(Binding::Imported(node)) => Some(node),
            _ => None,
        }
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.lookup(name).is_none()
    }

    /// 当前嵌套深度，根作用域为 0
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut index = self.scopes[self.current].parent;
        while let Some(i) = index {
            depth += 1;
            index = self.scopes[i].parent;
        }
        depth
    }
}
