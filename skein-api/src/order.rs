//! 模块调用顺序
//!
//! 从入口出发对依赖图做后序深度优先遍历：依赖总在依赖方之前被调用。
//! 路径栈用来发现循环依赖，循环的那条边不再深入。

use skein_core::is_asset;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// 遍历结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOrder {
    /// 只含 `.js` 模块的调用顺序
    pub order: Vec<String>,
    /// 发现的循环，首尾为同一个标识
    pub cycles: Vec<Vec<String>>,
}

/// 计算从 `entry` 出发的调用顺序
pub fn invocation_order(entry: &str, graph: &HashMap<String, Vec<String>>) -> InvocationOrder {
    let mut walk = Walk {
        graph,
        placed: HashSet::new(),
        path: Vec::new(),
        result: InvocationOrder::default(),
    };
    walk.visit(entry);
    walk.result
}

struct Walk<'g> {
    graph: &'g HashMap<String, Vec<String>>,
    placed: HashSet<String>,
    path: Vec<String>,
    result: InvocationOrder,
}

impl Walk<'_> {
    fn visit(&mut self, identity: &str) {
        if self.placed.contains(identity) {
            return;
        }
        if let Some(start) = self.path.iter().position(|p| p == identity) {
            let mut cycle = self.path[start..].to_vec();
            cycle.push(identity.to_string());
            warn!(target: "skein::build", "circular dependency detected: {}", cycle.join(" -> "));
            self.result.cycles.push(cycle);
            return;
        }

        self.path.push(identity.to_string());
        if let Some(dependencies) = self.graph.get(identity) {
            for dependency in dependencies {
                self.visit(dependency);
            }
        }
        self.path.pop();

        self.placed.insert(identity.to_string());
        if !is_asset(identity) {
            self.result.order.push(identity.to_string());
        }
    }
}
