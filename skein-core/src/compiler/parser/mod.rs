pub mod ast;
pub mod error;
mod expr;
mod module;
pub mod parser;
mod utils;

// 重新导出常用类型
pub use ast::{bound_names, Node, NodeFlags, NodeKind};
pub use error::{Coordinate, ParseResult, ParserError, ParserErrorKind};
pub use parser::{parse, Parser};
pub use utils::{get_associativity, get_precedence};
