//! 词法分析

pub mod scanner;
pub mod token_kind;

pub use scanner::{split_template, tokenize, tokenize_at, TemplatePart, Token};
pub use token_kind::{MalformedKind, TokenKind};
