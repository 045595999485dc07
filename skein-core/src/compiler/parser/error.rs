use crate::compiler::lexer::{MalformedKind, Token, TokenKind};
use thiserror::Error;

/// 源码坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coordinate {
    pub line: usize,
    pub column: usize,
}

/// 语法错误，包含出错 token、位置和上下文
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// 错误类型
    pub kind: ParserErrorKind,
    /// 出错 token 的原文（文件末尾为空）
    pub token: String,
    /// 错误发生的位置
    pub location: Coordinate,
    /// 出错位置前后的 token 原文
    pub context: Vec<String>,
}

/// 语法错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserErrorKind {
    /// 意外的 token
    #[error("Unexpected token '{found}'{}", expected_suffix(.expected))]
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
    },
    /// 函数声明缺少名字
    #[error("Function declaration requires a name")]
    UnnamedFunction,
    /// 赋值左侧不可赋值
    #[error("Invalid left-hand side in assignment")]
    WrongAssignment,
    /// import/export 声明不在模块顶层
    #[error("Import and export declarations may only appear at the top level of a module")]
    MisplacedModuleItem,
    /// 扫描器报告的非法输入
    #[error("Malformed input: {}", malformed_message(.0))]
    Malformed(MalformedKind),
}

fn expected_suffix(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected: {}", expected.join(", "))
    }
}

fn malformed_message(kind: &MalformedKind) -> &'static str {
    kind.describe()
}

/// 上下文窗口：出错 token 前后各取多少个
pub const CONTEXT_RADIUS: usize = 5;

impl ParserError {
    /// 在 `tokens[index]` 处创建错误，并截取上下文窗口
    pub fn at(kind: ParserErrorKind, tokens: &[Token], index: usize) -> Self {
        let index = index.min(tokens.len().saturating_sub(1));
        let (token, location) = match tokens.get(index) {
            Some(token) => (
                token.lexeme.clone(),
                Coordinate {
                    line: token.line,
                    column: token.column,
                },
            ),
            None => (String::new(), Coordinate::default()),
        };
        let from = index.saturating_sub(CONTEXT_RADIUS);
        let to = (index + CONTEXT_RADIUS + 1).min(tokens.len());
        let context = tokens[from..to]
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
            .map(|t| t.lexeme.clone())
            .collect();
        Self {
            kind,
            token,
            location,
            context,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}] {}",
            self.location.line, self.location.column, self.kind
        )?;
        if !self.context.is_empty() {
            write!(f, " near `{}`", self.context.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParserError {}

/// 解析结果类型
pub type ParseResult<T> = Result<T, ParserError>;

/// 辅助函数：创建意外 token 错误
pub fn unexpected_token(
    found: impl Into<String>,
    expected: Vec<impl Into<String>>,
) -> ParserErrorKind {
    ParserErrorKind::UnexpectedToken {
        found: found.into(),
        expected: expected.into_iter().map(|e| e.into()).collect(),
    }
}
