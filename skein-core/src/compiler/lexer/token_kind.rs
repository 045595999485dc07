//! Token 类型定义

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 词法单元类别
///
/// 关键字与标点各占一个变体；上下文关键字（`of`、`get`、`set`、`async`、
/// `from`、`as`、`static`）按普通名字扫描，由语法分析器按文本识别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // 字面量与名字
    Name,
    Number,
    String,
    Template,
    Regex,

    // 关键字
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,

    // 括号与分隔符
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftCurly,
    RightCurly,
    Semicolon,
    Comma,
    Colon,
    Dot,
    Ellipsis,
    QuestionDot,
    Question,
    FatArrow,

    // 运算符
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Bang,
    AndAnd,
    OrOr,
    Nullish,

    // 赋值运算符
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    StarStarEqual,
    SlashEqual,
    PercentEqual,
    ShiftLeftEqual,
    ShiftRightEqual,
    UnsignedShiftRightEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    AndAndEqual,
    OrOrEqual,
    NullishEqual,

    // 结构
    Newline,
    Eof,
    Malformed(MalformedKind),
}

/// 无法识别的输入，作为 token 嵌入流中，由语法分析器报告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedKind {
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedRegex,
    UnterminatedComment,
    InvalidCharacter,
}

impl MalformedKind {
    pub fn describe(&self) -> &'static str {
        match self {
            MalformedKind::UnterminatedString => "unterminated string literal",
            MalformedKind::UnterminatedTemplate => "unterminated template literal",
            MalformedKind::UnterminatedRegex => "unterminated regular expression",
            MalformedKind::UnterminatedComment => "unterminated block comment",
            MalformedKind::InvalidCharacter => "invalid character",
        }
    }
}

/// 关键字查找表
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("await", TokenKind::Await),
        ("break", TokenKind::Break),
        ("case", TokenKind::Case),
        ("catch", TokenKind::Catch),
        ("class", TokenKind::Class),
        ("const", TokenKind::Const),
        ("continue", TokenKind::Continue),
        ("debugger", TokenKind::Debugger),
        ("default", TokenKind::Default),
        ("delete", TokenKind::Delete),
        ("do", TokenKind::Do),
        ("else", TokenKind::Else),
        ("export", TokenKind::Export),
        ("extends", TokenKind::Extends),
        ("false", TokenKind::False),
        ("finally", TokenKind::Finally),
        ("for", TokenKind::For),
        ("function", TokenKind::Function),
        ("if", TokenKind::If),
        ("import", TokenKind::Import),
        ("in", TokenKind::In),
        ("instanceof", TokenKind::Instanceof),
        ("let", TokenKind::Let),
        ("new", TokenKind::New),
        ("null", TokenKind::Null),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("switch", TokenKind::Switch),
        ("this", TokenKind::This),
        ("throw", TokenKind::Throw),
        ("true", TokenKind::True),
        ("try", TokenKind::Try),
        ("typeof", TokenKind::Typeof),
        ("var", TokenKind::Var),
        ("void", TokenKind::Void),
        ("while", TokenKind::While),
        ("with", TokenKind::With),
        ("yield", TokenKind::Yield),
    ])
});

/// 标点表，按长度降序排列以实现最长匹配
pub static PUNCTUATORS: &[(&str, TokenKind)] = &[
    (">>>=", TokenKind::UnsignedShiftRightEqual),
    ("...", TokenKind::Ellipsis),
    ("===", TokenKind::StrictEqual),
    ("!==", TokenKind::StrictNotEqual),
    ("**=", TokenKind::StarStarEqual),
    ("<<=", TokenKind::ShiftLeftEqual),
    (">>=", TokenKind::ShiftRightEqual),
    (">>>", TokenKind::UnsignedShiftRight),
    ("&&=", TokenKind::AndAndEqual),
    ("||=", TokenKind::OrOrEqual),
    ("??=", TokenKind::NullishEqual),
    ("=>", TokenKind::FatArrow),
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("??", TokenKind::Nullish),
    ("?.", TokenKind::QuestionDot),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("**", TokenKind::StarStar),
    ("<<", TokenKind::ShiftLeft),
    (">>", TokenKind::ShiftRight),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::StarEqual),
    ("/=", TokenKind::SlashEqual),
    ("%=", TokenKind::PercentEqual),
    ("&=", TokenKind::AmpersandEqual),
    ("|=", TokenKind::PipeEqual),
    ("^=", TokenKind::CaretEqual),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("{", TokenKind::LeftCurly),
    ("}", TokenKind::RightCurly),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("!", TokenKind::Bang),
    ("=", TokenKind::Equal),
];

impl TokenKind {
    /// 赋值类运算符
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::StarStarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
                | TokenKind::ShiftLeftEqual
                | TokenKind::ShiftRightEqual
                | TokenKind::UnsignedShiftRightEqual
                | TokenKind::AmpersandEqual
                | TokenKind::PipeEqual
                | TokenKind::CaretEqual
                | TokenKind::AndAndEqual
                | TokenKind::OrOrEqual
                | TokenKind::NullishEqual
        )
    }

    /// 关键字
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.values().any(|kind| kind == self)
    }

    /// 其后出现的 `/` 是除号而不是正则的开始
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Name
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Template
                | TokenKind::Regex
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightCurly
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(KEYWORDS.get("function"), Some(&TokenKind::Function));
        assert_eq!(KEYWORDS.get("of"), None);
        assert!(TokenKind::Typeof.is_keyword());
        assert!(!TokenKind::Name.is_keyword());
    }

    #[test]
    fn test_punctuators_longest_first() {
        for window in PUNCTUATORS.windows(2) {
            assert!(window[0].0.len() >= window[1].0.len());
        }
    }

    #[test]
    fn test_assignment_operators() {
        assert!(TokenKind::Equal.is_assignment());
        assert!(TokenKind::NullishEqual.is_assignment());
        assert!(!TokenKind::EqualEqual.is_assignment());
    }
}
