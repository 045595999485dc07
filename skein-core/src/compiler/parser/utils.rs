use crate::compiler::lexer::TokenKind;

/// 二元运算符优先级，数值越大结合越紧；非二元运算符返回 `None`
pub fn get_precedence(op: TokenKind) -> Option<u8> {
    let precedence = match op {
        TokenKind::Nullish | TokenKind::OrOr => 4,
        TokenKind::AndAnd => 5,
        TokenKind::Pipe => 6,
        TokenKind::Caret => 7,
        TokenKind::Ampersand => 8,
        TokenKind::EqualEqual
        | TokenKind::NotEqual
        | TokenKind::StrictEqual
        | TokenKind::StrictNotEqual => 9,
        TokenKind::Less
        | TokenKind::Greater
        | TokenKind::LessEqual
        | TokenKind::GreaterEqual
        | TokenKind::Instanceof
        | TokenKind::In => 10,
        TokenKind::ShiftLeft | TokenKind::ShiftRight | TokenKind::UnsignedShiftRight => 11,
        TokenKind::Plus | TokenKind::Minus => 12,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 13,
        TokenKind::StarStar => 14,
        _ => return None,
    };
    Some(precedence)
}

/// 获取运算符结合性
///
/// Returns: `true` 表示左结合，`false` 表示右结合
pub fn get_associativity(op: TokenKind) -> bool {
    match op {
        // 右结合：幂运算与赋值运算符
        TokenKind::StarStar => false,
        kind if kind.is_assignment() => false,
        // 其他都是左结合
        _ => true,
    }
}

/// 前缀一元运算符
pub fn is_prefix_operator(op: TokenKind) -> bool {
    matches!(
        op,
        TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::Typeof
            | TokenKind::Void
            | TokenKind::Delete
            | TokenKind::Await
    )
}
