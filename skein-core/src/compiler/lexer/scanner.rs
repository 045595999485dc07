//! 扫描器：源码 → token 序列
//!
//! 扫描从不失败：无法识别的输入以 `TokenKind::Malformed` 嵌入 token 流，
//! 未闭合的字符串、模板、正则和注释会终止扫描。换行作为独立 token 保留，
//! 供语法分析器处理自动分号插入。

use super::token_kind::{MalformedKind, TokenKind, KEYWORDS, PUNCTUATORS};
use tracing::{debug, trace};

/// 词法单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 原始文本（字符串保留引号，模板保留反引号）
    pub lexeme: String,
    /// 行号（从 1 开始）
    pub line: usize,
    /// 列号（从 1 开始，按字符计）
    pub column: usize,
}

impl Token {
    /// 名字或关键字，可用作属性名
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Name || self.kind.is_keyword()
    }
}

/// 模板字面量的组成部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// 原样文本（不含分隔符）
    Text(String),
    /// `${ ... }` 内的源码及其起始位置
    Substitution {
        source: String,
        line: usize,
        column: usize,
    },
}

/// 扫描整个源文件
pub fn tokenize(src: &str) -> Vec<Token> {
    tokenize_at(src, 1, 1)
}

/// 从给定位置开始扫描（用于模板插值）
pub fn tokenize_at(src: &str, line: usize, column: usize) -> Vec<Token> {
    let tokens = Scanner::new(src, line, column).scan();
    debug!(target: "skein::lexer", count = tokens.len(), "Scanned source");
    tokens
}

/// 将模板 token 拆分为文本块和插值源码
///
/// 结果总是以 `Text` 开头和结尾，二者之间文本与插值交替出现。
pub fn split_template(
    lexeme: &str,
    line: usize,
    column: usize,
) -> Result<Vec<TemplatePart>, MalformedKind> {
    let mut scanner = Scanner::new(lexeme, line, column);
    if scanner.advance() != Some('`') {
        return Err(MalformedKind::UnterminatedTemplate);
    }
    let mut parts = Vec::new();
    scanner.skip_template_body(Some(&mut parts))?;
    Ok(parts)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new(src: &str, line: usize, column: usize) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            line,
            column,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while let Some(c) = self.peek() {
            let (start, line, column) = (self.pos, self.line, self.column);
            let keep_going = match c {
                c if is_line_terminator(c) => {
                    self.advance();
                    self.push_newline(line, column);
                    true
                }
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.advance();
                    true
                }
                '/' if self.peek_at(1) == Some('/') => {
                    self.skip_line_comment();
                    true
                }
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment(line, column),
                '/' if self.regex_allowed() => self.scan_regex(start, line, column),
                '\'' | '"' => self.scan_string(c, start, line, column),
                '`' => self.scan_template(start, line, column),
                c if c.is_ascii_digit() => {
                    self.scan_number(start, line, column);
                    true
                }
                '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                    self.scan_number(start, line, column);
                    true
                }
                c if is_identifier_start(c) => {
                    self.scan_word(start, line, column);
                    true
                }
                _ => {
                    self.scan_punctuator(start, line, column);
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        let (line, column) = (self.line, self.column);
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line,
            column,
        });
        self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if is_line_terminator(c) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn text(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) {
        let lexeme = self.text(start);
        trace!(target: "skein::lexer", ?kind, %lexeme, line, column, "Token");
        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
        });
    }

    fn push_malformed(&mut self, kind: MalformedKind, start: usize, line: usize, column: usize) {
        debug!(target: "skein::lexer", ?kind, line, column, "Malformed input");
        self.push(TokenKind::Malformed(kind), start, line, column);
    }

    /// 连续换行折叠为一个 token；文件开头的换行不产生 token
    fn push_newline(&mut self, line: usize, column: usize) {
        if matches!(self.tokens.last(), Some(last) if last.kind != TokenKind::Newline) {
            self.tokens.push(Token {
                kind: TokenKind::Newline,
                lexeme: "\n".to_string(),
                line,
                column,
            });
        }
    }

    /// `/` 开始正则，除非前一个有效 token 结束了一个操作数
    ///
    /// 只看前一个 token：`if (x) /re/.test(s)` 中的 `)` 被当作操作数结尾，
    /// 这里的 `/` 会按除号扫描。
    fn regex_allowed(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|token| token.kind != TokenKind::Newline)
            .map_or(true, |token| !token.kind.ends_operand())
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if is_line_terminator(c) {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> bool {
        let start = self.pos;
        self.advance();
        self.advance();
        let mut newline_at = None;
        loop {
            match self.peek() {
                None => {
                    self.push_malformed(MalformedKind::UnterminatedComment, start, line, column);
                    return false;
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(c) if is_line_terminator(c) => {
                    newline_at.get_or_insert((self.line, self.column));
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        if let Some((line, column)) = newline_at {
            self.push_newline(line, column);
        }
        true
    }

    fn scan_string(&mut self, quote: char, start: usize, line: usize, column: usize) -> bool {
        match self.skip_quoted(quote) {
            Ok(()) => {
                self.push(TokenKind::String, start, line, column);
                true
            }
            Err(kind) => {
                self.push_malformed(kind, start, line, column);
                false
            }
        }
    }

    fn skip_quoted(&mut self, quote: char) -> Result<(), MalformedKind> {
        self.advance();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(MalformedKind::UnterminatedString),
                Some('\\') => {
                    self.advance();
                    if self.advance().is_none() {
                        return Err(MalformedKind::UnterminatedString);
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_regex(&mut self, start: usize, line: usize, column: usize) -> bool {
        self.advance();
        let mut in_class = false;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.push_malformed(MalformedKind::UnterminatedRegex, start, line, column);
                    return false;
                }
                Some('\\') => {
                    self.advance();
                    if matches!(self.peek(), None | Some('\n')) {
                        continue;
                    }
                    self.advance();
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        self.push(TokenKind::Regex, start, line, column);
        true
    }

    fn scan_template(&mut self, start: usize, line: usize, column: usize) -> bool {
        self.advance();
        match self.skip_template_body(None) {
            Ok(()) => {
                self.push(TokenKind::Template, start, line, column);
                true
            }
            Err(kind) => {
                self.push_malformed(kind, start, line, column);
                false
            }
        }
    }

    /// 跳过模板正文（开头的反引号已消费），可选地记录各组成部分
    fn skip_template_body(
        &mut self,
        mut parts: Option<&mut Vec<TemplatePart>>,
    ) -> Result<(), MalformedKind> {
        let mut chunk_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(MalformedKind::UnterminatedTemplate),
                Some('\\') => {
                    self.advance();
                    if self.advance().is_none() {
                        return Err(MalformedKind::UnterminatedTemplate);
                    }
                }
                Some('`') => {
                    if let Some(parts) = parts.as_deref_mut() {
                        parts.push(TemplatePart::Text(self.text(chunk_start)));
                    }
                    self.advance();
                    return Ok(());
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    if let Some(parts) = parts.as_deref_mut() {
                        parts.push(TemplatePart::Text(self.text(chunk_start)));
                    }
                    self.advance();
                    self.advance();
                    let (source_start, line, column) = (self.pos, self.line, self.column);
                    self.skip_substitution()?;
                    if let Some(parts) = parts.as_deref_mut() {
                        let source = self.chars[source_start..self.pos - 1].iter().collect();
                        parts.push(TemplatePart::Substitution {
                            source,
                            line,
                            column,
                        });
                    }
                    chunk_start = self.pos;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// 跳过 `${ ... }` 内容直到配对的 `}`（已消费）
    fn skip_substitution(&mut self) -> Result<(), MalformedKind> {
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => return Err(MalformedKind::UnterminatedTemplate),
                Some('{') => {
                    depth += 1;
                    self.advance();
                }
                Some('}') => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(q @ ('\'' | '"')) => self.skip_quoted(q)?,
                Some('`') => {
                    self.advance();
                    self.skip_template_body(None)?;
                }
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    while !(self.peek() == Some('*') && self.peek_at(1) == Some('/')) {
                        if self.advance().is_none() {
                            return Err(MalformedKind::UnterminatedTemplate);
                        }
                    }
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_number(&mut self, start: usize, line: usize, column: usize) {
        let radix_prefix = self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'));
        if radix_prefix {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
        } else {
            self.skip_digits();
            if self.peek() == Some('.') {
                self.advance();
                self.skip_digits();
            }
            let exponent = matches!(self.peek(), Some('e' | 'E'))
                && match self.peek_at(1) {
                    Some(d) if d.is_ascii_digit() => true,
                    Some('+' | '-') => self.peek_at(2).is_some_and(|d| d.is_ascii_digit()),
                    _ => false,
                };
            if exponent {
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.skip_digits();
            }
            if self.peek() == Some('n') {
                self.advance();
            }
        }
        self.push(TokenKind::Number, start, line, column);
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn scan_word(&mut self, start: usize, line: usize, column: usize) {
        self.advance();
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        let word = self.text(start);
        let kind = KEYWORDS.get(word.as_str()).copied().unwrap_or(TokenKind::Name);
        self.push(kind, start, line, column);
    }

    fn scan_punctuator(&mut self, start: usize, line: usize, column: usize) {
        let matched = PUNCTUATORS
            .iter()
            .find(|(text, _)| self.matches_ahead(text))
            .copied();
        match matched {
            // `a?.5:b` 是条件表达式
            Some(("?.", _)) if self.peek_at(2).is_some_and(|c| c.is_ascii_digit()) => {
                self.advance();
                self.push(TokenKind::Question, start, line, column);
            }
            Some((text, kind)) => {
                for _ in 0..text.chars().count() {
                    self.advance();
                }
                self.push(kind, start, line, column);
            }
            None => {
                self.advance();
                self.push_malformed(MalformedKind::InvalidCharacter, start, line, column);
            }
        }
    }

    fn matches_ahead(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, expected)| self.peek_at(offset) == Some(expected))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$' || c == '#' || c == '\\'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\\' || c == '\u{200c}' || c == '\u{200d}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    fn lexemes(src: &str) -> Vec<String> {
        tokenize(src)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_basic_statement() {
        assert_eq!(
            kinds("var x = 1;"),
            vec![
                TokenKind::Var,
                TokenKind::Name,
                TokenKind::Equal,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a\n  bc");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!(tokens[2].lexeme, "bc");
    }

    #[test]
    fn test_unicode_line_separators_advance_lines() {
        let tokens = tokenize("a\u{2028}b\u{2029}  c");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!((tokens[2].line, tokens[2].column), (2, 1));
        assert_eq!((tokens[4].line, tokens[4].column), (3, 3));
        assert_eq!(kinds("a // c\u{2028}b"), kinds("a\nb"));
    }

    #[test]
    fn test_newlines_collapse() {
        assert_eq!(
            kinds("\n\na\n\n\nb"),
            vec![TokenKind::Name, TokenKind::Newline, TokenKind::Name, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(kinds("a // c\nb"), kinds("a\nb"));
        assert_eq!(
            kinds("a /* x */ b"),
            vec![TokenKind::Name, TokenKind::Name, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a /* x\n */ b"),
            vec![TokenKind::Name, TokenKind::Newline, TokenKind::Name, TokenKind::Eof]
        );
    }

    #[test]
    fn test_longest_match_punctuators() {
        assert_eq!(lexemes("a >>>= b"), vec!["a", ">>>=", "b"]);
        assert_eq!(lexemes("a?.b ?? c"), vec!["a", "?.", "b", "??", "c"]);
        assert_eq!(lexemes("x?.5:1"), vec!["x", "?", ".5", ":", "1"]);
        assert_eq!(lexemes("(...args) => a"), vec!["(", "...", "args", ")", "=>", "a"]);
    }

    #[test]
    fn test_division_after_operand() {
        assert_eq!(kinds("a / b")[1], TokenKind::Slash);
        assert_eq!(kinds("(a) / 2")[3], TokenKind::Slash);
        assert_eq!(kinds("a[0] / 2")[4], TokenKind::Slash);
        assert_eq!(kinds("this / 2")[1], TokenKind::Slash);
        assert_eq!(kinds("a++ / 2")[2], TokenKind::Slash);
        // 只看前一个 token，条件括号之后同样按除号处理
        assert_eq!(kinds("if (x) /re/.test(s)")[4], TokenKind::Slash);
    }

    #[test]
    fn test_regex_in_operator_position() {
        assert_eq!(lexemes("x = /ab+c/gi"), vec!["x", "=", "/ab+c/gi"]);
        assert_eq!(kinds("return /a/")[1], TokenKind::Regex);
        assert_eq!(kinds("typeof /a/")[1], TokenKind::Regex);
        assert_eq!(kinds("f(/a/)")[2], TokenKind::Regex);
        // class brackets may contain a slash
        assert_eq!(lexemes("/[/]\\//.test(s)")[0], "/[/]\\//");
    }

    #[test]
    fn test_regex_on_new_line_after_operand_is_division() {
        let tokens = tokenize("a\n/b/g");
        assert_eq!(tokens[2].kind, TokenKind::Slash);
    }

    #[test]
    fn test_strings_keep_quotes() {
        assert_eq!(lexemes(r#"'a\'b' "c""#), vec![r"'a\'b'", r#""c""#]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lexemes("0x1F 1_000 1.5e-3 .5 10n 1."),
            vec!["0x1F", "1_000", "1.5e-3", ".5", "10n", "1."]
        );
    }

    #[test]
    fn test_keywords_and_names() {
        let tokens = tokenize("function of get $x _y #priv");
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert!(tokens[1..6].iter().all(|t| t.kind == TokenKind::Name));
        assert!(tokens[0].is_word());
    }

    #[test]
    fn test_template_token() {
        let tokens = tokenize("`a ${ {b: `x${c}`}.b } d` + 1");
        assert_eq!(tokens[0].kind, TokenKind::Template);
        assert_eq!(tokens[0].lexeme, "`a ${ {b: `x${c}`}.b } d`");
        assert_eq!(tokens[1].kind, TokenKind::Plus);
    }

    #[test]
    fn test_split_template() {
        let parts = split_template("`a${b}c${ d + 1 }`", 3, 5).unwrap();
        assert_eq!(
            parts,
            vec![
                TemplatePart::Text("a".to_string()),
                TemplatePart::Substitution {
                    source: "b".to_string(),
                    line: 3,
                    column: 9
                },
                TemplatePart::Text("c".to_string()),
                TemplatePart::Substitution {
                    source: " d + 1 ".to_string(),
                    line: 3,
                    column: 14
                },
                TemplatePart::Text(String::new()),
            ]
        );
    }

    #[test]
    fn test_malformed_string() {
        let tokens = tokenize("var s = 'abc\nvar t = 1;");
        let bad = &tokens[3];
        assert_eq!(bad.kind, TokenKind::Malformed(MalformedKind::UnterminatedString));
        assert_eq!((bad.line, bad.column), (1, 9));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_malformed_comment_and_template() {
        assert!(kinds("a /* never closed")
            .contains(&TokenKind::Malformed(MalformedKind::UnterminatedComment)));
        assert!(kinds("`abc ${x")
            .contains(&TokenKind::Malformed(MalformedKind::UnterminatedTemplate)));
        assert!(kinds("x = /abc")
            .contains(&TokenKind::Malformed(MalformedKind::UnterminatedRegex)));
    }

    #[test]
    fn test_invalid_character_continues() {
        assert_eq!(
            kinds("a @ b"),
            vec![
                TokenKind::Name,
                TokenKind::Malformed(MalformedKind::InvalidCharacter),
                TokenKind::Name,
                TokenKind::Eof
            ]
        );
    }
}
