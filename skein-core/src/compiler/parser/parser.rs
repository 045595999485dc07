//! 递归下降语法分析器：语句部分
//!
//! 游标是 token 切片上的整数下标，回溯即保存/恢复下标。回溯只用于
//! 括号表达式与箭头函数参数表、普通 `for` 与 `for-in`/`for-of` 的区分。
//! 表达式见 `expr.rs`，import/export 见 `module.rs`。

use super::ast::{Node, NodeFlags, NodeKind};
use super::error::{unexpected_token, ParseResult, ParserError, ParserErrorKind};
use crate::compiler::lexer::{Token, TokenKind};
use once_cell::sync::Lazy;
use tracing::{debug, trace};

static EOF_TOKEN: Lazy<Token> = Lazy::new(|| Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    line: 0,
    column: 0,
});

/// 函数与类的形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefinitionStyle {
    /// 必须有名字
    Declaration,
    /// 名字可选
    Expression,
    /// `export default` 之后：有名字时是声明，否则是表达式
    DefaultExport,
}

pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) index: usize,
    /// for 头部初始化中 `in` 不作为运算符
    pub(crate) no_in: bool,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            index: 0,
            no_in: false,
        }
    }

    /// 解析整个程序
    pub fn parse(&mut self) -> ParseResult<Node> {
        self.check_malformed()?;
        let mut statements = Vec::new();
        while !self.test(TokenKind::Eof) {
            statements.push(self.parse_module_item()?);
        }
        debug!(target: "skein::parser", statements = statements.len(), "Parsed program");
        Ok(Node::branch(NodeKind::Program, statements))
    }

    /// 扫描器嵌入的第一个非法 token 即为错误
    pub(crate) fn check_malformed(&self) -> ParseResult<()> {
        let malformed = self.tokens.iter().enumerate().find_map(|(i, t)| match t.kind {
            TokenKind::Malformed(kind) => Some((i, kind)),
            _ => None,
        });
        match malformed {
            Some((index, kind)) => Err(ParserError::at(
                ParserErrorKind::Malformed(kind),
                self.tokens,
                index,
            )),
            None => Ok(()),
        }
    }

    // ===== 游标 =====

    fn token_at(&self, index: usize) -> &'t Token {
        self.tokens.get(index).unwrap_or(&*EOF_TOKEN)
    }

    /// 当前位置的原始 token（不跳过换行）
    pub(crate) fn raw(&self) -> &'t Token {
        self.token_at(self.index)
    }

    /// 下一个有意义 token 的下标
    pub(crate) fn significant_index(&self) -> usize {
        let mut index = self.index;
        while self
            .tokens
            .get(index)
            .is_some_and(|t| t.kind == TokenKind::Newline)
        {
            index += 1;
        }
        index
    }

    pub(crate) fn peek(&self) -> &'t Token {
        self.token_at(self.significant_index())
    }

    /// 向前第 n 个有意义 token（0 即 `peek`）
    pub(crate) fn peek_nth(&self, n: usize) -> &'t Token {
        let mut index = self.significant_index();
        for _ in 0..n {
            index += 1;
            while self
                .tokens
                .get(index)
                .is_some_and(|t| t.kind == TokenKind::Newline)
            {
                index += 1;
            }
        }
        self.token_at(index)
    }

    /// 紧跟在 `peek` 之后的原始 token
    pub(crate) fn raw_after_peek(&self) -> &'t Token {
        self.token_at(self.significant_index() + 1)
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn test(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// 上下文关键字（按文本匹配的名字）
    pub(crate) fn test_name(&self, text: &str) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Name && token.lexeme == text
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let index = self.significant_index();
        let token = self.token_at(index);
        trace!(target: "skein::parser", lexeme = %token.lexeme, line = token.line, "Consume");
        self.index = (index + 1).min(self.tokens.len());
        token
    }

    pub(crate) fn accept(&mut self, kind: TokenKind) -> bool {
        if self.test(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn accept_name(&mut self, text: &str) -> bool {
        if self.test_name(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 期望并消费指定类型的 token，否则返回错误
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<&'t Token> {
        if self.test(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(vec![what]))
        }
    }

    pub(crate) fn expect_name(&mut self, text: &str) -> ParseResult<()> {
        if self.accept_name(text) {
            Ok(())
        } else {
            Err(self.unexpected(vec![format!("'{text}'")]))
        }
    }

    /// 期望一个标识符，返回其名字
    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        Ok(self.expect(TokenKind::Name, "identifier")?.lexeme.clone())
    }

    /// 创建带有当前位置的错误
    pub(crate) fn error_here(&self, kind: ParserErrorKind) -> ParserError {
        ParserError::at(kind, self.tokens, self.significant_index())
    }

    pub(crate) fn unexpected(&self, expected: Vec<impl Into<String>>) -> ParserError {
        let token = self.peek();
        let found = if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            token.lexeme.clone()
        };
        self.error_here(unexpected_token(found, expected))
    }

    /// 语句结束：显式 `;`，或者换行、`}`、文件末尾（自动分号插入）
    pub(crate) fn consume_terminator(&mut self) -> ParseResult<()> {
        match self.raw().kind {
            TokenKind::Semicolon | TokenKind::Newline => {
                self.index += 1;
                Ok(())
            }
            TokenKind::RightCurly | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(vec!["';'"])),
        }
    }

    /// 在 `in` 不作为运算符的上下文中解析
    pub(crate) fn with_no_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.no_in, true);
        let result = f(self);
        self.no_in = saved;
        result
    }

    /// 括号、函数体等内部重新允许 `in`
    pub(crate) fn allow_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    // ===== 语句 =====

    /// 顶层语句：只有这里允许 import/export 声明
    fn parse_module_item(&mut self) -> ParseResult<Node> {
        match self.kind() {
            TokenKind::Import if !self.is_import_expression() => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            _ => self.parse_statement(),
        }
    }

    /// `import(...)` 与 `import.meta` 是表达式
    fn is_import_expression(&self) -> bool {
        matches!(self.peek_nth(1).kind, TokenKind::LeftParen | TokenKind::Dot)
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        match self.kind() {
            TokenKind::LeftCurly => self.parse_block(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_variable_declaration()?;
                self.consume_terminator()?;
                Ok(declaration)
            }
            TokenKind::Function => {
                self.parse_function(NodeFlags::NONE, DefinitionStyle::Declaration)
            }
            TokenKind::Name
                if self.test_name("async") && self.raw_after_peek().kind == TokenKind::Function =>
            {
                self.advance();
                self.parse_function(NodeFlags::ASYNC, DefinitionStyle::Declaration)
            }
            TokenKind::Class => self.parse_class(DefinitionStyle::Declaration),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break | TokenKind::Continue => self.parse_jump(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Debugger => {
                self.advance();
                self.consume_terminator()?;
                Ok(Node::leaf(NodeKind::Debugger, ""))
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Node::leaf(NodeKind::EmptyStatement, ""))
            }
            TokenKind::Import if !self.is_import_expression() => {
                Err(self.error_here(ParserErrorKind::MisplacedModuleItem))
            }
            TokenKind::Export => Err(self.error_here(ParserErrorKind::MisplacedModuleItem)),
            TokenKind::Name if self.peek_nth(1).kind == TokenKind::Colon => {
                let label = self.advance().lexeme.clone();
                self.advance();
                let body = self.parse_statement()?;
                Ok(Node::new(NodeKind::Labeled, label, vec![body]))
            }
            _ => {
                let expression = self.parse_expression()?;
                self.consume_terminator()?;
                Ok(Node::branch(NodeKind::ExpressionStatement, vec![expression]))
            }
        }
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftCurly, "'{'")?;
        let mut statements = Vec::new();
        while !self.test(TokenKind::RightCurly) {
            if self.test(TokenKind::Eof) {
                return Err(self.unexpected(vec!["'}'"]));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();
        Ok(Node::branch(NodeKind::Block, statements))
    }

    /// 函数体：重新允许 `in`
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<Node> {
        self.allow_in(|p| p.parse_block())
    }

    /// `var` / `let` / `const` 声明（不含结尾分号）
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<Node> {
        let kind = self.advance().lexeme.clone();
        let mut declarators = Vec::new();
        loop {
            let target = self.parse_binding_target()?;
            let init = if self.accept(TokenKind::Equal) {
                self.parse_assignment()?
            } else {
                Node::empty()
            };
            declarators.push(Node::branch(NodeKind::Declarator, vec![target, init]));
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        Ok(Node::new(NodeKind::VariableDeclaration, kind, declarators))
    }

    fn parse_paren_condition(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let condition = self.allow_in(|p| p.parse_expression())?;
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(condition)
    }

    fn parse_if(&mut self) -> ParseResult<Node> {
        self.advance();
        let test = self.parse_paren_condition()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.accept(TokenKind::Else) {
            self.parse_statement()?
        } else {
            Node::empty()
        };
        Ok(Node::branch(NodeKind::If, vec![test, consequent, alternate]))
    }

    fn parse_while(&mut self) -> ParseResult<Node> {
        self.advance();
        let test = self.parse_paren_condition()?;
        let body = self.parse_statement()?;
        Ok(Node::branch(NodeKind::While, vec![test, body]))
    }

    fn parse_do_while(&mut self) -> ParseResult<Node> {
        self.advance();
        let body = self.parse_statement()?;
        self.expect(TokenKind::While, "'while'")?;
        let test = self.parse_paren_condition()?;
        self.accept(TokenKind::Semicolon);
        Ok(Node::branch(NodeKind::DoWhile, vec![body, test]))
    }

    /// `for` 三种形式；先尝试 for-in/for-of 头部，不成立则回溯
    fn parse_for(&mut self) -> ParseResult<Node> {
        self.advance();
        let is_await = self.accept(TokenKind::Await);
        self.expect(TokenKind::LeftParen, "'('")?;

        let saved = self.index;
        let left = self.with_no_in(|p| p.parse_for_left());
        if let Ok(left) = left {
            if is_await && !self.test_name("of") {
                return Err(self.unexpected(vec!["'of'"]));
            }
            if self.test(TokenKind::In) || self.test_name("of") {
                let of = !self.test(TokenKind::In);
                self.advance();
                let right = self.allow_in(|p| {
                    if of {
                        p.parse_assignment()
                    } else {
                        p.parse_expression()
                    }
                })?;
                self.expect(TokenKind::RightParen, "')'")?;
                let body = self.parse_statement()?;
                let kind = if of { NodeKind::ForOf } else { NodeKind::ForIn };
                let flags = if is_await { NodeFlags::ASYNC } else { NodeFlags::NONE };
                return Ok(Node::branch(kind, vec![left, right, body]).with_flags(flags));
            }
        }
        self.index = saved;
        if is_await {
            return Err(self.unexpected(vec!["for-of head"]));
        }

        let init = match self.kind() {
            TokenKind::Semicolon => Node::empty(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                self.with_no_in(|p| p.parse_variable_declaration())?
            }
            _ => self.with_no_in(|p| p.parse_expression())?,
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        let test = if self.test(TokenKind::Semicolon) {
            Node::empty()
        } else {
            self.allow_in(|p| p.parse_expression())?
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        let update = if self.test(TokenKind::RightParen) {
            Node::empty()
        } else {
            self.allow_in(|p| p.parse_expression())?
        };
        self.expect(TokenKind::RightParen, "')'")?;
        let body = self.parse_statement()?;
        Ok(Node::branch(NodeKind::For, vec![init, test, update, body]))
    }

    /// for-in/for-of 左侧：单个无初始化的声明，或左值表达式
    fn parse_for_left(&mut self) -> ParseResult<Node> {
        match self.kind() {
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let kind = self.advance().lexeme.clone();
                let target = self.parse_binding_target()?;
                Ok(Node::new(
                    NodeKind::VariableDeclaration,
                    kind,
                    vec![Node::branch(
                        NodeKind::Declarator,
                        vec![target, Node::empty()],
                    )],
                ))
            }
            _ => self.parse_call_member(),
        }
    }

    fn parse_return(&mut self) -> ParseResult<Node> {
        self.advance();
        let argument = if self.at_statement_end() {
            Node::empty()
        } else {
            self.parse_expression()?
        };
        self.consume_terminator()?;
        Ok(Node::branch(NodeKind::Return, vec![argument]))
    }

    fn parse_throw(&mut self) -> ParseResult<Node> {
        self.advance();
        let argument = self.parse_expression()?;
        self.consume_terminator()?;
        Ok(Node::branch(NodeKind::Throw, vec![argument]))
    }

    /// `break` / `continue`，标签只能在同一行
    fn parse_jump(&mut self) -> ParseResult<Node> {
        let keyword = self.advance();
        let kind = if keyword.kind == TokenKind::Break {
            NodeKind::Break
        } else {
            NodeKind::Continue
        };
        let label = if self.raw().kind == TokenKind::Name {
            self.advance().lexeme.clone()
        } else {
            String::new()
        };
        self.consume_terminator()?;
        Ok(Node::leaf(kind, label))
    }

    /// 紧随其后（同一行）没有可作为操作数的内容
    pub(crate) fn at_statement_end(&self) -> bool {
        matches!(
            self.raw().kind,
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::RightCurly | TokenKind::Eof
        )
    }

    fn parse_try(&mut self) -> ParseResult<Node> {
        self.advance();
        let block = self.parse_block()?;
        let handler = if self.accept(TokenKind::Catch) {
            let param = if self.accept(TokenKind::LeftParen) {
                let target = self.parse_binding_target()?;
                self.expect(TokenKind::RightParen, "')'")?;
                target
            } else {
                Node::empty()
            };
            let body = self.parse_block()?;
            Node::branch(NodeKind::CatchClause, vec![param, body])
        } else {
            Node::empty()
        };
        let finalizer = if self.accept(TokenKind::Finally) {
            self.parse_block()?
        } else {
            Node::empty()
        };
        if handler.is_empty() && finalizer.is_empty() {
            return Err(self.unexpected(vec!["'catch'", "'finally'"]));
        }
        Ok(Node::branch(NodeKind::Try, vec![block, handler, finalizer]))
    }

    fn parse_switch(&mut self) -> ParseResult<Node> {
        self.advance();
        let discriminant = self.parse_paren_condition()?;
        self.expect(TokenKind::LeftCurly, "'{'")?;
        let mut children = vec![discriminant];
        while !self.accept(TokenKind::RightCurly) {
            let (label, test) = if self.accept(TokenKind::Case) {
                ("case", self.allow_in(|p| p.parse_expression())?)
            } else if self.accept(TokenKind::Default) {
                ("default", Node::empty())
            } else {
                return Err(self.unexpected(vec!["'case'", "'default'", "'}'"]));
            };
            self.expect(TokenKind::Colon, "':'")?;
            let mut case = vec![test];
            while !matches!(
                self.kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RightCurly | TokenKind::Eof
            ) {
                case.push(self.parse_statement()?);
            }
            children.push(Node::new(NodeKind::SwitchCase, label, case));
        }
        Ok(Node::branch(NodeKind::Switch, children))
    }
}

/// 解析 token 序列
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::tokenize;

    fn parse_code(code: &str) -> ParseResult<Node> {
        let tokens = tokenize(code);
        parse(&tokens)
    }

    fn statement_kinds(code: &str) -> Vec<NodeKind> {
        parse_code(code)
            .unwrap()
            .children
            .iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_code("").unwrap();
        assert_eq!(program.kind, NodeKind::Program);
        assert!(program.children.is_empty());
    }

    #[test]
    fn test_parse_variable_declaration() {
        let program = parse_code("var x = 5, y;").unwrap();
        let decl = &program.children[0];
        assert_eq!(decl.kind, NodeKind::VariableDeclaration);
        assert_eq!(decl.value, "var");
        assert_eq!(decl.children.len(), 2);
        assert_eq!(decl.children[0].children[0].value, "x");
        assert_eq!(decl.children[0].children[1].value, "5");
        assert!(decl.children[1].children[1].is_empty());
    }

    #[test]
    fn test_asi_on_newline() {
        assert_eq!(
            statement_kinds("let a = 1\nlet b = 2\n"),
            vec![NodeKind::VariableDeclaration, NodeKind::VariableDeclaration]
        );
    }

    #[test]
    fn test_asi_before_closing_brace_and_eof() {
        assert!(parse_code("function f() { return 1 }").is_ok());
        assert!(parse_code("a = 1").is_ok());
    }

    #[test]
    fn test_missing_terminator_is_error() {
        let err = parse_code("a = 1 b = 2").unwrap_err();
        assert!(matches!(err.kind, ParserErrorKind::UnexpectedToken { .. }));
        assert_eq!((err.line(), err.column()), (1, 7));
        assert_eq!(err.token, "b");
    }

    #[test]
    fn test_return_argument_must_be_on_same_line() {
        let program = parse_code("function f() {\n  return\n  42\n}").unwrap();
        let body = &program.children[0].children[1];
        assert_eq!(body.children[0].kind, NodeKind::Return);
        assert!(body.children[0].children[0].is_empty());
        assert_eq!(body.children[1].kind, NodeKind::ExpressionStatement);
    }

    #[test]
    fn test_control_flow_statements() {
        assert_eq!(
            statement_kinds(
                "if (a) b(); else c();\n\
                 while (x) { x-- }\n\
                 do { y++ } while (y < 3)\n\
                 switch (k) { case 1: f(); break; default: g() }\n\
                 try { h() } catch (e) { } finally { }\n\
                 outer: for (;;) { break outer }\n\
                 debugger;"
            ),
            vec![
                NodeKind::If,
                NodeKind::While,
                NodeKind::DoWhile,
                NodeKind::Switch,
                NodeKind::Try,
                NodeKind::Labeled,
                NodeKind::Debugger,
            ]
        );
    }

    #[test]
    fn test_for_variants_backtrack() {
        assert_eq!(
            statement_kinds(
                "for (let i = 0; i < n; i++) {}\n\
                 for (const k in obj) {}\n\
                 for (const v of list) {}\n\
                 for (x.y in obj) {}\n\
                 for (var i = 0, n = a.length; i < n; i++) {}\n\
                 for (;;) { break }"
            ),
            vec![
                NodeKind::For,
                NodeKind::ForIn,
                NodeKind::ForOf,
                NodeKind::ForIn,
                NodeKind::For,
                NodeKind::For,
            ]
        );
    }

    #[test]
    fn test_in_allowed_inside_for_init_parens() {
        let program = parse_code("for (var a = ('x' in o); a; ) {}").unwrap();
        assert_eq!(program.children[0].kind, NodeKind::For);
    }

    #[test]
    fn test_switch_cases() {
        let program = parse_code("switch (x) { case 1: case 2: a(); default: b() }").unwrap();
        let switch = &program.children[0];
        assert_eq!(switch.children.len(), 4);
        assert_eq!(switch.children[1].value, "case");
        assert_eq!(switch.children[1].children.len(), 1);
        assert_eq!(switch.children[2].children.len(), 2);
        assert_eq!(switch.children[3].value, "default");
    }

    #[test]
    fn test_try_requires_handler() {
        assert!(parse_code("try { a() }").is_err());
    }

    #[test]
    fn test_unmatched_brace_reports_eof_position() {
        let err = parse_code("function f() {\n  return 1;\n").unwrap_err();
        assert_eq!(
            err.kind,
            unexpected_token("end of input", vec!["'}'"])
        );
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 1);
    }

    #[test]
    fn test_malformed_token_is_reported() {
        let err = parse_code("var a = 1;\nvar s = \"oops;\n").unwrap_err();
        assert!(matches!(err.kind, ParserErrorKind::Malformed(_)));
        assert_eq!((err.line(), err.column()), (2, 9));
    }
}
