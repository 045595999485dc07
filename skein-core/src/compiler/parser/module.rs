//! `import` / `export` 声明

use super::ast::{Node, NodeFlags, NodeKind};
use super::error::ParseResult;
use super::parser::{DefinitionStyle, Parser};
use crate::compiler::lexer::TokenKind;

impl<'t> Parser<'t> {
    pub(crate) fn parse_import(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::Import, "'import'")?;

        // 仅执行副作用：import 'x'
        if self.test(TokenKind::String) {
            let source = self.advance().lexeme.clone();
            self.skip_import_attributes()?;
            self.consume_terminator()?;
            return Ok(Node::leaf(NodeKind::Import, source));
        }

        let mut specifiers = Vec::new();
        let mut more = true;
        if self.test(TokenKind::Name) {
            let local = self.advance().lexeme.clone();
            specifiers.push(Node::leaf(NodeKind::ImportDefault, local));
            more = self.accept(TokenKind::Comma);
        }
        if more {
            if self.accept(TokenKind::Star) {
                self.expect_name("as")?;
                let local = self.expect_identifier()?;
                specifiers.push(Node::leaf(NodeKind::ImportNamespace, local));
            } else if self.accept(TokenKind::LeftCurly) {
                while !self.accept(TokenKind::RightCurly) {
                    specifiers.push(self.parse_import_specifier()?);
                    if !self.test(TokenKind::RightCurly) {
                        self.expect(TokenKind::Comma, "','")?;
                    }
                }
            } else {
                return Err(self.unexpected(vec!["'*'", "'{'"]));
            }
        }

        self.expect_name("from")?;
        let source = self.expect(TokenKind::String, "module path")?.lexeme.clone();
        self.skip_import_attributes()?;
        self.consume_terminator()?;
        Ok(Node::new(NodeKind::Import, source, specifiers))
    }

    /// `{ imported as local }` 中的一项
    fn parse_import_specifier(&mut self) -> ParseResult<Node> {
        let imported = self.parse_module_export_name()?;
        let local = if self.accept_name("as") {
            self.expect_identifier()?
        } else if imported.is(NodeKind::Name) {
            imported.value.clone()
        } else {
            return Err(self.unexpected(vec!["'as'"]));
        };
        Ok(Node::branch(
            NodeKind::ImportSpecifier,
            vec![imported, Node::name(local)],
        ))
    }

    /// 导入导出中的名字：任何名字、关键字或字符串
    fn parse_module_export_name(&mut self) -> ParseResult<Node> {
        let token = self.peek();
        if token.is_word() {
            self.advance();
            Ok(Node::name(token.lexeme.clone()))
        } else if token.kind == TokenKind::String {
            self.advance();
            Ok(Node::leaf(NodeKind::String, token.lexeme.clone()))
        } else {
            Err(self.unexpected(vec!["name"]))
        }
    }

    /// `with { type: 'json' }` 之类的导入属性不影响打包，解析后丢弃
    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        let token = self.raw();
        if token.kind == TokenKind::With || (token.kind == TokenKind::Name && token.lexeme == "assert") {
            self.advance();
            self.parse_object_literal()?;
        }
        Ok(())
    }

    pub(crate) fn parse_export(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::Export, "'export'")?;
        match self.kind() {
            TokenKind::Default => {
                self.advance();
                let value = match self.kind() {
                    TokenKind::Function => {
                        self.parse_function(NodeFlags::NONE, DefinitionStyle::DefaultExport)?
                    }
                    TokenKind::Name
                        if self.test_name("async")
                            && self.raw_after_peek().kind == TokenKind::Function =>
                    {
                        self.advance();
                        self.parse_function(NodeFlags::ASYNC, DefinitionStyle::DefaultExport)?
                    }
                    TokenKind::Class => self.parse_class(DefinitionStyle::DefaultExport)?,
                    _ => {
                        let expression = self.parse_assignment()?;
                        self.consume_terminator()?;
                        expression
                    }
                };
                Ok(Node::branch(NodeKind::ExportDefault, vec![value]))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_variable_declaration()?;
                self.consume_terminator()?;
                Ok(Node::branch(NodeKind::ExportDeclaration, vec![declaration]))
            }
            TokenKind::Function => {
                let declaration =
                    self.parse_function(NodeFlags::NONE, DefinitionStyle::Declaration)?;
                Ok(Node::branch(NodeKind::ExportDeclaration, vec![declaration]))
            }
            TokenKind::Name if self.test_name("async") => {
                self.advance();
                let declaration =
                    self.parse_function(NodeFlags::ASYNC, DefinitionStyle::Declaration)?;
                Ok(Node::branch(NodeKind::ExportDeclaration, vec![declaration]))
            }
            TokenKind::Class => {
                let declaration = self.parse_class(DefinitionStyle::Declaration)?;
                Ok(Node::branch(NodeKind::ExportDeclaration, vec![declaration]))
            }
            TokenKind::Star => {
                self.advance();
                let mut children = Vec::new();
                if self.accept_name("as") {
                    children.push(self.parse_module_export_name()?);
                }
                self.expect_name("from")?;
                let source = self.expect(TokenKind::String, "module path")?.lexeme.clone();
                self.skip_import_attributes()?;
                self.consume_terminator()?;
                Ok(Node::new(NodeKind::ExportNamed, source, children)
                    .with_flags(NodeFlags::EXPORT_ALL))
            }
            TokenKind::LeftCurly => {
                self.advance();
                let mut specifiers = Vec::new();
                while !self.accept(TokenKind::RightCurly) {
                    let local = self.parse_module_export_name()?;
                    let exported = if self.accept_name("as") {
                        self.parse_module_export_name()?
                    } else {
                        local.clone()
                    };
                    specifiers.push(Node::branch(
                        NodeKind::ExportSpecifier,
                        vec![local, exported],
                    ));
                    if !self.test(TokenKind::RightCurly) {
                        self.expect(TokenKind::Comma, "','")?;
                    }
                }
                let source = if self.accept_name("from") {
                    let source = self.expect(TokenKind::String, "module path")?.lexeme.clone();
                    self.skip_import_attributes()?;
                    source
                } else {
                    String::new()
                };
                self.consume_terminator()?;
                Ok(Node::new(NodeKind::ExportNamed, source, specifiers))
            }
            _ => Err(self.unexpected(vec![
                "'default'",
                "declaration",
                "'*'",
                "'{'",
            ])),
        }
    }
}
