//! 表达式、函数、类与解构模式

use super::ast::{Node, NodeFlags, NodeKind};
use super::error::{ParseResult, ParserError, ParserErrorKind};
use super::parser::{DefinitionStyle, Parser};
use super::utils::{get_associativity, get_precedence, is_prefix_operator};
use crate::compiler::lexer::{split_template, tokenize_at, TemplatePart, TokenKind};

/// 访问器/方法前缀之后紧跟这些 token 时，前缀本身就是属性名
fn is_property_end(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Colon
            | TokenKind::LeftParen
            | TokenKind::Comma
            | TokenKind::RightCurly
            | TokenKind::Equal
            | TokenKind::Semicolon
    )
}

/// 可以出现在赋值左侧的节点
fn is_assignable(node: &Node, destructuring: bool) -> bool {
    match node.kind {
        NodeKind::Name | NodeKind::Member | NodeKind::ComputedMember => true,
        NodeKind::ObjectLiteral
        | NodeKind::ArrayLiteral
        | NodeKind::ObjectPattern
        | NodeKind::ArrayPattern => destructuring,
        NodeKind::Parens => node
            .child(0)
            .is_some_and(|inner| is_assignable(inner, destructuring)),
        _ => false,
    }
}

impl<'t> Parser<'t> {
    /// 逗号表达式
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node> {
        let first = self.parse_assignment()?;
        if !self.test(TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.accept(TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Node::branch(NodeKind::Sequence, expressions))
    }

    /// 赋值表达式（右结合），也是箭头函数与 `yield` 的入口
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Node> {
        if let Some(arrow) = self.try_arrow_function()? {
            return Ok(arrow);
        }
        if self.test(TokenKind::Yield) {
            return self.parse_yield();
        }

        let start = self.significant_index();
        let left = self.parse_conditional()?;
        let op = self.kind();
        if !op.is_assignment() {
            return Ok(left);
        }
        if !is_assignable(&left, op == TokenKind::Equal) {
            return Err(ParserError::at(
                ParserErrorKind::WrongAssignment,
                self.tokens,
                start,
            ));
        }
        let op = self.advance().lexeme.clone();
        let right = self.parse_assignment()?;
        Ok(Node::new(NodeKind::Assignment, op, vec![left, right]))
    }

    /// 尝试解析箭头函数；不是箭头函数时恢复游标并返回 `None`
    fn try_arrow_function(&mut self) -> ParseResult<Option<Node>> {
        let saved = self.index;
        let mut flags = NodeFlags::NONE;
        if self.test_name("async")
            && matches!(
                self.raw_after_peek().kind,
                TokenKind::Name | TokenKind::LeftParen
            )
        {
            self.advance();
            flags = NodeFlags::ASYNC;
        }

        if self.test(TokenKind::Name) && self.peek_nth(1).kind == TokenKind::FatArrow {
            let param = Node::name(self.advance().lexeme.clone());
            self.advance();
            let body = self.parse_arrow_body()?;
            let params = Node::branch(NodeKind::FunctionParameters, vec![param]);
            return Ok(Some(
                Node::branch(NodeKind::ArrowFunction, vec![params, body]).with_flags(flags),
            ));
        }

        if self.test(TokenKind::LeftParen) && self.arrow_follows_parens() {
            if let Ok(params) = self.parse_parameter_list() {
                if self.accept(TokenKind::FatArrow) {
                    let body = self.parse_arrow_body()?;
                    return Ok(Some(
                        Node::branch(NodeKind::ArrowFunction, vec![params, body])
                            .with_flags(flags),
                    ));
                }
            }
        }

        self.index = saved;
        Ok(None)
    }

    /// 从当前 `(` 向前找到配对的 `)`，看其后是否紧跟 `=>`
    ///
    /// 只数括号不解析，嵌套的括号表达式不会在每一层都被试解析一遍。
    fn arrow_follows_parens(&self) -> bool {
        let mut depth = 0usize;
        let mut rest = self.tokens[self.significant_index()..].iter();
        for token in rest.by_ref() {
            match token.kind {
                TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftCurly => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightCurly => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
        }
        rest.find(|token| token.kind != TokenKind::Newline)
            .is_some_and(|token| token.kind == TokenKind::FatArrow)
    }

    fn parse_arrow_body(&mut self) -> ParseResult<Node> {
        if self.test(TokenKind::LeftCurly) {
            self.parse_function_body()
        } else {
            self.parse_assignment()
        }
    }

    fn parse_yield(&mut self) -> ParseResult<Node> {
        self.advance();
        let delegate = self.raw().kind == TokenKind::Star;
        if delegate {
            self.advance();
        }
        let ends = matches!(
            self.raw().kind,
            TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightCurly
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Eof
        );
        let argument = if ends && !delegate {
            Node::empty()
        } else {
            self.parse_assignment()?
        };
        let keyword = if delegate { "yield*" } else { "yield" };
        Ok(Node::new(NodeKind::Yield, keyword, vec![argument]))
    }

    fn parse_conditional(&mut self) -> ParseResult<Node> {
        let test = self.parse_binary()?;
        if !self.accept(TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.allow_in(|p| p.parse_assignment())?;
        self.expect(TokenKind::Colon, "':'")?;
        let alternate = self.parse_assignment()?;
        Ok(Node::branch(
            NodeKind::Conditional,
            vec![test, consequent, alternate],
        ))
    }

    /// 二元运算：运算符栈 + 操作数栈
    ///
    /// 新运算符入栈前，先归约栈顶优先级更高的运算符；
    /// 优先级相同时只有左结合运算符会归约。
    fn parse_binary(&mut self) -> ParseResult<Node> {
        let mut operands = vec![self.parse_unary()?];
        let mut operators: Vec<(String, u8)> = Vec::new();

        loop {
            let token = self.peek();
            if token.kind == TokenKind::In && self.no_in {
                break;
            }
            let Some(precedence) = get_precedence(token.kind) else {
                break;
            };
            let left_assoc = get_associativity(token.kind);
            while let Some(&(_, top)) = operators.last() {
                if top > precedence || (top == precedence && left_assoc) {
                    reduce(&mut operands, &mut operators);
                } else {
                    break;
                }
            }
            operators.push((self.advance().lexeme.clone(), precedence));
            operands.push(self.parse_unary()?);
        }

        while !operators.is_empty() {
            reduce(&mut operands, &mut operators);
        }
        Ok(operands.pop().unwrap_or_else(Node::empty))
    }

    fn parse_unary(&mut self) -> ParseResult<Node> {
        if is_prefix_operator(self.kind()) {
            let op = self.advance().lexeme.clone();
            let argument = self.parse_unary()?;
            return Ok(Node::new(NodeKind::UnaryPrefix, op, vec![argument]));
        }
        self.parse_postfix()
    }

    /// 后缀 `++`/`--` 必须与操作数在同一行
    fn parse_postfix(&mut self) -> ParseResult<Node> {
        let expression = self.parse_call_member()?;
        if matches!(self.raw().kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = self.advance().lexeme.clone();
            return Ok(Node::new(NodeKind::UnaryPostfix, op, vec![expression]));
        }
        Ok(expression)
    }

    /// 成员访问、调用、可选链与标签模板
    pub(crate) fn parse_call_member(&mut self) -> ParseResult<Node> {
        let mut expression = if self.test(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            expression = match self.kind() {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_property_word()?;
                    Node::branch(NodeKind::Member, vec![expression, property])
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    let node = match self.kind() {
                        TokenKind::LeftParen => {
                            let arguments = self.parse_arguments()?;
                            Node::branch(NodeKind::Call, vec![expression, arguments])
                        }
                        TokenKind::LeftBracket => {
                            let index = self.parse_computed_index()?;
                            Node::branch(NodeKind::ComputedMember, vec![expression, index])
                        }
                        _ => {
                            let property = self.parse_property_word()?;
                            Node::branch(NodeKind::Member, vec![expression, property])
                        }
                    };
                    node.with_flags(NodeFlags::OPTIONAL)
                }
                TokenKind::LeftBracket => {
                    let index = self.parse_computed_index()?;
                    Node::branch(NodeKind::ComputedMember, vec![expression, index])
                }
                TokenKind::LeftParen => {
                    let arguments = self.parse_arguments()?;
                    Node::branch(NodeKind::Call, vec![expression, arguments])
                }
                TokenKind::Template => {
                    let template = self.parse_template()?;
                    Node::branch(NodeKind::TaggedTemplate, vec![expression, template])
                }
                _ => break,
            };
        }
        Ok(expression)
    }

    /// `new` 表达式；参数表可省略
    fn parse_new(&mut self) -> ParseResult<Node> {
        self.advance();
        if self.accept(TokenKind::Dot) {
            let property = self.parse_property_word()?;
            return Ok(Node::branch(
                NodeKind::Member,
                vec![Node::name("new"), property],
            ));
        }
        let mut callee = if self.test(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            callee = match self.kind() {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_property_word()?;
                    Node::branch(NodeKind::Member, vec![callee, property])
                }
                TokenKind::LeftBracket => {
                    let index = self.parse_computed_index()?;
                    Node::branch(NodeKind::ComputedMember, vec![callee, index])
                }
                _ => break,
            };
        }
        let arguments = if self.test(TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            Node::empty()
        };
        Ok(Node::branch(NodeKind::New, vec![callee, arguments]))
    }

    /// `.` 之后的属性名：任何名字或关键字
    fn parse_property_word(&mut self) -> ParseResult<Node> {
        if self.peek().is_word() {
            Ok(Node::name(self.advance().lexeme.clone()))
        } else {
            Err(self.unexpected(vec!["property name"]))
        }
    }

    fn parse_computed_index(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        let index = self.allow_in(|p| p.parse_expression())?;
        self.expect(TokenKind::RightBracket, "']'")?;
        Ok(index)
    }

    fn parse_arguments(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.test(TokenKind::RightParen) {
                let argument = if p.accept(TokenKind::Ellipsis) {
                    Node::branch(NodeKind::Spread, vec![p.parse_assignment()?])
                } else {
                    p.parse_assignment()?
                };
                arguments.push(argument);
                if !p.test(TokenKind::RightParen) {
                    p.expect(TokenKind::Comma, "','")?;
                }
            }
            Ok(arguments)
        })?;
        self.advance();
        Ok(Node::branch(NodeKind::Arguments, arguments))
    }

    fn parse_primary(&mut self) -> ParseResult<Node> {
        let token = self.peek();
        let leaf = |kind| Node::leaf(kind, token.lexeme.clone());
        let node = match token.kind {
            TokenKind::Name
                if token.lexeme == "async" && self.raw_after_peek().kind == TokenKind::Function =>
            {
                self.advance();
                return self.parse_function(NodeFlags::ASYNC, DefinitionStyle::Expression);
            }
            TokenKind::Name => leaf(NodeKind::Name),
            TokenKind::Number => leaf(NodeKind::Number),
            TokenKind::String => leaf(NodeKind::String),
            TokenKind::Regex => leaf(NodeKind::Regex),
            TokenKind::Null => leaf(NodeKind::Null),
            TokenKind::True | TokenKind::False => leaf(NodeKind::Bool),
            TokenKind::This => leaf(NodeKind::This),
            TokenKind::Super => leaf(NodeKind::Super),
            // 动态 `import()` 与 `import.meta`
            TokenKind::Import => Node::name("import"),
            TokenKind::Template => return self.parse_template(),
            TokenKind::Function => {
                return self.parse_function(NodeFlags::NONE, DefinitionStyle::Expression)
            }
            TokenKind::Class => return self.parse_class(DefinitionStyle::Expression),
            TokenKind::LeftBracket => return self.parse_array_literal(),
            TokenKind::LeftCurly => return self.parse_object_literal(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.allow_in(|p| p.parse_expression())?;
                self.expect(TokenKind::RightParen, "')'")?;
                return Ok(Node::branch(NodeKind::Parens, vec![inner]));
            }
            _ => return Err(self.unexpected(vec!["expression"])),
        };
        self.advance();
        Ok(node)
    }

    /// 模板字面量：文本块原样保留，插值用独立的解析器解析
    fn parse_template(&mut self) -> ParseResult<Node> {
        let index = self.significant_index();
        let token = self.advance();
        let parts = split_template(&token.lexeme, token.line, token.column).map_err(|kind| {
            ParserError::at(ParserErrorKind::Malformed(kind), self.tokens, index)
        })?;
        let mut children = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                TemplatePart::Text(text) => children.push(Node::leaf(NodeKind::TemplateText, text)),
                TemplatePart::Substitution {
                    source,
                    line,
                    column,
                } => {
                    let tokens = tokenize_at(&source, line, column);
                    let mut parser = Parser::new(&tokens);
                    children.push(parser.parse_embedded()?);
                }
            }
        }
        Ok(Node::branch(NodeKind::Template, children))
    }

    /// 模板插值：一个完整的表达式，之后必须是输入末尾
    fn parse_embedded(&mut self) -> ParseResult<Node> {
        self.check_malformed()?;
        let expression = self.parse_expression()?;
        if !self.test(TokenKind::Eof) {
            return Err(self.unexpected(vec!["'}'"]));
        }
        Ok(expression)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !p.test(TokenKind::RightBracket) {
                if p.accept(TokenKind::Comma) {
                    elements.push(Node::empty());
                    continue;
                }
                let element = if p.accept(TokenKind::Ellipsis) {
                    Node::branch(NodeKind::Spread, vec![p.parse_assignment()?])
                } else {
                    p.parse_assignment()?
                };
                elements.push(element);
                if !p.test(TokenKind::RightBracket) {
                    p.expect(TokenKind::Comma, "','")?;
                }
            }
            Ok(elements)
        })?;
        self.advance();
        Ok(Node::branch(NodeKind::ArrayLiteral, elements))
    }

    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftCurly, "'{'")?;
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !p.test(TokenKind::RightCurly) {
                properties.push(p.parse_object_property()?);
                if !p.test(TokenKind::RightCurly) {
                    p.expect(TokenKind::Comma, "','")?;
                }
            }
            Ok(properties)
        })?;
        self.advance();
        Ok(Node::branch(NodeKind::ObjectLiteral, properties))
    }

    fn parse_object_property(&mut self) -> ParseResult<Node> {
        if self.accept(TokenKind::Ellipsis) {
            return Ok(Node::branch(
                NodeKind::Spread,
                vec![self.parse_assignment()?],
            ));
        }
        let (label, flags) = self.parse_method_prefix();
        let (key, identifier) = self.parse_property_key()?;

        if label != "method" || flags != NodeFlags::NONE || self.test(TokenKind::LeftParen) {
            let params = self.parse_parameter_list()?;
            let body = self.parse_function_body()?;
            return Ok(
                Node::new(NodeKind::ObjectMethod, label, vec![key, params, body]).with_flags(flags),
            );
        }
        if self.accept(TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(Node::branch(NodeKind::Property, vec![key, value]));
        }
        if !identifier {
            return Err(self.unexpected(vec!["':'"]));
        }
        let mut value = Node::name(key.value.clone());
        if self.accept(TokenKind::Equal) {
            let default = self.parse_assignment()?;
            value = Node::branch(NodeKind::AssignmentPattern, vec![value, default]);
        }
        Ok(Node::branch(NodeKind::Property, vec![key, value]).with_flags(NodeFlags::SHORTHAND))
    }

    /// `async`、`*`、`get`、`set` 前缀；返回方法种类与修饰位
    fn parse_method_prefix(&mut self) -> (&'static str, NodeFlags) {
        let mut flags = NodeFlags::NONE;
        if self.test_name("async")
            && !is_property_end(self.peek_nth(1).kind)
            && self.raw_after_peek().kind != TokenKind::Newline
        {
            self.advance();
            flags = flags | NodeFlags::ASYNC;
        }
        if self.accept(TokenKind::Star) {
            flags = flags | NodeFlags::GENERATOR;
        }
        let mut label = "method";
        if flags == NodeFlags::NONE && !is_property_end(self.peek_nth(1).kind) {
            if self.test_name("get") {
                label = "get";
            } else if self.test_name("set") {
                label = "set";
            }
            if label != "method" {
                self.advance();
            }
        }
        (label, flags)
    }

    /// 属性名；第二个返回值表示是否为可简写的标识符
    fn parse_property_key(&mut self) -> ParseResult<(Node, bool)> {
        if self.accept(TokenKind::LeftBracket) {
            let expression = self.allow_in(|p| p.parse_assignment())?;
            self.expect(TokenKind::RightBracket, "']'")?;
            return Ok((Node::branch(NodeKind::ComputedKey, vec![expression]), false));
        }
        let token = self.peek();
        if token.is_word() || matches!(token.kind, TokenKind::String | TokenKind::Number) {
            self.advance();
            let identifier = token.kind == TokenKind::Name && !token.lexeme.starts_with('#');
            return Ok((Node::leaf(NodeKind::PropertyName, token.lexeme.clone()), identifier));
        }
        Err(self.unexpected(vec!["property name"]))
    }

    // ===== 函数与类 =====

    pub(crate) fn parse_function(
        &mut self,
        mut flags: NodeFlags,
        style: DefinitionStyle,
    ) -> ParseResult<Node> {
        self.expect(TokenKind::Function, "'function'")?;
        if self.accept(TokenKind::Star) {
            flags = flags | NodeFlags::GENERATOR;
        }
        let name = if self.test(TokenKind::Name) {
            self.advance().lexeme.clone()
        } else if style == DefinitionStyle::Declaration {
            return Err(self.error_here(ParserErrorKind::UnnamedFunction));
        } else {
            String::new()
        };
        let params = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;
        let kind = match style {
            DefinitionStyle::Expression => NodeKind::FunctionExpression,
            _ if name.is_empty() => NodeKind::FunctionExpression,
            _ => NodeKind::FunctionDeclaration,
        };
        Ok(Node::new(kind, name, vec![params, body]).with_flags(flags))
    }

    /// `( 参数, ... )`
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let params = self.allow_in(|p| {
            let mut params = Vec::new();
            while !p.test(TokenKind::RightParen) {
                if p.accept(TokenKind::Ellipsis) {
                    let target = p.parse_binding_target()?;
                    params.push(Node::branch(NodeKind::Rest, vec![target]).with_flags(NodeFlags::REST));
                } else {
                    params.push(p.parse_binding_element()?);
                }
                if !p.test(TokenKind::RightParen) {
                    p.expect(TokenKind::Comma, "','")?;
                }
            }
            Ok(params)
        })?;
        self.advance();
        Ok(Node::branch(NodeKind::FunctionParameters, params))
    }

    pub(crate) fn parse_class(&mut self, style: DefinitionStyle) -> ParseResult<Node> {
        self.expect(TokenKind::Class, "'class'")?;
        let name = if self.test(TokenKind::Name) {
            self.advance().lexeme.clone()
        } else if style == DefinitionStyle::Declaration {
            return Err(self.unexpected(vec!["class name"]));
        } else {
            String::new()
        };
        let heritage = if self.accept(TokenKind::Extends) {
            self.parse_call_member()?
        } else {
            Node::empty()
        };
        let body = self.parse_class_body()?;
        let kind = match style {
            DefinitionStyle::Expression => NodeKind::ClassExpression,
            _ if name.is_empty() => NodeKind::ClassExpression,
            _ => NodeKind::ClassDeclaration,
        };
        Ok(Node::new(kind, name, vec![heritage, body]))
    }

    fn parse_class_body(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftCurly, "'{'")?;
        let mut members = Vec::new();
        while !self.accept(TokenKind::RightCurly) {
            if self.test(TokenKind::Eof) {
                return Err(self.unexpected(vec!["'}'"]));
            }
            if self.accept(TokenKind::Semicolon) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        Ok(Node::branch(NodeKind::ClassBody, members))
    }

    fn parse_class_member(&mut self) -> ParseResult<Node> {
        let mut static_flag = NodeFlags::NONE;
        if self.test_name("static") && !is_property_end(self.peek_nth(1).kind) {
            self.advance();
            if self.test(TokenKind::LeftCurly) {
                let block = self.parse_function_body()?;
                return Ok(Node::branch(NodeKind::StaticBlock, vec![block]));
            }
            static_flag = NodeFlags::STATIC;
        }
        let (label, flags) = self.parse_method_prefix();
        let (key, _) = self.parse_property_key()?;

        if label != "method" || flags != NodeFlags::NONE || self.test(TokenKind::LeftParen) {
            let params = self.parse_parameter_list()?;
            let body = self.parse_function_body()?;
            return Ok(
                Node::new(NodeKind::ClassMethod, label, vec![key, params, body])
                    .with_flags(flags | static_flag),
            );
        }
        let init = if self.accept(TokenKind::Equal) {
            self.allow_in(|p| p.parse_assignment())?
        } else {
            Node::empty()
        };
        self.consume_terminator()?;
        Ok(Node::branch(NodeKind::ClassField, vec![key, init]).with_flags(static_flag))
    }

    // ===== 绑定模式 =====

    /// 名字、数组模式或对象模式
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<Node> {
        match self.kind() {
            TokenKind::Name => Ok(Node::name(self.advance().lexeme.clone())),
            TokenKind::LeftBracket => self.parse_array_pattern(),
            TokenKind::LeftCurly => self.parse_object_pattern(),
            _ => Err(self.unexpected(vec!["binding name"])),
        }
    }

    /// 绑定目标，可带默认值
    fn parse_binding_element(&mut self) -> ParseResult<Node> {
        let target = self.parse_binding_target()?;
        if !self.accept(TokenKind::Equal) {
            return Ok(target);
        }
        let default = self.allow_in(|p| p.parse_assignment())?;
        Ok(Node::branch(
            NodeKind::AssignmentPattern,
            vec![target, default],
        ))
    }

    fn parse_array_pattern(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        let mut elements = Vec::new();
        while !self.test(TokenKind::RightBracket) {
            if self.accept(TokenKind::Comma) {
                elements.push(Node::empty());
                continue;
            }
            if self.accept(TokenKind::Ellipsis) {
                let target = self.parse_binding_target()?;
                elements.push(Node::branch(NodeKind::Rest, vec![target]).with_flags(NodeFlags::REST));
            } else {
                elements.push(self.parse_binding_element()?);
            }
            if !self.test(TokenKind::RightBracket) {
                self.expect(TokenKind::Comma, "','")?;
            }
        }
        self.advance();
        Ok(Node::branch(NodeKind::ArrayPattern, elements))
    }

    fn parse_object_pattern(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftCurly, "'{'")?;
        let mut properties = Vec::new();
        while !self.test(TokenKind::RightCurly) {
            if self.accept(TokenKind::Ellipsis) {
                let target = self.parse_binding_target()?;
                properties.push(Node::branch(NodeKind::Rest, vec![target]).with_flags(NodeFlags::REST));
            } else {
                let (key, identifier) = self.parse_property_key()?;
                let property = if self.accept(TokenKind::Colon) {
                    let value = self.parse_binding_element()?;
                    Node::branch(NodeKind::Property, vec![key, value])
                } else if identifier {
                    let mut value = Node::name(key.value.clone());
                    if self.accept(TokenKind::Equal) {
                        let default = self.allow_in(|p| p.parse_assignment())?;
                        value = Node::branch(NodeKind::AssignmentPattern, vec![value, default]);
                    }
                    Node::branch(NodeKind::Property, vec![key, value])
                        .with_flags(NodeFlags::SHORTHAND)
                } else {
                    return Err(self.unexpected(vec!["':'"]));
                };
                properties.push(property);
            }
            if !self.test(TokenKind::RightCurly) {
                self.expect(TokenKind::Comma, "','")?;
            }
        }
        self.advance();
        Ok(Node::branch(NodeKind::ObjectPattern, properties))
    }
}

/// 弹出栈顶运算符和两个操作数，压回 Binary 节点
fn reduce(operands: &mut Vec<Node>, operators: &mut Vec<(String, u8)>) {
    let (Some((op, _)), Some(right), Some(left)) = (operators.pop(), operands.pop(), operands.pop())
    else {
        return;
    };
    operands.push(Node::new(NodeKind::Binary, op, vec![left, right]));
}
