//! Expression parsing using Pratt precedence.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{Scanner, Token, TokenKind};
use crate::span::Span;

use super::precedence::{comparison_operator, get_precedence, Precedence};

pub type ExprResult<T> = Result<T, SyntaxError>;

/// Parser for a single expression string.
pub struct ExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl ExprParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Scan and parse a complete expression string.
    pub fn parse_source(source: &str) -> ExprResult<Expr> {
        let tokens = Scanner::new(source).scan_tokens()?;
        ExprParser::new(tokens).parse()
    }

    /// Parse one expression that must consume every token.
    pub fn parse(&mut self) -> ExprResult<Expr> {
        if self.is_at_end() {
            return Err(SyntaxError::unexpected_eof(self.current_span()));
        }

        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(SyntaxError::unexpected_token(
                "end of expression",
                format!("{}", self.peek().kind),
                self.current_span(),
            ));
        }

        Ok(expr)
    }

    fn expression(&mut self) -> ExprResult<Expr> {
        self.parse_precedence(Precedence::Or)
    }

    fn parse_precedence(&mut self, min_precedence: Precedence) -> ExprResult<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.is_at_end() {
            let precedence = get_precedence(&self.peek().kind);
            if precedence == Precedence::None || precedence < min_precedence {
                break;
            }

            left = self.parse_infix(left, precedence)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ExprResult<Expr> {
        let token = self.advance();
        let start_span = token.span;

        match &token.kind {
            TokenKind::IntLiteral(n) => Ok(Expr::new(ExprKind::IntLiteral(*n), start_span)),
            TokenKind::FloatLiteral(n) => Ok(Expr::new(ExprKind::FloatLiteral(*n), start_span)),
            TokenKind::StringLiteral(s) => {
                Ok(Expr::new(ExprKind::StringLiteral(s.clone()), start_span))
            }
            TokenKind::BoolLiteral(b) => Ok(Expr::new(ExprKind::BoolLiteral(*b), start_span)),

            TokenKind::Identifier(name) => {
                if self.match_token(&TokenKind::LeftParen) {
                    self.parse_call(name.clone(), start_span)
                } else if self.match_token(&TokenKind::Dot) {
                    let field = self.expect_identifier()?;
                    let span = start_span.merge(&self.previous_span());
                    Ok(Expr::new(
                        ExprKind::Member {
                            object: name.clone(),
                            field,
                        },
                        span,
                    ))
                } else {
                    Ok(Expr::new(ExprKind::Variable(name.clone()), start_span))
                }
            }

            TokenKind::LeftParen => {
                let expr = self.expression()?;
                self.expect(&TokenKind::RightParen)?;
                let span = start_span.merge(&self.previous_span());
                Ok(Expr::new(ExprKind::Grouping(Box::new(expr)), span))
            }

            TokenKind::Minus => self.unary(UnaryOp::Negate, Precedence::Unary, start_span),
            TokenKind::Plus => self.unary(UnaryOp::Plus, Precedence::Unary, start_span),
            TokenKind::Not => self.unary(UnaryOp::Not, Precedence::Not, start_span),

            TokenKind::Eof => Err(SyntaxError::unexpected_eof(token.span)),

            _ => Err(SyntaxError::unexpected_token(
                "expression",
                format!("{}", token.kind),
                token.span,
            )),
        }
    }

    fn unary(&mut self, operator: UnaryOp, operand_precedence: Precedence, start_span: Span) -> ExprResult<Expr> {
        let operand = self.parse_precedence(operand_precedence)?;
        let span = start_span.merge(&operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_call(&mut self, callee: String, start_span: Span) -> ExprResult<Expr> {
        let mut arguments = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        let span = start_span.merge(&self.previous_span());
        Ok(Expr::new(ExprKind::Call { callee, arguments }, span))
    }

    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> ExprResult<Expr> {
        let token = self.advance();
        let start_span = left.span;

        if let Some(operator) = comparison_operator(&token.kind) {
            return self.comparison(left, operator, precedence);
        }

        match &token.kind {
            TokenKind::Plus => self.binary_expr(left, BinaryOp::Add, precedence),
            TokenKind::Minus => self.binary_expr(left, BinaryOp::Subtract, precedence),
            TokenKind::Star => self.binary_expr(left, BinaryOp::Multiply, precedence),
            TokenKind::Slash => self.binary_expr(left, BinaryOp::Divide, precedence),
            TokenKind::SlashSlash => self.binary_expr(left, BinaryOp::FloorDivide, precedence),
            TokenKind::Percent => self.binary_expr(left, BinaryOp::Modulo, precedence),

            // Right-associative, and the exponent may carry its own sign: 2 ** -1
            TokenKind::StarStar => {
                let right = self.parse_precedence(Precedence::Unary)?;
                let span = start_span.merge(&right.span);
                Ok(Expr::new(
                    ExprKind::Binary {
                        left: Box::new(left),
                        operator: BinaryOp::Power,
                        right: Box::new(right),
                    },
                    span,
                ))
            }

            TokenKind::And => {
                let right = self.parse_precedence(precedence.next())?;
                let span = start_span.merge(&right.span);
                Ok(Expr::new(
                    ExprKind::LogicalAnd {
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }
            TokenKind::Or => {
                let right = self.parse_precedence(precedence.next())?;
                let span = start_span.merge(&right.span);
                Ok(Expr::new(
                    ExprKind::LogicalOr {
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }

            _ => Err(SyntaxError::unexpected_token(
                "operator",
                format!("{}", token.kind),
                token.span,
            )),
        }
    }

    fn binary_expr(&mut self, left: Expr, operator: BinaryOp, precedence: Precedence) -> ExprResult<Expr> {
        let right = self.parse_precedence(precedence.next())?;
        let span = left.span.merge(&right.span);
        Ok(Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
        ))
    }

    /// `a < b` stays a binary node; `a < b < c` becomes one chain.
    fn comparison(&mut self, left: Expr, operator: BinaryOp, precedence: Precedence) -> ExprResult<Expr> {
        let right = self.parse_precedence(precedence.next())?;

        if comparison_operator(&self.peek().kind).is_none() {
            let span = left.span.merge(&right.span);
            return Ok(Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                },
                span,
            ));
        }

        let mut span = left.span.merge(&right.span);
        let mut rest = vec![(operator, right)];
        while let Some(operator) = comparison_operator(&self.peek().kind) {
            self.advance();
            let operand = self.parse_precedence(precedence.next())?;
            span = span.merge(&operand.span);
            rest.push((operator, operand));
        }

        Ok(Expr::new(
            ExprKind::Comparison {
                first: Box::new(left),
                rest,
            },
            span,
        ))
    }

    // ===== Token manipulation =====

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
            self.tokens[self.current - 1].clone()
        } else {
            self.peek().clone()
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            false
        } else {
            std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
        }
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ExprResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.is_at_end() {
            Err(SyntaxError::unexpected_eof(self.current_span()))
        } else {
            Err(SyntaxError::unexpected_token(
                format!("'{}'", kind),
                format!("{}", self.peek().kind),
                self.current_span(),
            ))
        }
    }

    fn expect_identifier(&mut self) -> ExprResult<String> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(SyntaxError::unexpected_token(
                "field name",
                format!("{}", self.peek().kind),
                self.current_span(),
            )),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        self.previous().span
    }
}
