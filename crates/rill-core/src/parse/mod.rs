// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Top-down operator precedence (Pratt) parsing.
//!
//! The parser pulls tokens from a [`Lexer`] and drives them through the
//! profile's [`ParseTable`]: the first token of a sub-expression goes to
//! its null denotation, subsequent tokens to their left denotations, and
//! binding powers decide how far each recursion reaches. The grammar
//! lives entirely in the table, so the parser itself is a small loop.
//!
//! Errors unwind the current [`Parser::expression`] call with the
//! offending token pushed back onto the lexer, leaving the stream at the
//! position the caller saw; the caller decides whether to retry or abort.

mod table;

use std::rc::Rc;

pub use table::{
    ExprFirst, ExprNext, ParseEntry, ParseTable, StatementFn, infix, infix_right, literal, prefix,
    variable,
};

use crate::ast::{Expression, Statement};
use crate::error::ErrorKind;
use crate::lex::Lexer;
use crate::options::Config;
use crate::token::Token;

/// A Pratt parser over a token stream.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    cfg: Rc<Config>,
}

impl Parser {
    /// Creates a parser over a prepared lexer.
    #[must_use]
    pub fn new(lexer: Lexer) -> Self {
        let cfg = Rc::clone(lexer.config());
        Self { lexer, cfg }
    }

    /// Returns the shared parse configuration.
    #[must_use]
    pub fn config(&self) -> &Rc<Config> {
        &self.cfg
    }

    /// Retrieves the next token from the lexer. Exposed for denotations
    /// that consume structural tokens (a grouping close, an argument
    /// separator).
    pub fn next_token(&mut self) -> Option<Token> {
        self.lexer.next()
    }

    /// Pushes a token back onto the lexer.
    pub fn push_token(&mut self, tok: Token) {
        self.lexer.push(tok);
    }

    /// Parses a single expression. Does not necessarily consume the
    /// entire input: parsing stops at the first token whose binding power
    /// is no greater than `rbp`, and that token is pushed back. An
    /// initial call should pass 0; denotations pass their own binding
    /// powers to bound recursion.
    pub fn expression(&mut self, rbp: i32) -> Result<Expression, ErrorKind> {
        let Some(tok) = self.lexer.next() else {
            return Err(ErrorKind::Unexpected);
        };

        let mut expr = match self.expr_first(&tok) {
            Ok(expr) => expr,
            Err(err) => {
                self.lexer.push(tok);
                return Err(err);
            }
        };

        loop {
            let Some(tok) = self.lexer.next() else {
                break;
            };
            if self.binding_power(&tok) <= rbp {
                self.lexer.push(tok);
                break;
            }

            expr = match self.expr_next(expr, &tok) {
                Ok(expr) => expr,
                Err(err) => {
                    self.lexer.push(tok);
                    return Err(err);
                }
            };
        }

        Ok(expr)
    }

    /// Parses a single statement by dispatching the statement denotation
    /// of its first token.
    pub fn statement(&mut self) -> Result<Statement, ErrorKind> {
        let Some(tok) = self.lexer.next() else {
            return Err(ErrorKind::Unexpected);
        };

        let Some(handler) = self
            .entry(&tok.sym.name)
            .and_then(|entry| entry.statement.clone())
        else {
            self.lexer.push(tok);
            return Err(ErrorKind::Unexpected);
        };

        match handler(self, &tok) {
            Ok(stmt) => Ok(stmt),
            Err(err) => {
                self.lexer.push(tok);
                Err(err)
            }
        }
    }

    /// The left binding power of a token per the parse table.
    #[must_use]
    pub fn binding_power(&self, tok: &Token) -> i32 {
        self.cfg.profile.parse_table.binding_power(tok)
    }

    /// Dispatches the null denotation of a token.
    fn expr_first(&mut self, tok: &Token) -> Result<Expression, ErrorKind> {
        let Some(entry) = self.entry(&tok.sym.name) else {
            return Err(ErrorKind::Unexpected);
        };
        let Some(handler) = entry.expr_first.clone() else {
            return Err(ErrorKind::Unexpected);
        };
        handler(self, tok, entry.lbp)
    }

    /// Dispatches the left denotation of a token.
    fn expr_next(&mut self, left: Expression, tok: &Token) -> Result<Expression, ErrorKind> {
        let Some(entry) = self.entry(&tok.sym.name) else {
            return Err(ErrorKind::Unexpected);
        };
        let Some(handler) = entry.expr_next.clone() else {
            return Err(ErrorKind::Unexpected);
        };
        handler(self, left, tok, entry.lbp)
    }

    /// A clone of the table entry for a symbol name. Cloning detaches the
    /// borrow from the shared configuration so denotations can re-enter
    /// the parser.
    fn entry(&self, name: &str) -> Option<ParseEntry> {
        self.cfg.profile.parse_table.get(name).cloned()
    }
}
