// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures.
//!
//! The fixture profile used across the lexer and parser tests: ASCII
//! operators with pairing, a couple of keywords, the standard escape
//! table, and a small Pratt table with the usual arithmetic precedence
//! ladder.

use std::io::Cursor;
use std::rc::Rc;

use crate::ast::Statement;
use crate::error::ErrorKind;
use crate::lex::Lexer;
use crate::location::{FilePos, Location};
use crate::options::Options;
use crate::parse::{
    ExprFirst, ParseEntry, Parser, infix, infix_right, literal, prefix, variable,
};
use crate::profile::Profile;
use crate::token::{Symbol, Token};

/// A location in the fixture file named `file`.
pub(crate) fn loc(bline: u32, bcol: u32, eline: u32, ecol: u32) -> Location {
    Location {
        file: "file".into(),
        begin: FilePos::new(bline, bcol),
        end: FilePos::new(eline, ecol),
    }
}

/// A null denotation for parenthesized grouping.
fn grouping() -> ExprFirst {
    Rc::new(|p, _tok, _| {
        let inner = p.expression(0)?;
        match p.next_token() {
            Some(tok) if tok.sym.name == ")" => Ok(inner),
            Some(tok) => {
                p.push_token(tok);
                Err(ErrorKind::Unexpected)
            }
            None => Err(ErrorKind::Unexpected),
        }
    })
}

/// The fixture profile.
pub(crate) fn test_profile() -> Profile {
    let mut profile = Profile::default();

    profile.keywords.add(Symbol::new("if"));
    profile.keywords.add(Symbol::new("else"));

    for op in [
        "+", "-", "*", "**", "/", "<", "<=", ">", ">=", "==", "!=", "!", "=", "$$$", ".", ",",
    ] {
        profile.operators.add(Symbol::new(op));
    }
    profile.operators.add(Symbol::opener("(", ")"));
    profile.operators.add(Symbol::closer(")", "("));
    profile.operators.add(Symbol::opener("[", "]"));
    profile.operators.add(Symbol::closer("]", "["));

    let table = &mut profile.parse_table;
    for name in ["<Int>", "<Float>", "<String>", "<Bytes>"] {
        table.set(
            name,
            ParseEntry {
                lbp: 0,
                expr_first: Some(literal()),
                ..ParseEntry::default()
            },
        );
    }
    table.set(
        "<Ident>",
        ParseEntry {
            lbp: 0,
            expr_first: Some(variable()),
            ..ParseEntry::default()
        },
    );
    table.set(
        "+",
        ParseEntry {
            lbp: 50,
            expr_next: Some(infix("+", 50)),
            ..ParseEntry::default()
        },
    );
    table.set(
        "-",
        ParseEntry {
            lbp: 50,
            expr_first: Some(prefix("-", 70)),
            expr_next: Some(infix("-", 50)),
            ..ParseEntry::default()
        },
    );
    table.set(
        "*",
        ParseEntry {
            lbp: 60,
            expr_next: Some(infix("*", 60)),
            ..ParseEntry::default()
        },
    );
    table.set(
        "/",
        ParseEntry {
            lbp: 60,
            expr_next: Some(infix("/", 60)),
            ..ParseEntry::default()
        },
    );
    table.set(
        "**",
        ParseEntry {
            lbp: 80,
            expr_next: Some(infix_right("**", 80)),
            ..ParseEntry::default()
        },
    );
    table.set(
        "(",
        ParseEntry {
            lbp: 0,
            expr_first: Some(grouping()),
            ..ParseEntry::default()
        },
    );
    table.set(
        "if",
        ParseEntry {
            lbp: 0,
            statement: Some(Rc::new(|p, _tok| {
                Ok(Statement::Expression(p.expression(0)?))
            })),
            ..ParseEntry::default()
        },
    );

    profile
}

/// A lexer over fixture source with the fixture profile.
pub(crate) fn lexer_for(src: &str) -> Lexer {
    lexer_for_with(&test_profile(), src)
}

/// A lexer over fixture source with a caller-supplied profile.
pub(crate) fn lexer_for_with(profile: &Profile, src: &str) -> Lexer {
    Options::new(Box::new(Cursor::new(src.as_bytes().to_vec())))
        .filename("file")
        .encoding("utf-8")
        .profile(profile)
        .lex()
        .expect("fixture lexer construction")
}

/// Lexes fixture source to completion.
pub(crate) fn lex_all(src: &str) -> Vec<Token> {
    let mut lexer = lexer_for(src);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next() {
        tokens.push(tok);
    }
    tokens
}

/// Lexes fixture source to completion with a caller-supplied profile.
pub(crate) fn lex_all_with(profile: &Profile, src: &str) -> Vec<Token> {
    let mut lexer = lexer_for_with(profile, src);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next() {
        tokens.push(tok);
    }
    tokens
}

/// A parser over fixture source with the fixture profile.
pub(crate) fn parser_for(src: &str) -> Parser {
    parser_for_with(&test_profile(), src)
}

/// A parser over fixture source with a caller-supplied profile.
pub(crate) fn parser_for_with(profile: &Profile, src: &str) -> Parser {
    Parser::new(lexer_for_with(profile, src))
}
