// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree definitions for Rill expressions.
//!
//! Expression nodes are a closed set of tagged variants. Every node
//! carries the [`Location`] of the source it was parsed from, joined from
//! its constituent tokens, so diagnostics and tooling can always point
//! back at real source.
//!
//! For rendering and analysis the tree exposes [`Expression::children`]
//! (fixed order: callee, positional arguments, then keyword arguments) and
//! a depth-first [`Expression::walk`] iterator that reports each node's
//! depth and whether it is the last child of its parent.

use std::fmt;

use ecow::EcoString;

use crate::location::Location;
use crate::token::TokenValue;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal constant.
    Constant(Constant),
    /// A reference to a variable.
    Variable(Variable),
    /// A unary operator applied to an expression.
    Unary(Unary),
    /// A binary operator applied to two expressions.
    Binary(Binary),
    /// An attribute lookup on an expression.
    Attribute(Attribute),
    /// A call of a function expression.
    Call(Call),
}

/// A constant expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    /// Location of the expression.
    pub loc: Location,
    /// Value of the constant.
    pub value: TokenValue,
}

/// A reference to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Location of the expression.
    pub loc: Location,
    /// Name of the variable.
    pub name: EcoString,
}

/// The action of a unary operator on another expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// Location of the expression.
    pub loc: Location,
    /// The operation to perform.
    pub op: EcoString,
    /// The expression node acted upon.
    pub node: Box<Expression>,
}

/// The action of a binary operator on two expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// Location of the expression.
    pub loc: Location,
    /// The operation to perform.
    pub op: EcoString,
    /// The left-hand expression.
    pub left: Box<Expression>,
    /// The right-hand expression.
    pub right: Box<Expression>,
}

/// An attribute lookup, the action of the `.` operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Location of the expression.
    pub loc: Location,
    /// The expression to seek the attribute of.
    pub expr: Box<Expression>,
    /// The name of the attribute to seek.
    pub attr: EcoString,
}

/// A call to a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Location of the expression.
    pub loc: Location,
    /// The function to be called.
    pub func: Box<Expression>,
    /// The positional arguments, in order.
    pub args: Vec<Expression>,
    /// The keyword arguments.
    pub kwargs: Vec<(EcoString, Expression)>,
}

impl Expression {
    /// The location of the expression.
    #[must_use]
    pub fn loc(&self) -> &Location {
        match self {
            Self::Constant(n) => &n.loc,
            Self::Variable(n) => &n.loc,
            Self::Unary(n) => &n.loc,
            Self::Binary(n) => &n.loc,
            Self::Attribute(n) => &n.loc,
            Self::Call(n) => &n.loc,
        }
    }

    /// The child expressions, in fixed order. For calls: the callee, the
    /// positional arguments in order, then the keyword arguments.
    #[must_use]
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Constant(_) | Self::Variable(_) => Vec::new(),
            Self::Unary(n) => vec![&n.node],
            Self::Binary(n) => vec![&n.left, &n.right],
            Self::Attribute(n) => vec![&n.expr],
            Self::Call(n) => {
                let mut children = Vec::with_capacity(1 + n.args.len() + n.kwargs.len());
                children.push(&*n.func);
                children.extend(n.args.iter());
                children.extend(n.kwargs.iter().map(|(_, arg)| arg));
                children
            }
        }
    }

    /// Walks the tree depth-first, yielding `(depth, node, is_last)` for
    /// each node, where `is_last` reports whether the node is the last
    /// child of its parent. The root is depth 0 and last.
    pub fn walk(&self) -> impl Iterator<Item = (usize, &Expression, bool)> {
        Walk {
            stack: vec![(0, self, true)],
        }
    }
}

/// Depth-first pre-order traversal state.
struct Walk<'a> {
    stack: Vec<(usize, &'a Expression, bool)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Expression, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node, is_last) = self.stack.pop()?;

        let children = node.children();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate().rev() {
            self.stack.push((depth + 1, child, i == count - 1));
        }

        Some((depth, node, is_last))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(n) => write!(f, "{}: {}", n.loc, n.value),
            Self::Variable(n) => write!(f, "{}: <{}>", n.loc, n.name),
            Self::Unary(n) => write!(f, "{}: {}", n.loc, n.op),
            Self::Binary(n) => write!(f, "{}: {}", n.loc, n.op),
            Self::Attribute(n) => write!(f, "{}: .{}", n.loc, n.attr),
            Self::Call(n) => write!(f, "{}: Call", n.loc),
        }
    }
}

/// A statement node.
///
/// Statement parsing is a stub in the core: the parse table can dispatch
/// statement entries, but the only structure the core itself builds is an
/// expression used as a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression in statement position.
    Expression(Expression),
}

impl Statement {
    /// The location of the statement.
    #[must_use]
    pub fn loc(&self) -> &Location {
        match self {
            Self::Expression(e) => e.loc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::loc;
    use num_bigint::BigInt;

    fn constant(bc: u32, v: i64) -> Expression {
        Expression::Constant(Constant {
            loc: loc(1, bc, 1, bc + 1),
            value: TokenValue::Int(BigInt::from(v)),
        })
    }

    fn sample_tree() -> Expression {
        // (1 + 2) * -3
        Expression::Binary(Binary {
            loc: loc(1, 1, 1, 13),
            op: "*".into(),
            left: Box::new(Expression::Binary(Binary {
                loc: loc(1, 2, 1, 7),
                op: "+".into(),
                left: Box::new(constant(2, 1)),
                right: Box::new(constant(6, 2)),
            })),
            right: Box::new(Expression::Unary(Unary {
                loc: loc(1, 11, 1, 13),
                op: "-".into(),
                node: Box::new(constant(12, 3)),
            })),
        })
    }

    #[test]
    fn children_order() {
        let tree = sample_tree();
        let children = tree.children();
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Expression::Binary(_)));
        assert!(matches!(children[1], Expression::Unary(_)));

        assert!(constant(1, 1).children().is_empty());
    }

    #[test]
    fn call_children_order() {
        let call = Expression::Call(Call {
            loc: loc(1, 1, 1, 20),
            func: Box::new(Expression::Variable(Variable {
                loc: loc(1, 1, 1, 2),
                name: "f".into(),
            })),
            args: vec![constant(3, 1), constant(6, 2)],
            kwargs: vec![("x".into(), constant(9, 3))],
        });

        let children = call.children();
        assert_eq!(children.len(), 4);
        assert!(matches!(children[0], Expression::Variable(_)));
        assert_eq!(children[1], &constant(3, 1));
        assert_eq!(children[2], &constant(6, 2));
        assert_eq!(children[3], &constant(9, 3));
    }

    #[test]
    fn walk_depth_first_with_last_flags() {
        let tree = sample_tree();
        let visited: Vec<(usize, String, bool)> = tree
            .walk()
            .map(|(depth, node, last)| {
                let label = match node {
                    Expression::Binary(b) => b.op.to_string(),
                    Expression::Unary(u) => u.op.to_string(),
                    Expression::Constant(c) => c.value.to_string(),
                    _ => "?".into(),
                };
                (depth, label, last)
            })
            .collect();

        assert_eq!(
            visited,
            vec![
                (0, "*".to_string(), true),
                (1, "+".to_string(), false),
                (2, "1".to_string(), false),
                (2, "2".to_string(), true),
                (1, "-".to_string(), true),
                (2, "3".to_string(), true),
            ]
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(constant(1, 7).to_string(), "file:1:1: 7");

        let var = Expression::Variable(Variable {
            loc: loc(1, 1, 1, 5),
            name: "spam".into(),
        });
        assert_eq!(var.to_string(), "file:1:1-5: <spam>");

        let attr = Expression::Attribute(Attribute {
            loc: loc(1, 1, 1, 7),
            expr: Box::new(constant(1, 1)),
            attr: "eggs".into(),
        });
        assert_eq!(attr.to_string(), "file:1:1-7: .eggs");

        assert_eq!(sample_tree().to_string(), "file:1:1-13: *");
    }

    #[test]
    fn statement_wraps_expression() {
        let stmt = Statement::Expression(constant(1, 1));
        assert_eq!(stmt.loc(), &loc(1, 1, 1, 2));
    }
}
