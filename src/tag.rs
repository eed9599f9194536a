// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tag filtering of [`Scenario`]s.
//!
//! Two syntaxes are understood by [`TagFilter`]:
//! - [tag expressions][1]: `not @wip and (@smoke or @slow)`, where `not`
//!   binds tighter than `and`, and `and` tighter than `or`;
//! - the legacy godog-style one: `~@wip && @smoke,@slow`, where `~` negates a
//!   tag, `,` separates alternatives and `&&` separates required groups.
//!
//! [`Scenario`]: gherkin::Scenario
//! [1]: https://cucumber.io/docs/cucumber/api#tag-expressions

use std::{fmt, str::FromStr};

use gherkin::tagexpr::TagOperation;
use sealed::sealed;

use crate::error::ParseError;

/// Extension of a [`TagOperation`] allowing to evaluate it.
#[sealed]
pub trait Ext {
    /// Evaluates this [`TagOperation`] for the given `tags`.
    ///
    /// Tags are compared regardless of their leading `@`.
    #[must_use]
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone;
}

#[sealed]
impl Ext for TagOperation {
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
    {
        match self {
            Self::And(l, r) => l.eval(tags.clone()) & r.eval(tags),
            Self::Or(l, r) => l.eval(tags.clone()) | r.eval(tags),
            Self::Not(t) => !t.eval(tags),
            Self::Tag(t) => {
                let t = bare(t);
                tags.into_iter().any(|tag| bare(tag.as_ref()) == t)
            }
        }
    }
}

/// Filter selecting [`Scenario`]s by their tags.
///
/// An empty expression matches everything.
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Debug, Default)]
pub struct TagFilter {
    expr: String,
    op: Option<TagOperation>,
}

impl TagFilter {
    /// Default expression, excluding work in progress.
    pub const DEFAULT: &'static str = "~@wip";

    /// Checks whether the given `tags` satisfy this [`TagFilter`].
    #[must_use]
    pub fn matches<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
    {
        self.op.as_ref().map_or(true, |op| op.eval(tags))
    }

    /// Returns the expression this [`TagFilter`] was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl FromStr for TagFilter {
    type Err = ParseError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let op = if is_tag_expression(expr) {
            parse_expression(expr).map(Some)
        } else {
            parse_legacy(expr)
        }
        .map_err(|reason| ParseError::TagExpression {
            expr: expr.to_owned(),
            reason,
        })?;

        Ok(Self { expr: expr.to_owned(), op })
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Strips the leading `@` of a tag, if any.
fn bare(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

/// Checks whether the given `expr` uses the [tag expressions][1] syntax.
///
/// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
fn is_tag_expression(expr: &str) -> bool {
    expr.contains(['(', ')'])
        || expr
            .split_whitespace()
            .any(|w| matches!(w, "not" | "and" | "or"))
}

/// Token of a [tag expression][1].
///
/// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token<'e> {
    Open,
    Close,
    Not,
    And,
    Or,
    Tag(&'e str),
}

fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while let Some(c) = rest.chars().next() {
        let len = match c {
            '(' => {
                tokens.push(Token::Open);
                1
            }
            ')' => {
                tokens.push(Token::Close);
                1
            }
            _ => {
                let len = rest
                    .find(|c: char| {
                        c.is_whitespace() || matches!(c, '(' | ')')
                    })
                    .unwrap_or(rest.len());
                tokens.push(match &rest[..len] {
                    "not" => Token::Not,
                    "and" => Token::And,
                    "or" => Token::Or,
                    word => match word.strip_prefix('@') {
                        Some(name) if !name.is_empty() => Token::Tag(name),
                        _ => return Err(format!("`{word}` is not a tag")),
                    },
                });
                len
            }
        };
        rest = rest[len..].trim_start();
    }
    Ok(tokens)
}

/// Parses a [tag expression][1], where `not` binds tighter than `and`, which
/// binds tighter than `or`.
///
/// [1]: https://cucumber.io/docs/cucumber/api#tag-expressions
fn parse_expression(expr: &str) -> Result<TagOperation, String> {
    let tokens = tokenize(expr)?;
    let mut pos = 0;
    let op = parse_or(&tokens, &mut pos)?;
    match tokens.get(pos) {
        None => Ok(op),
        Some(t) => Err(format!("unexpected {t:?} at token {}", pos + 1)),
    }
}

fn parse_or(
    tokens: &[Token<'_>],
    pos: &mut usize,
) -> Result<TagOperation, String> {
    let mut op = parse_and(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::Or) {
        *pos += 1;
        let rhs = parse_and(tokens, pos)?;
        op = TagOperation::Or(Box::new(op), Box::new(rhs));
    }
    Ok(op)
}

fn parse_and(
    tokens: &[Token<'_>],
    pos: &mut usize,
) -> Result<TagOperation, String> {
    let mut op = parse_not(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::And) {
        *pos += 1;
        let rhs = parse_not(tokens, pos)?;
        op = TagOperation::And(Box::new(op), Box::new(rhs));
    }
    Ok(op)
}

fn parse_not(
    tokens: &[Token<'_>],
    pos: &mut usize,
) -> Result<TagOperation, String> {
    let token = tokens.get(*pos).copied();
    *pos += 1;
    match token {
        Some(Token::Not) => {
            Ok(TagOperation::Not(Box::new(parse_not(tokens, pos)?)))
        }
        Some(Token::Tag(name)) => Ok(TagOperation::Tag(name.to_owned())),
        Some(Token::Open) => {
            let op = parse_or(tokens, pos)?;
            if tokens.get(*pos) != Some(&Token::Close) {
                return Err("unbalanced parentheses".to_owned());
            }
            *pos += 1;
            Ok(op)
        }
        Some(t) => Err(format!("unexpected {t:?} at token {}", *pos)),
        None => Err("unexpected end of expression".to_owned()),
    }
}

/// Parses the legacy godog-style tag filter syntax.
fn parse_legacy(expr: &str) -> Result<Option<TagOperation>, String> {
    if expr.trim().is_empty() {
        return Ok(None);
    }

    let term = |raw: &str| -> Result<TagOperation, String> {
        let raw = raw.trim();
        let (negated, tag) = raw
            .strip_prefix('~')
            .map_or((false, raw), |t| (true, t.trim_start()));
        let name = tag
            .strip_prefix('@')
            .filter(|n| !n.is_empty() && !n.contains(char::is_whitespace))
            .ok_or_else(|| format!("`{raw}` is not a tag"))?;

        let op = TagOperation::Tag(name.to_owned());
        Ok(if negated { TagOperation::Not(Box::new(op)) } else { op })
    };

    let mut groups = expr.split("&&").map(|group| -> Result<TagOperation, String> {
        let mut alternatives = group.split(',').map(term);
        let first = alternatives.next().unwrap_or_else(|| term(""))?;
        alternatives.try_fold(first, |acc, t| {
            Ok::<_, String>(TagOperation::Or(Box::new(acc), Box::new(t?)))
        })
    });

    // `split()` always yields at least one element.
    let first =
        groups.next().unwrap_or(Ok(TagOperation::Tag(String::new())))?;
    groups
        .try_fold(first, |acc, g| {
            Ok::<_, String>(TagOperation::And(Box::new(acc), Box::new(g?)))
        })
        .map(Some)
}
