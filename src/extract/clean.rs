// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Second extraction phase: normalizing a captured block into Gherkin text.
//!
//! Cleaning is a fixed sequence of named [`Pass`]es. The order matters: tabs
//! must be expanded before leading blanks are stripped, and leading blanks
//! must be stripped before empty lines are collapsed. The whole sequence is
//! idempotent.

use itertools::Itertools as _;

/// Single cleaning pass: a pure text-to-text function.
pub type Pass = fn(&str) -> String;

/// Number of spaces a tab is expanded to.
pub const TAB_WIDTH: usize = 4;

/// All the cleaning [`Pass`]es, in the order they're applied.
pub const PASSES: [(&str, Pass); 4] = [
    ("comment_token", comment_token),
    ("tabs", tabs),
    ("blank_at_line_start", blank_at_line_start),
    ("empty_lines", empty_lines),
];

/// Applies all the [`PASSES`] to the given `text`.
#[must_use]
pub fn clean(text: &str) -> String {
    PASSES.iter().fold(text.to_owned(), |text, (name, pass)| {
        let cleaned = pass(&text);
        tracing::trace!(pass = *name, before = %text, after = %cleaned);
        cleaned
    })
}

/// Strips `//` comment tokens (including `///` and `//!` doc comment ones)
/// from line starts, keeping the whitespace following them.
#[must_use]
pub fn comment_token(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let mut rest = line;
            while let Some(after) =
                rest.trim_start_matches([' ', '\t']).strip_prefix("//")
            {
                rest = after.strip_prefix(['/', '!']).unwrap_or(after);
            }
            rest
        })
        .join("\n")
}

/// Strips a single `#` comment token from line starts, keeping the
/// whitespace following it.
///
/// Not part of the [`PASSES`]: `#` starts a Gherkin comment as well, so this
/// only applies to blocks whose start marker follows a `#`.
#[must_use]
pub fn hash_comment_token(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.trim_start_matches([' ', '\t'])
                .strip_prefix('#')
                .unwrap_or(line)
        })
        .join("\n")
}

/// Expands every tab to [`TAB_WIDTH`] spaces.
#[must_use]
pub fn tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Strips the space separating a comment token from the text, so after
/// [`comment_token()`] a `// Scenario:` line starts right at `Scenario:`.
///
/// Unlike stripping one space from every line, only lines indented by a
/// single space lose it. Deeper indented lines (`//   Given x`) keep one
/// extra space, which Gherkin ignores, and in exchange a second run of the
/// pass never eats into real indentation.
#[must_use]
pub fn blank_at_line_start(text: &str) -> String {
    text.split('\n')
        .map(|line| match line.strip_prefix(' ') {
            Some(rest)
                if !rest.is_empty() && !rest.starts_with([' ', '\t']) =>
            {
                rest
            }
            _ => line,
        })
        .join("\n")
}

/// Collapses runs of line breaks (with blank lines in between) into a single
/// one, normalizing `\r\n` line endings.
///
/// The result is either empty or ends with exactly one `\n`.
#[must_use]
pub fn empty_lines(text: &str) -> String {
    let lines = text
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>();
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_hash_tokens_once() {
        let cleaned = clean(&hash_comment_token(
            "    # Scenario:\n    #   Given x\n    # # note\n    #",
        ));

        assert_eq!(cleaned, "Scenario:\n   Given x\n# note\n");
    }

    const GO_BLOCK: &str = "// Scenario:\n\
                            //   Given a thing\n\
                            //\n\
                            //\tWhen it happens\n\
                            /// Then it passes\n\
                            // ";

    #[test]
    fn strips_comment_tokens() {
        assert_eq!(comment_token("// a\n  //  b\n//c"), " a\n  b\nc");
        assert_eq!(comment_token("/// doc\n//! inner"), " doc\n inner");
        assert_eq!(comment_token("// // twice"), " twice");
    }

    #[test]
    fn keeps_comment_tokens_inside_lines() {
        assert_eq!(
            comment_token("Given http://example.com"),
            "Given http://example.com",
        );
    }

    #[test]
    fn expands_tabs() {
        assert_eq!(tabs("\tGiven\t1"), "    Given    1");
    }

    #[test]
    fn strips_exactly_one_blank() {
        assert_eq!(
            blank_at_line_start(" Scenario:\n   Given\n \nx"),
            "Scenario:\n   Given\n \nx",
        );
    }

    #[test]
    fn collapses_empty_lines() {
        assert_eq!(empty_lines("\n\na\n\n  \nb\r\n\n"), "a\nb\n");
        assert_eq!(empty_lines(" \n\n"), "");
    }

    #[test]
    fn cleans_go_comment_block() {
        assert_eq!(
            clean(GO_BLOCK),
            "Scenario:\n   Given a thing\n    When it happens\nThen it passes\n",
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        for text in [
            GO_BLOCK,
            "Scenario:\n  Given a thing\n  When it happens\n  Then it passes\n",
            "\t// @tag\n\t// Feature: f\n\t//\n\t//   Scenario: s\n\t//     * x\n",
            "# comment\n\n\n  Scenario: a\r\n    Given b\r\n",
            "// // nested\n //  odd\n",
        ] {
            let once = clean(text);
            assert_eq!(clean(&once), once, "{text:?}");
        }
    }
}
