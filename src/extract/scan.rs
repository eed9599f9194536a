// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! First extraction phase: locating marker-bounded blocks in raw text.
//!
//! A block looks like this:
//! ```text
//! // [gherkin] anything up to the end of line is ignored
//! // Scenario:
//! //   Given a thing
//! // [end]
//! func Test_my_case(t *testing.T) {
//! ```
//! Markers are matched case-insensitively. The line following the end marker
//! may open a function, whose name becomes the block's identifier.

use lazy_regex::regex;
use smart_default::SmartDefault;

/// Start and end markers bounding an embedded block.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Markers {
    /// Marker opening a block.
    #[default("[gherkin]".into())]
    pub start: String,

    /// Marker closing a block.
    #[default("[end]".into())]
    pub end: String,
}

/// Raw text of one embedded block along with its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceBlock {
    /// 1-based line of the start marker.
    pub line: usize,

    /// Text between the start marker line and the end marker, as is.
    pub text: String,

    /// Name of the function opened right after the end marker, if any.
    pub identifier: Option<String>,

    /// Text preceding the start marker on its line, trimmed. Usually the
    /// comment token the block is written with.
    pub prefix: String,
}

/// Single marker occurrence found by [`scan()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Scanned {
    /// Properly terminated block.
    Block(SourceBlock),

    /// Start marker never followed by an end marker.
    Unterminated {
        /// 1-based line of the start marker.
        line: usize,

        /// Beginning of the text following the start marker.
        capture: String,
    },
}

/// Finds all the blocks bounded by the given [`Markers`], in source order.
///
/// An unterminated block ends the scan, as everything after its start marker
/// belongs to it.
#[must_use]
pub fn scan(content: &str, markers: &Markers) -> Vec<Scanned> {
    // ASCII lowercasing keeps byte offsets intact, so positions found in
    // `haystack` are valid in `content` as well.
    let haystack = content.to_ascii_lowercase();
    let start = markers.start.to_ascii_lowercase();
    let end = markers.end.to_ascii_lowercase();

    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(offset) = haystack[pos..].find(&start) {
        let at = pos + offset;
        let line = line_of(content, at);
        let line_start = content[..at].rfind('\n').map_or(0, |nl| nl + 1);

        let Some(body_start) = next_line(content, at) else {
            found.push(Scanned::Unterminated { line, capture: String::new() });
            break;
        };
        let Some(len) = haystack[body_start..].find(&end) else {
            found.push(Scanned::Unterminated {
                line,
                capture: preview(&content[body_start..]),
            });
            break;
        };

        let body_end = body_start + len;
        let after_end = body_end + end.len();
        let identifier = next_line(content, after_end)
            .and_then(|l| identifier(&content[l..]));

        found.push(Scanned::Block(SourceBlock {
            line,
            text: content[body_start..body_end].to_owned(),
            identifier,
            prefix: content[line_start..at].trim().to_owned(),
        }));
        pos = after_end;
    }
    found
}

/// Extracts the name of a function opened at the very beginning of `text`.
///
/// Understands Go (`func Name(`, `func (r *T) Name(`), Rust (`pub async fn
/// name(`, `fn name<T>(`) and Python (`def name(`, `async def name(`).
#[must_use]
pub fn identifier(text: &str) -> Option<String> {
    let first = text.lines().next()?;
    regex!(
        r"^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?(?:async[ \t]+)?(?:func|fn|def)[ \t]+(?:\([^)]*\)[ \t]*)?([A-Za-z_][A-Za-z0-9_]*)[ \t]*[(<\[]"
    )
    .captures(first)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_owned())
}

/// Shortens the given text to its first non-empty line for diagnostics.
#[must_use]
pub(crate) fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 40;

    let line = text
        .lines()
        .map(|l| l.trim_start_matches(['/', '#', '*', ' ', '\t']).trim_end())
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    if line.chars().count() > MAX_CHARS {
        format!("{}...", line.chars().take(MAX_CHARS).collect::<String>())
    } else {
        line.to_owned()
    }
}

/// Returns the 1-based line number of the `at` byte offset.
fn line_of(content: &str, at: usize) -> usize {
    content.as_bytes()[..at].iter().filter(|b| **b == b'\n').count() + 1
}

/// Returns the byte offset of the line following the one containing `at`.
fn next_line(content: &str, at: usize) -> Option<usize> {
    content[at..].find('\n').map(|nl| at + nl + 1)
}
