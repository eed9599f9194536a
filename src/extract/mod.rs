// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Extraction of [Gherkin] texts embedded into source files comments.
//!
//! Extraction runs in three phases:
//! 1. [`scan`] locates marker-bounded blocks and captures their raw text and
//!    the name of the function opened right after them;
//! 2. [`clean`] normalizes the raw text into Gherkin;
//! 3. [`provenance`] keeps complete features as is and tags bare scenarios
//!    with the `@file:` and `@test:` tags naming their origin.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod clean;
pub mod provenance;
pub mod scan;

use std::{borrow::Cow, ffi::OsStr, fmt, fs, path::Path};

use crate::error::{ExtractionError, InputError};

#[doc(inline)]
pub use self::scan::{Markers, SourceBlock};

/// Kind of an [`ExtractedText`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextKind {
    /// Complete feature, with its own `Feature:` header.
    Feature,

    /// Bare scenario, tagged with its provenance.
    Scenario,
}

/// Cleaned text of a single embedded block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractedText {
    kind: TextKind,
    text: String,
    file: String,
    identifier: Option<String>,
    index: usize,
}

impl ExtractedText {
    /// Returns the [`TextKind`] of this text.
    #[must_use]
    pub const fn kind(&self) -> TextKind {
        self.kind
    }

    /// Returns the cleaned text itself.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the name of the file this text was extracted from.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the name of the function following this text's block, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns the synthetic URI identifying this text among features.
    ///
    /// It has the `<file>/<stem>.<name>.feature` form, where `<stem>` is the
    /// file name without its extension and `<name>` is the
    /// [`identifier`](Self::identifier) or `block<N>` for the `N`th block of
    /// the file lacking one. The last segment carries the file stem, so
    /// same-named tests of different files get different short names.
    #[must_use]
    pub fn uri(&self) -> String {
        let stem = Path::new(&self.file)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or(&self.file);
        let name = self
            .identifier
            .clone()
            .unwrap_or_else(|| format!("block{}", self.index));
        format!("{}/{stem}.{name}.feature", self.file)
    }

    /// Returns this text in a form parseable as a standalone feature.
    ///
    /// Bare scenarios are wrapped into a synthetic feature named after their
    /// identifier.
    #[must_use]
    pub fn to_feature_source(&self) -> Cow<'_, str> {
        match self.kind {
            TextKind::Feature => Cow::Borrowed(&self.text),
            TextKind::Scenario => Cow::Owned(format!(
                "Feature: {}\n\n{}",
                self.identifier.as_deref().unwrap_or(&self.file),
                self.text,
            )),
        }
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of extracting a single file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extraction {
    /// Extracted texts, in source order.
    pub texts: Vec<ExtractedText>,

    /// Malformed blocks that were skipped, in source order.
    pub skipped: Vec<ExtractionError>,
}

/// Extraction Engine turning source files into [`ExtractedText`]s.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    markers: Markers,
}

impl Extractor {
    /// Creates a new [`Extractor`] looking for the default [`Markers`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes this [`Extractor`] look for blocks bounded by the given markers.
    #[must_use]
    pub fn with_markers(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.markers = Markers { start: start.into(), end: end.into() };
        self
    }

    /// Reads the file at the given `path` and [extracts](Self::extract) it.
    ///
    /// # Errors
    ///
    /// If the file cannot be read.
    pub fn extract_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Extraction, InputError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            InputError::Unreadable { path: path.to_path_buf(), source }
        })?;
        Ok(self.extract(&path.display().to_string(), &content))
    }

    /// Extracts all the embedded blocks of the given file `content`.
    ///
    /// Malformed blocks are logged and skipped, so a single one never spoils
    /// the rest of the file.
    #[must_use]
    pub fn extract(&self, filename: &str, content: &str) -> Extraction {
        let mut out = Extraction::default();

        for (n, scanned) in
            scan::scan(content, &self.markers).into_iter().enumerate()
        {
            match Self::process(filename, n + 1, scanned) {
                Ok(text) => {
                    tracing::debug!(
                        file = filename,
                        uri = %text.uri(),
                        kind = ?text.kind,
                        "extracted block",
                    );
                    out.texts.push(text);
                }
                Err(e) => {
                    tracing::warn!("skipping malformed block: {e}");
                    out.skipped.push(e);
                }
            }
        }

        out
    }

    /// Validates, cleans and tags a single [`scan`]ned block.
    fn process(
        file: &str,
        index: usize,
        scanned: scan::Scanned,
    ) -> Result<ExtractedText, ExtractionError> {
        let block = match scanned {
            scan::Scanned::Block(b) => b,
            scan::Scanned::Unterminated { line, capture } => {
                return Err(ExtractionError::Unterminated {
                    file: file.to_owned(),
                    line,
                    capture,
                });
            }
        };

        let cleaned = if block.prefix.starts_with('#') {
            clean::clean(&clean::hash_comment_token(&block.text))
        } else {
            clean::clean(&block.text)
        };
        if cleaned.is_empty() {
            return Err(ExtractionError::EmptyBlock {
                file: file.to_owned(),
                line: block.line,
            });
        }

        if provenance::is_feature(&cleaned) {
            return Ok(ExtractedText {
                kind: TextKind::Feature,
                text: cleaned,
                file: file.to_owned(),
                identifier: block.identifier,
                index,
            });
        }

        let Some(identifier) = block.identifier else {
            return Err(ExtractionError::MissingIdentifier {
                file: file.to_owned(),
                line: block.line,
                capture: scan::preview(&cleaned),
            });
        };

        Ok(ExtractedText {
            kind: TextKind::Scenario,
            text: provenance::tag(&cleaned, file, &identifier),
            file: file.to_owned(),
            identifier: Some(identifier),
            index,
        })
    }
}
