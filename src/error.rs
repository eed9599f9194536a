// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of the extraction, parsing and rendering pipeline.
//!
//! Only [`Error`] ever reaches the command line. [`ExtractionError`]s are
//! recoverable: they are logged, collected and the offending block is skipped.

use std::{error::Error as StdError, io, path::PathBuf};

use derive_more::{Display, From};

/// Result of a fallible `gherkin-robot` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error of a single invocation.
///
/// Every variant is fatal to the operation it was raised from.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Missing or unreadable input.
    #[display("{_0}")]
    Input(#[error(source)] InputError),

    /// Failed to build [`Feature`]s.
    ///
    /// [`Feature`]: crate::model::Feature
    #[display("{_0}")]
    Parse(#[error(source)] ParseError),

    /// Failed to render a test suite.
    #[display("{_0}")]
    Render(#[error(source)] RenderError),

    /// Invalid command line.
    #[display("{_0}")]
    #[from(ignore)]
    Usage(#[error(not(source))] String),

    /// Failed to write the produced output.
    #[display("failed to write output: {_0}")]
    Output(#[error(source)] io::Error),
}

impl Error {
    /// Returns the message of this [`Error`] followed by the messages of its
    /// [`source`](StdError::source) chain.
    ///
    /// Sources repeating the message right before them are omitted, as
    /// wrapping variants display their inner error verbatim.
    #[must_use]
    pub fn chain(&self) -> Vec<String> {
        let mut lines = vec![self.to_string()];
        let mut source = self.source();
        while let Some(err) = source {
            let msg = err.to_string();
            if lines.last() != Some(&msg) {
                lines.push(msg);
            }
            source = err.source();
        }
        lines
    }
}

/// Input files or paths that cannot be used.
#[derive(Debug, Display, derive_more::Error)]
pub enum InputError {
    /// No input was given at all.
    #[display("no input files given")]
    NoInput,

    /// Given path does not exist.
    #[display("unknown feature dir or file: `{}`", path.display())]
    Missing {
        /// Path that doesn't exist.
        path: PathBuf,
    },

    /// Given file exists, but cannot be read.
    #[display("cannot read `{}`: {source}", path.display())]
    Unreadable {
        /// Path of the unreadable file.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Malformed embedded block.
///
/// Never fatal: the block is skipped and extraction continues with the next
/// one.
#[derive(Clone, Debug, Display, derive_more::Error, Eq, PartialEq)]
pub enum ExtractionError {
    /// Start marker without a matching end marker.
    #[display("{file}:{line}: unterminated block `{capture}`")]
    Unterminated {
        /// Name of the scanned file.
        #[error(not(source))]
        file: String,

        /// Line of the start marker.
        line: usize,

        /// Beginning of the captured text.
        capture: String,
    },

    /// Nothing but whitespace between the markers.
    #[display("{file}:{line}: empty block")]
    EmptyBlock {
        /// Name of the scanned file.
        #[error(not(source))]
        file: String,

        /// Line of the start marker.
        line: usize,
    },

    /// Bare scenario that isn't followed by an enclosing test identifier, so
    /// it cannot be tagged with its provenance.
    #[display("{file}:{line}: no enclosing test identifier for `{capture}`")]
    MissingIdentifier {
        /// Name of the scanned file.
        #[error(not(source))]
        file: String,

        /// Line of the start marker.
        line: usize,

        /// Beginning of the captured text.
        capture: String,
    },
}

/// Failure to build [`Feature`]s.
///
/// [`Feature`]: crate::model::Feature
#[derive(Debug, Display, derive_more::Error)]
pub enum ParseError {
    /// Failed to parse a `.feature` file.
    #[display("failed to parse feature file: {_0}")]
    File(#[error(source)] gherkin::ParseFileError),

    /// Failed to parse a text extracted from a source file.
    #[display("failed to parse embedded feature `{uri}`: {source}")]
    Embedded {
        /// Synthetic URI of the extracted text.
        uri: String,

        /// Underlying [`gherkin`] error.
        source: gherkin::ParseError,
    },

    /// Failed to walk a directory for `.feature` files.
    #[display("failed to walk `{}`: {source}", path.display())]
    Walk {
        /// Walked directory.
        path: PathBuf,

        /// Underlying [`globwalk`] error.
        source: globwalk::GlobError,
    },

    /// Invalid tag filter expression.
    #[display("invalid tag expression `{expr}`: {reason}")]
    TagExpression {
        /// Expression as given.
        #[error(not(source))]
        expr: String,

        /// What is wrong with it.
        reason: String,
    },
}

/// Failure to render a test suite.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum RenderError {
    /// Template syntax or execution error.
    #[display("template error: {_0}")]
    Template(#[error(source)] tera::Error),

    /// Feature URI the short name cannot be derived from.
    #[display("`{uri}` doesn't match short name pattern `{pattern}`")]
    #[from(ignore)]
    ShortName {
        /// URI of the feature.
        #[error(not(source))]
        uri: String,

        /// Pattern the URI was matched against.
        pattern: String,
    },

    /// Invalid short name pattern.
    #[display("invalid short name pattern: {_0}")]
    Pattern(#[error(source)] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_names_the_path() {
        let err = InputError::Missing { path: "features/nope".into() };
        assert_eq!(
            err.to_string(),
            "unknown feature dir or file: `features/nope`",
        );
    }

    #[test]
    fn chain_skips_repeated_messages() {
        let err = Error::from(InputError::Unreadable {
            path: "a.go".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });

        let chain = err.chain();

        assert_eq!(chain[0], "cannot read `a.go`: gone");
        assert_eq!(chain.last().map(String::as_str), Some("gone"));
        assert!(chain.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn extraction_error_points_at_the_block() {
        let err = ExtractionError::EmptyBlock { file: "x.go".into(), line: 7 };
        assert_eq!(err.to_string(), "x.go:7: empty block");
    }

    #[test]
    fn usage_error_has_no_source() {
        let err = Error::Usage("specify a subcommand".into());
        assert!(err.source().is_none());
        assert_eq!(err.chain(), vec!["specify a subcommand".to_owned()]);
    }
}
