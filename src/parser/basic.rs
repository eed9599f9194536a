// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Parser`] implementation.

use std::{path::Path, vec};

use crate::error::ParseError;

use super::{Parser, Result};

/// Default [`Parser`] of native `.feature` files.
///
/// A file path is parsed directly. A directory is walked recursively for
/// `*.feature` files (case-insensitively), visited in lexicographic path
/// order. Paths are kept as given, so are the URIs of the parsed features.
///
/// This [`Parser`] is blocking.
#[derive(Clone, Copy, Debug, Default)]
pub struct Basic;

impl<I: AsRef<Path>> Parser<I> for Basic {
    type Output = vec::IntoIter<Result<gherkin::Feature>>;

    fn parse(self, path: I) -> Self::Output {
        let path = path.as_ref();

        let features = if path.is_file() {
            vec![parse_file(path)]
        } else {
            match feature_files(path) {
                Ok(files) => files.iter().map(|f| parse_file(f)).collect(),
                Err(e) => vec![Err(e)],
            }
        };

        features.into_iter()
    }
}

/// Lists `*.feature` files under the given `dir` in lexicographic order.
fn feature_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let walker = globwalk::GlobWalkerBuilder::new(dir, "*.feature")
        .case_insensitive(true)
        .build()
        .map_err(|source| ParseError::Walk { path: dir.to_owned(), source })?;

    let mut files = walker
        .filter_map(|entry| {
            entry
                .map_err(|e| tracing::warn!("skipping unwalkable entry: {e}"))
                .ok()
        })
        .map(globwalk::DirEntry::into_path)
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

fn parse_file(path: &Path) -> Result<gherkin::Feature> {
    let env = gherkin::GherkinEnv::default();
    let feature = gherkin::Feature::parse_path(path, env)
        .map_err(ParseError::File)?;
    tracing::debug!(path = %path.display(), "parsed feature file");
    Ok(feature)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const FEATURE: &str = "Feature: {}\n  Scenario: s\n    Given x\n";

    fn write(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("dir created");
        }
        fs::write(&path, FEATURE.replace("{}", name)).expect("file written");
    }

    #[test]
    fn walks_directories_in_lexicographic_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        for name in ["b.feature", "a.feature", "sub/c.FEATURE", "d.txt"] {
            write(dir.path(), name);
        }

        let names = Basic
            .parse(dir.path())
            .map(|f| f.expect("parsed").name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a.feature", "b.feature", "sub/c.FEATURE"]);
    }

    #[test]
    fn parses_single_file_keeping_its_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "one.feature");
        let path = dir.path().join("one.feature");

        let features = Basic.parse(&path).collect::<Vec<_>>();

        assert_eq!(features.len(), 1);
        let feature = features[0].as_ref().expect("parsed");
        assert_eq!(feature.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn reports_invalid_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("bad.feature"), "Scenario without feature\n")
            .expect("file written");

        let features = Basic.parse(dir.path()).collect::<Vec<_>>();

        assert!(matches!(&features[..], [Err(ParseError::File(_))]));
    }
}
