// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Third extraction phase: classifying cleaned texts and tagging bare
//! scenarios with their origin.

/// Prefix of a provenance tag naming the file a scenario was extracted from.
pub const FILE_TAG: &str = "@file:";

/// Prefix of a provenance tag naming the test a scenario was extracted from.
pub const TEST_TAG: &str = "@test:";

/// Conventional prefixes of test function names, stripped when a scenario
/// title is derived from one.
pub const TEST_PREFIXES: [&str; 2] = ["Test_", "test_"];

/// Checks whether the given cleaned `text` is a complete feature: optional
/// tag and comment lines followed by a `Feature:` header.
#[must_use]
pub fn is_feature(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('@') && !l.starts_with('#'))
        .is_some_and(|l| l.starts_with("Feature:"))
}

/// Derives a human-readable scenario title from a test `identifier`.
///
/// Returns [`None`] if the `identifier` has no conventional test prefix.
#[must_use]
pub fn title_from_identifier(identifier: &str) -> Option<String> {
    let name = TEST_PREFIXES
        .iter()
        .find_map(|p| identifier.strip_prefix(*p))?;
    let title = name.replace('_', " ").trim().to_owned();
    (!title.is_empty()).then_some(title)
}

/// Gives a title to the first title-less `Scenario:` header of the `text`.
///
/// Returns [`None`] if there is no such header.
#[must_use]
pub fn with_title(text: &str, title: &str) -> Option<String> {
    let mut replaced = false;
    let lines = text
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if replaced || !matches!(trimmed, "Scenario:" | "Example:") {
                return line.to_owned();
            }
            replaced = true;
            let indent = &line[..line.len() - line.trim_start().len()];
            format!("{indent}{trimmed} {title}")
        })
        .collect::<Vec<_>>();
    replaced.then(|| lines.join("\n"))
}

/// Turns the given string into a valid tag value.
///
/// Gherkin tags end at whitespace, so any whitespace is replaced with `_`.
#[must_use]
pub fn tag_value(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Tags the bare scenario `text` with its provenance.
///
/// If the `identifier` carries a conventional test prefix, a title-less
/// scenario header gets a title derived from it. The [`FILE_TAG`] and
/// [`TEST_TAG`] tags are then inserted as their own lines before everything
/// else, keeping the indentation of the first line.
#[must_use]
pub fn tag(text: &str, file: &str, identifier: &str) -> String {
    let text = title_from_identifier(identifier)
        .and_then(|title| with_title(text, &title))
        .unwrap_or_else(|| text.to_owned());

    let first = text.lines().next().unwrap_or_default();
    let indent = &first[..first.len() - first.trim_start().len()];
    format!(
        "{indent}{FILE_TAG}{}\n{indent}{TEST_TAG}{}\n{text}",
        tag_value(file),
        tag_value(identifier),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_complete_features() {
        assert!(is_feature("Feature: f\n  Scenario: s\n"));
        assert!(is_feature("@a @b\n# comment\n@c\nFeature: f\n"));
        assert!(!is_feature("Scenario: s\n  Given x\n"));
        assert!(!is_feature("@a\nScenario: s\nFeature: not a header\n"));
        assert!(!is_feature(""));
    }

    #[test]
    fn derives_title() {
        assert_eq!(
            title_from_identifier("Test_my_case").as_deref(),
            Some("my case"),
        );
        assert_eq!(
            title_from_identifier("test_rust_style").as_deref(),
            Some("rust style"),
        );
        assert_eq!(title_from_identifier("TestMyCase"), None);
        assert_eq!(title_from_identifier("Test_"), None);
    }

    #[test]
    fn fills_only_title_less_header() {
        assert_eq!(
            with_title("  Scenario:\n    Given x\n", "t").as_deref(),
            Some("  Scenario: t\n    Given x\n"),
        );
        assert_eq!(with_title("Scenario: given\n", "t"), None);
    }

    #[test]
    fn fills_first_header_only() {
        assert_eq!(
            with_title("Scenario:\nScenario:\n", "t").as_deref(),
            Some("Scenario: t\nScenario:\n"),
        );
    }

    #[test]
    fn tags_with_provenance() {
        let tagged = tag(
            "Scenario:\n  Given a thing\n",
            "sample.go",
            "Test_my_case",
        );

        assert_eq!(
            tagged,
            "@file:sample.go\n\
             @test:Test_my_case\n\
             Scenario: my case\n  \
             Given a thing\n",
        );
    }

    #[test]
    fn keeps_first_line_indentation() {
        let tagged = tag("  Scenario: named\n", "a b.go", "Check");

        assert_eq!(
            tagged,
            "  @file:a_b.go\n  @test:Check\n  Scenario: named\n",
        );
    }
}
