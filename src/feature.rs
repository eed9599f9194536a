// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`gherkin::Feature`] extension.

use itertools::Itertools as _;
use sealed::sealed;

/// Helper methods to operate on [`gherkin::Feature`]s.
#[sealed]
pub trait Ext {
    /// Returns the URI of this [`Feature`]: its path if it has one, or its
    /// name otherwise.
    ///
    /// [`Feature`]: gherkin::Feature
    #[must_use]
    fn uri(&self) -> String;

    /// Returns all the [`Feature`]'s [`Scenario`]s, including the ones inside
    /// [`Rule`]s, in the order they appear in the source, each along with its
    /// [`Rule`], if any.
    ///
    /// [`Feature`]: gherkin::Feature
    /// [`Rule`]: gherkin::Rule
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    fn ordered_scenarios(
        &self,
    ) -> Vec<(Option<&gherkin::Rule>, &gherkin::Scenario)>;
}

#[sealed]
impl Ext for gherkin::Feature {
    fn uri(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| self.name.clone(), |p| p.display().to_string())
    }

    fn ordered_scenarios(
        &self,
    ) -> Vec<(Option<&gherkin::Rule>, &gherkin::Scenario)> {
        self.scenarios
            .iter()
            .map(|s| (None, s))
            .chain(
                self.rules
                    .iter()
                    .flat_map(|r| {
                        r.scenarios.iter().map(move |s| (Some(r), s))
                    }),
            )
            .sorted_by_key(|(_, s)| s.position.line)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gherkin::GherkinEnv;

    use super::*;

    const FEATURE: &str = "\
Feature: Rules
  Background:
    Given a setup

  Scenario: first
    Given one

  Rule: some rule
    Scenario: second
      Given two
      And three

  Rule: other rule
    Scenario: third
      Given four
";

    fn parse(src: &str) -> gherkin::Feature {
        gherkin::Feature::parse(src, GherkinEnv::default())
            .expect("valid feature")
    }

    #[test]
    fn orders_scenarios_as_in_source() {
        let feature = parse(FEATURE);

        let names = feature
            .ordered_scenarios()
            .into_iter()
            .map(|(r, s)| (r.map(|r| r.name.as_str()), s.name.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                (None, "first"),
                (Some("some rule"), "second"),
                (Some("other rule"), "third"),
            ],
        );
    }

    #[test]
    fn uri_falls_back_to_name() {
        let mut feature = parse(FEATURE);
        assert_eq!(feature.uri(), "Rules");

        feature.path = Some("features/rules.feature".into());
        assert_eq!(feature.uri(), "features/rules.feature");
    }
}
