// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered and tag-filtered [`Feature`] model, serializable for dumping and
//! for the rendering templates.

use serde::Serialize;

use crate::{feature::Ext as _, tag::TagFilter};

/// Builds [`Feature`]s out of parsed [`gherkin::Feature`]s, keeping only the
/// [`Scenario`]s satisfying the `filter`.
///
/// The order of the `features` is kept. Features left with no [`Scenario`]s
/// are dropped.
#[must_use]
pub fn build<I>(features: I, filter: &TagFilter) -> Vec<Feature>
where
    I: IntoIterator<Item = gherkin::Feature>,
{
    features
        .into_iter()
        .filter_map(|f| {
            let built = Feature::filtered(&f, filter);
            if built.is_none() {
                tracing::debug!(
                    uri = %f.uri(),
                    filter = %filter,
                    "no scenarios left, dropping feature",
                );
            }
            built
        })
        .collect()
}

/// [Gherkin] feature.
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Feature {
    /// Path of the `.feature` file or synthetic URI of an extracted text.
    pub uri: String,

    /// Localized `Feature` keyword.
    pub keyword: String,

    /// Name of this [`Feature`].
    pub name: String,

    /// Description of this [`Feature`], empty if there is none.
    pub description: String,

    /// Tags of this [`Feature`], with their leading `@`.
    pub tags: Vec<String>,

    /// [`Scenario`]s of this [`Feature`], in source order.
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Converts the given [`gherkin::Feature`], keeping all its scenarios.
    #[must_use]
    pub fn from_gherkin(feature: &gherkin::Feature) -> Self {
        Self::convert(feature, |_| true)
    }

    /// Converts the given [`gherkin::Feature`], keeping only the scenarios
    /// whose own, [`Rule`] and feature tags together satisfy the `filter`.
    ///
    /// Returns [`None`] if no scenario is left.
    ///
    /// [`Rule`]: gherkin::Rule
    #[must_use]
    pub fn filtered(
        feature: &gherkin::Feature,
        filter: &TagFilter,
    ) -> Option<Self> {
        let built = Self::convert(feature, |(rule, scenario)| {
            let tags = scenario
                .tags
                .iter()
                .chain(rule.iter().flat_map(|r| &r.tags))
                .chain(&feature.tags);
            filter.matches(tags)
        });
        (!built.scenarios.is_empty()).then_some(built)
    }

    fn convert(
        feature: &gherkin::Feature,
        mut keep: impl FnMut(
            &(Option<&gherkin::Rule>, &gherkin::Scenario),
        ) -> bool,
    ) -> Self {
        let background = feature
            .background
            .iter()
            .flat_map(|b| &b.steps)
            .map(Step::from)
            .collect::<Vec<_>>();

        let scenarios = feature
            .ordered_scenarios()
            .into_iter()
            .filter(|pair| keep(pair))
            .map(|(rule, scenario)| {
                let mut steps = background.clone();
                steps.extend(
                    rule.and_then(|r| r.background.as_ref())
                        .into_iter()
                        .flat_map(|b| &b.steps)
                        .map(Step::from),
                );
                Scenario::new(scenario, steps)
            })
            .collect();

        Self {
            uri: feature.uri(),
            keyword: feature.keyword.clone(),
            name: feature.name.clone(),
            description: description(feature.description.as_deref()),
            tags: tags(&feature.tags),
            scenarios,
        }
    }
}

/// [Gherkin] scenario.
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Scenario {
    /// Localized `Scenario` keyword.
    pub keyword: String,

    /// Name of this [`Scenario`].
    pub name: String,

    /// Description of this [`Scenario`], empty if there is none.
    pub description: String,

    /// Own tags of this [`Scenario`], with their leading `@`.
    pub tags: Vec<String>,

    /// Line of this [`Scenario`] in its source.
    pub line: usize,

    /// Steps of the [`Background`]s applying to this [`Scenario`]: the
    /// feature's one first, then the rule's one.
    ///
    /// [`Background`]: gherkin::Background
    pub background: Vec<Step>,

    /// Own [`Step`]s of this [`Scenario`], verbatim and in source order.
    pub steps: Vec<Step>,

    /// [`Examples`] of this [`Scenario`], if it's an outline.
    pub examples: Vec<Examples>,
}

impl Scenario {
    fn new(scenario: &gherkin::Scenario, background: Vec<Step>) -> Self {
        Self {
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            description: description(scenario.description.as_deref()),
            tags: tags(&scenario.tags),
            line: scenario.position.line,
            background,
            steps: scenario.steps.iter().map(Step::from).collect(),
            examples: scenario
                .examples
                .iter()
                .map(|ex| Examples {
                    tags: tags(&ex.tags),
                    rows: ex
                        .table
                        .as_ref()
                        .map(|t| t.rows.clone())
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// [Gherkin] step.
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Step {
    /// Localized keyword: `Given`, `When`, `Then`, `And`, `But` or `*`.
    pub keyword: String,

    /// Text following the keyword.
    pub text: String,

    /// Line of this [`Step`] in its source.
    pub line: usize,

    /// Doc string argument, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,

    /// Data table argument, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<String>>>,
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            keyword: step.keyword.trim().to_owned(),
            text: step.value.clone(),
            line: step.position.line,
            docstring: step.docstring.clone(),
            table: step.table.as_ref().map(|t| t.rows.clone()),
        }
    }
}

/// [Examples] of a scenario outline.
///
/// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Examples {
    /// Tags of these [`Examples`], with their leading `@`.
    pub tags: Vec<String>,

    /// Table rows, the header one first.
    pub rows: Vec<Vec<String>>,
}

fn tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| if t.starts_with('@') { t.clone() } else { format!("@{t}") })
        .collect()
}

fn description(description: Option<&str>) -> String {
    description.map(str::trim).unwrap_or_default().to_owned()
}
