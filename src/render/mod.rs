// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of [`Feature`]s into [Robot Framework] test suites.
//!
//! [Robot Framework]: https://robotframework.org

pub mod helpers;

use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};

use crate::{error::RenderError, model::Feature};

#[doc(inline)]
pub use self::helpers::HelperContext;

/// Name of the entry template.
const MAIN: &str = "main.robot";

/// Built-in templates.
const TEMPLATES: [(&str, &str); 3] = [
    (MAIN, include_str!("templates/main.robot")),
    ("features.robot", include_str!("templates/features.robot")),
    ("scenarios.robot", include_str!("templates/scenarios.robot")),
];

/// Granularity of the rendered test cases.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// One test case per [`Feature`], invoking each of its scenarios.
    #[default]
    PerFeature,

    /// One test case per scenario, titled after the short name of its
    /// [`Feature`] and its own name.
    PerScenario,
}

/// Everything a single render needs.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RenderRequest<'a> {
    /// Chosen [`Variant`].
    pub variant: Variant,

    /// Resource references for the `*** Settings ***` section.
    pub resources: &'a [String],

    /// [`Feature`]s to render, in order.
    pub features: &'a [Feature],
}

/// Template Rendering Engine.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Creates a new [`Renderer`] with the built-in templates and helpers
    /// bound to the given [`HelperContext`].
    ///
    /// # Errors
    ///
    /// If the built-in templates fail to compile.
    pub fn new(context: HelperContext) -> Result<Self, RenderError> {
        Self::with_templates(context, TEMPLATES)
    }

    /// Creates a new [`Renderer`] with custom `templates`, one of which must
    /// be named `main.robot`.
    pub(crate) fn with_templates<'t>(
        context: HelperContext,
        templates: impl IntoIterator<Item = (&'t str, &'t str)>,
    ) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        let context = Arc::new(context);
        for (name, filter) in helpers::filters(&context) {
            tera.register_filter(name, filter);
        }
        tera.add_raw_templates(templates)?;

        Ok(Self { tera })
    }

    /// Renders the given [`RenderRequest`].
    ///
    /// # Errors
    ///
    /// On any template execution failure, including a feature URI not
    /// matching the short name pattern. Nothing is returned then.
    pub fn render(
        &self,
        request: RenderRequest<'_>,
    ) -> Result<String, RenderError> {
        let context = Context::from_serialize(request)?;
        let rendered = self.tera.render(MAIN, &context)?;
        tracing::debug!(
            variant = ?request.variant,
            features = request.features.len(),
            bytes = rendered.len(),
            "rendered test suite",
        );
        Ok(rendered)
    }
}
