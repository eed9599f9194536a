// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers available to the rendering templates.
//!
//! Every helper is a pure function of its arguments and the immutable
//! [`HelperContext`], and is registered as a [`tera`] filter of the same
//! name.

use std::{collections::HashMap, sync::Arc};

use lazy_regex::regex;
use regex::Regex;
use smart_default::SmartDefault;
use tera::Value;

use crate::error::RenderError;

/// Default pattern deriving a short name from a feature URI: the basename
/// without the `.feature` extension.
pub const DEFAULT_SHORT_NAME_PATTERN: &str =
    r"^(?:.*[/\\])?([^/\\]+)\.feature$";

/// Immutable context shared by the template helpers.
#[derive(Clone, Debug, SmartDefault)]
pub struct HelperContext {
    /// Pattern whose first capture group is the short name of a feature URI.
    #[default(Regex::clone(regex!(r"^(?:.*[/\\])?([^/\\]+)\.feature$")))]
    short_name: Regex,
}

impl HelperContext {
    /// Creates a new [`HelperContext`] deriving short names with the given
    /// `pattern`.
    ///
    /// # Errors
    ///
    /// If the `pattern` is not a valid [`Regex`].
    pub fn new(pattern: &str) -> Result<Self, RenderError> {
        Ok(Self { short_name: Regex::new(pattern)? })
    }

    /// Derives the short name of the given feature `uri`.
    ///
    /// # Errors
    ///
    /// If the `uri` doesn't match the pattern, or the pattern has no capture
    /// group.
    pub fn short_name(&self, uri: &str) -> Result<String, RenderError> {
        self.short_name
            .captures(uri)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_owned())
            .ok_or_else(|| RenderError::ShortName {
                uri: uri.to_owned(),
                pattern: self.short_name.as_str().to_owned(),
            })
    }

    /// Builds the title identifying a scenario across all the rendered
    /// features: `<short name>.<scenario name with underscores>`.
    ///
    /// # Errors
    ///
    /// See [`HelperContext::short_name()`].
    pub fn scenario_title(
        &self,
        uri: &str,
        name: &str,
    ) -> Result<String, RenderError> {
        Ok(format!("{}.{}", self.short_name(uri)?, name.replace(' ', "_")))
    }
}

/// Removes the leading `@` marker of a `tag`.
#[must_use]
pub fn strip_tag_marker(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

/// Replaces `'` with `` ` ``, so the title is safe in Robot Framework.
#[must_use]
pub fn sanitize_title(text: &str) -> String {
    text.replace('\'', "`")
}

/// Renders a multi-line `text` on a single line.
///
/// Every run of whitespace, line breaks included, becomes a single space.
#[must_use]
pub fn flatten_text(text: &str) -> String {
    regex!(r"\s+").replace_all(text, " ").trim().to_owned()
}

/// Boxed [`tera`] filter.
type BoxedFilter = Box<
    dyn Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>
        + Send
        + Sync,
>;

fn boxed<F>(f: F) -> BoxedFilter
where
    F: Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>
        + Send
        + Sync
        + 'static,
{
    Box::new(f)
}

/// Returns all the helpers as named [`tera`] filters bound to the given
/// `context`.
pub(crate) fn filters(
    context: &Arc<HelperContext>,
) -> Vec<(&'static str, BoxedFilter)> {
    let short_name = Arc::clone(context);
    let scenario_title = Arc::clone(context);

    vec![
        (
            "short_name",
            boxed(move |v, _| {
                let uri = as_str("short_name", v)?;
                Ok(short_name.short_name(uri).map_err(tera::Error::msg)?.into())
            }),
        ),
        (
            "scenario_title",
            boxed(move |v, args| {
                let uri = as_str("scenario_title", v)?;
                let name = args
                    .get("name")
                    .map(|n| as_str("scenario_title", n))
                    .transpose()?
                    .ok_or_else(|| {
                        tera::Error::msg("scenario_title expects a `name`")
                    })?;
                Ok(scenario_title
                    .scenario_title(uri, name)
                    .map_err(tera::Error::msg)?
                    .into())
            }),
        ),
        (
            "strip_tag_marker",
            boxed(|v, _| {
                Ok(strip_tag_marker(as_str("strip_tag_marker", v)?).into())
            }),
        ),
        (
            "sanitize_title",
            boxed(|v, _| {
                Ok(sanitize_title(as_str("sanitize_title", v)?).into())
            }),
        ),
        (
            "flatten_text",
            boxed(|v, _| Ok(flatten_text(as_str("flatten_text", v)?).into())),
        ),
    ]
}

fn as_str<'v>(filter: &str, value: &'v Value) -> tera::Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} expects a string")))
}
