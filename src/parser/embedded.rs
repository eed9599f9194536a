// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Parser`] of texts extracted from source files.

use std::vec;

use crate::{error::ParseError, extract::ExtractedText};

use super::{Parser, Result};

/// [`Parser`] of [`ExtractedText`]s.
///
/// Bare scenarios are parsed wrapped into a synthetic feature. Every parsed
/// feature gets the [`ExtractedText::uri()`] as its path.
#[derive(Clone, Copy, Debug, Default)]
pub struct Embedded;

impl<'a, I> Parser<I> for Embedded
where
    I: IntoIterator<Item = &'a ExtractedText>,
{
    type Output = vec::IntoIter<Result<gherkin::Feature>>;

    fn parse(self, texts: I) -> Self::Output {
        texts
            .into_iter()
            .map(|text| {
                let uri = text.uri();
                let env = gherkin::GherkinEnv::default();
                let mut feature =
                    gherkin::Feature::parse(text.to_feature_source(), env)
                        .map_err(|source| ParseError::Embedded {
                            uri: uri.clone(),
                            source,
                        })?;
                tracing::debug!(uri = %uri, "parsed embedded feature");
                feature.path = Some(uri.into());
                Ok(feature)
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}
