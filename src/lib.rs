// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Extraction of [Gherkin] embedded into source code comments and rendering
//! of Gherkin features as [Robot Framework] test suites.
//!
//! The pipeline:
//! 1. [`extract::Extractor`] finds `[gherkin]` ... `[end]` comment blocks,
//!    cleans them and tags bare scenarios with their provenance;
//! 2. [`parser::Basic`] and [`parser::Embedded`] parse native `.feature`
//!    files and extracted texts;
//! 3. [`model::build()`] filters scenarios by a [`tag::TagFilter`] and keeps
//!    everything in source order;
//! 4. [`render::Renderer`] renders the resulting [`model::Feature`]s.
//!
//! ```rust
//! use gherkin_robot::{
//!     extract::Extractor,
//!     model,
//!     parser::{Embedded, Parser as _},
//!     render::{HelperContext, RenderRequest, Renderer, Variant},
//!     tag::TagFilter,
//! };
//!
//! # fn main() -> gherkin_robot::Result<()> {
//! let source = "\
//! // [gherkin]
//! // Scenario:
//! //   Given a thing
//! // [end]
//! func Test_my_case(t *testing.T) {}
//! ";
//! let extraction = Extractor::new().extract("sample.go", source);
//! let parsed = Embedded
//!     .parse(&extraction.texts)
//!     .collect::<Result<Vec<_>, _>>()?;
//! let features = model::build(parsed, &TagFilter::default());
//!
//! let suite = Renderer::new(HelperContext::default())?.render(RenderRequest {
//!     variant: Variant::PerScenario,
//!     resources: &[],
//!     features: &features,
//! })?;
//! assert!(suite.contains("sample.Test_my_case.my_case"));
//! # Ok(())
//! # }
//! ```
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference
//! [Robot Framework]: https://robotframework.org

#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::str_to_string,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_qualifications,
    unused_results
)]

pub mod cli;
pub mod error;
pub mod extract;
pub mod feature;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;
pub mod tag;

pub use gherkin;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    extract::{ExtractedText, Extractor},
    model::Feature,
    render::{RenderRequest, Renderer, Variant},
    tag::TagFilter,
};
