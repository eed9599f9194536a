// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dispatching of parsed [`Opts`] to the pipeline.

use std::{ffi::OsString, io, path::PathBuf};

use clap::{error::ErrorKind, CommandFactory as _};

use crate::{
    error::{Error, InputError, Result},
    extract::Extractor,
    model::{self, Feature},
    output::{Styles, WriteStrExt as _},
    parser::{Basic, Embedded, Parser as _},
    render::{HelperContext, RenderRequest, Renderer},
    tag::TagFilter,
};

use super::{
    opts::{Command, ExtractCli, Opts, RenderCli},
    usage::Usage,
};

/// Exit code of a successful run.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code of a failed run.
pub const EXIT_FAILURE: i32 = 1;

/// Command dispatcher.
///
/// Owns the [`Usage`] registry for the duration of a run.
#[derive(Clone, Debug)]
pub struct App {
    usage: Usage,
    styles: Styles,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new [`App`] with [`Usage`] of all the [`Command`]s and plain
    /// [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            usage: Usage::from_command(&Opts::command()),
            styles: Styles::plain(),
        }
    }

    /// Replaces the [`Styles`] of diagnostics.
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Returns the [`Usage`] printed along with fatal errors.
    #[must_use]
    pub const fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Parses the given command line `args` and runs the chosen [`Command`],
    /// writing its results into `out` and diagnostics into `err`.
    ///
    /// Returns the exit code of the run.
    pub fn run<I, T>(
        &self,
        args: I,
        out: &mut dyn io::Write,
        err: &mut dyn io::Write,
    ) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let opts = match Opts::try_parsed_from(args) {
            Ok(opts) => opts,
            Err(e) => return self.clap_error(&e, out, err),
        };

        let result = match &opts.command {
            Command::Extract(cli) => self.extract(cli, out, err),
            Command::Render(cli) => self.render(cli, out, err),
        };
        let code = result.unwrap_or_else(|e| {
            self.fail(&e, err);
            EXIT_FAILURE
        });

        if let Err(e) = out.flush() {
            self.fail(&Error::Output(e), err);
            return EXIT_FAILURE;
        }
        code
    }

    /// Runs the [`Command::Extract`].
    ///
    /// Unreadable files are reported right away and don't prevent the
    /// remaining files from being extracted.
    fn extract(
        &self,
        cli: &ExtractCli,
        out: &mut dyn io::Write,
        err: &mut dyn io::Write,
    ) -> Result<i32> {
        if cli.files.is_empty() {
            return Err(InputError::NoInput.into());
        }

        let extractor = cli.markers.extractor();
        let with_banners = cli.files.len() > 1;
        let mut failed = false;
        for file in &cli.files {
            let extraction = match extractor.extract_file(file) {
                Ok(extraction) => extraction,
                Err(e) => {
                    self.diagnose(&e.into(), err)?;
                    failed = true;
                    continue;
                }
            };

            if with_banners {
                out.write_line(format!("# ==> {} <==", file.display()))?;
            }
            for text in &extraction.texts {
                if cli.as_features {
                    out.write_line(text.to_feature_source())?;
                } else {
                    out.write_line(text.text())?;
                }
            }
        }

        if failed {
            self.print_usage(err)?;
            Ok(EXIT_FAILURE)
        } else {
            Ok(EXIT_SUCCESS)
        }
    }

    /// Runs the [`Command::Render`].
    fn render(
        &self,
        cli: &RenderCli,
        out: &mut dyn io::Write,
        err: &mut dyn io::Write,
    ) -> Result<i32> {
        let filter = cli.tags.parse::<TagFilter>()?;
        let context = HelperContext::new(&cli.short_name_pattern)?;
        let paths = cli.feature_paths();

        let missing = paths
            .iter()
            .chain(&cli.embedded)
            .filter(|p| !p.exists())
            .cloned()
            .collect::<Vec<_>>();
        if let Some((last, rest)) = missing.split_last() {
            for path in rest {
                self.diagnose(
                    &InputError::Missing { path: path.clone() }.into(),
                    err,
                )?;
            }
            return Err(InputError::Missing { path: last.clone() }.into());
        }

        let features = load_features(
            &paths,
            &cli.embedded,
            &cli.markers.extractor(),
            &filter,
        )?;

        if cli.list {
            for feature in &features {
                for scenario in &feature.scenarios {
                    out.write_line(
                        context.scenario_title(&feature.uri, &scenario.name)?,
                    )?;
                }
            }
        } else if cli.json {
            for feature in &features {
                out.write_line(
                    serde_json::to_string(feature).map_err(io::Error::from)?,
                )?;
            }
        } else {
            let rendered = Renderer::new(context)?.render(RenderRequest {
                variant: cli.variant(),
                resources: &cli.resources,
                features: &features,
            })?;
            out.write_str(rendered)?;
        }

        Ok(EXIT_SUCCESS)
    }

    /// Handles a failure to parse the command line.
    fn clap_error(
        &self,
        e: &clap::Error,
        out: &mut dyn io::Write,
        err: &mut dyn io::Write,
    ) -> i32 {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        {
            return match out.write_str(e.render().to_string()) {
                Ok(()) => EXIT_SUCCESS,
                Err(io) => {
                    self.fail(&Error::Output(io), err);
                    EXIT_FAILURE
                }
            };
        }

        let message = if matches!(
            e.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::MissingSubcommand
        ) {
            "no command given".to_owned()
        } else {
            let rendered = e.to_string();
            rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_owned()
        };
        self.fail(&Error::Usage(message), err);
        EXIT_FAILURE
    }

    /// Reports a fatal error along with the [`Usage`].
    fn fail(&self, e: &Error, err: &mut dyn io::Write) {
        let reported = self
            .diagnose(e, err)
            .and_then(|()| self.print_usage(err));
        if let Err(e) = reported {
            tracing::error!("failed to report error: {e}");
        }
    }

    /// Writes the diagnostic lines of the given error.
    fn diagnose(&self, e: &Error, err: &mut dyn io::Write) -> io::Result<()> {
        tracing::debug!(error = ?e, "reporting error");

        let mut chain = e.chain().into_iter();
        if let Some(first) = chain.next() {
            err.write_line(self.styles.err(format!("Error: {first}")))?;
        }
        for cause in chain {
            err.write_line(format!("  caused by: {cause}"))?;
        }
        Ok(())
    }

    fn print_usage(&self, err: &mut dyn io::Write) -> io::Result<()> {
        err.write_line("")?;
        err.write_line(self.styles.bold(self.usage.to_string()))
    }
}

/// Loads, tag-filters and orders [`Feature`]s: the native ones from the
/// given `paths` first, then the ones embedded into the `sources`.
///
/// # Errors
///
/// If any source is unreadable, or any feature fails to parse.
pub fn load_features(
    paths: &[PathBuf],
    sources: &[PathBuf],
    extractor: &Extractor,
    filter: &TagFilter,
) -> Result<Vec<Feature>> {
    let mut parsed = Vec::new();
    for path in paths {
        for feature in Basic.parse(path) {
            parsed.push(feature?);
        }
    }

    let mut texts = Vec::new();
    for source in sources {
        texts.extend(extractor.extract_file(source)?.texts);
    }
    for feature in Embedded.parse(&texts) {
        parsed.push(feature?);
    }

    Ok(model::build(parsed, filter))
}
