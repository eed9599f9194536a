// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Strongly typed CLI options.
//!
//! [`Opts`] is the root, dispatching to one of the [`Command`]s. Options
//! shared by several commands live in their own [`Args`] structs flattened
//! into each of them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use smart_default::SmartDefault;

use crate::{
    extract::{Extractor, Markers},
    render::{helpers::DEFAULT_SHORT_NAME_PATTERN, Variant},
    tag::TagFilter,
};

/// Command line options of `gherkin-robot`.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "gherkin-robot",
    version,
    about = "Extract Gherkin from source comments and render it for \
             Robot Framework",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Opts {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Opts {
    /// Shortcut for [`clap::Parser::try_parse_from()`], which doesn't require
    /// the trait being imported.
    ///
    /// # Errors
    ///
    /// If the given `args` are invalid, or help or version were requested.
    pub fn try_parsed_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}

/// Commands of `gherkin-robot`.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Extract Gherkin embedded into source file comments.
    #[command(visible_alias = "feature")]
    Extract(ExtractCli),

    /// Render Gherkin features as a Robot Framework test suite.
    #[command(visible_alias = "robot")]
    Render(RenderCli),
}

/// CLI options of embedded block markers.
#[derive(Args, Clone, Debug, SmartDefault)]
pub struct MarkerCli {
    /// Marker opening an embedded Gherkin block (case-insensitive).
    #[arg(long, value_name = "marker", default_value = "[gherkin]")]
    #[default("[gherkin]".into())]
    pub start_marker: String,

    /// Marker closing an embedded Gherkin block (case-insensitive).
    #[arg(long, value_name = "marker", default_value = "[end]")]
    #[default("[end]".into())]
    pub end_marker: String,
}

impl MarkerCli {
    /// Returns the [`Markers`] described by these options.
    #[must_use]
    pub fn markers(&self) -> Markers {
        Markers { start: self.start_marker.clone(), end: self.end_marker.clone() }
    }

    /// Creates an [`Extractor`] looking for these markers.
    #[must_use]
    pub fn extractor(&self) -> Extractor {
        let Markers { start, end } = self.markers();
        Extractor::new().with_markers(start, end)
    }
}

/// CLI options of the [`Command::Extract`].
#[derive(Args, Clone, Debug, Default)]
pub struct ExtractCli {
    /// Print every text as a standalone feature, wrapping bare scenarios.
    #[arg(long)]
    pub as_features: bool,

    /// Source files to extract Gherkin from.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Markers options.
    #[command(flatten)]
    pub markers: MarkerCli,
}

/// CLI options of the [`Command::Render`].
#[derive(Args, Clone, Debug, SmartDefault)]
pub struct RenderCli {
    /// Feature files or directories, comma-separated.
    ///
    /// Defaults to `./features`, unless `--embedded` files are given.
    #[arg(short = 'f', long, value_name = "path", value_delimiter = ',')]
    pub features: Vec<PathBuf>,

    /// Source files whose embedded Gherkin is rendered after the features,
    /// comma-separated.
    #[arg(short = 'e', long, value_name = "file", value_delimiter = ',')]
    pub embedded: Vec<PathBuf>,

    /// Tag expression to filter scenarios by.
    ///
    /// Either a tag expression (`not @wip and @smoke`) or the legacy syntax
    /// (`~@wip && @smoke,@slow`). Tags from Feature, Rule and Scenario are
    /// merged together on filtering.
    #[arg(
        short = 't',
        long,
        value_name = "tagexpr",
        default_value = TagFilter::DEFAULT,
        allow_hyphen_values = true
    )]
    #[default(TagFilter::DEFAULT.into())]
    pub tags: String,

    /// List scenario titles instead of rendering.
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Dump parsed features as JSON lines instead of rendering.
    #[arg(short = 'j', long, visible_alias = "dump")]
    pub json: bool,

    /// Render one test case per scenario instead of one per feature.
    #[arg(short = 'F', long, visible_alias = "tpl.feature")]
    pub per_scenario: bool,

    /// Resource references for the settings section, comma-separated.
    #[arg(short = 'r', long, value_name = "ref", value_delimiter = ',')]
    pub resources: Vec<String>,

    /// Regex whose first group is the short name of a feature URI.
    #[arg(long, value_name = "regex", default_value = DEFAULT_SHORT_NAME_PATTERN)]
    #[default(DEFAULT_SHORT_NAME_PATTERN.into())]
    pub short_name_pattern: String,

    /// Markers options.
    #[command(flatten)]
    pub markers: MarkerCli,
}

impl RenderCli {
    /// Default directory of feature files.
    pub const DEFAULT_FEATURES: &'static str = "./features";

    /// Returns the feature paths to load.
    #[must_use]
    pub fn feature_paths(&self) -> Vec<PathBuf> {
        if self.features.is_empty() && self.embedded.is_empty() {
            vec![Self::DEFAULT_FEATURES.into()]
        } else {
            self.features.clone()
        }
    }

    /// Returns the chosen rendering [`Variant`].
    #[must_use]
    pub const fn variant(&self) -> Variant {
        if self.per_scenario {
            Variant::PerScenario
        } else {
            Variant::PerFeature
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn render(args: &[&str]) -> RenderCli {
        let opts = Opts::try_parsed_from(
            ["gherkin-robot", "render"].iter().chain(args),
        )
        .expect("valid args");
        match opts.command {
            Command::Render(cli) => cli,
            Command::Extract(_) => panic!("expected `render`"),
        }
    }

    #[test]
    fn cli_is_consistent() {
        Opts::command().debug_assert();
    }

    #[test]
    fn render_defaults() {
        let cli = render(&[]);

        assert_eq!(cli.feature_paths(), vec![PathBuf::from("./features")]);
        assert_eq!(cli.tags, "~@wip");
        assert_eq!(cli.variant(), Variant::PerFeature);
        assert!(cli.resources.is_empty());
        assert_eq!(cli.short_name_pattern, DEFAULT_SHORT_NAME_PATTERN);
        assert_eq!(cli.markers.markers(), Markers::default());
    }

    #[test]
    fn defaults_match_programmatic_ones() {
        let cli = render(&[]);
        let default = RenderCli::default();

        assert_eq!(cli.tags, default.tags);
        assert_eq!(cli.short_name_pattern, default.short_name_pattern);
        assert_eq!(cli.markers.markers(), default.markers.markers());
    }

    #[test]
    fn comma_separated_lists() {
        let cli = render(&[
            "-f",
            "a,b",
            "-r",
            "x.robot,y.resource",
            "-e",
            "s.go",
            "-F",
        ]);

        assert_eq!(cli.feature_paths(), vec![PathBuf::from("a"), "b".into()]);
        assert_eq!(cli.resources, vec!["x.robot", "y.resource"]);
        assert_eq!(cli.embedded, vec![PathBuf::from("s.go")]);
        assert_eq!(cli.variant(), Variant::PerScenario);
    }

    #[test]
    fn embedded_only_skips_default_features() {
        let cli = render(&["--embedded", "s.go"]);

        assert!(cli.feature_paths().is_empty());
    }

    #[test]
    fn aliases() {
        let cli = render(&["--tpl.feature", "--dump"]);
        assert!(cli.per_scenario);
        assert!(cli.json);

        let opts = Opts::try_parsed_from(["gherkin-robot", "feature", "a.go"])
            .expect("valid args");
        assert!(matches!(opts.command, Command::Extract(cli) if cli.files.len() == 1));

        let opts = Opts::try_parsed_from(["gherkin-robot", "robot", "-l"])
            .expect("valid args");
        assert!(matches!(opts.command, Command::Render(cli) if cli.list));
    }

    #[test]
    fn extract_markers() {
        let opts = Opts::try_parsed_from([
            "gherkin-robot",
            "extract",
            "--start-marker",
            "BEGIN",
            "--end-marker",
            "END",
            "a.rs",
        ])
        .expect("valid args");

        let Command::Extract(cli) = opts.command else {
            panic!("expected `extract`");
        };
        assert_eq!(
            cli.markers.markers(),
            Markers { start: "BEGIN".into(), end: "END".into() },
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Opts::try_parsed_from(["gherkin-robot"]).is_err());
    }
}
