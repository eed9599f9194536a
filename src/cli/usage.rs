// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Registry of command usages, printed along with fatal errors.

use std::fmt;

use itertools::Itertools as _;

/// Usage of a single command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    /// Name of the command.
    pub name: String,

    /// Visible aliases of the command.
    pub aliases: Vec<String>,

    /// One-line description of the command.
    pub about: String,

    /// Usage line of the command.
    pub usage: String,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}", self.name)?;
        if !self.aliases.is_empty() {
            write!(f, " ({})", self.aliases.iter().join(", "))?;
        }
        if !self.about.is_empty() {
            write!(f, ": {}", self.about)?;
        }
        write!(f, "\n    {}", self.usage)
    }
}

/// Combined usage of all the registered commands.
///
/// Built once per invocation and handed to the dispatcher explicitly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Usage {
    intro: String,
    sections: Vec<Section>,
}

impl Usage {
    /// Creates an empty [`Usage`] starting with the given `intro` line.
    #[must_use]
    pub fn new(intro: impl Into<String>) -> Self {
        Self { intro: intro.into(), sections: Vec::new() }
    }

    /// Builds a [`Usage`] describing every subcommand of the given `command`.
    #[must_use]
    pub fn from_command(command: &clap::Command) -> Self {
        let mut command = command.clone();
        command.build();

        let mut usage = Self::new(command.render_usage().to_string());
        for sub in command.get_subcommands_mut() {
            let section = Section {
                name: sub.get_name().to_owned(),
                aliases: sub
                    .get_visible_aliases()
                    .map(str::to_owned)
                    .collect(),
                about: sub
                    .get_about()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                usage: sub.render_usage().to_string(),
            };
            usage.register(section);
        }
        usage
    }

    /// Registers a new [`Section`].
    pub fn register(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Returns the registered [`Section`]s, in registration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.intro.trim_end())?;
        if !self.sections.is_empty() {
            f.write_str("\n\nCommands:")?;
        }
        for section in &self.sections {
            write!(f, "\n{section}")?;
        }
        Ok(())
    }
}
