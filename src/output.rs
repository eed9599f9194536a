// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io};

use console::Style;

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering errors.
    pub err: Style,

    /// [`Style`] for rendering __bold__.
    pub bold: Style,

    /// Indicates whether the styles are applied at all.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            err: Style::new().red(),
            bold: Style::new().bold(),
            is_present: false,
        }
    }
}

impl Styles {
    /// Creates new [`Styles`] leaving everything "as is".
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Creates new [`Styles`] applied only if the standard error is a
    /// terminal supporting colors.
    #[must_use]
    pub fn for_stderr() -> Self {
        Self {
            is_present: console::Term::stderr().features().colors_supported()
                && console::colors_enabled_stderr(),
            ..Self::default()
        }
    }

    /// If terminal is present colors `input` with the `err` style or leaves
    /// "as is" otherwise.
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.err, input)
    }

    /// If terminal is present makes `input` __bold__ or leaves "as is"
    /// otherwise.
    #[must_use]
    pub fn bold<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.bold, input)
    }

    fn apply<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_leave_input_as_is() {
        let styles = Styles::plain();

        assert_eq!(styles.err("Error: boom"), "Error: boom");
        assert_eq!(styles.bold("x"), "x");
    }

    #[test]
    fn present_styles_color_input() {
        console::set_colors_enabled(true);
        let styles = Styles { is_present: true, ..Styles::plain() };

        let colored = styles.err("boom");

        assert_ne!(colored, "boom");
        assert_eq!(console::strip_ansi_codes(&colored), "boom");
    }

    #[test]
    fn writes_lines() {
        let mut out = Vec::new();

        out.write_line("a").and_then(|()| out.write_str("b")).expect("written");

        assert_eq!(out, b"a\nb");
    }
}
