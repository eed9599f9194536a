// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `gherkin-robot` binary.

use std::{env, io, process};

use gherkin_robot::{cli::App, output::Styles};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let code = App::new().with_styles(Styles::for_stderr()).run(
        env::args_os(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    process::exit(code);
}
