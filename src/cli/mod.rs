// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Command line interface.
//!
//! [`Opts`] describe the command line in a strongly typed way, [`App`]
//! dispatches it to the extraction and rendering pipeline, reporting fatal
//! errors along with the [`Usage`] of every command.

mod dispatch;
mod opts;
mod usage;

pub use self::{
    dispatch::{load_features, App, EXIT_FAILURE, EXIT_SUCCESS},
    opts::{Command, ExtractCli, MarkerCli, Opts, RenderCli},
    usage::{Section, Usage},
};
