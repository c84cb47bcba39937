//! Calcpad CLI library
//!
//! Command definitions, configuration, key script replay and output
//! formatting for the `calcpad` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod interactive;
pub mod logging;
mod output;
mod runner;
pub mod script;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, RunArgs, TuiArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{
    keys_for_button, render_keys, render_trace, render_transcript, OutputFormat, Printer,
    KEY_NAMES,
};
pub use runner::{replay, Step, Transcript};
pub use script::KeyScriptParser;
