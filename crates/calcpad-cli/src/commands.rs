//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorChoice;

/// Calcpad: keypad calculator for the terminal and key script replay
#[derive(Parser, Debug)]
#[command(name = "calcpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Configuration file (defaults to ./calcpad.yaml when present)
    #[arg(long, global = true, env = "CALCPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive terminal calculator
    Tui(TuiArgs),

    /// Replay a key script and print the display
    ///
    /// Tokens are browser key names: `Enter`, `Escape`, `Backspace`, or any
    /// single non-space character. `6+3=` and `6 + 3 Enter` are equivalent.
    Run(RunArgs),

    /// Print the keyboard and button mapping
    Keys,

    /// Show or initialize the configuration
    Config(ConfigArgs),
}

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Hide the key help line
    #[arg(long)]
    pub no_help: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key script, concatenated in order
    #[arg(allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Read the script from a file (`#` starts a comment line); keys given
    /// on the command line are replayed after it
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print `key -> display` for every key
    #[arg(long, conflicts_with = "json")]
    pub trace: bool,

    /// Print a JSON transcript with the final state
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Write the default configuration to this path instead of printing
    #[arg(long, value_name = "PATH")]
    pub init: Option<PathBuf>,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Color argument values
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Detect terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("calcpad").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_keys() {
        let cli = parse(&["run", "6+3=", "Enter"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.keys, vec!["6+3=", "Enter"]);
                assert!(!args.trace);
                assert!(!args.json);
                assert!(args.file.is_none());
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_keys_with_leading_minus() {
        let cli = parse(&["run", "8", "-2", "=", "-"]);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.keys, vec!["8", "-2", "=", "-"]),
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_file_and_json() {
        let cli = parse(&["run", "--file", "script.keys", "--json"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.file, Some(PathBuf::from("script.keys")));
                assert!(args.json);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_trace_conflicts_with_json() {
        let result = Cli::try_parse_from(["calcpad", "run", "--trace", "--json", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["-vv", "--color", "never", "--config", "my.yaml", "keys"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorArg::Never);
        assert_eq!(cli.config, Some(PathBuf::from("my.yaml")));
        assert!(matches!(cli.command, Commands::Keys));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["run", "-q", "1"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_config_init() {
        let cli = parse(&["config", "--init", "calcpad.yaml", "--force"]);
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.init, Some(PathBuf::from("calcpad.yaml")));
                assert!(args.force);
            }
            other => panic!("expected config, got {other:?}"),
        }
    }

    #[test]
    fn test_force_requires_init() {
        assert!(Cli::try_parse_from(["calcpad", "config", "--force"]).is_err());
    }

    #[test]
    fn test_parse_tui() {
        let cli = parse(&["tui", "--no-help"]);
        assert!(matches!(cli.command, Commands::Tui(TuiArgs { no_help: true })));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["calcpad"]).is_err());
    }

    #[test]
    fn test_color_arg_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
    }
}
