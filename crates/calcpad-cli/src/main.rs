//! Calcpad CLI: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! calcpad tui                      # Interactive calculator
//! calcpad run 6+3=                 # Replay keys, print the display
//! calcpad run --trace 2 + 3 Enter  # Display after every key
//! calcpad run --file script.keys --json
//! calcpad keys                     # Keyboard and button mapping
//! calcpad config --init calcpad.yaml
//! ```

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use calcpad::config::CalcConfig;
use calcpad::keypad::Keypad;
use calcpad_cli::{
    interactive, logging, render_keys, render_transcript, replay, Cli, CliConfig, CliError,
    CliResult, ColorChoice, Commands, ConfigArgs, KeyScriptParser, OutputFormat, Printer,
    RunArgs, TuiArgs, Verbosity,
};
use clap::Parser;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    logging::init(verbosity, color.should_color());

    let cwd = std::env::current_dir()?;
    let calc = CalcConfig::discover(cli.config.as_deref(), &cwd)?;
    let config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_calc(calc);
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Tui(args) => run_tui(config, &args),
        Commands::Run(args) => run_script(&config, &args),
        Commands::Keys => run_keys(&config),
        Commands::Config(args) => run_config(&config, &args),
    }
}

fn run_tui(mut config: CliConfig, args: &TuiArgs) -> CliResult<()> {
    if args.no_help {
        config.calc.tui.show_help = false;
    }
    interactive::run_tui(&config.calc)
}

fn run_script(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let parser = KeyScriptParser::new()?;
    let mut keys = match &args.file {
        Some(path) => parser.parse(&read_script(path)?),
        None => Vec::new(),
    };
    keys.extend(parser.parse_all(args.keys.as_slice()));
    if keys.is_empty() {
        return Err(CliError::invalid_argument(
            "no keys given; pass a key script or --file",
        ));
    }

    let transcript = replay(&config.calc, keys.as_slice());
    let format = OutputFormat::from_flags(args.trace, args.json);
    let use_color = format != OutputFormat::Json && config.color.should_color();
    let text = render_transcript(&transcript, format, use_color)?;
    Printer::new(use_color).print(&text)
}

fn read_script(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| {
        CliError::invalid_argument(format!("cannot read script {}: {e}", path.display()))
    })
}

fn run_keys(config: &CliConfig) -> CliResult<()> {
    let use_color = config.color.should_color();
    Printer::new(use_color).print(&render_keys(&Keypad::new(), use_color))
}

fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let printer = Printer::new(config.color.should_color());
    match &args.init {
        Some(path) => {
            if path.exists() && !args.force {
                return Err(CliError::invalid_argument(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            CalcConfig::default().save(path)?;
            if !config.verbosity.is_quiet() {
                printer.success(&format!("Wrote {}", path.display()))?;
            }
            Ok(())
        }
        None => printer.print(&config.calc.to_yaml()?),
    }
}
