// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode};

use calmodel_core::{APP_NAME, IcsService};
use clap::{
    ArgAction, ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser,
};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_inspect::CmdInspect;
use crate::cmd_new_event::CmdNewEvent;
use crate::cmd_normalize::CmdNormalize;
use crate::cmd_timezones::CmdTimezones;
use crate::config::parse_config;

/// Run the calmodel command-line interface.
pub async fn run() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Log verbosity, one step per `-v`
    pub verbose: u8,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Inspect, normalize and build iCalendar documents.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $CALMODEL_CONFIG, then \
$XDG_CONFIG_HOME/calmodel/config.toml on Linux and MacOS, \
%APPDATA%/calmodel/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(
                arg!(-v --verbose "Log more, repeat for more detail")
                    .action(ArgAction::Count)
                    .global(true),
            )
            .subcommand(CmdInspect::command())
            .subcommand(CmdNormalize::command())
            .subcommand(CmdTimezones::command())
            .subcommand(CmdNewEvent::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdInspect::NAME, matches)) => Inspect(CmdInspect::from(matches)),
            Some((CmdNormalize::NAME, matches)) => Normalize(CmdNormalize::from(matches)),
            Some((CmdTimezones::NAME, matches)) => Timezones(CmdTimezones::from(matches)),
            Some((CmdNewEvent::NAME, matches)) => NewEvent(CmdNewEvent::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
            None => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        let verbose = matches.get_count("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the component tree of a file
    Inspect(CmdInspect),

    /// Reserialize a file
    Normalize(CmdNormalize),

    /// List the timezones of a file
    Timezones(CmdTimezones),

    /// Print a new event
    NewEvent(CmdNewEvent),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Inspect(a)            => a.run(&Self::service(config).await?).await,
            Normalize(a)          => a.run(&Self::service(config).await?).await,
            Timezones(a)          => a.run(&Self::service(config).await?).await,
            NewEvent(a)           => a.run(&Self::service(config).await?),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn service(config: Option<PathBuf>) -> Result<IcsService, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        Ok(IcsService::from_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::ArgOutputFormat;

    #[test]
    fn parses_global_flags() {
        let cli = Cli::try_parse_from(["test", "-c", "/tmp/config.toml", "inspect", "a.ics", "-vv"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn requires_a_command() {
        assert!(Cli::try_parse_from(["test"]).is_err());
        assert!(Cli::try_parse_from(["test", "dashboard"]).is_err());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["test", "tz", "a.ics", "--output-format", "json"]).unwrap();
        match cli.command {
            Commands::Timezones(cmd) => assert_eq!(cmd.output_format, ArgOutputFormat::Json),
            other => panic!("unexpected {other:?}"),
        }

        let cli = Cli::try_parse_from(["test", "normalize", "a.ics"]).unwrap();
        assert!(matches!(cli.command, Commands::Normalize(_)));
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["test", "new", "-s", "x", "--start", "2024-01-01"]).unwrap();
        assert!(matches!(cli.command, Commands::NewEvent(_)));

        let cli = Cli::try_parse_from(["test", "generate-completion", "zsh"]).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            other => panic!("unexpected {other:?}"),
        }
    }
}
