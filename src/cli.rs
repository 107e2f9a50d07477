//! Command-line interface definition.
//!
//! Only the global flags are declared with `clap`.  Everything after the
//! first positional argument is collected verbatim and handed to the matching
//! [`crate::command::Command`], which parses it against its own
//! [`crate::flags::FlagSet`].  That keeps subcommands self-describing: the
//! same definitions drive parsing and the `help` output.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::flags::FlagSet;

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(name = "grafanactl", version, disable_help_flag = true)]
pub struct Cli {
    /// Dashboard API base URL (overrides the config file).
    #[arg(long)]
    pub url: Option<String>,

    /// API key (overrides the config file).
    #[arg(long)]
    pub key: Option<String>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = "grafanactl.toml")]
    pub config: PathBuf,

    /// Log debug diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print usage and options.
    #[arg(short, long)]
    pub help: bool,

    /// Subcommand followed by its own arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub rest: Vec<String>,
}

impl Cli {
    /// Split `rest` into the subcommand name and its arguments.
    pub fn subcommand(&self) -> Option<(&str, &[String])> {
        self.rest
            .split_first()
            .map(|(name, args)| (name.as_str(), args))
    }
}

/// The global flags as a [`FlagSet`], for the general help listing.
///
/// Built first so that clap's generated `--version` is listed too.
pub fn global_flags() -> FlagSet {
    let mut cmd = Cli::command();
    cmd.build();
    FlagSet::from_command(cmd)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("grafanactl").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_means_no_subcommand() {
        let cli = parse(&[]);
        assert!(cli.subcommand().is_none());
        assert_eq!(cli.config, PathBuf::from("grafanactl.toml"));
    }

    #[test]
    fn subcommand_args_are_passed_through_untouched() {
        let cli = parse(&["--url", "http://g", "backup", "--dry-run", "out"]);
        assert_eq!(cli.url.as_deref(), Some("http://g"));
        let (name, args) = cli.subcommand().unwrap();
        assert_eq!(name, "backup");
        assert_eq!(args, ["--dry-run", "out"]);
    }

    #[test]
    fn help_subcommand_with_target() {
        let cli = parse(&["help", "restore"]);
        let (name, args) = cli.subcommand().unwrap();
        assert_eq!(name, "help");
        assert_eq!(args, ["restore"]);
    }

    #[test]
    fn global_flags_are_listed_in_definition_order() {
        let names: Vec<_> = global_flags().iter().map(|f| f.name).collect();
        assert_eq!(names, vec![
            "--url",
            "--key",
            "--config",
            "--verbose",
            "--help",
            "--version"
        ]);
    }

    #[test]
    fn global_config_flag_reports_its_default() {
        let config = global_flags()
            .iter()
            .find(|f| f.name == "--config")
            .unwrap();
        assert_eq!(config.default, "grafanactl.toml");
        // clap drops the trailing period of one-line doc comments.
        assert_eq!(config.usage, "Path to the configuration file");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
