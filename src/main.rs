//! `grafanactl` — back up and restore Grafana dashboards.
//!
//! # Usage
//!
//! ```text
//! grafanactl help                  # list every command and the global options
//! grafanactl help backup           # usage and options of one command
//! grafanactl backup --dry-run out  # show what a backup would do
//! grafanactl --url http://grafana.lan:3000 --key … restore in
//! ```
//!
//! # Module layout
//!
//! | Module                 | Responsibility                                 |
//! |------------------------|------------------------------------------------|
//! | [`cli`]                | Global flags parsed by clap                    |
//! | [`config`]             | `Config` struct + TOML loader                  |
//! | [`client`]             | Dashboard API handle passed to commands        |
//! | [`flags`]              | Read-only view over a command's flags          |
//! | [`command`]            | `Command`, `Registry`, handler signature       |
//! | [`template`]           | `{field}` templates behind the help output     |
//! | [`help`]               | Help rendering and `help` dispatch rules       |
//! | [`commands`]           | The built-in commands                          |

mod cli;
mod client;
mod command;
mod commands;
mod config;
mod flags;
mod help;
mod template;

use std::io;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use client::Client;
use command::{Registry, Session};
use config::Config;
use help::HelpRequest;
use tracing::{debug, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = Registry::new(commands::catalog())?;
    debug!(commands = registry.len(), "registered commands");

    // Help never depends on the config file; everything else does.
    let shows_help = cli.help
        || cli.subcommand().is_none_or(|(name, args)| {
            registry
                .find(name)
                .is_none_or(|cmd| cmd.name == commands::help::NAME || command::asks_for_help(args))
        });
    let cfg = load_settings(&cli, shows_help)?;
    let client = Client::from(&cfg.api);
    debug!(?client, "resolved API endpoint");

    let globals = cli::global_flags();
    let mut stdout = io::stdout().lock();
    let mut session = Session {
        client: &client,
        registry: &registry,
        globals: &globals,
        out: &mut stdout,
    };

    // ── grafanactl -h [COMMAND] ───────────────────────────────────────────────
    if cli.help {
        return commands::help::show(&mut session, HelpRequest::from_args(&cli.rest));
    }

    match cli.subcommand() {
        // ── grafanactl ────────────────────────────────────────────────────────
        None => commands::help::show(&mut session, HelpRequest::General),

        // ── grafanactl COMMAND [ARGS] ─────────────────────────────────────────
        Some((name, args)) => match registry.find(name) {
            Some(cmd) => cmd.run(&mut session, args),
            None => {
                warn!(command = name, "unknown command");
                commands::help::show(&mut session, HelpRequest::General)
            },
        },
    }
}

/// Merge the config files and apply `--url`/`--key`.
///
/// With `lenient` set, an unreadable or invalid file is logged and the
/// defaults are used instead.
fn load_settings(cli: &Cli, lenient: bool) -> Result<Config> {
    let mut cfg = match config::load_config(config::global_path().as_deref(), &cli.config) {
        Ok(cfg) => cfg,
        Err(err) if lenient => {
            let reason = format!("{err:#}");
            warn!(error = %reason, "ignoring config, using defaults");
            Config::default()
        },
        Err(err) => return Err(err),
    };
    if let Some(url) = &cli.url {
        cfg.api.url.clone_from(url);
    }
    if let Some(key) = &cli.key {
        cfg.api.key.clone_from(key);
    }
    Ok(cfg)
}

/// Diagnostics go to stderr so stdout carries nothing but command output.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
