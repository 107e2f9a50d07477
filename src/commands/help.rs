//! `grafanactl help [COMMAND]`.
//!
//! | Invocation                  | Output                               |
//! |-----------------------------|--------------------------------------|
//! | `grafanactl`                | general help                         |
//! | `grafanactl help`           | general help                         |
//! | `grafanactl help a b`       | general help                         |
//! | `grafanactl help <known>`   | help for that command                |
//! | `grafanactl help <unknown>` | warning on stderr, then general help |

use std::io::Write;

use anyhow::{Context, Result};

use crate::{
    command::{Command, Session},
    flags::FlagSet,
    help::{HelpRenderer, HelpRequest, banner},
};

/// Name of the help command.
pub const NAME: &str = "help";

pub fn command() -> Command {
    Command {
        name: NAME,
        usage: "[COMMAND]",
        summary: "Print command usage and options.",
        help: "grafanactl uses the Grafana API to manage dashboards.\n\
               Run 'grafanactl help COMMAND' for the options of one command.",
        flags: FlagSet::new("help"),
        handler: run,
    }
}

fn run(session: &mut Session<'_>, _cmd: &Command, args: &[String]) -> Result<()> {
    show(session, HelpRequest::from_args(args))
}

/// Render `request` and write it, preceded by the version banner.
pub fn show(session: &mut Session<'_>, request: HelpRequest<'_>) -> Result<()> {
    let renderer = HelpRenderer::new().context("parsing help templates")?;
    let text = request
        .resolve(session.registry)
        .render(&renderer, session.registry, session.globals)
        .context("rendering help")?;

    write!(session.out, "{}{text}", banner())?;
    session.out.flush()?;
    Ok(())
}
