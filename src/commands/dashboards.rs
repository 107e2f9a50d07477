//! `backup`, `restore` and `list`.
//!
//! These handlers validate their arguments and turn them into a [`Plan`].
//! Talking to the dashboard API is the job of an external transport that is
//! not part of this binary, so only `--dry-run` invocations complete here:
//! they print what would be done and exit zero.

use std::{fmt, io::Write, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches};
use tracing::info;

use crate::{
    command::{Command, Session},
    flags::FlagSet,
};

// ─── Definitions ──────────────────────────────────────────────────────────────

fn dry_run() -> Arg {
    Arg::new("dry-run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Do not write files.")
}

fn tag(help: &'static str) -> Arg {
    Arg::new("tag").long("tag").value_name("TAG").help(help)
}

pub fn backup() -> Command {
    Command {
        name: "backup",
        usage: "[OPTIONS] DEST",
        summary: "Save dashboards to a directory.",
        help: "Downloads every dashboard visible to the API key and writes one\n\
               JSON file per dashboard into DEST.",
        flags: FlagSet::new("backup")
            .flag(dry_run())
            .flag(tag("Only back up dashboards carrying this tag."))
            .flag(Arg::new("dest").value_name("DEST").required(true)),
        handler: run_backup,
    }
}

pub fn restore() -> Command {
    Command {
        name: "restore",
        usage: "[OPTIONS] SRC",
        summary: "Upload dashboards from a directory.",
        help: "Reads the JSON files written by 'backup' from SRC and uploads\n\
               them.  Existing dashboards are left alone unless --overwrite is set.",
        flags: FlagSet::new("restore")
            .flag(dry_run())
            .flag(
                Arg::new("overwrite")
                    .long("overwrite")
                    .action(ArgAction::SetTrue)
                    .help("Replace dashboards that already exist."),
            )
            .flag(Arg::new("src").value_name("SRC").required(true)),
        handler: run_restore,
    }
}

pub fn list() -> Command {
    Command {
        name: "list",
        usage: "[OPTIONS]",
        summary: "List dashboards.",
        help: "Prints the title and UID of every dashboard visible to the API key.",
        flags: FlagSet::new("list").flag(tag("Only list dashboards carrying this tag.")),
        handler: run_list,
    }
}

// ─── Plan ─────────────────────────────────────────────────────────────────────

/// A validated request for the dashboard transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Backup { dest: PathBuf, tag: Option<String> },
    Restore { src: PathBuf, overwrite: bool },
    List { tag: Option<String> },
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backup { dest, tag } => {
                write!(f, "back up dashboards")?;
                if let Some(t) = tag {
                    write!(f, " tagged '{t}'")?;
                }
                write!(f, " into {}", dest.display())
            },
            Self::Restore { src, overwrite } => {
                write!(f, "restore dashboards from {}", src.display())?;
                if *overwrite {
                    write!(f, ", replacing existing ones")?;
                }
                Ok(())
            },
            Self::List { tag: Some(t) } => write!(f, "list dashboards tagged '{t}'"),
            Self::List { tag: None } => write!(f, "list dashboards"),
        }
    }
}

fn parse(cmd: &Command, args: &[String]) -> Result<ArgMatches> {
    cmd.flags
        .parse(args)
        .with_context(|| format!("invalid arguments for '{}'", cmd.name))
}

fn path_arg(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<String>(id)
        .map(PathBuf::from)
        .with_context(|| format!("missing {}", id.to_uppercase()))
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

fn run_backup(session: &mut Session<'_>, cmd: &Command, args: &[String]) -> Result<()> {
    let m = parse(cmd, args)?;
    let plan = Plan::Backup {
        dest: path_arg(&m, "dest")?,
        tag: m.get_one::<String>("tag").cloned(),
    };
    finish(session, &plan, m.get_flag("dry-run"))
}

fn run_restore(session: &mut Session<'_>, cmd: &Command, args: &[String]) -> Result<()> {
    let m = parse(cmd, args)?;
    let plan = Plan::Restore {
        src: path_arg(&m, "src")?,
        overwrite: m.get_flag("overwrite"),
    };
    finish(session, &plan, m.get_flag("dry-run"))
}

fn run_list(session: &mut Session<'_>, cmd: &Command, args: &[String]) -> Result<()> {
    let m = parse(cmd, args)?;
    let plan = Plan::List {
        tag: m.get_one::<String>("tag").cloned(),
    };
    finish(session, &plan, false)
}

/// Print the plan on a dry run; otherwise report that no transport is
/// linked into this binary.
fn finish(session: &mut Session<'_>, plan: &Plan, dry_run: bool) -> Result<()> {
    info!(
        url = session.client.url(),
        authenticated = !session.client.key().is_empty(),
        %plan,
        dry_run,
        "dashboard request"
    );
    if dry_run {
        writeln!(session.out, "dry run: would {plan} via {}", session.client.url())?;
        return Ok(());
    }
    bail!(
        "cannot {plan}: no dashboard API transport for {}",
        session.client.url()
    )
}

// ─── Tests ────────────────────────────────────────────────────────────────────
