//! Command model and the registry that holds every command.
//!
//! The registry is built exactly once in `main` from the list returned by
//! [`crate::commands::catalog`] and then passed by reference to whoever needs
//! it.  There is no global state: tests build their own registries.

use std::io::Write;

use thiserror::Error;

use crate::{client::Client, commands, flags::FlagSet, help::HelpRequest};

// ─── Command ──────────────────────────────────────────────────────────────────

/// Everything a handler gets to work with besides its own arguments.
pub struct Session<'a> {
    /// Handle on the dashboard API.
    pub client: &'a Client,
    /// All registered commands.
    pub registry: &'a Registry,
    /// Flags accepted by the binary itself (before the subcommand).
    pub globals: &'a FlagSet,
    /// Where user-facing text goes.  Standard output in production.
    pub out: &'a mut dyn Write,
}

/// Signature shared by every subcommand.
pub type Handler = fn(&mut Session<'_>, &Command, &[String]) -> anyhow::Result<()>;

/// One invocable subcommand.
#[derive(Debug, Clone)]
pub struct Command {
    /// Name typed on the command line.  Unique within a registry.
    pub name: &'static str,
    /// Argument syntax, e.g. `[OPTIONS] DEST`.
    pub usage: &'static str,
    /// One-line description for the command listing.
    pub summary: &'static str,
    /// Long description for `help <command>`.
    pub help: &'static str,
    /// Flags accepted after the command name.
    pub flags: FlagSet,
    pub handler: Handler,
}

impl Command {
    /// Invoke the handler with the remaining arguments.
    ///
    /// `-h` or `--help` anywhere before `--` shows this command's help
    /// instead.
    pub fn run(&self, session: &mut Session<'_>, args: &[String]) -> anyhow::Result<()> {
        if asks_for_help(args) {
            return commands::help::show(session, HelpRequest::Command(self.name));
        }
        (self.handler)(session, self, args)
    }
}

/// `-h` or `--help` among `args`, ignoring anything after `--`.
pub fn asks_for_help(args: &[String]) -> bool {
    args.iter()
        .take_while(|a| *a != "--")
        .any(|a| a == "-h" || a == "--help")
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// Reasons a set of commands cannot form a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("command '{0}' is registered more than once")]
    Duplicate(&'static str),
}

/// Ordered, immutable catalog of commands.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    /// Build a registry, keeping the given order.
    ///
    /// Fails on an empty name or on two commands sharing a name.
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        for (i, cmd) in commands.iter().enumerate() {
            if cmd.name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if commands[..i].iter().any(|c| c.name == cmd.name) {
                return Err(RegistryError::Duplicate(cmd.name));
            }
        }
        Ok(Self { commands })
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
