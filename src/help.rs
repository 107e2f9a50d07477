//! Help text rendering and the `help` dispatch rules.
//!
//! # Templates
//!
//! | Template        | Data                      | Used for                         |
//! |-----------------|---------------------------|----------------------------------|
//! | `general`       | registry + global flags   | `grafanactl help`                |
//! | `command`       | one [`Command`]           | `grafanactl help <COMMAND>`      |
//! | `command_entry` | one [`Command`]           | each line of the command listing |
//! | `option`        | one [`Flag`]              | every flag, global or per-command |
//!
//! Global and per-command flags go through the same `option` template, so
//! they always look alike.  Adding a command never requires touching this
//! module: registering it with a populated [`FlagSet`] is enough.
//!
//! # Dispatch
//!
//! [`HelpRequest`] captures what the user asked for, [`HelpView`] what will
//! actually be shown.  An unknown command name degrades to the general help
//! with a warning; it is never an error.

use tracing::{debug, warn};

use crate::{
    command::{Command, Registry},
    flags::{Flag, FlagSet},
    template::{RenderError, Template},
};

// ─── Templates ────────────────────────────────────────────────────────────────

const GENERAL_TEMPLATE: &str = concat!(
    "SYNOPSIS\n",
    "\tgrafanactl backs up and restores Grafana dashboards.\n",
    "\n",
    "USAGE\n",
    "\tgrafanactl [OPTIONS] COMMAND [COMMAND OPTIONS]\n",
    "\n",
    "OPTIONS{options}\n",
    "\n",
    "COMMANDS{commands}\n",
);

const COMMAND_TEMPLATE: &str = concat!(
    "{name}\n",
    "\n",
    "SYNOPSIS\n",
    "\t{summary}\n",
    "\n",
    "USAGE\n",
    "\tgrafanactl {usage_line}\n",
    "\n",
    "DESCRIPTION\n",
    "\t{help}\n",
    "\n",
    "OPTIONS{options}\n",
);

const COMMAND_ENTRY_TEMPLATE: &str = "\n\t{usage_line}\n\t\t{summary}";

const OPTION_TEMPLATE: &str = "\n\t{name}=[{default}]\n\t\t{usage}";

/// Shown in place of an empty flag listing.
const NO_OPTIONS: &str = "\n\t(none)";

// ─── Renderer ─────────────────────────────────────────────────────────────────

/// All help templates, parsed once.
#[derive(Debug, Clone)]
pub struct HelpRenderer {
    general: Template,
    command: Template,
    command_entry: Template,
    option: Template,
}

impl HelpRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            general: Template::parse("general", GENERAL_TEMPLATE)?,
            command: Template::parse("command", COMMAND_TEMPLATE)?,
            command_entry: Template::parse("command_entry", COMMAND_ENTRY_TEMPLATE)?,
            option: Template::parse("option", OPTION_TEMPLATE)?,
        })
    }

    /// Overview of the tool: global flags, then every command in
    /// registration order.
    pub fn general(&self, registry: &Registry, globals: &FlagSet) -> Result<String, RenderError> {
        debug!(
            template = self.general.name(),
            commands = registry.len(),
            "rendering help"
        );
        self.general.render(|field| match field {
            "options" => self.flags(globals).map(Some),
            "commands" => registry
                .iter()
                .map(|cmd| self.command_entry(cmd))
                .collect::<Result<String, _>>()
                .map(Some),
            _ => Ok(None),
        })
    }

    /// Full help for one command.
    pub fn command(&self, cmd: &Command) -> Result<String, RenderError> {
        debug!(template = self.command.name(), command = cmd.name, "rendering help");
        self.command.render(|field| {
            Ok(Some(match field {
                "options" => self.flags(&cmd.flags)?,
                "help" => indent(cmd.help, "\t"),
                other => match command_field(cmd, other) {
                    Some(v) => v,
                    None => return Ok(None),
                },
            }))
        })
    }

    /// Every flag in `flags`, in definition order.
    pub fn flags(&self, flags: &FlagSet) -> Result<String, RenderError> {
        if flags.is_empty() {
            return Ok(NO_OPTIONS.to_owned());
        }
        flags.iter().map(|f| self.flag(&f)).collect()
    }

    /// One flag: `\n\t--name=[default]\n\t\tdescription`.
    pub fn flag(&self, flag: &Flag) -> Result<String, RenderError> {
        self.option.render(|field| {
            Ok(match field {
                "name" => Some(flag.name.clone()),
                "default" => Some(flag.default.clone()),
                "usage" => Some(indent(&flag.usage, "\t\t")),
                _ => None,
            })
        })
    }

    fn command_entry(&self, cmd: &Command) -> Result<String, RenderError> {
        self.command_entry.render(|field| Ok(command_field(cmd, field)))
    }
}

/// Plain fields shared by the `command` and `command_entry` templates.
fn command_field(cmd: &Command, field: &str) -> Option<String> {
    match field {
        "name" => Some(cmd.name.to_owned()),
        "summary" => Some(cmd.summary.to_owned()),
        "usage" => Some(cmd.usage.to_owned()),
        "usage_line" => Some(format!("{} {}", cmd.name, cmd.usage).trim_end().to_owned()),
        _ => None,
    }
}

/// Keep continuation lines of a multi-line text under the first one, which
/// the template already prefixes with `prefix`.
fn indent(text: &str, prefix: &str) -> String {
    text.trim_end().replace('\n', &format!("\n{prefix}"))
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpRequest<'a> {
    /// `help`, `help a b`, or no command at all.
    General,
    /// `help <name>`.
    Command(&'a str),
}

impl<'a> HelpRequest<'a> {
    /// Classify the arguments that followed `help`.
    ///
    /// Exactly one argument names a command; anything else asks for the
    /// overview.
    pub fn from_args(args: &'a [String]) -> Self {
        match args {
            [name] => Self::Command(name),
            _ => Self::General,
        }
    }

    /// Look the requested command up.
    pub fn resolve(self, registry: &Registry) -> HelpView<'a, '_> {
        match self {
            Self::General => HelpView::General,
            Self::Command(name) => match registry.find(name) {
                Some(cmd) => HelpView::Command(cmd),
                None => HelpView::Unknown(name),
            },
        }
    }
}

/// What will be shown.
#[derive(Debug, Clone, Copy)]
pub enum HelpView<'a, 'r> {
    General,
    Command(&'r Command),
    /// A name that matches no registered command.
    Unknown(&'a str),
}

impl HelpView<'_, '_> {
    /// Produce the text for this view.
    pub fn render(
        self,
        renderer: &HelpRenderer,
        registry: &Registry,
        globals: &FlagSet,
    ) -> Result<String, RenderError> {
        match self {
            Self::General => renderer.general(registry, globals),
            Self::Command(cmd) => renderer.command(cmd),
            Self::Unknown(name) => {
                warn!(command = name, "unknown subcommand");
                renderer.general(registry, globals)
            },
        }
    }
}

/// First line of every help screen.
pub fn banner() -> String {
    format!(
        "grafanactl v{} ({}/{})\n\n",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

// ─── Tests ────────────────────────────────────────────────────────────────────
