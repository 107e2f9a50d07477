//! Read-only view over a `clap` argument definition.
//!
//! Every [`crate::command::Command`] owns a [`FlagSet`], and the global flags
//! of the binary are exposed the same way (see [`crate::cli::global_flags`]).
//! The help renderer never touches `clap` directly: it walks
//! [`FlagSet::iter`] and gets back plain [`Flag`] values in the order the
//! flags were defined.
//!
//! # Defaults
//!
//! `clap` only fills in the implied default of a boolean switch when the
//! command is built for parsing.  The bridge reports it up front so that
//! `--dry-run` shows up as `--dry-run=[false]` in help output:
//!
//! | Action     | Reported default |
//! |------------|------------------|
//! | `SetTrue`  | `false`          |
//! | `SetFalse` | `true`           |
//! | `Count`    | `0`              |
//! | otherwise  | joined `default_value`s, or empty |

use clap::{Arg, ArgAction, ArgMatches};

// ─── Flag ─────────────────────────────────────────────────────────────────────

/// One flag as shown in help output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Spelling as typed on the command line, e.g. `--dry-run` or `-n`.
    pub name: String,
    /// Default value, empty when the flag has none.
    pub default: String,
    /// One-line description.
    pub usage: String,
}

impl Flag {
    fn from_arg(arg: &Arg) -> Self {
        let name = match (arg.get_long(), arg.get_short()) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => arg.get_id().as_str().to_owned(),
        };

        let default = match arg.get_action() {
            ArgAction::SetTrue => "false".to_owned(),
            ArgAction::SetFalse => "true".to_owned(),
            ArgAction::Count => "0".to_owned(),
            _ => arg
                .get_default_values()
                .iter()
                .map(|v| v.to_string_lossy())
                .collect::<Vec<_>>()
                .join(","),
        };

        let usage = arg.get_help().map(ToString::to_string).unwrap_or_default();

        Self {
            name,
            default,
            usage,
        }
    }
}

// ─── FlagSet ──────────────────────────────────────────────────────────────────

/// The flags accepted by one command (or by the binary as a whole).
#[derive(Debug, Clone)]
pub struct FlagSet {
    inner: clap::Command,
}

impl FlagSet {
    /// A flag set with no flags, named after the command that owns it.
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: clap::Command::new(name)
                .no_binary_name(true)
                .disable_help_flag(true)
                .disable_version_flag(true),
        }
    }

    /// Wrap an existing `clap` definition.
    pub const fn from_command(inner: clap::Command) -> Self {
        Self { inner }
    }

    /// Append a flag.  Definition order is preserved.
    #[must_use]
    pub fn flag(mut self, arg: Arg) -> Self {
        self.inner = self.inner.arg(arg);
        self
    }

    /// Every visible, non-positional flag in definition order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.inner
            .get_arguments()
            .filter(|a| !a.is_positional() && !a.is_hide_set())
            .map(Flag::from_arg)
    }

    /// `true` when there is nothing to list.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Parse `args` (not including the command name) against this set.
    pub fn parse(&self, args: &[String]) -> Result<ArgMatches, clap::Error> {
        self.inner.clone().try_get_matches_from(args)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
