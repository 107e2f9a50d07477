//! Subcommand definitions.
//!
//! | File            | Invocation                  | Description                     |
//! |-----------------|-----------------------------|---------------------------------|
//! | `help.rs`       | `grafanactl help [COMMAND]` | Usage and options               |
//! | `dashboards.rs` | `grafanactl backup DEST`    | Save dashboards to a directory  |
//! |                 | `grafanactl restore SRC`    | Upload dashboards from a dir    |
//! |                 | `grafanactl list`           | List dashboards                 |
//!
//! To add a command, write a constructor returning a
//! [`Command`](crate::command::Command) and append it to [`catalog`].  The
//! position in the list is the position in `grafanactl help`.

pub mod dashboards;
pub mod help;

use crate::command::Command;

/// Every built-in command, in listing order.
pub fn catalog() -> Vec<Command> {
    vec![
        dashboards::backup(),
        dashboards::restore(),
        dashboards::list(),
        help::command(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Registry;

    #[test]
    fn catalog_forms_a_valid_registry() {
        let reg = Registry::new(catalog()).expect("no duplicate names");
        let names: Vec<_> = reg.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["backup", "restore", "list", "help"]);
    }

    #[test]
    fn every_command_documents_itself() {
        for cmd in catalog() {
            assert!(!cmd.summary.is_empty(), "{} has no summary", cmd.name);
            assert!(!cmd.help.is_empty(), "{} has no help text", cmd.name);
        }
    }
}
