pub mod commands;

pub use commands::{Cli, Commands, ConfigCommands, OrgCommands, PrefsCommands};
