use clap::{Parser, Subcommand};

use crate::preferences::Language;
use crate::providers::{ModelType, ProviderType};

/// `govcon-admin` - settings and administration for the contract-management back office.
#[derive(Parser, Debug)]
#[command(name = "govcon-admin")]
#[command(version)]
#[command(about = "Settings and administration for the contract-management back office.", long_about = None)]
pub struct Cli {
    /// Verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the models a provider offers for LLM or embedding use
    Models {
        /// Model kind to list
        #[arg(short, long, value_enum, default_value_t = ModelType::Llm)]
        kind: ModelType,

        /// Provider type (defaults to the configured one)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderType>,

        /// Provider endpoint (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,

        /// API key for OpenAI-compatible endpoints
        #[arg(long)]
        api_key: Option<String>,

        /// Show every raw model name with its classification
        #[arg(long, conflicts_with = "save")]
        all: bool,

        /// Store the selected model (and provider overrides) in config
        #[arg(long)]
        save: bool,
    },

    /// Browse the organization structure
    Org {
        #[command(subcommand)]
        org_command: OrgCommands,
    },

    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        prefs_command: PrefsCommands,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },
}

/// Organization subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OrgCommands {
    /// Print the organization tree
    Tree {
        /// Label language (defaults to the saved preference)
        #[arg(long, value_enum)]
        lang: Option<Language>,
    },
    /// Fetch stats, tree and positions together and summarize them
    Overview,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the effective configuration (secrets masked)
    Show,
}

/// Preference subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PrefsCommands {
    /// Print current preferences
    Show,
    /// Set a preference (theme, density, language)
    Set {
        /// Preference name
        key: String,
        /// New value
        value: String,
    },
}
