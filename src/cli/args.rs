//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::application::ToggleEvent;

/// Hierarchical menu checkbox tree: cascading selection over a menu hierarchy
#[derive(Parser, Debug)]
#[command(name = "checktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Menu source: JSON file, "-" for stdin, or http(s) URL (overrides config)
    #[arg(short, long, global = true, env = "CHECKTREE_SOURCE", value_hint = ValueHint::AnyPath)]
    pub source: Option<String>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Print shell completions for the given shell
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the menu after applying toggle events in order
    Show {
        /// Toggle event: subtree:<id> (s:<id>) or child:<id> (c:<id>)
        #[arg(short, long = "toggle", value_parser = parse_event)]
        toggles: Vec<ToggleEvent>,

        /// Show node ids next to labels
        #[arg(long)]
        ids: bool,
    },

    /// List a node and all of its descendants in pre-order
    Descendants {
        /// Node id
        id: String,
    },

    /// Toggle checkboxes interactively (reads commands from stdin)
    Interactive {
        /// Show node ids next to labels
        #[arg(long)]
        ids: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file path
    Path,
}

fn parse_event(s: &str) -> Result<ToggleEvent, String> {
    s.parse::<ToggleEvent>().map_err(|e| e.to_string())
}
