//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Category;

/// Scene-graph world model for the RayPainter editor
#[derive(Parser, Debug)]
#[command(name = "raypainter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Local config file (default: ./.raypainter.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the world tree
    Tree {
        /// Show each item's sibling order
        #[arg(short, long)]
        order: bool,
    },

    /// Drag an item onto a bin
    Move {
        /// Name of the dragged item
        name: String,
        /// Bin to drop onto
        #[arg(value_enum)]
        bin: BinArg,
        /// Row inside the bin (default: append)
        #[arg(short, long)]
        row: Option<usize>,
    },

    /// Rename an item
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },

    /// Remove an item from the world
    Remove {
        /// Name of the item
        name: String,
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
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a template config file
    Template,
    /// Show config file locations
    Path,
}

/// Drop target bins.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinArg {
    Lights,
    Shapes,
}

impl From<BinArg> for Category {
    fn from(bin: BinArg) -> Self {
        match bin {
            BinArg::Lights => Category::Light,
            BinArg::Shapes => Category::Shape,
        }
    }
}
