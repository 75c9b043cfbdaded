//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - render: build the catalog page
//! - theme: show or change the persisted theme
//! - list: list catalog categories
//! - add-category / add-tool: edit the data documents

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use toolshelf::catalog::BaseUrlMode;

/// toolshelf - renders a categorized tool catalog page
#[derive(Parser, Debug)]
#[command(name = "toolshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the catalog page (the default)
    Render {
        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory or base URL holding the data documents
        #[arg(short, long)]
        source: Option<String>,

        /// How hosted-tool links are built
        #[arg(short, long, value_enum)]
        mode: Option<BaseUrlMode>,

        /// Base URL for hosted-tool links in absolute mode
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show the theme preference, or set it (light, dark, auto)
    Theme {
        /// Theme to select
        theme: Option<String>,
    },

    /// List categories in the catalog
    List {
        /// Directory or base URL holding the data documents
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Add an empty category
    AddCategory {
        /// Category name
        name: String,

        /// Bootstrap icon class, e.g. bi-gear
        #[arg(short, long)]
        icon: String,
    },

    /// Add a tool to an existing category
    AddTool {
        /// Category to add the tool to
        #[arg(long)]
        category: String,

        /// Tool name
        #[arg(short, long)]
        name: String,

        /// Short description
        #[arg(short, long)]
        description: String,

        /// Relative URL (default: tools/<category>/<name>.html)
        #[arg(short, long)]
        url: Option<String>,

        /// Banner image path (default: images/<category>/<page>.png)
        #[arg(short, long)]
        banner: Option<String>,
    },
}
