//! CLI module for toolshelf - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for rendering the page,
//! switching the theme and editing the catalog data.

pub mod commands;

pub use commands::Cli;
