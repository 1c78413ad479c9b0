//
//  atlas-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod issue;
mod page;
mod project;
mod space;
mod version;

pub use completion::CompletionCommand;
pub use issue::IssueCommand;
pub use page::PageCommand;
pub use project::ProjectCommand;
pub use space::SpaceCommand;
pub use version::VersionCommand;

use clap::{Parser, Subcommand};

/// Atlas CLI - Work with your issue tracker and wiki from the command line
#[derive(Parser, Debug)]
#[command(
    name = "atlas",
    version,
    about = "Work with your issue tracker and wiki from the command line",
    long_about = "atlas is a CLI for a tracker/wiki site.\n\n\
                  It brings issues, versions, projects, pages, and spaces to your terminal,\n\
                  with a machine-readable JSON mode for scripting.",
    propagate_version = true,
    after_help = "Use 'atlas <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tracker issues
    #[command(visible_alias = "i")]
    Issue(IssueCommand),

    /// Manage project versions
    #[command(visible_alias = "ver")]
    Version(VersionCommand),

    /// Inspect tracker projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage wiki pages
    #[command(visible_alias = "pg")]
    Page(PageCommand),

    /// Inspect wiki spaces
    Space(SpaceCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),
}
