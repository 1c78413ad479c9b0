//
//  atlas-cli
//  cli/space.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Space commands
//!
//! Read-only commands for browsing wiki spaces.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::wiki::models::Space;
use crate::api::wiki::WikiApi;
use crate::api::Transport;
use crate::config::Credentials;
use crate::output::{
    print_field, print_header, OutputFormat, OutputWriter, TableBuilder, TextOutput,
};
use crate::util::truncate;

use super::GlobalOptions;

/// Browse wiki spaces
#[derive(Args, Debug)]
pub struct SpaceCommand {
    #[command(subcommand)]
    pub command: SpaceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SpaceSubcommand {
    /// List all visible spaces
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one space
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of spaces to return (all when omitted)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Space key
    pub key: String,
}

// Display types

impl TextOutput for Space {
    fn print_text(&self, color: bool) {
        print_header(&format!("Space {}", self.key));
        print_field("Name", &self.name, color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
    }
}

impl SpaceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SpaceSubcommand::List(args) => self.list(args, global).await,
            SpaceSubcommand::Get(args) => self.get(args, global).await,
        }
    }

    fn get_format(&self, global: &GlobalOptions) -> OutputFormat {
        if global.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    fn get_transport(&self) -> Result<Transport> {
        let credentials = Credentials::resolve()?;
        Ok(Transport::new(credentials)?)
    }

    /// List visible spaces
    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let spaces = WikiApi::new(&transport).spaces(args.limit).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&spaces);
        }

        if spaces.is_empty() {
            writer.write_info("No spaces found.");
            return Ok(());
        }

        let mut table = TableBuilder::new()
            .color(writer.color_enabled())
            .headers(["KEY", "NAME", "DESCRIPTION"]);
        for space in &spaces {
            table = table.row([
                space.key.clone(),
                space.name.clone(),
                truncate(space.description.as_deref().unwrap_or("-"), 60),
            ]);
        }
        table.print();
        Ok(())
    }

    /// Show one space
    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let space = WikiApi::new(&transport).space(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        writer.write(&space)
    }
}
