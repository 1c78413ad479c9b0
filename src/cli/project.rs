//
//  atlas-cli
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! Read-only commands for browsing tracker projects and their configured
//! issue types.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::tracker::models::{IssueType, Project};
use crate::api::tracker::TrackerApi;
use crate::api::Transport;
use crate::config::Credentials;
use crate::output::{
    print_field, print_header, OutputFormat, OutputWriter, TableBuilder, TextOutput,
};
use crate::util::{truncate, validate_project_key};

use super::GlobalOptions;

/// Browse tracker projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List all visible projects
    #[command(visible_alias = "ls")]
    List,

    /// Show one project
    Get(GetArgs),

    /// List the issue types configured on a project
    Types(TypesArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Project key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Project key
    pub key: String,
}

// Display types

impl TextOutput for Project {
    fn print_text(&self, color: bool) {
        print_header(&format!("Project {}", self.key));
        print_field("Name", &self.name, color);
        print_field("Lead", self.lead.as_deref().unwrap_or("-"), color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
    }
}

impl TextOutput for IssueType {
    fn print_text(&self, _color: bool) {
        println!(
            "{:<8} {:<20} {:<8} {}",
            self.id,
            self.name,
            if self.subtask { "yes" } else { "no" },
            truncate(self.description.as_deref().unwrap_or("-"), 48)
        );
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List => self.list(global).await,
            ProjectSubcommand::Get(args) => self.get(args, global).await,
            ProjectSubcommand::Types(args) => self.types(args, global).await,
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

    /// List all visible projects
    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let projects = TrackerApi::new(&transport).projects().await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&projects);
        }

        if projects.is_empty() {
            writer.write_info("No projects found.");
            return Ok(());
        }

        let mut table = TableBuilder::new()
            .color(writer.color_enabled())
            .headers(["KEY", "NAME", "LEAD"]);
        for project in &projects {
            table = table.row([
                project.key.clone(),
                project.name.clone(),
                project.lead.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.print();
        Ok(())
    }

    /// Show one project
    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.key)?;

        let transport = self.get_transport()?;
        let project = TrackerApi::new(&transport).project(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        writer.write(&project)
    }

    /// List the issue types of a project
    async fn types(&self, args: &TypesArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.key)?;

        let transport = self.get_transport()?;
        let types = TrackerApi::new(&transport).issue_types(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&types);
        }

        if types.is_empty() {
            writer.write_info("No issue types found.");
            return Ok(());
        }

        println!(
            "{} {} {} {}",
            style(format!("{:<8}", "ID")).bold(),
            style(format!("{:<20}", "NAME")).bold(),
            style(format!("{:<8}", "SUBTASK")).bold(),
            style("DESCRIPTION").bold()
        );
        println!("{}", "-".repeat(60));
        writer.write_list(&types)
    }
}
