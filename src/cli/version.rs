//
//  atlas-cli
//  cli/version.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Version commands
//!
//! Commands for managing project release versions: listing, inspecting,
//! creating, updating and deleting them.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::api::tracker::models::{Version, VersionRequest};
use crate::api::tracker::TrackerApi;
use crate::api::{Fault, Transport};
use crate::config::Credentials;
use crate::output::{
    format_bool, print_field, print_header, OutputFormat, OutputWriter, TableBuilder, TextOutput,
};
use crate::util::validate_project_key;

use super::GlobalOptions;

/// Manage project release versions
#[derive(Args, Debug)]
pub struct VersionCommand {
    #[command(subcommand)]
    pub command: VersionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VersionSubcommand {
    /// List the versions of a project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one version
    Get(GetArgs),

    /// Create a version
    Create(CreateArgs),

    /// Update fields of a version
    Update(UpdateArgs),

    /// Delete a version
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Version id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,

    /// Version name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Free-form description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    pub release_date: Option<NaiveDate>,

    /// Mark the version released on creation
    #[arg(long)]
    pub released: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Version id
    pub id: String,

    /// Version name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Free-form description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    pub release_date: Option<NaiveDate>,

    /// Released flag
    #[arg(long, value_name = "BOOL")]
    pub released: Option<bool>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Version id
    pub id: String,

    /// Move fix-version references of dependent issues to this version id
    #[arg(long, value_name = "ID")]
    pub move_fix_issues_to: Option<String>,

    /// Move affected-version references of dependent issues to this version id
    #[arg(long, value_name = "ID")]
    pub move_affected_issues_to: Option<String>,
}

// Display types

impl TextOutput for Version {
    fn print_text(&self, color: bool) {
        print_header(&format!("Version {}", self.name));
        print_field("ID", &self.id, color);
        print_field("Released", &format_bool(self.released, color), color);
        print_field(
            "Start date",
            self.start_date.as_deref().unwrap_or("-"),
            color,
        );
        print_field(
            "Release date",
            self.release_date.as_deref().unwrap_or("-"),
            color,
        );
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
    }
}

impl VersionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            VersionSubcommand::List(args) => self.list(args, global).await,
            VersionSubcommand::Get(args) => self.get(args, global).await,
            VersionSubcommand::Create(args) => self.create(args, global).await,
            VersionSubcommand::Update(args) => self.update(args, global).await,
            VersionSubcommand::Delete(args) => self.delete(args, global).await,
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

    /// List versions of a project
    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.project)?;

        let transport = self.get_transport()?;
        let versions = TrackerApi::new(&transport).versions(&args.project).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&versions);
        }

        if versions.is_empty() {
            writer.write_info("No versions found.");
            return Ok(());
        }

        let color = writer.color_enabled();
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "NAME", "RELEASED", "START DATE", "RELEASE DATE"]);
        for version in &versions {
            table = table.row([
                version.id.clone(),
                version.name.clone(),
                format_bool(version.released, color),
                version.start_date.clone().unwrap_or_else(|| "-".to_string()),
                version
                    .release_date
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.print();
        Ok(())
    }

    /// Show one version
    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let version = TrackerApi::new(&transport).version(&args.id).await?;

        let writer = OutputWriter::new(self.get_format(global));
        writer.write(&version)
    }

    /// Create a version
    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.project)?;

        let request = VersionRequest {
            name: Some(args.name.clone()),
            project: Some(args.project.clone()),
            description: args.description.clone(),
            start_date: args.start_date.map(|d| d.to_string()),
            release_date: args.release_date.map(|d| d.to_string()),
            released: args.released.then_some(true),
        };

        let transport = self.get_transport()?;
        let version = TrackerApi::new(&transport).create_version(&request).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!("Created version {}", version.name));
            println!();
        }
        writer.write(&version)
    }

    /// Update version fields
    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let request = VersionRequest {
            name: args.name.clone(),
            project: None,
            description: args.description.clone(),
            start_date: args.start_date.map(|d| d.to_string()),
            release_date: args.release_date.map(|d| d.to_string()),
            released: args.released,
        };

        if request.name.is_none()
            && request.description.is_none()
            && request.start_date.is_none()
            && request.release_date.is_none()
            && request.released.is_none()
        {
            return Err(Fault::InvalidArguments(
                "nothing to update; pass at least one field flag".to_string(),
            )
            .into());
        }

        let transport = self.get_transport()?;
        let version = TrackerApi::new(&transport)
            .update_version(&args.id, &request)
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!("Updated version {}", version.name));
            println!();
        }
        writer.write(&version)
    }

    /// Delete a version
    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        TrackerApi::new(&transport)
            .delete_version(
                &args.id,
                args.move_fix_issues_to.as_deref(),
                args.move_affected_issues_to.as_deref(),
            )
            .await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!("Deleted version {}", args.id));
        }
        Ok(())
    }
}
