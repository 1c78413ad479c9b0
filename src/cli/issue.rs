//
//  atlas-cli
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Issue commands
//!
//! This module provides commands for working with tracker issues: reading,
//! searching, creating, updating, workflow transitions, comments, links,
//! labels and attachments.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use url::Url;

use crate::api::tracker::models::{
    Attachment, Comment, Issue, IssueFieldsPayload, IssueRequest, IssueSummary, KeyPayload,
    NamePayload, RemoteLink, TimeTrackingPayload, Transition,
};
use crate::api::tracker::TrackerApi;
use crate::api::{Fault, Transport};
use crate::config::Credentials;
use crate::output::{format_status, print_field, OutputFormat, OutputWriter, TextOutput};
use crate::util::{
    format_size, format_timestamp, parse_csv, truncate, validate_estimate, validate_issue_key,
    validate_project_key,
};

use super::GlobalOptions;

/// Manage tracker issues
#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// Show one issue in full
    Get(GetArgs),

    /// List the issues of a project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Search issues with a raw JQL query
    Search(SearchArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// Update fields of an issue
    Update(UpdateArgs),

    /// Delete an issue
    Delete(DeleteArgs),

    /// Assign or unassign an issue
    Assign(AssignArgs),

    /// Move an issue through its workflow
    Transition(TransitionArgs),

    /// List the transitions available on an issue
    Transitions(TransitionsArgs),

    /// List comments, or add one with --add
    Comment(CommentArgs),

    /// Upload a file as an attachment
    Attach(AttachArgs),

    /// Link this issue to another
    Link(LinkArgs),

    /// Remove the link between two issues
    Unlink(UnlinkArgs),

    /// Add/remove labels on one or more issues
    Label(LabelArgs),

    /// Manage remote web links
    RemoteLink(RemoteLinkArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Issue key (e.g. PROJ-123)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,

    /// Maximum number of issues to return (all pages when omitted)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JQL query, forwarded verbatim (quote it in your shell)
    pub jql: String,

    /// Maximum number of issues to return (all pages when omitted)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,

    /// Issue type name (e.g. Bug, Task)
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub issue_type: String,

    /// One-line summary
    #[arg(long, short = 's')]
    pub summary: String,

    /// Long-form description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Priority name
    #[arg(long)]
    pub priority: Option<String>,

    /// Comma-separated labels
    #[arg(long)]
    pub labels: Option<String>,

    /// Parent issue key
    #[arg(long)]
    pub parent: Option<String>,

    /// Original estimate in duration notation (e.g. "3d 4h")
    #[arg(long)]
    pub estimate: Option<String>,

    /// Comma-separated fix version names
    #[arg(long)]
    pub fix_version: Option<String>,

    /// Comma-separated affected version names
    #[arg(long)]
    pub affected_version: Option<String>,

    /// Assignee identity
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Issue key
    pub key: String,

    /// One-line summary
    #[arg(long, short = 's')]
    pub summary: Option<String>,

    /// Long-form description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Priority name
    #[arg(long)]
    pub priority: Option<String>,

    /// Comma-separated labels; an empty string clears them
    #[arg(long)]
    pub labels: Option<String>,

    /// Parent issue key
    #[arg(long)]
    pub parent: Option<String>,

    /// Original estimate in duration notation (e.g. "3d 4h")
    #[arg(long)]
    pub estimate: Option<String>,

    /// Comma-separated fix version names; an empty string clears them
    #[arg(long)]
    pub fix_version: Option<String>,

    /// Comma-separated affected version names; an empty string clears them
    #[arg(long)]
    pub affected_version: Option<String>,

    /// Assignee identity
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Issue key
    pub key: String,

    /// Assignee identity, or "none" to unassign
    #[arg(long)]
    pub to: String,
}

#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Issue key
    pub key: String,

    /// Target transition or status name (case-insensitive)
    #[arg(long)]
    pub to: String,
}

#[derive(Args, Debug)]
pub struct TransitionsArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue key
    pub key: String,

    /// Add this comment instead of listing existing ones
    #[arg(long, short = 'a', value_name = "TEXT")]
    pub add: Option<String>,
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Issue key
    pub key: String,

    /// File to upload
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Source issue key (takes the outward side of the relation)
    pub key: String,

    /// Target issue key
    #[arg(long)]
    pub to: String,

    /// Link type name
    #[arg(long = "type", default_value = "Blocks", value_name = "NAME")]
    pub link_type: String,
}

#[derive(Args, Debug)]
pub struct UnlinkArgs {
    /// Issue key
    pub key: String,

    /// The issue on the other side of the link
    #[arg(long)]
    pub from: String,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Issue keys to update
    #[arg(required = true, num_args = 1..)]
    pub keys: Vec<String>,

    /// Comma-separated labels to add
    #[arg(long)]
    pub add: Option<String>,

    /// Comma-separated labels to remove
    #[arg(long)]
    pub remove: Option<String>,
}

/// Manage remote web links
#[derive(Args, Debug)]
pub struct RemoteLinkArgs {
    #[command(subcommand)]
    pub command: RemoteLinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RemoteLinkSubcommand {
    /// Attach a web link to an issue
    Add(RemoteLinkAddArgs),

    /// List the web links on an issue
    List(RemoteLinkListArgs),

    /// Remove a web link by id
    Remove(RemoteLinkRemoveArgs),
}

#[derive(Args, Debug)]
pub struct RemoteLinkAddArgs {
    /// Issue key
    pub key: String,

    /// Target URL
    #[arg(long)]
    pub url: String,

    /// Display title
    #[arg(long)]
    pub title: String,
}

#[derive(Args, Debug)]
pub struct RemoteLinkListArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct RemoteLinkRemoveArgs {
    /// Issue key
    pub key: String,

    /// Remote link id (see remote-link list)
    #[arg(long)]
    pub id: i64,
}

// Display implementations

impl TextOutput for IssueSummary {
    fn print_text(&self, color: bool) {
        let key = format!("{:<12}", self.key);
        let key_display = if color {
            style(key).cyan().bold().to_string()
        } else {
            key
        };

        let status_display = if color {
            format!("{:<14}", format_status(&self.status, true))
        } else {
            format!("{:<14}", self.status)
        };

        println!(
            "{} {:<10} {} {:<10} {:<16} {}",
            key_display,
            truncate(&self.issue_type, 10),
            status_display,
            self.priority.as_deref().unwrap_or("-"),
            truncate(self.assignee.as_deref().unwrap_or("-"), 16),
            truncate(&self.summary, 60)
        );
    }
}

impl TextOutput for Issue {
    fn print_text(&self, color: bool) {
        let label = if color {
            style("Issue").cyan().bold().to_string()
        } else {
            "Issue".to_string()
        };
        println!("{} {}", label, self.key);
        println!();

        let summary = if color {
            style(&self.summary).bold().to_string()
        } else {
            self.summary.clone()
        };
        println!("  {}", summary);
        println!();

        println!("  Type:      {}", self.issue_type);
        println!("  Status:    {}", format_status(&self.status, color));
        println!("  Priority:  {}", self.priority.as_deref().unwrap_or("-"));
        println!(
            "  Assignee:  {}",
            self.assignee.as_deref().unwrap_or("Unassigned")
        );
        if !self.labels.is_empty() {
            println!("  Labels:    {}", self.labels.join(", "));
        }
        if let Some(parent) = &self.parent {
            println!("  Parent:    {}", parent);
        }
        if self.estimate.is_some() || self.remaining.is_some() {
            println!(
                "  Estimate:  {} ({} remaining)",
                self.estimate.as_deref().unwrap_or("-"),
                self.remaining.as_deref().unwrap_or("-")
            );
        }
        if !self.fix_versions.is_empty() {
            println!("  Fix versions:      {}", self.fix_versions.join(", "));
        }
        if !self.affected_versions.is_empty() {
            println!("  Affected versions: {}", self.affected_versions.join(", "));
        }

        if let Some(description) = &self.description {
            println!();
            print_section("Description", color);
            println!("{}", description);
        }

        if !self.links.is_empty() {
            println!();
            print_section("Links", color);
            for link in &self.links {
                println!("  {:<12} {:<8} {}", link.link_type, link.direction, link.key);
            }
        }

        if !self.remote_links.is_empty() {
            println!();
            print_section("Remote links", color);
            for link in &self.remote_links {
                link.print_text(color);
            }
        }

        if !self.comments.is_empty() {
            println!();
            print_section("Comments", color);
            for comment in &self.comments {
                comment.print_text(color);
            }
        }
    }
}

impl TextOutput for Comment {
    fn print_text(&self, color: bool) {
        let author = self.author.as_deref().unwrap_or("someone");
        let author_display = if color {
            style(author).cyan().bold().to_string()
        } else {
            author.to_string()
        };
        let created = self
            .created
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());

        println!("{} commented on {}:", author_display, created);
        for line in self.body.lines() {
            println!("  {}", line);
        }
        println!();
    }
}

impl TextOutput for Transition {
    fn print_text(&self, _color: bool) {
        println!(
            "{:<8} {:<28} {}",
            self.id,
            self.name,
            self.to.as_deref().unwrap_or("-")
        );
    }
}

impl TextOutput for RemoteLink {
    fn print_text(&self, _color: bool) {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10} {:<30} {}",
            id,
            truncate(self.title.as_deref().unwrap_or("-"), 30),
            self.url
        );
    }
}

impl TextOutput for Attachment {
    fn print_text(&self, color: bool) {
        print_field("Filename", &self.filename, color);
        print_field("Type", self.mime_type.as_deref().unwrap_or("-"), color);
        print_field("Size", &format_size(self.size), color);
    }
}

/// One row of the bulk label report.
#[derive(Debug, Serialize)]
struct LabelResult {
    key: String,
    updated: bool,
    error: Option<String>,
}

impl TextOutput for LabelResult {
    fn print_text(&self, color: bool) {
        if self.updated {
            let mark = if color {
                style("✓").green().bold().to_string()
            } else {
                "✓".to_string()
            };
            println!("{} {}", mark, self.key);
        } else {
            println!("{}: {}", self.key, self.error.as_deref().unwrap_or("failed"));
        }
    }
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            IssueSubcommand::Get(args) => self.get(args, global).await,
            IssueSubcommand::List(args) => self.list(args, global).await,
            IssueSubcommand::Search(args) => self.search(args, global).await,
            IssueSubcommand::Create(args) => self.create(args, global).await,
            IssueSubcommand::Update(args) => self.update(args, global).await,
            IssueSubcommand::Delete(args) => self.delete(args, global).await,
            IssueSubcommand::Assign(args) => self.assign(args, global).await,
            IssueSubcommand::Transition(args) => self.transition(args, global).await,
            IssueSubcommand::Transitions(args) => self.transitions(args, global).await,
            IssueSubcommand::Comment(args) => self.comment(args, global).await,
            IssueSubcommand::Attach(args) => self.attach(args, global).await,
            IssueSubcommand::Link(args) => self.link(args, global).await,
            IssueSubcommand::Unlink(args) => self.unlink(args, global).await,
            IssueSubcommand::Label(args) => self.label(args, global).await,
            IssueSubcommand::RemoteLink(args) => match &args.command {
                RemoteLinkSubcommand::Add(args) => self.remote_link_add(args, global).await,
                RemoteLinkSubcommand::List(args) => self.remote_link_list(args, global).await,
                RemoteLinkSubcommand::Remove(args) => self.remote_link_remove(args, global).await,
            },
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

    /// Show one issue
    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let issue = tracker.get_issue(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        writer.write(&issue)
    }

    /// List issues of a project
    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.project)?;

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let rows = tracker.list_issues(&args.project, args.limit).await?;

        self.write_summaries(&rows, global)
    }

    /// Search with raw JQL
    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let rows = tracker.search(&args.jql, args.limit).await?;

        self.write_summaries(&rows, global)
    }

    fn write_summaries(&self, rows: &[IssueSummary], global: &GlobalOptions) -> Result<()> {
        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(rows);
        }

        if rows.is_empty() {
            writer.write_info("No issues found.");
            return Ok(());
        }

        print_summary_header();
        writer.write_list(rows)?;
        println!();
        println!("Showing {} issue(s)", rows.len());
        Ok(())
    }

    /// Create an issue
    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        validate_project_key(&args.project)?;
        if let Some(parent) = &args.parent {
            validate_issue_key(parent)?;
        }
        if let Some(estimate) = &args.estimate {
            validate_estimate(estimate)?;
        }

        let fields = IssueFieldsPayload {
            project: Some(KeyPayload {
                key: args.project.clone(),
            }),
            issuetype: Some(NamePayload::new(&args.issue_type)),
            summary: Some(args.summary.clone()),
            description: args.description.clone(),
            priority: args.priority.as_deref().map(NamePayload::new),
            labels: args.labels.as_deref().map(parse_csv),
            parent: args.parent.clone().map(|key| KeyPayload { key }),
            timetracking: args
                .estimate
                .clone()
                .map(|original_estimate| TimeTrackingPayload { original_estimate }),
            fix_versions: args.fix_version.as_deref().map(version_names),
            versions: args.affected_version.as_deref().map(version_names),
            assignee: args.assignee.as_deref().map(NamePayload::new),
        };

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let key = tracker.create_issue(&IssueRequest { fields }).await?;
        let issue = tracker.get_issue(&key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!("Created issue {}", key));
            println!();
        }
        writer.write(&issue)
    }

    /// Update issue fields
    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;
        if let Some(parent) = &args.parent {
            validate_issue_key(parent)?;
        }
        if let Some(estimate) = &args.estimate {
            validate_estimate(estimate)?;
        }

        let fields = IssueFieldsPayload {
            project: None,
            issuetype: None,
            summary: args.summary.clone(),
            description: args.description.clone(),
            priority: args.priority.as_deref().map(NamePayload::new),
            labels: args.labels.as_deref().map(parse_csv),
            parent: args.parent.clone().map(|key| KeyPayload { key }),
            timetracking: args
                .estimate
                .clone()
                .map(|original_estimate| TimeTrackingPayload { original_estimate }),
            fix_versions: args.fix_version.as_deref().map(version_names),
            versions: args.affected_version.as_deref().map(version_names),
            assignee: args.assignee.as_deref().map(NamePayload::new),
        };

        if fields.is_empty() {
            return Err(Fault::InvalidArguments(
                "nothing to update; pass at least one field flag".to_string(),
            )
            .into());
        }

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        tracker.update_issue(&args.key, &IssueRequest { fields }).await?;
        let issue = tracker.get_issue(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!("Updated issue {}", args.key));
            println!();
        }
        writer.write(&issue)
    }

    /// Delete an issue
    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        TrackerApi::new(&transport).delete_issue(&args.key).await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!("Deleted issue {}", args.key));
        }
        Ok(())
    }

    /// Assign or unassign
    async fn assign(&self, args: &AssignArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let assignee = if args.to.eq_ignore_ascii_case("none") {
            NamePayload::null()
        } else {
            NamePayload::new(&args.to)
        };

        let transport = self.get_transport()?;
        TrackerApi::new(&transport)
            .assign_issue(&args.key, &assignee)
            .await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            match &assignee.name {
                Some(name) => writer.write_success(&format!("Assigned {} to {}", args.key, name)),
                None => writer.write_success(&format!("Unassigned {}", args.key)),
            }
        }
        Ok(())
    }

    /// Execute a workflow transition
    async fn transition(&self, args: &TransitionArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let transition = TrackerApi::new(&transport)
            .transition_issue(&args.key, &args.to)
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            writer.write(&transition)
        } else {
            let target = transition.to.as_deref().unwrap_or(&transition.name);
            writer.write_success(&format!("{} moved to {}", args.key, target));
            Ok(())
        }
    }

    /// List available transitions
    async fn transitions(&self, args: &TransitionsArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let transitions = TrackerApi::new(&transport).transitions(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&transitions);
        }

        if transitions.is_empty() {
            writer.write_info("No transitions available.");
            return Ok(());
        }

        println!(
            "{} {} {}",
            style(format!("{:<8}", "ID")).bold(),
            style(format!("{:<28}", "NAME")).bold(),
            style("TARGET").bold()
        );
        println!("{}", "-".repeat(50));
        writer.write_list(&transitions)
    }

    /// List or add comments
    async fn comment(&self, args: &CommentArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let writer = OutputWriter::new(self.get_format(global));

        if let Some(text) = &args.add {
            let comment = tracker.add_comment(&args.key, text).await?;
            if global.json {
                return writer.write(&comment);
            }
            writer.write_success(&format!("Comment added to {}", args.key));
            return Ok(());
        }

        let comments = tracker.comments(&args.key).await?;
        if global.json {
            return writer.write_list(&comments);
        }
        if comments.is_empty() {
            writer.write_info("No comments.");
            return Ok(());
        }
        writer.write_list(&comments)
    }

    /// Upload an attachment
    async fn attach(&self, args: &AttachArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let attachment = TrackerApi::new(&transport)
            .attach(&args.key, &args.path)
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            writer.write(&attachment)
        } else {
            writer.write_success(&format!(
                "Attached {} ({}) to {}",
                attachment.filename,
                format_size(attachment.size),
                args.key
            ));
            Ok(())
        }
    }

    /// Link two issues
    async fn link(&self, args: &LinkArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;
        validate_issue_key(&args.to)?;

        let transport = self.get_transport()?;
        TrackerApi::new(&transport)
            .link_issues(&args.key, &args.to, &args.link_type)
            .await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!(
                "Linked {} to {} ({})",
                args.key, args.to, args.link_type
            ));
        }
        Ok(())
    }

    /// Remove an issue link
    async fn unlink(&self, args: &UnlinkArgs, global: &GlobalOptions) -> Result<()> {
        validate_issue_key(&args.key)?;
        validate_issue_key(&args.from)?;

        let transport = self.get_transport()?;
        TrackerApi::new(&transport)
            .unlink_issues(&args.key, &args.from)
            .await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!(
                "Removed link between {} and {}",
                args.key, args.from
            ));
        }
        Ok(())
    }

    /// Bulk label update across issues
    ///
    /// Keys are processed in order; a failure on one key does not roll back
    /// the others. Any failure makes the whole command exit non-zero.
    async fn label(&self, args: &LabelArgs, global: &GlobalOptions) -> Result<()> {
        let add = args.add.as_deref().map(parse_csv).unwrap_or_default();
        let remove = args.remove.as_deref().map(parse_csv).unwrap_or_default();
        if add.is_empty() && remove.is_empty() {
            return Err(Fault::InvalidArguments(
                "nothing to change; pass --add and/or --remove".to_string(),
            )
            .into());
        }
        for key in &args.keys {
            validate_issue_key(key)?;
        }

        let transport = self.get_transport()?;
        let tracker = TrackerApi::new(&transport);
        let writer = OutputWriter::new(self.get_format(global));

        let mut report: Vec<LabelResult> = Vec::new();
        let mut failed: Vec<String> = Vec::new();
        for key in &args.keys {
            match tracker.update_labels(key, add.clone(), remove.clone()).await {
                Ok(()) => {
                    report.push(LabelResult {
                        key: key.clone(),
                        updated: true,
                        error: None,
                    });
                }
                Err(fault) => {
                    failed.push(key.clone());
                    report.push(LabelResult {
                        key: key.clone(),
                        updated: false,
                        error: Some(fault.to_string()),
                    });
                }
            }
        }

        // The per-key report is printed in both modes, then any failure
        // still fails the whole command
        if global.json {
            writer.write_list(&report)?;
        } else {
            for row in &report {
                row.print_text(writer.color_enabled());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Fault::Unknown(format!("label update failed for {}", failed.join(", "))).into())
        }
    }

    /// Attach a remote web link
    async fn remote_link_add(
        &self,
        args: &RemoteLinkAddArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        validate_issue_key(&args.key)?;
        Url::parse(&args.url)
            .map_err(|_| Fault::InvalidArguments(format!("invalid URL: {}", args.url)))?;

        let transport = self.get_transport()?;
        let id = TrackerApi::new(&transport)
            .add_remote_link(&args.key, &args.url, &args.title)
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            writer.write(&RemoteLink {
                id,
                url: args.url.clone(),
                title: Some(args.title.clone()),
            })
        } else {
            writer.write_success(&format!("Added remote link to {}", args.key));
            Ok(())
        }
    }

    /// List remote web links
    async fn remote_link_list(
        &self,
        args: &RemoteLinkListArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        let links = TrackerApi::new(&transport).remote_links(&args.key).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&links);
        }
        if links.is_empty() {
            writer.write_info("No remote links.");
            return Ok(());
        }
        println!(
            "  {} {} {}",
            style(format!("{:<10}", "ID")).bold(),
            style(format!("{:<30}", "TITLE")).bold(),
            style("URL").bold()
        );
        writer.write_list(&links)
    }

    /// Remove a remote web link
    async fn remote_link_remove(
        &self,
        args: &RemoteLinkRemoveArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        validate_issue_key(&args.key)?;

        let transport = self.get_transport()?;
        TrackerApi::new(&transport)
            .remove_remote_link(&args.key, args.id)
            .await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!("Removed remote link {} from {}", args.id, args.key));
        }
        Ok(())
    }
}

fn print_summary_header() {
    println!();
    println!(
        "{} {} {} {} {} {}",
        style(format!("{:<12}", "KEY")).bold(),
        style(format!("{:<10}", "TYPE")).bold(),
        style(format!("{:<14}", "STATUS")).bold(),
        style(format!("{:<10}", "PRIORITY")).bold(),
        style(format!("{:<16}", "ASSIGNEE")).bold(),
        style("SUMMARY").bold()
    );
    println!("{}", "-".repeat(90));
}

fn print_section(title: &str, color: bool) {
    let heading = if color {
        style(title).bold().to_string()
    } else {
        title.to_string()
    };
    println!("{}", heading);
    println!("{}", "-".repeat(60));
}

fn version_names(raw: &str) -> Vec<NamePayload> {
    parse_csv(raw).into_iter().map(NamePayload::new).collect()
}
