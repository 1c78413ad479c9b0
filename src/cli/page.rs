//
//  atlas-cli
//  cli/page.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Page commands
//!
//! This module provides commands for working with wiki pages: reading,
//! searching, creating, updating, labels, comments, attachments and the
//! page tree.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::wiki::models::{Attachment, Comment, Page, PageSummary, TreePage};
use crate::api::wiki::WikiApi;
use crate::api::{Fault, Transport};
use crate::config::Credentials;
use crate::output::{format_status, OutputFormat, OutputWriter, TextOutput};
use crate::util::{format_size, format_timestamp, parse_csv, truncate};

use super::GlobalOptions;

/// Manage wiki pages
#[derive(Args, Debug)]
pub struct PageCommand {
    #[command(subcommand)]
    pub command: PageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PageSubcommand {
    /// Show one page
    Get(GetArgs),

    /// List the pages of a space
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Search pages with a raw CQL query
    Search(SearchArgs),

    /// Create a new page
    Create(CreateArgs),

    /// Update the title or body of a page
    Update(UpdateArgs),

    /// Delete a page
    Delete(DeleteArgs),

    /// Add/remove labels on a page
    Label(LabelArgs),

    /// List the labels of a page
    Labels(LabelsArgs),

    /// List comments, or add one with --add
    Comment(CommentArgs),

    /// Upload a file as an attachment
    Attach(AttachArgs),

    /// List the attachments of a page
    Attachments(AttachmentsArgs),

    /// List the direct child pages
    Children(ChildrenArgs),

    /// Show the page tree below a page
    Tree(TreeArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Page id
    pub id: String,

    /// Include the page body in the output
    #[arg(long)]
    pub body: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Space key
    #[arg(long, short = 's')]
    pub space: String,

    /// Maximum number of pages to return (all pages when omitted)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// CQL query, forwarded verbatim (quote it in your shell)
    pub cql: String,

    /// Maximum number of pages to return (all pages when omitted)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Space key
    #[arg(long, short = 's')]
    pub space: String,

    /// Page title
    #[arg(long, short = 't')]
    pub title: String,

    /// Page body in storage format
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Read the page body from a file
    #[arg(long, value_name = "PATH", conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// Parent page id
    #[arg(long)]
    pub parent: Option<String>,

    /// Lifecycle status of the new page
    #[arg(long, value_parser = ["current", "draft"])]
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Page id
    pub id: String,

    /// New page title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New page body in storage format
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Read the new page body from a file
    #[arg(long, value_name = "PATH", conflicts_with = "body")]
    pub body_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Page id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Page id
    pub id: String,

    /// Comma-separated labels to add
    #[arg(long)]
    pub add: Option<String>,

    /// Comma-separated labels to remove
    #[arg(long)]
    pub remove: Option<String>,
}

#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// Page id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Page id
    pub id: String,

    /// Add this comment instead of listing existing ones
    #[arg(long, short = 'a', value_name = "TEXT")]
    pub add: Option<String>,
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Page id
    pub id: String,

    /// File to upload
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct AttachmentsArgs {
    /// Page id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ChildrenArgs {
    /// Page id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Root page id
    pub id: String,

    /// How many levels below the root to descend
    #[arg(long, short = 'd', default_value_t = 3)]
    pub depth: usize,
}

// Display types

impl TextOutput for PageSummary {
    fn print_text(&self, color: bool) {
        let id = format!("{:<12}", self.id);
        let id_display = if color {
            style(id).cyan().bold().to_string()
        } else {
            id
        };

        let status_display = if color {
            format!("{:<10}", format_status(&self.status, true))
        } else {
            format!("{:<10}", self.status)
        };

        println!(
            "{} {} {:<6} {}",
            id_display,
            status_display,
            format!("v{}", self.version),
            truncate(&self.title, 70)
        );
    }
}

impl TextOutput for Page {
    fn print_text(&self, color: bool) {
        let label = if color {
            style("Page").cyan().bold().to_string()
        } else {
            "Page".to_string()
        };
        println!("{} {}", label, self.id);
        println!();

        let title = if color {
            style(&self.title).bold().to_string()
        } else {
            self.title.clone()
        };
        println!("  {}", title);
        println!();

        println!("  Space:    {}", self.space_key);
        println!("  Status:   {}", format_status(&self.status, color));
        println!("  Version:  {}", self.version);
        if let Some(parent) = &self.parent_id {
            println!("  Parent:   {}", parent);
        }
        if !self.labels.is_empty() {
            println!("  Labels:   {}", self.labels.join(", "));
        }

        if let Some(body) = &self.body {
            println!();
            let heading = if color {
                style("Body").bold().to_string()
            } else {
                "Body".to_string()
            };
            println!("{}", heading);
            println!("{}", "-".repeat(60));
            println!("{}", body);
        }
    }
}

impl TextOutput for TreePage {
    fn print_text(&self, color: bool) {
        let id = format!("({})", self.id);
        let id_display = if color { style(id).dim().to_string() } else { id };
        println!("{}{} {}", "  ".repeat(self.depth), self.title, id_display);
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

impl TextOutput for Attachment {
    fn print_text(&self, _color: bool) {
        println!(
            "{:<12} {:<40} {:<24} {}",
            self.id,
            truncate(&self.filename, 40),
            self.media_type.as_deref().unwrap_or("-"),
            format_size(self.size)
        );
    }
}

impl PageCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PageSubcommand::Get(args) => self.get(args, global).await,
            PageSubcommand::List(args) => self.list(args, global).await,
            PageSubcommand::Search(args) => self.search(args, global).await,
            PageSubcommand::Create(args) => self.create(args, global).await,
            PageSubcommand::Update(args) => self.update(args, global).await,
            PageSubcommand::Delete(args) => self.delete(args, global).await,
            PageSubcommand::Label(args) => self.label(args, global).await,
            PageSubcommand::Labels(args) => self.labels(args, global).await,
            PageSubcommand::Comment(args) => self.comment(args, global).await,
            PageSubcommand::Attach(args) => self.attach(args, global).await,
            PageSubcommand::Attachments(args) => self.attachments(args, global).await,
            PageSubcommand::Children(args) => self.children(args, global).await,
            PageSubcommand::Tree(args) => self.tree(args, global).await,
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

    /// Show one page
    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let mut page = WikiApi::new(&transport).get_page(&args.id).await?;
        if !args.body {
            page.body = None;
        }

        let writer = OutputWriter::new(self.get_format(global));
        writer.write(&page)
    }

    /// List pages of a space
    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let rows = WikiApi::new(&transport)
            .list_pages(&args.space, args.limit)
            .await?;

        self.write_summaries(&rows, global)
    }

    /// Search with raw CQL
    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let rows = WikiApi::new(&transport)
            .search(&args.cql, args.limit)
            .await?;

        self.write_summaries(&rows, global)
    }

    fn write_summaries(&self, rows: &[PageSummary], global: &GlobalOptions) -> Result<()> {
        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(rows);
        }

        if rows.is_empty() {
            writer.write_info("No pages found.");
            return Ok(());
        }

        print_summary_header();
        writer.write_list(rows)?;
        println!();
        println!("Showing {} page(s)", rows.len());
        Ok(())
    }

    /// Create a page
    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let body = self
            .resolve_body(args.body.as_deref(), args.body_file.as_deref())
            .await?
            .ok_or_else(|| {
                Fault::InvalidArguments("pass the page body with --body or --body-file".to_string())
            })?;

        let transport = self.get_transport()?;
        let page = WikiApi::new(&transport)
            .create_page(
                &args.space,
                &args.title,
                &body,
                args.parent.as_deref(),
                args.status.as_deref(),
            )
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!("Created page {}", page.id));
            println!();
        }
        writer.write(&page)
    }

    /// Update title or body
    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let body = self
            .resolve_body(args.body.as_deref(), args.body_file.as_deref())
            .await?;
        if args.title.is_none() && body.is_none() {
            return Err(Fault::InvalidArguments(
                "nothing to update; pass --title, --body or --body-file".to_string(),
            )
            .into());
        }

        let transport = self.get_transport()?;
        let page = WikiApi::new(&transport)
            .update_page(&args.id, args.title.as_deref(), body.as_deref())
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if !global.json {
            writer.write_success(&format!(
                "Updated page {} to version {}",
                page.id, page.version
            ));
            println!();
        }
        writer.write(&page)
    }

    async fn resolve_body(
        &self,
        inline: Option<&str>,
        file: Option<&Path>,
    ) -> Result<Option<String>> {
        match (inline, file) {
            (Some(body), None) => Ok(Some(body.to_string())),
            (None, Some(path)) => {
                let body = tokio::fs::read_to_string(path).await.map_err(|e| {
                    Fault::InvalidArguments(format!("cannot read '{}': {}", path.display(), e))
                })?;
                Ok(Some(body))
            }
            (None, None) => Ok(None),
            // clap rejects the combination before we get here
            (Some(_), Some(_)) => Err(Fault::InvalidArguments(
                "--body and --body-file are mutually exclusive".to_string(),
            )
            .into()),
        }
    }

    /// Delete a page
    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        WikiApi::new(&transport).delete_page(&args.id).await?;

        if !global.json {
            let writer = OutputWriter::new(self.get_format(global));
            writer.write_success(&format!("Deleted page {}", args.id));
        }
        Ok(())
    }

    /// Add/remove labels
    async fn label(&self, args: &LabelArgs, global: &GlobalOptions) -> Result<()> {
        let add = args.add.as_deref().map(parse_csv).unwrap_or_default();
        let remove = args.remove.as_deref().map(parse_csv).unwrap_or_default();
        if add.is_empty() && remove.is_empty() {
            return Err(Fault::InvalidArguments(
                "nothing to change; pass --add and/or --remove".to_string(),
            )
            .into());
        }

        let transport = self.get_transport()?;
        let wiki = WikiApi::new(&transport);

        if !add.is_empty() {
            wiki.add_labels(&args.id, &add).await?;
        }
        for name in &remove {
            wiki.remove_label(&args.id, name).await?;
        }
        let labels = wiki.labels(&args.id).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&labels);
        }
        writer.write_success(&format!("Updated labels on page {}", args.id));
        if !labels.is_empty() {
            println!("Labels: {}", labels.join(", "));
        }
        Ok(())
    }

    /// List labels
    async fn labels(&self, args: &LabelsArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let labels = WikiApi::new(&transport).labels(&args.id).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&labels);
        }
        if labels.is_empty() {
            writer.write_info("No labels.");
            return Ok(());
        }
        writer.write_list(&labels)
    }

    /// List or add comments
    async fn comment(&self, args: &CommentArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let wiki = WikiApi::new(&transport);
        let writer = OutputWriter::new(self.get_format(global));

        if let Some(text) = &args.add {
            let comment = wiki.add_comment(&args.id, text).await?;
            if global.json {
                return writer.write(&comment);
            }
            writer.write_success(&format!("Comment added to page {}", args.id));
            return Ok(());
        }

        let comments = wiki.comments(&args.id).await?;
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
        let transport = self.get_transport()?;
        let attachment = WikiApi::new(&transport)
            .attach(&args.id, &args.path)
            .await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            writer.write(&attachment)
        } else {
            writer.write_success(&format!(
                "Attached {} ({}) to page {}",
                attachment.filename,
                format_size(attachment.size),
                args.id
            ));
            Ok(())
        }
    }

    /// List attachments
    async fn attachments(&self, args: &AttachmentsArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let attachments = WikiApi::new(&transport).attachments(&args.id).await?;

        let writer = OutputWriter::new(self.get_format(global));
        if global.json {
            return writer.write_list(&attachments);
        }
        if attachments.is_empty() {
            writer.write_info("No attachments.");
            return Ok(());
        }
        println!(
            "{} {} {} {}",
            style(format!("{:<12}", "ID")).bold(),
            style(format!("{:<40}", "FILENAME")).bold(),
            style(format!("{:<24}", "TYPE")).bold(),
            style("SIZE").bold()
        );
        println!("{}", "-".repeat(90));
        writer.write_list(&attachments)
    }

    /// List direct children
    async fn children(&self, args: &ChildrenArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let rows = WikiApi::new(&transport).children(&args.id, None).await?;

        self.write_summaries(&rows, global)
    }

    /// Show the page tree
    async fn tree(&self, args: &TreeArgs, global: &GlobalOptions) -> Result<()> {
        let transport = self.get_transport()?;
        let pages = WikiApi::new(&transport).tree(&args.id, args.depth).await?;

        let writer = OutputWriter::new(self.get_format(global));
        writer.write_list(&pages)
    }
}

fn print_summary_header() {
    println!();
    println!(
        "{} {} {} {}",
        style(format!("{:<12}", "ID")).bold(),
        style(format!("{:<10}", "STATUS")).bold(),
        style(format!("{:<6}", "VER")).bold(),
        style("TITLE").bold()
    );
    println!("{}", "-".repeat(90));
}
