//! # Pagecraft CLI
//!
//! Command-line host for persisted Pagecraft projects. Every edit goes
//! through [`EditorState`], so the CLI follows the same rules as an
//! interactive host.
//!
//! ## Usage
//!
//! ```bash
//! pagecraft new site
//! pagecraft add site heading --x 40 --y 20 --content "Hello"
//! pagecraft pages site
//! pagecraft export site --out site.html
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved data directory and command
//! - `run` - Opens the [`ProjectStore`] and dispatches the command

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pagecraft_core::{
    export_file_name, EditorState, ElementId, ElementKind, HtmlExporter, NewElement, ProjectStore,
};

/// Command-line arguments for pagecraft.
#[derive(Debug, Clone, Parser)]
#[command(name = "pagecraft")]
#[command(about = "Create, inspect, edit and export Pagecraft projects")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding project files
    #[arg(long, env = "PAGECRAFT_DATA_DIR", default_value = "./pagecraft-data")]
    pub data_dir: PathBuf,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create a project holding the starter page
    New {
        /// Project name
        project: String,
    },
    /// List the pages of a project
    Pages {
        /// Project name
        project: String,
    },
    /// Add an element to a page
    Add {
        /// Project name
        project: String,
        /// Element kind (container, heading, paragraph, button, image, divider, spacer, list, card)
        kind: String,
        /// Horizontal offset in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i64,
        /// Vertical offset in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i64,
        /// Element content; the kind default when omitted
        #[arg(long)]
        content: Option<String>,
        /// Page name; the saved active page when omitted
        #[arg(long)]
        page: Option<String>,
    },
    /// Export a page as HTML
    Export {
        /// Project name
        project: String,
        /// Page name; the saved active page when omitted
        #[arg(long)]
        page: Option<String>,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding project files.
    pub data_dir: PathBuf,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            command: args.command,
        }
    }
}

/// Run a command; returns the text to print.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the command fails.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    let store = ProjectStore::with_data_dir(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;

    match &config.command {
        Command::New { project } => {
            let path = new_project(&store, project)?;
            Ok(format!("Created project \"{project}\" at {}\n", path.display()))
        }
        Command::Pages { project } => list_pages(&store, project),
        Command::Add {
            project,
            kind,
            x,
            y,
            content,
            page,
        } => {
            let kind: ElementKind = kind.parse()?;
            let element = NewElement::new(kind)
                .with_content(content.clone().unwrap_or_default())
                .at(*x, *y);
            let id = add_element(&store, project, page.as_deref(), element)?;
            Ok(format!("Added {kind} element {id}\n"))
        }
        Command::Export { project, page, out } => {
            let (file_name, html) = export_page(&store, project, page.as_deref())?;
            match out {
                Some(path) => {
                    std::fs::write(path, &html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Exported page");
                    Ok(format!("Wrote {}\n", path.display()))
                }
                None => {
                    tracing::debug!(file = %file_name, "Exporting page to stdout");
                    Ok(html)
                }
            }
        }
    }
}

/// Create a project holding the starter page.
///
/// # Errors
///
/// Returns an error if the project already exists or cannot be saved.
pub fn new_project(store: &ProjectStore, project: &str) -> anyhow::Result<PathBuf> {
    if store.exists(project) {
        bail!("Project \"{project}\" already exists");
    }
    let editor = EditorState::new();
    Ok(editor.save_to(store, project)?)
}

/// Describe every page: name, element count, and which page is active.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded.
pub fn list_pages(store: &ProjectStore, project: &str) -> anyhow::Result<String> {
    let editor = open(store, project)?;
    let active = editor.active_page_id();
    Ok(editor
        .pages()
        .iter()
        .map(|page| {
            let marker = if page.id == active { "*" } else { " " };
            format!(
                "{marker} {} ({} elements) {}\n",
                page.name,
                page.elements.len(),
                page.id
            )
        })
        .collect())
}

/// Add an element to a page and save the project.
///
/// # Errors
///
/// Returns an error if the project or page cannot be found or the save fails.
pub fn add_element(
    store: &ProjectStore,
    project: &str,
    page: Option<&str>,
    element: NewElement,
) -> anyhow::Result<ElementId> {
    let mut editor = open(store, project)?;
    if let Some(name) = page {
        activate_by_name(&mut editor, name)?;
    }
    let id = editor.add_element(element);
    editor.save_to(store, project)?;
    Ok(id)
}

/// Render a page as HTML; returns the suggested file name and the document.
///
/// # Errors
///
/// Returns an error if the project or page cannot be found.
pub fn export_page(
    store: &ProjectStore,
    project: &str,
    page: Option<&str>,
) -> anyhow::Result<(String, String)> {
    let mut editor = open(store, project)?;
    if let Some(name) = page {
        activate_by_name(&mut editor, name)?;
    }
    let file_name = export_file_name(editor.active_page());
    let html = editor.export_page(editor.active_page_id(), &HtmlExporter::default())?;
    Ok((file_name, html))
}

fn open(store: &ProjectStore, project: &str) -> anyhow::Result<EditorState> {
    let mut editor = EditorState::blank();
    editor
        .load_from(store, project)
        .with_context(|| format!("Failed to open project \"{project}\""))?;
    Ok(editor)
}

fn activate_by_name(editor: &mut EditorState, name: &str) -> anyhow::Result<()> {
    let id = editor
        .page_by_name(name)
        .map(|page| page.id)
        .with_context(|| format!("No page named \"{name}\""))?;
    editor.set_active_page(id)?;
    Ok(())
}
