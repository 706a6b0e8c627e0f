//! # mastery
//!
//! Browse the Tech Mastery guides from the terminal.
//!
//! ## Usage
//!
//! Launch the interactive browser:
//! ```sh
//! mastery
//! ```
//!
//! Show the guide tree:
//! ```sh
//! mastery tree --filter docker
//! ```
//!
//! Print a guide as JSON:
//! ```sh
//! mastery show python-guide -o json
//! ```

mod cli;

use clap::Parser;
use cli::{Cli, Command, OutputFormat, ShowFormat};
use color_eyre::Result;
use mastery::catalog::{self, Catalog, Leaf, Node};
use mastery::convert::headings;
use mastery::logging::{self, LogTarget};
use mastery::{Config, Document, Resolver};
use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let interactive = matches!(args.command, None | Some(Command::Browse));
    let target = LogTarget::select(interactive, args.log_file.as_deref());
    logging::init_logging(args.verbose, &target)?;

    // Priority: CLI args > config file > defaults
    let mut config = Config::load();
    if let Some(root) = &args.root {
        config.content.root = root.clone();
    }
    if let Some(path) = &args.catalog {
        config.content.catalog = Some(path.clone());
    }

    let catalog = load_catalog(config.content.catalog.as_deref())?;
    let resolver = Resolver::new(
        config.content.root.clone(),
        config.content.convert_options(),
    );
    info!(root = %config.content.root.display(), "content root");

    match args.command {
        None | Some(Command::Browse) => {
            let app = mastery::tui::App::new(Arc::new(catalog.into_owned()), resolver, config);
            mastery::tui::launch(app)
        }
        Some(Command::Tree { filter, output }) => {
            print_tree(&catalog, filter.as_deref(), output)
        }
        Some(Command::List { filter, output }) => {
            print_list(&catalog, filter.as_deref(), output)
        }
        Some(Command::Show { id, output }) => {
            let document = resolve_or_exit(&resolver, &catalog, &id);
            show(&document, output)
        }
        Some(Command::Nav { id, filter, output }) => {
            print_nav(&catalog, &id, filter.as_deref(), output)
        }
        Some(Command::Toc { id, output }) => {
            let document = resolve_or_exit(&resolver, &catalog, &id);
            print_toc(&document, output)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog file");
            Ok(Cow::Owned(Catalog::load(path)?))
        }
        None => Ok(Cow::Borrowed(Catalog::builtin())),
    }
}

fn resolve_or_exit(resolver: &Resolver, catalog: &Catalog, id: &str) -> Document {
    match resolver.resolve(catalog, id) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_tree(catalog: &Catalog, filter: Option<&str>, format: OutputFormat) -> Result<()> {
    let nodes = catalog::filter(catalog.nodes(), filter.unwrap_or(""));

    match format {
        OutputFormat::Plain => {
            if nodes.is_empty() {
                eprintln!("No guides match '{}'", filter.unwrap_or(""));
                return Ok(());
            }
            let mut out = String::new();
            for (i, node) in nodes.iter().enumerate() {
                render_box_tree(node, "", i == nodes.len() - 1, &mut out);
            }
            print!("{}", out);
            Ok(())
        }
        OutputFormat::Json => print_json(&*nodes),
    }
}

fn render_box_tree(node: &Node, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    match node {
        Node::Group(group) => {
            out.push_str(&format!("{prefix}{connector}{}\n", group.title));
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            for (i, child) in group.children.iter().enumerate() {
                render_box_tree(child, &child_prefix, i == group.children.len() - 1, out);
            }
        }
        Node::Leaf(leaf) => {
            out.push_str(&format!("{prefix}{connector}{} ({})\n", leaf.title, leaf.id));
        }
    }
}

fn print_list(catalog: &Catalog, filter: Option<&str>, format: OutputFormat) -> Result<()> {
    let nodes = catalog::filter(catalog.nodes(), filter.unwrap_or(""));
    let leaves = catalog::flatten(&nodes);

    match format {
        OutputFormat::Plain => {
            for (i, leaf) in leaves.iter().enumerate() {
                println!("{:>3}. {:<32} {}", i + 1, leaf.id, leaf.title);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let items: Vec<Node> = leaves.iter().map(|leaf| Node::Leaf((*leaf).clone())).collect();
            print_json(&items)
        }
    }
}

fn show(document: &Document, format: ShowFormat) -> Result<()> {
    match format {
        ShowFormat::Json => print_json(document),
        ShowFormat::Plain => {
            match &document.content {
                Some(content) => println!("{}", content),
                None => eprintln!("'{}' is a group and has no content", document.id),
            }
            Ok(())
        }
        ShowFormat::Render => {
            match &document.content {
                Some(content) => termimad::MadSkin::default().print_text(content),
                None => eprintln!("'{}' is a group and has no content", document.id),
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct NavLink<'a> {
    id: &'a str,
    title: &'a str,
}

impl<'a> From<&'a Leaf> for NavLink<'a> {
    fn from(leaf: &'a Leaf) -> Self {
        Self {
            id: &leaf.id,
            title: &leaf.title,
        }
    }
}

#[derive(Serialize)]
struct NavOutput<'a> {
    prev: Option<NavLink<'a>>,
    next: Option<NavLink<'a>>,
}

fn print_nav(
    catalog: &Catalog,
    id: &str,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if catalog.find(id).is_none() {
        eprintln!("Content '{}' not found", id);
        process::exit(1);
    }

    let nodes = catalog::filter(catalog.nodes(), filter.unwrap_or(""));
    let leaves = catalog::flatten(&nodes);
    let around = catalog::neighbors(&leaves, id);

    match format {
        OutputFormat::Plain => {
            let line = |label: &str, leaf: Option<&Leaf>| match leaf {
                Some(leaf) => println!("{label}: {} ({})", leaf.title, leaf.id),
                None => println!("{label}: -"),
            };
            line("prev", around.prev);
            line("next", around.next);
            Ok(())
        }
        OutputFormat::Json => print_json(&NavOutput {
            prev: around.prev.map(NavLink::from),
            next: around.next.map(NavLink::from),
        }),
    }
}

fn print_toc(document: &Document, format: OutputFormat) -> Result<()> {
    let anchors = document
        .content
        .as_deref()
        .map(headings)
        .unwrap_or_default();

    match format {
        OutputFormat::Plain => {
            for heading in &anchors {
                let indent = "  ".repeat(heading.level.saturating_sub(1));
                println!("{indent}{} #{}", heading.text, heading.anchor);
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&anchors),
    }
}
