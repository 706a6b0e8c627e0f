use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mastery")]
#[command(version)]
#[command(about = "Browse the mastery guides: markdown, notebooks, and code listings")]
#[command(
    long_about = "mastery - a catalog browser for the Tech Mastery guides.\n\n\
    Launch without a command for the interactive browser with a guide tree,\n\
    search, and prev/next reading order. Use a command for scripting.\n\n\
    Examples:\n  \
    mastery                          # Interactive browser\n  \
    mastery tree --filter docker     # Guides matching 'docker'\n  \
    mastery show python-guide -o json\n  \
    mastery nav kubernetes-guide     # Previous and next guide"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory that catalog paths are relative to
    ///
    /// Overrides `content.root` from the config file.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// TOML catalog to use instead of the compiled-in one
    ///
    /// The file holds `[[items]]` tables with `id`, `title`, and either
    /// `path` (a guide) or nested `children` (a group).
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// MASTERY_LOG, when set, takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to a file
    ///
    /// The interactive browser only logs when this is set.
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive browser (default)
    Browse,

    /// Show the guide tree
    ///
    /// Groups are listed with their guides nested beneath them. With
    /// --filter, only matching guides and the groups containing them remain.
    Tree {
        /// Keep guides whose title contains this text (case-insensitive)
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,

        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },

    /// List guides in reading order
    List {
        /// Keep guides whose title contains this text (case-insensitive)
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,

        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },

    /// Print a guide's content
    Show {
        /// Catalog id, e.g. `python-guide`
        id: String,

        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: ShowFormat,
    },

    /// Show the guides before and after one in reading order
    Nav {
        id: String,

        /// Compute the order over the filtered tree
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,

        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },

    /// List a guide's headings with their anchors
    Toc {
        id: String,

        #[arg(short = 'o', long = "output", default_value = "plain")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Raw markdown
    Plain,
    /// The resolved document as JSON
    Json,
    /// Markdown styled for the terminal
    Render,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_browse() {
        let cli = Cli::parse_from(["mastery"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mastery", "show", "readme", "-o", "json", "--root", "/srv", "-vv"]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv")));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Show { id, output }) => {
                assert_eq!(id, "readme");
                assert_eq!(output, ShowFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_tree_filter() {
        let cli = Cli::parse_from(["mastery", "tree", "--filter", "docker"]);
        match cli.command {
            Some(Command::Tree { filter, output }) => {
                assert_eq!(filter.as_deref(), Some("docker"));
                assert_eq!(output, OutputFormat::Plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
