use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn Project Gutenberg plain-text books into clean reading copies
#[derive(Parser, Debug)]
#[command(name = "classicreads", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process a raw Gutenberg text file already on disk
    File {
        /// Path to the raw UTF-8 text file
        input: PathBuf,
    },

    /// Look a book up in the Gutendex catalog and process its plain text
    Book {
        /// Gutendex / Project Gutenberg book id
        id: u64,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Browse or search the Gutendex catalog
    List {
        /// Results page to show
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Words to match against titles and author names
        #[arg(long)]
        search: Option<String>,

        /// Subject or bookshelf to filter by, e.g. "poetry"
        #[arg(long)]
        topic: Option<String>,

        /// Order the page by download count, most popular first
        #[arg(long, default_value_t = false)]
        popular: bool,

        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Base URL of the Gutendex API
    #[arg(long, env = "GUTENDEX_URL", default_value = "https://gutendex.com")]
    pub gutendex_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "CLASSICREADS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output path (directory for folder mode, file for single-file mode).
    /// Defaults to a directory or file named after the input in the current directory.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Output as a single text file instead of a directory of chapter sections
    #[arg(short, long, default_value_t = false, global = true)]
    pub single: bool,

    /// Print the analysis as JSON on stdout instead of writing files
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_file_command_with_output_flags() {
        let cli = Cli::try_parse_from(["classicreads", "file", "pg11.txt", "-s", "-o", "out.txt"])
            .unwrap();

        assert!(matches!(cli.command, Command::File { ref input } if input == &PathBuf::from("pg11.txt")));
        assert!(cli.options.single);
        assert_eq!(cli.options.output, Some(PathBuf::from("out.txt")));
        assert!(!cli.options.json);
    }

    #[test]
    fn parses_book_command_with_overrides() {
        let cli = Cli::try_parse_from([
            "classicreads",
            "--json",
            "book",
            "84",
            "--gutendex-url",
            "http://localhost:8000",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::Book { id, catalog } => {
                assert_eq!(id, 84);
                assert_eq!(catalog.gutendex_url, "http://localhost:8000");
                assert_eq!(catalog.timeout_secs, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.options.json);
    }

    #[test]
    fn parses_list_command_filters() {
        let cli = Cli::try_parse_from([
            "classicreads",
            "list",
            "--page",
            "2",
            "--search",
            "dickens",
            "--topic",
            "fiction",
            "--popular",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::List {
                page,
                search,
                topic,
                popular,
                ..
            } => {
                assert_eq!(page, 2);
                assert_eq!(search.as_deref(), Some("dickens"));
                assert_eq!(topic.as_deref(), Some("fiction"));
                assert!(popular);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.options.json);
    }

    #[test]
    fn list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["classicreads", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { page: 1, search: None, .. }));
    }

    #[test]
    fn rejects_page_zero() {
        assert!(Cli::try_parse_from(["classicreads", "list", "--page", "0"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_book_id() {
        assert!(Cli::try_parse_from(["classicreads", "book", "alice"]).is_err());
    }
}
