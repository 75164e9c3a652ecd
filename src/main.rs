//! dashdocs: search installed Dash docsets from the terminal.
//!
//! Usage:
//!   dashdocs search <pattern> [-d <docset>]...   # search common + given docsets
//!   dashdocs url <docset> <path> [--anchor <a>]  # resolve an index path
//!   dashdocs list                                # installed docsets
//!   dashdocs completions <shell>                 # shell completions

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dashdocs::config::Config;
use dashdocs::services::resolve_url;
use dashdocs::{fmt, ConnectionRegistry, DocsetLocator, SearchContext, SearchEngine};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dashdocs")]
#[command(about = "Search installed Dash docsets")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/dashdocs/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding installed docsets (default: ~/.docsets)
    #[arg(long, global = true)]
    docsets_root: Option<PathBuf>,

    /// Minimum pattern length before a search runs
    #[arg(long, global = true)]
    min_length: Option<usize>,

    /// Increase log verbosity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the common docsets plus any given with --docset
    Search {
        /// Search pattern; prefix with "<docset> " to search only that docset
        pattern: String,

        /// Additional docsets to search (repeatable)
        #[arg(short, long = "docset")]
        docsets: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Print each result's URL
        #[arg(long)]
        urls: bool,
    },

    /// Resolve an index path of a docset to a URL
    Url {
        docset: String,
        path: String,
        #[arg(short, long)]
        anchor: Option<String>,
    },

    /// List installed docsets
    List,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr only (stdout carries results)
    let directive = if cli.verbose {
        "dashdocs=debug"
    } else {
        "dashdocs=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = cli.docsets_root {
        config.docsets_root = root;
    }
    if let Some(min_length) = cli.min_length {
        config.min_length = min_length;
    }

    let color = std::io::stdout().is_terminal();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Search {
            pattern,
            docsets,
            json,
            urls,
        } => {
            let mut engine = SearchEngine::new(config);
            let outcome = engine.search(&pattern, &SearchContext::new(docsets));

            fmt::fmt_failures(&mut std::io::stderr(), &outcome.failures, color)?;
            if json {
                serde_json::to_writer_pretty(&mut stdout, &outcome.candidates)?;
                writeln!(stdout)?;
            } else {
                let locator = urls.then(|| engine.locator());
                fmt::fmt_search(&mut stdout, &outcome.candidates, locator, color)?;
            }
        }

        Commands::Url {
            docset,
            path,
            anchor,
        } => {
            let locator = DocsetLocator::new(&config.docsets_root);
            let url = resolve_url(&locator, &docset, &path, anchor.as_deref())?;
            writeln!(stdout, "{url}")?;
        }

        Commands::List => {
            let locator = DocsetLocator::new(&config.docsets_root);
            let installed = locator.installed();
            let mut registry = ConnectionRegistry::new(locator);
            let docsets: Vec<_> = installed
                .into_iter()
                .map(|name| {
                    let dialect = registry.ensure(&name).ok().map(|conn| conn.dialect());
                    (name, dialect)
                })
                .collect();
            fmt::fmt_list(&mut stdout, &docsets, color)?;
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "dashdocs", &mut stdout);
        }
    }

    Ok(())
}
