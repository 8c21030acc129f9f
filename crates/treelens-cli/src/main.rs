//! treelens CLI
//!
//! Command-line interface that renders source files into annotated syntax
//! node lists

mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use treelens_core::{ConfigLoader, RenderConfig, ResultExt, error_envelope, init_tracing};

#[derive(Parser)]
#[command(name = "treelens")]
#[command(about = "Render source code into an annotated, parent-indexed syntax node list")]
#[command(version = treelens_core::VERSION)]
#[command(
    long_about = "treelens parses source files into a lossless syntax tree and prints every\n\
node and token as a JSON record with its parent, range, structure and trivia.\n\
\n\
Examples:\n  \
treelens main.swift                  # Node list for one file\n  \
echo 'let x = 1' | treelens --pretty  # Read from stdin\n  \
treelens --fold a.swift b.swift      # One document per line, operators folded\n  \
treelens --format html main.swift    # Token markup instead of JSON"
)]
struct Cli {
    /// Files to render
    #[arg(help = "Files to render (default: read stdin)")]
    paths: Vec<PathBuf>,

    /// Fold operator sequences into nested infix expressions
    #[arg(long)]
    fold: bool,

    /// Label missing tokens with their canonical text
    #[arg(long)]
    show_missing_tokens: bool,

    /// Indent JSON output (single source only)
    #[arg(long)]
    pretty: bool,

    /// Keep operator sequences flat, overriding the config file
    #[arg(long, conflicts_with = "fold")]
    no_fold: bool,

    /// Leave missing tokens unlabelled, overriding the config file
    #[arg(long, conflicts_with = "show_missing_tokens")]
    hide_missing_tokens: bool,

    /// Print JSON on one line, overriding the config file
    #[arg(long, conflicts_with = "pretty")]
    compact: bool,

    /// Space markers per tab in rendered trivia
    #[arg(long)]
    tab_width: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Path to configuration file (.treelensrc.json/.treelensrc.toml/treelens.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

/// What to print for each source
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of node records
    Json,
    /// Token markup reassembling the source
    Html,
    /// Node counts per kind as JSON
    Statistics,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    init_tracing(cli.verbose);

    // Set thread pool size if specified
    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("treelens failed: {:#}", e);
            println!("{}", error_envelope(&format!("{e:#}")));
            std::process::exit(1);
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Render every input; `Ok(false)` when at least one source failed
fn run(cli: &Cli) -> Result<bool> {
    let mut config = resolve_config(cli)?;
    let sources = read_sources(&cli.paths)?;
    if config.pretty && sources.len() > 1 {
        warn!("Ignoring pretty output: several sources print one document per line");
        config.pretty = false;
    }
    debug!(?config, "resolved render configuration");

    let documents = output::render_documents(&sources, &config, cli.format);
    Ok(output::print_documents(documents))
}

/// Flags override the config file, which overrides defaults
fn resolve_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load(Some(path), None)?,
        None => ConfigLoader::auto_discover(Path::new("."))
            .log_and_continue()
            .flatten()
            .map(|path| ConfigLoader::load_from_file(&path))
            .transpose()?
            .unwrap_or_default(),
    };

    apply_switch(&mut config.fold, cli.fold, cli.no_fold);
    apply_switch(
        &mut config.show_missing_tokens,
        cli.show_missing_tokens,
        cli.hide_missing_tokens,
    );
    apply_switch(&mut config.pretty, cli.pretty, cli.compact);
    if let Some(tab_width) = cli.tab_width {
        config.tab_width = tab_width;
    }
    Ok(config)
}

/// An on/off flag pair overrides the configured value when either is given
fn apply_switch(value: &mut bool, on: bool, off: bool) {
    if on {
        *value = true;
    } else if off {
        *value = false;
    }
}

fn read_sources(paths: &[PathBuf]) -> Result<Vec<String>> {
    if paths.is_empty() {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read source from stdin")?;
        return Ok(vec![source]);
    }

    paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))
        })
        .collect()
}
