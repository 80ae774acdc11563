use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use textdiffer::{apply_changes, DiffKind, Differ, TextChange, DEFAULT_WINDOW_SIZE};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Compute minimal text changes between two versions of a file")]
struct Cli {
    /// Log what the engine is doing to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the minimal changes turning one file into another
    Diff {
        #[command(flatten)]
        input: Input,

        /// How to print the changes
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Compute the changes, re-apply them and report whether they round-trip
    Check {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(clap::Args)]
struct Input {
    /// The original file
    #[arg(short = 'i', long)]
    old: PathBuf,

    /// The new file
    #[arg(short, long)]
    new: PathBuf,

    /// Granularity: line, word or char
    #[arg(short, long, default_value_t = DiffKind::Line)]
    kind: DiffKind,

    /// Window capacity in chars for char granularity
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Skip the built-in round-trip check
    #[arg(long, default_value_t = false)]
    no_verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One `[start..end) -> "text"` line per change
    Text,
    /// Old and new text of each change, prefixed with `-` and `+`
    Patch,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compute(input: &Input, old: &str, new: &str) -> Result<Vec<TextChange>> {
    anyhow::ensure!(input.window > 0, "window size must be at least one char");
    let changes = Differ::new(old, new)
        .kind(input.kind)
        .window_size(input.window)
        .verify(!input.no_verify)
        .get_minimal_changes()?;
    Ok(changes)
}

fn print_patch(old: &str, changes: &[TextChange]) {
    for change in changes {
        println!("@@ {},{} @@", change.span.start, change.span.length);
        let removed = &old[change.span.start..change.span.end()];
        for line in removed.split_inclusive('\n') {
            print!("-{}", line);
            if !line.ends_with('\n') {
                println!();
            }
        }
        for line in change.new_text.split_inclusive('\n') {
            print!("+{}", line);
            if !line.ends_with('\n') {
                println!();
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Diff { input, format } => {
            let old = read(&input.old)?;
            let new = read(&input.new)?;
            let changes = compute(&input, &old, &new)?;

            match format {
                Format::Text => {
                    for change in &changes {
                        println!("{}", change);
                    }
                }
                Format::Patch => print_patch(&old, &changes),
            }
        }

        Commands::Check { input } => {
            let old = read(&input.old)?;
            let new = read(&input.new)?;
            let changes = compute(&input, &old, &new)?;
            let rebuilt = apply_changes(&old, &changes)?;

            let removed: usize = changes.iter().map(|c| c.span.length).sum();
            let inserted: usize = changes.iter().map(|c| c.new_text.len()).sum();
            println!("Changes: {}", changes.len());
            println!("  {} bytes removed", removed);
            println!("  {} bytes inserted", inserted);

            if rebuilt != new {
                anyhow::bail!("changes did not reproduce {}", input.new.display());
            }
            println!("Round trip: ok");
        }
    }

    Ok(())
}
