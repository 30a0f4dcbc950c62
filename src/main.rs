// src/main.rs

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use licman::manifest::{ManifestSet, ParseOptions, read_manifest_file};
use licman::report::{OutputFormat, OutputTarget, summary_text};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Exit code for unreadable or malformed manifests (EPROTO)
const EXIT_PROTOCOL: u8 = 71;
/// Exit code for missing inputs and refused overwrites (ENOENT)
const EXIT_NOT_FOUND: u8 = 2;

/// Reports written when `--format` is not given
const DEFAULT_FORMATS: [OutputFormat; 2] = [OutputFormat::Csv, OutputFormat::Xlsx];

#[derive(Parser)]
#[command(name = "licman")]
#[command(author, version, about = "License manifest listing and change tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Overwrite existing output files
    #[arg(long, global = true)]
    force: bool,

    /// Require version, recipe name and license in every stanza
    #[arg(long, global = true)]
    strict: bool,

    /// Verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extra diagnostic output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a license manifest into a table
    List {
        /// License manifest file (input)
        manifest: PathBuf,
        /// Output name base, the extension is appended
        output: PathBuf,
        /// Output formats, comma separated
        #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = DEFAULT_FORMATS)]
        format: Vec<OutputFormat>,
    },
    /// Compare two license manifests and highlight the changes
    Changes {
        /// Previous license manifest file
        previous: PathBuf,
        /// Current license manifest file
        current: PathBuf,
        /// Output name base, the extension is appended
        output: PathBuf,
        /// Output formats, comma separated
        #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = DEFAULT_FORMATS)]
        format: Vec<OutputFormat>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Read a manifest and print its status line
fn load(path: &Path, options: ParseOptions) -> Result<ManifestSet> {
    let set = read_manifest_file(path, options)
        .with_context(|| format!("Failed to process license manifest '{}'", path.display()))?;

    let stats = set.stats();
    println!(
        "{}: {} lines, {} packages",
        path.display(),
        stats.lines,
        stats.packages
    );
    for name in set.duplicates() {
        warn!("{}: package '{}' listed more than once", path.display(), name);
    }

    Ok(set)
}

/// One target per format, refusing up front if any of them would be overwritten
fn output_targets(base: &Path, formats: &[OutputFormat], force: bool) -> Result<Vec<OutputTarget>> {
    let mut targets: Vec<OutputTarget> = Vec::new();
    for &format in formats {
        if targets.iter().any(|t| t.format() == format) {
            continue;
        }
        let target = OutputTarget::new(base, format);
        target.check_writable(force)?;
        targets.push(target);
    }
    Ok(targets)
}

fn run(cli: Cli) -> Result<()> {
    let options = ParseOptions { strict: cli.strict };

    match cli.command {
        Some(Commands::List {
            manifest,
            output,
            format,
        }) => {
            info!("Listing {} into {}", manifest.display(), output.display());

            let targets = output_targets(&output, &format, cli.force)?;
            let set = load(&manifest, options)?;

            for target in &targets {
                target.write_list(&set, cli.force)?;
                println!("Wrote {} packages to {}", set.len(), target.path().display());
            }
            Ok(())
        }
        Some(Commands::Changes {
            previous,
            current,
            output,
            format,
        }) => {
            info!(
                "Comparing {} with {} into {}",
                previous.display(),
                current.display(),
                output.display()
            );

            let targets = output_targets(&output, &format, cli.force)?;
            let prev_set = load(&previous, options)?;
            let curr_set = load(&current, options)?;

            info!("Finding changes...");
            let result = licman::diff(&prev_set, &curr_set);

            for target in &targets {
                target.write_changes(&result, cli.force)?;
            }

            for change in &result.changed {
                info!("{}: {}", change.name(), change.describe().join(", "));
            }

            println!();
            print!("{}", summary_text(&result.summary()));
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "licman", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("Licman v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'licman --help' for usage information");
            Ok(())
        }
    }
}

/// Map a failure onto the process exit code
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<licman::Error>() {
        Some(licman::Error::MalformedManifest { .. }) | Some(licman::Error::EmptyManifest(_)) => {
            EXIT_PROTOCOL
        }
        Some(licman::Error::OutputExists(_)) => EXIT_NOT_FOUND,
        Some(licman::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
