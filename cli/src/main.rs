use std::io::{self, Write};
use std::path::PathBuf;

use argspec_gen::process::{DEFAULT_LINE_LENGTH, DEFAULT_MARKER};
use argspec_gen::{GeneratorConfig, process_modules};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "argspec-gen")]
#[command(about = "Module argument spec generator")]
#[command(version)]
struct Cli {
    /// Marker that informs the tool where to insert the code.
    #[arg(short, long, default_value = DEFAULT_MARKER)]
    marker: String,
    /// Report changes made to module.
    #[arg(short, long)]
    diff: bool,
    /// Only perform update simulation.
    #[arg(short = 'r', long)]
    dry_run: bool,
    /// Limit the generated code's width.
    #[arg(short, long, default_value_t = DEFAULT_LINE_LENGTH)]
    line_length: usize,
    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Module to update argument spec in.
    #[arg(required = true, value_name = "MODULE")]
    modules: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            marker: self.marker.clone(),
            show_diff: self.diff,
            dry_run: self.dry_run,
            line_length: self.line_length,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    tracing::debug!(?config, modules = cli.modules.len(), "starting generation");

    let mut diff_out = io::stdout().lock();
    let report = process_modules(&cli.modules, &config, &mut diff_out);
    if let Err(err) = diff_out.flush() {
        eprintln!("error: failed to flush diff output: {err}");
    }

    for failure in report.failures() {
        eprintln!("{failure}");
    }

    std::process::exit(report.exit_code());
}
