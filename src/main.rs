//! pkgdoc — write Sphinx autodoc stubs for every package of a Python source tree.
//!
//! `pkgdoc src/biotite -o doc/apidoc` prints the documented package names,
//! one per line, after writing `doc/apidoc/<package>.rst` indexes and
//! `doc/apidoc/<package>/<Symbol>.rst` stubs.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pkgdoc::config::{Config, FileConfig, DEFAULT_CONFIG};
use pkgdoc::walk;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pkgdoc",
    about = "Generate Sphinx autodoc stubs and package indexes from a Python package tree"
)]
struct Cli {
    /// Directory of the root package
    package_dir: PathBuf,

    /// Output root for the generated .rst files [default: apidoc]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Dotted name of the root package (defaults to the directory name)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// TOML config file. Falls back to ./pkgdoc.toml when present.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// JSON export manifest to use instead of reading the package sources
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// File that marks a directory as a package [default: __init__.py]
    #[arg(long)]
    marker: Option<String>,

    /// Skip packages whose dotted name matches this glob. Repeatable.
    #[arg(long)]
    exclude: Vec<String>,

    /// Only list the packages that would be documented; write nothing
    #[arg(long)]
    list: bool,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;

    if cli.list {
        let names = walk::discover(&config)
            .with_context(|| format!("failed to walk {}", config.package_dir.display()))?;
        print_names(&names);
        return Ok(());
    }

    let report = pkgdoc::generate(&config, cli.manifest.as_deref())
        .with_context(|| format!("failed to document {}", config.package_dir.display()))?;
    print_names(&report.packages);
    let (classes, functions) = report.totals();
    info!(
        packages = report.packages.len(),
        classes,
        functions,
        documents = report.documents.len(),
        output = %config.output_root.display(),
        "documentation generated"
    );
    Ok(())
}

/// Send logs to stderr so stdout carries only the package list.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then command-line flags.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::new(cli.package_dir.clone(), cli.name.clone())?;

    let file = match cli.config.as_deref() {
        Some(path) => Some(FileConfig::load(path)?),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG);
            if fallback.is_file() {
                Some(FileConfig::load(fallback)?)
            } else {
                None
            }
        }
    };
    if let Some(file) = file {
        config.apply_file(file)?;
    }

    if let Some(ref output) = cli.output {
        config.output_root = output.clone();
    }
    if let Some(ref marker) = cli.marker {
        config.marker = marker.clone();
    }
    for pattern in &cli.exclude {
        config.add_exclude(pattern)?;
    }
    Ok(config)
}

fn print_names(names: &[String]) {
    for name in names {
        println!("{}", name);
    }
}
