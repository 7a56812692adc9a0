//! lutcam - apply camera LUTs to raw RGB8 frames
//!
//! Front end for `lutcam-ops`: grade a raw frame, inspect or generate
//! `.cube` files, and read single pixels back.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lutcam")]
#[command(author, version, about = "Apply 3D LUTs to raw RGB8 camera frames")]
#[command(long_about = "
Grades interleaved 8-bit RGB frames through a 3D LUT with trilinear
interpolation. Output is grayscale by default (channel average).

Examples:
  lutcam apply frame.rgb -W 640 -H 480 -l mono.cube -o out.rgb
  lutcam apply frame.rgb -W 640 -H 480 -l warm.cube -o out.rgb --mode color --parallel
  lutcam info mono.cube --strict
  lutcam identity 33 -o identity.cube
  lutcam probe out.rgb -W 640 -H 480
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// YAML file with default filter settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a LUT to a raw RGB8 frame
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show what a .cube file contains
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Write an identity LUT
    Identity(IdentityArgs),

    /// Print one pixel of a raw RGB8 frame
    Probe(ProbeArgs),
}

/// Output mode as given on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Channel average on all three channels
    Monochrome,
    /// Keep the LUT's color output
    Color,
}

/// Arguments for the `apply` command.
#[derive(Args)]
struct ApplyArgs {
    /// Input frame (raw interleaved RGB8)
    input: PathBuf,

    /// Frame width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Frame height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// LUT file (.cube)
    #[arg(short, long)]
    lut: PathBuf,

    /// Output frame
    #[arg(short, long)]
    output: PathBuf,

    /// Output mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Round instead of truncating when converting to 8 bits
    #[arg(long)]
    round: bool,

    /// Process rows on all threads
    #[arg(short, long)]
    parallel: bool,

    /// Reject LUTs with malformed lines
    #[arg(long)]
    strict: bool,
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// LUT file (.cube)
    lut: PathBuf,

    /// Reject LUTs with malformed lines
    #[arg(long)]
    strict: bool,
}

/// Arguments for the `identity` command.
#[derive(Args)]
struct IdentityArgs {
    /// Cube edge length
    size: usize,

    /// Output LUT file
    #[arg(short, long)]
    output: PathBuf,
}

/// Arguments for the `probe` command.
#[derive(Args)]
struct ProbeArgs {
    /// Input frame (raw interleaved RGB8)
    input: PathBuf,

    /// Frame width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Frame height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Pixel column (default: center)
    #[arg(short, requires = "y")]
    x: Option<u32>,

    /// Pixel row (default: center)
    #[arg(short, requires = "x")]
    y: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => config::CliConfig::from_file(path)?,
        None => config::CliConfig::default(),
    };

    // Configure thread pool
    let threads = cli.threads.unwrap_or(config.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, &config),
        Commands::Info(args) => commands::info::run(args, &config, cli.verbose),
        Commands::Identity(args) => commands::identity::run(args),
        Commands::Probe(args) => commands::probe::run(args),
    }
}

/// Installs the log subscriber. `-v` flags win over `RUST_LOG`.
fn init_logging(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}
