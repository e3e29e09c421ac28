use anyhow::Result;
use clap::{Parser, Subcommand};
use kmerdict_core::Variant;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;

#[derive(Parser)]
#[command(name = "kmerdict")]
#[command(about = "kmerdict - 2-bit k-mer codec and variant-aware minimizers")]
#[command(version)]
#[command(long_about = "
kmerdict exposes the k-mer kernel used by dictionary builders: 2-bit encoding
of 32-mers, reverse complement, and canonical minimizer selection over
sequence windows, optionally with a single substituted base.

Examples:
  kmerdict encode ACGTACGTACGTACGTACGTACGTACGTACGT
  kmerdict decode 0x1b1b1b1b1b1b1b1b
  kmerdict minimizer <40-base window> --variant 12:T
  kmerdict scan --input windows.tsv --ssl 40 --stride 10 --json
  kmerdict dump --records dict.bin --variant
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON lines instead of tab-separated output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a 32-base k-mer to its 64-bit code
    Encode {
        /// K-mer (A/C/G/T/N, any case)
        sequence: String,
    },

    /// Decode a 64-bit code (decimal or 0x-prefixed hex)
    Decode {
        #[arg(value_parser = commands::codec::parse_code)]
        code: u64,
    },

    /// Reverse complement and canonical form of a k-mer
    Revcomp {
        sequence: String,
    },

    /// Minimizer of a single window
    Minimizer {
        /// Raw sequence window (at least 32 bases)
        window: String,

        /// Substitution applied to the window, as POSITION:BASE
        #[arg(long, value_parser = commands::window::parse_variant)]
        variant: Option<Variant>,
    },

    /// Report minimizers for windows of every sequence in a name<TAB>sequence file
    Scan {
        /// Input table
        #[arg(short, long)]
        input: PathBuf,

        /// Window length (overrides minimizer.ssl)
        #[arg(long)]
        ssl: Option<usize>,

        /// Step between windows (overrides scan.stride)
        #[arg(long)]
        stride: Option<usize>,
    },

    /// List a binary k-mer record file in k-mer order
    Dump {
        /// Record file
        #[arg(short, long)]
        records: PathBuf,

        /// Records carry a 32-bit variant id
        #[arg(long)]
        variant: bool,
    },

    /// Print the default configuration as TOML
    Config,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode { sequence } => commands::codec::encode(&sequence, cli.json)?,
        Commands::Decode { code } => commands::codec::decode(code, cli.json)?,
        Commands::Revcomp { sequence } => commands::codec::revcomp(&sequence, cli.json)?,
        Commands::Minimizer { window, variant } => {
            commands::window::minimizer(&window, variant, cli.json)?
        }
        Commands::Scan { input, ssl, stride } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::window::scan(&config, &input, ssl, stride, cli.json)?
        }
        Commands::Dump { records, variant } => {
            commands::dump::execute(&records, variant, cli.json)?
        }
        Commands::Config => print!("{}", Config::example_toml()?),
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    run(cli)
}
