//! emx-base91 CLI
//!
//! Encode and decode files as base91 text (similar to the base64 command).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emx_base91::{Alphabet, Decoder, Encoder, EncodingStats, STANDARD};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "emx-base91")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "basE91 encoding tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode data as base91 text
    #[command(visible_alias = "e")]
    Encode {
        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Wrap encoded lines after COLS symbols (0 disables wrapping)
        #[arg(short = 'w', long, value_name = "COLS", default_value_t = 76)]
        wrap: usize,

        /// Custom 91-symbol alphabet
        #[arg(long)]
        alphabet: Option<Alphabet>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode base91 text
    #[command(visible_alias = "d")]
    Decode {
        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Treat line breaks as invalid input
        #[arg(long)]
        strict: bool,

        /// Custom 91-symbol alphabet
        #[arg(long)]
        alphabet: Option<Alphabet>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare base91 and base64 sizes for an input
    Stats {
        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Custom 91-symbol alphabet
        #[arg(long)]
        alphabet: Option<Alphabet>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output, wrap, alphabet, verbose } => {
            init_logger(verbose);
            encode_command(input, output, wrap, &alphabet.unwrap_or_default())?;
        }
        Commands::Decode { input, output, strict, alphabet, verbose } => {
            init_logger(verbose);
            decode_command(input, output, strict, &alphabet.unwrap_or_default())?;
        }
        Commands::Stats { input, alphabet } => {
            init_logger(false);
            stats_command(input, &alphabet.unwrap_or_default())?;
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read: {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer).context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(output: Option<&Path>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, data).with_context(|| format!("Failed to write: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn encode_command(input: Option<PathBuf>, output: Option<PathBuf>, wrap: usize, alphabet: &Alphabet) -> Result<()> {
    let data = read_input(input.as_deref())?;

    let encoder = Encoder::new(alphabet).with_line_width(wrap);
    let mut encoded = Vec::new();
    encoder.encode_to_writer(&data, &mut encoded)?;

    write_output(output.as_deref(), &encoded)?;

    if alphabet != &STANDARD {
        log::debug!("Alphabet: {}", alphabet);
    }
    log::debug!("Encoded {} bytes into {} bytes", data.len(), encoded.len());
    Ok(())
}

fn decode_command(input: Option<PathBuf>, output: Option<PathBuf>, strict: bool, alphabet: &Alphabet) -> Result<()> {
    let text = read_input(input.as_deref())?;

    let decoder = Decoder::new(alphabet).with_skip_line_breaks(!strict);
    let decoded = decoder.decode_partial(&text);

    // Whatever was decoded before a bad symbol is still written out
    write_output(output.as_deref(), &decoded.data)?;
    log::debug!("Decoded {} bytes into {} bytes", text.len(), decoded.data.len());

    if let Some(err) = decoded.error {
        return Err(err).context("Input is not valid base91");
    }
    Ok(())
}

fn stats_command(input: Option<PathBuf>, alphabet: &Alphabet) -> Result<()> {
    let data = read_input(input.as_deref())?;
    let stats = EncodingStats::measure(&Encoder::new(alphabet), &data);

    println!("input:  {} bytes", stats.input_len);
    println!("base91: {} bytes ({:.3}x)", stats.base91_len, stats.base91_ratio());
    println!("base64: {} bytes ({:.3}x)", stats.base64_len, stats.base64_ratio());
    println!("saved:  {} bytes", stats.savings());
    Ok(())
}
