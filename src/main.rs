use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use lzss_save::io_utils::{io_cli_error, lzss_cli_error, CliError};
use lzss_save::{
    adler32_zero, compress_with_stats, crc32_ps3, decompress_with, BlockComparison, Config,
    DecodeMode, Token, TokenReader,
};

/// Compress, decompress and inspect LZSS save blocks.
#[derive(Parser)]
#[command(name = "lzss-save", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a raw block
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Print encoder statistics as JSON on stdout
        #[arg(long)]
        json: bool,
        /// Compare the result against a block written by the game
        #[arg(short, long)]
        compare: Option<PathBuf>,
    },
    /// Decompress a block produced by the game or by `compress`
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// Fail on truncated streams instead of keeping the decoded prefix
        #[arg(long)]
        strict: bool,
        /// Maximum number of output bytes
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the token stream of a compressed block
    Inspect {
        input: PathBuf,
        /// Stop after this many tokens
        #[arg(long)]
        max: Option<usize>,
    },
    /// Print the checksums the save container stores for a block
    Checksum { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    log_init(cli.verbose);
    if let Err(e) = run(cli.command) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn log_init(verbose: u8) {
    use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode};
    let filter = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let simple = TermLogger::new(
        filter,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    // fails only if a logger is already installed
    let _ = CombinedLogger::init(vec![simple]);
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|e| io_cli_error("reading input file", path, e))
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), CliError> {
    fs::write(path, data).map_err(|e| io_cli_error("writing output file", path, e))
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Compress {
            input,
            output,
            json,
            compare,
        } => {
            let data = read_input(&input)?;
            let start = Instant::now();
            let compressed = compress_with_stats(&data);
            let elapsed = start.elapsed();
            write_output(&output, &compressed.data)?;

            let comparison = match &compare {
                Some(path) => {
                    let game = read_input(path)?;
                    Some(BlockComparison::new(&compressed.data, &game))
                }
                None => None,
            };
            if let Some(c) = &comparison {
                eprintln!("{c}");
            }

            if json {
                let mut report = serde_json::to_value(&compressed.stats)?;
                report["elapsed_ms"] = serde_json::json!(elapsed.as_millis() as u64);
                report["adler32"] = serde_json::json!(format!("{:08x}", adler32_zero(&compressed.data)));
                if let Some(c) = &comparison {
                    report["identical"] = serde_json::json!(c.identical);
                    report["comparison"] = serde_json::to_value(c)?;
                }
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                compressed.stats.report();
                eprintln!(
                    "Compressed {} -> {} bytes in {:.2?}",
                    compressed.stats.input_bytes, compressed.stats.output_bytes, elapsed
                );
            }
        }

        Command::Decompress {
            input,
            output,
            strict,
            limit,
        } => {
            let data = read_input(&input)?;
            let config = Config {
                mode: if strict {
                    DecodeMode::Strict
                } else {
                    DecodeMode::Lenient
                },
                limit: limit.unwrap_or(usize::MAX),
            };
            let decompressed = decompress_with(&data, &config)
                .map_err(|e| lzss_cli_error("decompression failed", e))?;
            log::info!("{} -> {} bytes", data.len(), decompressed.len());
            write_output(&output, &decompressed)?;
        }

        Command::Inspect { input, max } => {
            let data = read_input(&input)?;
            let mut tokens = TokenReader::new(&data);
            let mut produced = 0usize;
            let mut matches = 0usize;
            for (index, token) in tokens.by_ref().take(max.unwrap_or(usize::MAX)).enumerate() {
                let token = token.map_err(|e| lzss_cli_error("token stream is malformed", e))?;
                match token {
                    Token::Literal(b) => println!(
                        "{index:>6} @{produced:>8}  literal {}",
                        hex::encode([b])
                    ),
                    other => println!("{index:>6} @{produced:>8}  {other}"),
                }
                produced += token.output_len();
                matches += usize::from(token.is_match());
            }
            log::info!("{matches} back-references covering a {produced} byte block");
            let trailing = data.len() - tokens.position();
            if trailing > 0 {
                log::info!("{trailing} bytes not consumed");
            }
        }

        Command::Checksum { input } => {
            let data = read_input(&input)?;
            println!("adler32-zero {:08x}", adler32_zero(&data));
            println!("crc32-ps3    {:08x}", crc32_ps3(&data));
        }
    }
    Ok(())
}
