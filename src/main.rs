use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffpack::{CodecConfig, Compressor, ContainerFormat, Decompressor};

/// Lossless static Huffman file compressor
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// JSON codec configuration file
    #[clap(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the bare layout of the original FileZipper tool (no magic or version)
    #[clap(long, global = true)]
    legacy: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, global = true, parse(from_occurrences))]
    verbose: u8,

    /// Only report errors
    #[clap(short = 'q', long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress <input> into the container <output>
    Compress { input: PathBuf, output: PathBuf },
    /// Restore <input> container into <output>
    Decompress { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Anything but a complete compress/decompress invocation is a
            // failure, help and version requests included.
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("huffpack: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_json_file(path)?,
        None => CodecConfig::default(),
    };
    if cli.legacy {
        config.format = ContainerFormat::Legacy;
    }
    debug!("codec configuration: {:?}", config);

    match &cli.command {
        Command::Compress { input, output } => {
            let data = read_input(input)?;
            let compressed = Compressor::new(config)
                .compress(&data)
                .with_context(|| format!("cannot compress {}", input.display()))?;
            write_output(output, &compressed)?;
            if !cli.quiet {
                println!(
                    "Compressed {} bytes -> {} bytes",
                    data.len(),
                    compressed.len()
                );
            }
        }
        Command::Decompress { input, output } => {
            let data = read_input(input)?;
            let restored = Decompressor::new(config)
                .decompress(&data)
                .with_context(|| format!("cannot decompress {}", input.display()))?;
            write_output(output, &restored)?;
            if !cli.quiet {
                println!("Decompressed {} bytes.", restored.len());
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Write through a temporary file in the target directory so a failure
/// never leaves a partial output behind.
fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create output in {}", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("cannot write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
