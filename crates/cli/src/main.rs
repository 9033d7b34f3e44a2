use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use shard_chunker::ChunkingOptions;
use shard_indexer::Indexer;
use shard_output::Formatter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shard")]
#[command(about = "Split a source tree into semantically bounded chunks for retrieval indexing")]
#[command(version)]
struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output destination ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Minimum chunk size in lines (carried through to chunkers)
    #[arg(long, default_value_t = 5)]
    min_chunk_size: usize,

    /// Maximum lines an unstructured block may grow before a forced flush
    #[arg(long, default_value_t = 200)]
    max_chunk_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    /// Single {"chunks": [...]} document
    Json,
    /// One chunk object per line
    Jsonl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let options = ChunkingOptions::new(cli.min_chunk_size, cli.max_chunk_size);
    options.validate().map_err(|e| anyhow!(e))?;

    let indexer = Indexer::new(options);
    let result = indexer
        .run(&cli.root)
        .with_context(|| format!("chunking {}", cli.root.display()))?;

    log::info!("emitting {} chunks", result.len());

    let formatter = match cli.format {
        OutputFormat::Json => Formatter::Json { pretty: cli.pretty },
        OutputFormat::Jsonl => Formatter::JsonLines,
    };

    if cli.output == "-" {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        formatter
            .write(&mut writer, &result)
            .context("writing chunks to stdout")?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("creating output file {}", cli.output))?;
        let mut writer = BufWriter::new(file);
        formatter
            .write(&mut writer, &result)
            .with_context(|| format!("writing chunks to {}", cli.output))?;
        writer.flush()?;
    }

    Ok(())
}
