use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use syriac_lexicon::document::AssemblyStats;
use syriac_lexicon::parallel::{process_sequential, process_two_phase, ParallelConfig};
use syriac_lexicon::source::{default_output_path, detect_format, open_input, read_paragraphs};
use syriac_lexicon::{Config, EntryParser, Error, OutputFormat, Result, SourceName};
use tracing_subscriber::EnvFilter;

/// Processing strategy for building entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Sequential processing (baseline)
    Sequential,
    /// Classify all lines, then build entries in parallel
    TwoPhase,
}

#[derive(Parser)]
#[command(name = "syriac-lexicon")]
#[command(about = "Convert Syriac-Arabic dictionary paragraphs to JSON or XML entries")]
struct Args {
    /// Input file (.txt or .jsonl, optionally .bz2)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file (default: input base name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config (part-of-speech vocabulary, list bullets, phrase inference)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Processing strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Sequential)]
    strategy: Strategy,

    /// Number of threads for two-phase (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Log phase timings and per-line decisions
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_stats(stats: &AssemblyStats, strategy: Strategy) {
    println!();
    println!("============================================================");
    println!("Strategy: {:?}", strategy);
    println!("Paragraphs: {}", stats.paragraphs);
    println!("Entries: {}", stats.entries);
    println!("Subentries: {}", stats.subentries);
    println!("Inherited senses: {}", stats.inherited);
    println!("Orphan subentries dropped: {}", stats.orphans);
    println!("Ignored paragraphs: {}", stats.ignored);
    println!("Time: {:.3}s", stats.elapsed.as_secs_f64());
    println!("============================================================");
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let parser = EntryParser::from_config(&config)?;

    let reader = open_input(&args.input)?;
    let source_format = detect_format(&args.input);
    let paragraphs = read_paragraphs(reader, source_format, &config.list_bullets, &args.input)?;
    let source = SourceName::from_path(&args.input);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.format.extension()));

    if !args.quiet {
        println!("Parsing: {}", args.input.display());
        println!("Output: {}", output_path.display());
        println!("Paragraphs read: {}", paragraphs.len());
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    pb.set_message("Building entries...");

    let assembly = match args.strategy {
        Strategy::Sequential => process_sequential(paragraphs, &parser, &source),
        Strategy::TwoPhase => {
            let mut parallel = ParallelConfig::default();
            if args.threads > 0 {
                parallel.num_threads = args.threads;
            }
            process_two_phase(paragraphs, &parser, &source, &parallel)
        }
    };
    pb.finish_and_clear();

    let rendered = args.format.render(&assembly.entries)?;
    fs::write(&output_path, rendered).map_err(|source| Error::Io {
        path: output_path.clone(),
        source,
    })?;

    if !args.quiet {
        print_stats(&assembly.stats, args.strategy);
        println!(
            "Wrote {} to: {}",
            args.format.extension().to_uppercase(),
            output_path.display()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                Error::InputNotFound(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
