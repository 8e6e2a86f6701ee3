use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use charwash::{resolve_active_steps, Base, NormContext, NormStats, Normalizer, WashError};

/// Normalizes and repairs noisy text, line by line.
#[derive(Parser, Debug)]
#[command(name = "charwash", version, about)]
struct Args {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// ISO 639-3 language code, selects the Arabic-script letter profile
    #[arg(long, default_value = "")]
    lc: String,

    /// Run every normalization step
    #[arg(long)]
    all: bool,

    /// Run every step except the listed ones (comma-separated)
    #[arg(long, value_delimiter = ',')]
    all_except: Vec<String>,

    /// Steps to drop from the selection (comma-separated)
    #[arg(long, value_delimiter = ',')]
    skip: Vec<String>,

    /// Steps to add to the selection (comma-separated)
    #[arg(long, value_delimiter = ',')]
    add: Vec<String>,

    /// Run only the listed steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Directory with mapping TSV files (default: embedded tables)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write run statistics as JSON to this file
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Print a statistics summary to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), WashError> {
    env_logger::init();
    let args = Args::parse();

    let (base, skip) = if args.all_except.is_empty() {
        let base = if args.all { Base::All } else { Base::Default };
        (base, args.skip.clone())
    } else {
        if args.all {
            warn!("--all is redundant with --all-except");
        }
        let mut skip = args.skip.clone();
        skip.extend(args.all_except.iter().cloned());
        (Base::All, skip)
    };
    let active = resolve_active_steps(base, &skip, &args.add, &args.only)?;
    info!("{} normalization step(s) active", active.len());

    // Common two-letter shorthands for the Arabic-script languages.
    let lang_code = match args.lc.as_str() {
        "fa" => "fas",
        "ps" => "pas",
        "ar" => "ara",
        other => other,
    }
    .to_string();

    let ctx = match &args.data_dir {
        Some(dir) => NormContext::from_data_dir(dir),
        None => NormContext::new(),
    };
    let normalizer = Normalizer::with_context(ctx);
    let mut stats = NormStats::new();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    normalizer.normalize_lines(reader, &mut writer, active, &lang_code, &mut stats)?;
    writer.flush()?;

    if args.verbose {
        eprint!("{}", stats.summary());
    }
    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| WashError::Common(format!("could not serialize statistics: {e}")))?;
        std::fs::write(path, json)?;
    }
    Ok(())
}
