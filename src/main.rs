use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use music2m3u::convert::convert;
use music2m3u::library::{SqliteLibrary, DEFAULT_DATABASE_PATH};
use music2m3u::m3u::M3uWriter;
use music2m3u::matcher::Matcher;
use music2m3u::paths::{playlist_name, target_path, validate_target, Source};
use music2m3u::progress::{format_duration, set_log_only};

#[derive(Parser)]
#[command(name = "music2m3u")]
#[command(about = "Convert a tab-separated playlist export to an M3U playlist using a Navidrome library")]
struct Args {
    /// Tab-separated playlist export (standard input if omitted or "-")
    #[arg(value_name = "SOURCE_FILE")]
    source: Option<String>,

    /// Output playlist (default: source without ".txt"; ".m3u" is always appended)
    #[arg(value_name = "TARGET_FILE")]
    target: Option<String>,

    /// Playlist name (default: source file name without "./" and ".txt")
    #[arg(value_name = "PLAYLIST_NAME")]
    name: Option<String>,

    /// Navidrome SQLite database, opened read-only
    #[arg(long, env = "MUSIC2M3U_DATABASE", default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Log every lookup that misses
    #[arg(long)]
    debug: bool,

    /// Hide the spinner and log plain progress lines
    #[arg(long)]
    log_only: bool,

    /// Write conversion stats as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        let program = std::env::args().next().unwrap_or_else(|| "music2m3u".to_string());
        eprintln!("Usage: {} <source file> <target file> <playlist name>", program);
        std::process::exit(1);
    }

    let args = Args::parse();
    set_log_only(args.log_only || args.debug);

    let source = Source::from_arg(args.source.as_deref());
    if let Source::File(path) = &source {
        if !path.exists() {
            bail!("source file {} does not exist", path.display());
        }
    }

    let target = target_path(&source, args.target.as_deref());
    let name = playlist_name(&source, args.name.as_deref());
    validate_target(&target, &source)?;

    let library = SqliteLibrary::open(&args.database)?;
    let matcher = Matcher::new(library).with_trace(args.debug);

    let reader: Box<dyn BufRead> = match &source {
        Source::Stdin => Box::new(io::stdin().lock()),
        Source::File(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open source file {:?}", path))?,
        )),
    };

    println!("Converting {} playlist to m3u: {}", name, target.display());

    let file = File::create(&target)
        .with_context(|| format!("Failed to create target file {:?}", target))?;
    let mut out = M3uWriter::new(BufWriter::new(file));

    let stats = convert(reader, &mut out, &matcher, &name)
        .with_context(|| format!("Conversion of {} failed", source.display_name()))?;

    println!("\n{:=<60}", "");
    println!("Conversion complete!");
    println!("  Entries: {}", stats.entries);
    println!("  Resolved: {} ({:.1}%)", stats.resolved(), stats.match_rate());
    println!("  Ambiguous: {}", stats.ambiguous);
    println!("  Not found: {}", stats.not_found);
    println!("  Skipped lines: {}", stats.lines_skipped);
    println!(
        "  Elapsed: {}",
        format_duration(std::time::Duration::from_secs_f64(stats.elapsed_seconds))
    );
    println!("{:=<60}", "");

    if args.debug {
        stats.log_phase("convert");
    }

    if let Some(path) = args.stats {
        stats
            .write_to_file(&path)
            .with_context(|| format!("Failed to write stats to {:?}", path))?;
    }

    Ok(())
}
