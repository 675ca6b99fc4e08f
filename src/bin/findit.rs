//! Resolve a single track against the library and show how it matched
//!
//! Usage: findit <artist> <album> <title> [database]

use anyhow::Result;
use std::path::PathBuf;

use music2m3u::library::{SqliteLibrary, DEFAULT_DATABASE_PATH};
use music2m3u::matcher::{Matcher, Terms};
use music2m3u::models::{MatchResult, MatchStep};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: findit <artist> <album> <title> [database]");
        std::process::exit(1);
    }

    let (artist, album, title) = (&args[1], &args[2], &args[3]);
    let db_path = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

    let terms = Terms::new(artist, album, title);
    println!("Cascade for {} / {} / {}:", artist, album, title);
    for step in MatchStep::CASCADE {
        match step.lookup(&terms) {
            Some(query) => println!("  {:<30} {}", format!("{:?}", step), query),
            None => println!("  {:<30} (skipped)", format!("{:?}", step)),
        }
    }
    println!("  {:<30} title={}", "TitleOnly", terms.title);

    let matcher = Matcher::new(SqliteLibrary::open(&db_path)?).with_trace(true);
    println!("\nResult:");
    match matcher.find(artist, album, title)? {
        MatchResult::Resolved { path, step } => println!("  {:?}: {}", step, path),
        MatchResult::Ambiguous(candidates) => {
            println!("  {} potential matches:", candidates.len());
            for c in candidates {
                println!("  {} - {} - {}\n    {}", c.title, c.artist, c.album, c.path);
            }
        }
        MatchResult::NotFound => println!("  not found"),
    }

    Ok(())
}
