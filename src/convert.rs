//! Playlist conversion loop.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::library::Library;
use crate::m3u::M3uWriter;
use crate::matcher::Matcher;
use crate::models::{ConversionStats, PlaylistEntry};
use crate::progress::{create_spinner, log_progress};

/// Emit a plain progress line every this many entries in log-only mode.
const LOG_INTERVAL: u64 = 100;

/// Convert every line of `reader` into `out`, strictly in input order.
///
/// Short lines are skipped. A bad duration, an unreadable line or a failed
/// library query stops the run; whatever was already written stays written.
pub fn convert<R, W, L>(
    reader: R,
    out: &mut M3uWriter<W>,
    matcher: &Matcher<L>,
    playlist_name: &str,
) -> Result<ConversionStats>
where
    R: BufRead,
    W: Write,
    L: Library,
{
    let start = Instant::now();
    let mut stats = ConversionStats::default();

    out.write_header(playlist_name)
        .context("Failed to write playlist header")?;

    let pb = create_spinner("Resolving");

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        stats.lines_read += 1;

        let Some(entry) = PlaylistEntry::parse_line(&line)
            .with_context(|| format!("Line {}", line_no))?
        else {
            stats.lines_skipped += 1;
            continue;
        };

        let result = matcher
            .find(&entry.artist, &entry.album, &entry.name)
            .with_context(|| format!("Lookup failed at line {}", line_no))?;

        out.write_entry(&entry, &result)
            .with_context(|| format!("Failed to write entry for line {}", line_no))?;

        stats.record(&result);
        pb.inc(1);
        log_progress("Resolving", stats.entries as u64, LOG_INTERVAL);
    }

    pb.finish_with_message(format!("Resolved {}/{} entries", stats.resolved(), stats.entries));
    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    Ok(stats)
}
