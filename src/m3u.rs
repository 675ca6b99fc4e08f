//! Extended M3U output.

use std::io::{self, Write};

use crate::models::{MatchResult, PlaylistEntry};

/// Streams an extended M3U playlist, flushing after every entry.
pub struct M3uWriter<W: Write> {
    out: W,
}

impl<W: Write> M3uWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `#EXTM3U` followed by the `#PLAYLIST:` name line.
    pub fn write_header(&mut self, playlist_name: &str) -> io::Result<()> {
        writeln!(self.out, "#EXTM3U")?;
        writeln!(self.out, "#PLAYLIST:{}", playlist_name)?;
        self.out.flush()
    }

    /// Info line plus the resolved path, a not-found marker, or one comment
    /// block per candidate.
    pub fn write_entry(&mut self, entry: &PlaylistEntry, result: &MatchResult) -> io::Result<()> {
        writeln!(self.out, "#EXTINF:{},{} - {}", entry.duration_sec, entry.artist, entry.name)?;
        match result {
            MatchResult::Resolved { path, .. } => writeln!(self.out, "{}", path)?,
            MatchResult::Ambiguous(candidates) => {
                for c in candidates {
                    writeln!(self.out, "# potential matches: ")?;
                    writeln!(self.out, "# {} - {} - {}", c.title, c.artist, c.album)?;
                    writeln!(self.out, "# {}", c.path)?;
                }
            }
            MatchResult::NotFound => writeln!(
                self.out,
                "#notfound: {}/{}/{}.mp3",
                entry.artist, entry.album, entry.name
            )?,
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
