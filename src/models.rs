//! Core data models for playlist conversion.
//!
//! This module contains the playlist and library records, the query shape the
//! library understands, match outcomes and run statistics.

use serde::Serialize;

// ============================================================================
// Playlist Models
// ============================================================================

/// One record of the tab-separated playlist export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    pub duration_sec: u32,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

// ============================================================================
// Library Models
// ============================================================================

/// Row of the `media_file` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryRecord {
    pub id: String,
    pub path: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Case-insensitive equality query against the library.
/// `None` fields are not filtered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub title: &'a str,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
}

impl<'a> Lookup<'a> {
    pub fn title(title: &'a str) -> Self {
        Self { title, artist: None, album: None }
    }

    pub fn title_artist(title: &'a str, artist: &'a str) -> Self {
        Self { title, artist: Some(artist), album: None }
    }

    pub fn title_album_artist(title: &'a str, album: &'a str, artist: &'a str) -> Self {
        Self { title, artist: Some(artist), album: Some(album) }
    }
}

impl std::fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "title={}", self.title)?;
        if let Some(album) = self.album {
            write!(f, " album={}", album)?;
        }
        if let Some(artist) = self.artist {
            write!(f, " artist={}", artist)?;
        }
        Ok(())
    }
}

// ============================================================================
// Match Models
// ============================================================================

/// Cascade step that produced a match. Declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    TitleAlbumArtist,
    TitleArtist,
    TitleArtistNoArticle,
    TitleNoParensArtist,
    TitleNoParensArtistNoArticle,
    AmpersandSwap,
}

/// Library row offered for manual disambiguation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub path: String,
}

impl From<LibraryRecord> for Candidate {
    fn from(r: LibraryRecord) -> Self {
        Self {
            title: r.title,
            artist: r.artist,
            album: r.album,
            path: r.path,
        }
    }
}

/// Outcome of resolving one playlist entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Resolved { path: String, step: MatchStep },
    /// Title-only hits, in store order. Never auto-selected.
    Ambiguous(Vec<Candidate>),
    NotFound,
}

impl MatchResult {
    pub fn path(&self) -> Option<&str> {
        match self {
            MatchResult::Resolved { path, .. } => Some(path),
            _ => None,
        }
    }
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-run conversion statistics.
#[derive(Default, Debug, Clone, Serialize)]
pub struct ConversionStats {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub entries: usize,

    // Resolved, by cascade step
    pub resolved_title_album_artist: usize,
    pub resolved_title_artist: usize,
    pub resolved_title_artist_no_article: usize,
    pub resolved_title_no_parens_artist: usize,
    pub resolved_title_no_parens_artist_no_article: usize,
    pub resolved_ampersand_swap: usize,

    pub ambiguous: usize,
    pub ambiguous_candidates: usize,
    pub not_found: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl ConversionStats {
    /// Count one match outcome
    pub fn record(&mut self, result: &MatchResult) {
        self.entries += 1;
        match result {
            MatchResult::Resolved { step, .. } => match step {
                MatchStep::TitleAlbumArtist => self.resolved_title_album_artist += 1,
                MatchStep::TitleArtist => self.resolved_title_artist += 1,
                MatchStep::TitleArtistNoArticle => self.resolved_title_artist_no_article += 1,
                MatchStep::TitleNoParensArtist => self.resolved_title_no_parens_artist += 1,
                MatchStep::TitleNoParensArtistNoArticle => {
                    self.resolved_title_no_parens_artist_no_article += 1
                }
                MatchStep::AmpersandSwap => self.resolved_ampersand_swap += 1,
            },
            MatchResult::Ambiguous(candidates) => {
                self.ambiguous += 1;
                self.ambiguous_candidates += candidates.len();
            }
            MatchResult::NotFound => self.not_found += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.resolved_title_album_artist
            + self.resolved_title_artist
            + self.resolved_title_artist_no_article
            + self.resolved_title_no_parens_artist
            + self.resolved_title_no_parens_artist_no_article
            + self.resolved_ampersand_swap
    }

    /// Calculate match rate as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            100.0 * self.resolved() as f64 / self.entries as f64
        }
    }

    /// Log stats to stderr in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
