//! Tab-separated playlist export parsing.
//!
//! Each line holds name, duration, artist, album, genre and two fields that
//! are ignored. Short lines are skipped; an unreadable duration is an error.

use anyhow::{bail, Context, Result};

use crate::models::PlaylistEntry;

/// Lines with fewer tabs than this (after padding) are skipped.
const MIN_TABS: usize = 6;

/// Padding appended to every line so trailing empty fields still split.
const TAB_PADDING: &str = "\t\t\t\t";

impl PlaylistEntry {
    /// Parse one line of the export.
    ///
    /// Returns `Ok(None)` for lines that are too short to hold a record and an
    /// error when the duration is neither `MM:SS` nor `HH:MM:SS`.
    pub fn parse_line(line: &str) -> Result<Option<PlaylistEntry>> {
        let padded = format!("{}{}", line.trim_end_matches(['\n', '\r']), TAB_PADDING);
        if padded.matches('\t').count() < MIN_TABS {
            return Ok(None);
        }

        let mut fields = padded.split('\t');
        let mut next = || fields.next().unwrap_or_default().to_string();
        let name = next();
        let duration = next();
        let artist = next();
        let album = next();
        let genre = next();

        let duration_sec = parse_duration(&duration)
            .with_context(|| format!("Invalid duration for '{}'", name))?;

        Ok(Some(PlaylistEntry {
            name,
            duration_sec,
            artist,
            album,
            genre,
        }))
    }
}

/// Convert `MM:SS` or `HH:MM:SS` to whole seconds.
pub fn parse_duration(s: &str) -> Result<u32> {
    let parts = s
        .split(':')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .with_context(|| format!("Cannot parse duration '{}'", s))?;

    let total = match parts.as_slice() {
        [mins, secs] => mins.checked_mul(60).and_then(|m| m.checked_add(*secs)),
        [hours, mins, secs] => hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(mins.checked_mul(60)?))
            .and_then(|hm| hm.checked_add(*secs)),
        _ => bail!("Cannot parse duration '{}': expected MM:SS or HH:MM:SS", s),
    };
    match total {
        Some(secs) => Ok(secs),
        None => bail!("Cannot parse duration '{}': too long", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3:45").unwrap(), 225);
        assert_eq!(parse_duration("03:05").unwrap(), 185);
        assert_eq!(parse_duration("0:00").unwrap(), 0);
        assert_eq!(parse_duration("1:02:03").unwrap(), 3723);
        assert_eq!(parse_duration(" 4:20 ").unwrap(), 260);
    }

    #[test]
    fn test_parse_duration_rejects_other_forms() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("245").is_err());
        assert!(parse_duration("Time").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("3:4x").is_err());
        assert!(parse_duration("-1:30").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_an_error() {
        let err = parse_duration("1193047:00:00").unwrap_err();
        assert!(err.to_string().contains("too long"));
        assert!(parse_duration("71582789:00").is_err());
        assert!(parse_duration("0:4294967295").is_ok());
        assert!(parse_duration("1:4294967295").is_err());
    }

    #[test]
    fn test_parse_full_line() {
        let entry = PlaylistEntry::parse_line("Yesterday\t2:05\tThe Beatles\tHelp!\tRock\t1965\t5\n")
            .unwrap()
            .unwrap();
        assert_eq!(
            entry,
            PlaylistEntry {
                name: "Yesterday".to_string(),
                duration_sec: 125,
                artist: "The Beatles".to_string(),
                album: "Help!".to_string(),
                genre: "Rock".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_line_pads_missing_trailing_fields() {
        // Two tabs plus four of padding is enough
        let entry = PlaylistEntry::parse_line("Roxanne\t3:12\tThe Police").unwrap().unwrap();
        assert_eq!(entry.artist, "The Police");
        assert_eq!(entry.album, "");
        assert_eq!(entry.genre, "");
    }

    #[test]
    fn test_parse_line_strips_crlf() {
        let entry = PlaylistEntry::parse_line("Song\t1:00\tArtist\tAlbum\tGenre\r\n").unwrap().unwrap();
        assert_eq!(entry.genre, "Genre");
    }

    #[test]
    fn test_short_lines_are_skipped() {
        assert_eq!(PlaylistEntry::parse_line("").unwrap(), None);
        assert_eq!(PlaylistEntry::parse_line("\n").unwrap(), None);
        assert_eq!(PlaylistEntry::parse_line("just a name").unwrap(), None);
        assert_eq!(PlaylistEntry::parse_line("name\t3:00").unwrap(), None);
    }

    #[test]
    fn test_bad_duration_is_an_error() {
        let err = PlaylistEntry::parse_line("Name\tTime\tArtist\tAlbum\tGenre\t\t").unwrap_err();
        assert!(format!("{:#}", err).contains("Cannot parse duration 'Time'"));
    }
}
