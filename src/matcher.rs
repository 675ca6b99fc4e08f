//! Playlist entry → library path resolution.
//!
//! The cascade is an ordered list of [`MatchStep`]s. Each step describes the
//! lookup it issues from a precomputed set of [`Terms`] (or `None` when its
//! guard skips it), and [`Matcher::find`] runs them in order until one returns
//! a row. A title-only query is the last resort; its rows are returned as
//! candidates and never picked automatically.

use anyhow::Result;

use crate::library::Library;
use crate::models::{Candidate, Lookup, MatchResult, MatchStep};
use crate::normalize::{fold, strip_leading_article, strip_parenthetical, swap_and_ampersand};

/// Query forms derived once per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terms {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub artist_no_article: String,
    pub title_no_parens: String,
    pub title_swapped: String,
    pub artist_swapped: String,
}

impl Terms {
    pub fn new(artist: &str, album: &str, title: &str) -> Self {
        let artist = fold(artist);
        let album = fold(album);
        let title = fold(title);
        let artist_no_article = strip_leading_article(&artist);
        let title_no_parens = strip_parenthetical(&title);
        let title_swapped = swap_and_ampersand(&title_no_parens);
        let artist_swapped = swap_and_ampersand(&artist_no_article);
        Self {
            title,
            album,
            artist,
            artist_no_article,
            title_no_parens,
            title_swapped,
            artist_swapped,
        }
    }
}

impl MatchStep {
    /// Targeted steps in evaluation order.
    pub const CASCADE: [MatchStep; 6] = [
        MatchStep::TitleAlbumArtist,
        MatchStep::TitleArtist,
        MatchStep::TitleArtistNoArticle,
        MatchStep::TitleNoParensArtist,
        MatchStep::TitleNoParensArtistNoArticle,
        MatchStep::AmpersandSwap,
    ];

    /// Lookup issued by this step, or `None` if the step does not apply.
    pub fn lookup<'a>(self, t: &'a Terms) -> Option<Lookup<'a>> {
        match self {
            MatchStep::TitleAlbumArtist => {
                Some(Lookup::title_album_artist(&t.title, &t.album, &t.artist))
            }
            MatchStep::TitleArtist => Some(Lookup::title_artist(&t.title, &t.artist)),
            // Only worth a query when an article was actually removed
            MatchStep::TitleArtistNoArticle => (t.artist_no_article != t.artist)
                .then(|| Lookup::title_artist(&t.title, &t.artist_no_article)),
            MatchStep::TitleNoParensArtist => (t.title_no_parens != t.title)
                .then(|| Lookup::title_artist(&t.title_no_parens, &t.artist)),
            MatchStep::TitleNoParensArtistNoArticle => {
                Some(Lookup::title_artist(&t.title_no_parens, &t.artist_no_article))
            }
            MatchStep::AmpersandSwap => {
                Some(Lookup::title_artist(&t.title_swapped, &t.artist_swapped))
            }
        }
    }
}

/// Resolves playlist entries against a [`Library`].
pub struct Matcher<L> {
    library: L,
    trace: bool,
}

impl<L: Library> Matcher<L> {
    pub fn new(library: L) -> Self {
        Self { library, trace: false }
    }

    /// Log every missed lookup to stderr.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Resolve one entry. Only store failures are errors.
    pub fn find(&self, artist: &str, album: &str, title: &str) -> Result<MatchResult> {
        let terms = Terms::new(artist, album, title);

        for step in MatchStep::CASCADE {
            let Some(query) = step.lookup(&terms) else {
                continue;
            };
            if let Some(hit) = self.library.lookup(&query)?.into_iter().next() {
                return Ok(MatchResult::Resolved { path: hit.path, step });
            }
            if self.trace {
                eprintln!("# tried {}", query);
            }
        }

        let candidates: Vec<Candidate> = self
            .library
            .lookup(&Lookup::title(&terms.title))?
            .into_iter()
            .map(Candidate::from)
            .collect();

        if candidates.is_empty() {
            if self.trace {
                eprintln!("# tried title={}", terms.title);
            }
            Ok(MatchResult::NotFound)
        } else {
            Ok(MatchResult::Ambiguous(candidates))
        }
    }
}
