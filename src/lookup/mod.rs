pub mod omdb;

use anyhow::Result;
use async_trait::async_trait;

/// Genre field delimiter as sent by the provider ("Action, Drama, Thriller").
pub const GENRE_DELIMITER: &str = ", ";

/// Separator between a rating score and its scale ("8.4/10").
pub const RATING_SCALE_SEPARATOR: char = '/';

/// A validated, trimmed, non-empty movie title entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `input` and rejects it if nothing remains. Validation happens
    /// here so an empty query can never reach the network layer.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of a single provider lookup. Constructed fresh per search,
/// consumed once to build a render plan, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    Found(MovieRecord),
    /// The provider answered but reported no match; carries its message.
    NotFound(String),
    /// The HTTP exchange itself failed (non-2xx status).
    TransportError { status: u16, message: String },
}

/// One third-party rating as reported by the provider, with the score
/// already reduced to the segment before the scale separator.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub source: String,
    pub score: String,
}

/// Movie details as supplied by the provider. Every field is an opaque
/// display string except `genres` and `ratings`, which are derived by the
/// named parsing rules in this module.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub plot: String,
    pub director: String,
    pub writers: String,
    pub actors: String,
    pub box_office: String,
    pub released: String,
    pub runtime: String,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub ratings: Vec<RatingEntry>,
    pub imdb_rating: String,
    pub imdb_votes: String,
}

/// Splits the provider's delimited genre field. Order and duplicates are
/// preserved; an undelimited value yields exactly one token.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(GENRE_DELIMITER).map(|g| g.to_string()).collect()
}

/// Returns the portion of a rating value before the scale separator,
/// so "8.4/10" becomes "8.4". A value without a separator is kept whole.
pub fn leading_score(value: &str) -> &str {
    value
        .split(RATING_SCALE_SEPARATOR)
        .next()
        .unwrap_or(value)
}

/// Async seam to the movie-information provider. One implementation per
/// upstream API; the app only ever talks to this trait.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Issues exactly one request for `query` and classifies the outcome.
    /// Provider-level failures (no match, bad status) are values, not
    /// errors; `Err` is reserved for transport exceptions and malformed
    /// payloads. No retries.
    async fn resolve(&self, query: &SearchQuery) -> Result<LookupResponse>;
}
