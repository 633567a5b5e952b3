//! Turns a [`MovieRecord`] into a render plan: already-validated data the
//! paint step can display without any further parsing.

use crate::lookup::MovieRecord;

/// File name extension used for rating source logo artwork.
const LOGO_EXTENSION: &str = "png";

/// One small label for a single genre classification.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreChip {
    pub label: String,
}

/// One visual unit for a third-party rating: the source's logo reference
/// plus the leading numeric segment of its score.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTab {
    pub source: String,
    pub score: String,
    pub logo: String,
}

/// Labeled detail rows shown beneath the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRows {
    pub director: String,
    pub writers: String,
    pub actors: String,
    pub box_office: String,
    pub released: String,
    pub runtime: String,
    pub imdb_rating: String,
    pub imdb_votes: String,
}

/// Everything the movie pane needs to paint one lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub poster_url: String,
    pub title: String,
    pub plot: String,
    pub details: DetailRows,
    pub genres: Vec<GenreChip>,
    pub ratings: Vec<RatingTab>,
}

/// Logo artwork is looked up by filename convention: the source name as
/// reported by the provider, verbatim, plus the image extension.
pub fn logo_filename(source: &str) -> String {
    format!("{}.{}", source, LOGO_EXTENSION)
}

/// Pure mapping from record to plan. Chip and tab order follow the
/// provider's order exactly; duplicates are kept; an empty ratings list
/// simply produces no tabs.
pub fn build_render_plan(record: &MovieRecord) -> RenderPlan {
    RenderPlan {
        poster_url: record.poster_url.clone(),
        title: record.title.clone(),
        plot: record.plot.clone(),
        details: DetailRows {
            director: record.director.clone(),
            writers: record.writers.clone(),
            actors: record.actors.clone(),
            box_office: record.box_office.clone(),
            released: record.released.clone(),
            runtime: record.runtime.clone(),
            imdb_rating: record.imdb_rating.clone(),
            imdb_votes: record.imdb_votes.clone(),
        },
        genres: record
            .genres
            .iter()
            .map(|g| GenreChip { label: g.clone() })
            .collect(),
        ratings: record
            .ratings
            .iter()
            .map(|r| RatingTab {
                source: r.source.clone(),
                score: r.score.clone(),
                logo: logo_filename(&r.source),
            })
            .collect(),
    }
}
