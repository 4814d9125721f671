use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog identifier of a movie
pub type MovieId = i32;

/// Identifier of an application user
pub type UserId = i32;

/// A movie as read from the catalog at the start of a recommendation call
///
/// Every attribute besides `id` and `title` is optional in the catalog; the
/// recommender substitutes documented defaults for anything missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Genre names, unordered
    #[serde(default)]
    pub genres: Vec<String>,
    /// IMDb rating exactly as stored (e.g. "7.8", "N/A")
    #[serde(default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<i32>,
    #[serde(default)]
    pub meta_score: Option<i32>,
    /// Box office gross in whole dollars
    #[serde(default)]
    pub box_office: Option<i64>,
    /// MPAA content rating code (e.g. "PG-13")
    #[serde(default)]
    pub rated: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the required attributes set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            genres: Vec::new(),
            imdb_rating: None,
            runtime_minutes: None,
            meta_score: None,
            box_office: None,
            rated: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_imdb_rating(mut self, rating: impl Into<String>) -> Self {
        self.imdb_rating = Some(rating.into());
        self
    }

    pub fn with_runtime_minutes(mut self, minutes: i32) -> Self {
        self.runtime_minutes = Some(minutes);
        self
    }

    pub fn with_meta_score(mut self, score: i32) -> Self {
        self.meta_score = Some(score);
        self
    }

    pub fn with_box_office(mut self, gross: i64) -> Self {
        self.box_office = Some(gross);
        self
    }

    pub fn with_rated(mut self, code: impl Into<String>) -> Self {
        self.rated = Some(code.into());
        self
    }

    /// Parsed content rating, `Unknown` when absent or unrecognized
    pub fn content_rating(&self) -> ContentRating {
        ContentRating::from_code(self.rated.as_deref())
    }
}

/// MPAA content rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentRating {
    G,
    Pg,
    Pg13,
    R,
    Unknown,
}

impl ContentRating {
    /// Parses a stored rating code; anything unrecognized maps to `Unknown`
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("R") => ContentRating::R,
            Some("PG-13") => ContentRating::Pg13,
            Some("PG") => ContentRating::Pg,
            Some("G") => ContentRating::G,
            _ => ContentRating::Unknown,
        }
    }

    /// Ordinal used in the stats block. Unknown ratings count as PG.
    pub fn ordinal(self) -> u8 {
        match self {
            ContentRating::R => 3,
            ContentRating::Pg13 => 2,
            ContentRating::Pg | ContentRating::Unknown => 1,
            ContentRating::G => 0,
        }
    }
}

impl Display for ContentRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ContentRating::G => "G",
            ContentRating::Pg => "PG",
            ContentRating::Pg13 => "PG-13",
            ContentRating::R => "R",
            ContentRating::Unknown => "unknown",
        };
        write!(f, "{}", code)
    }
}
