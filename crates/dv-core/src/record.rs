//! Title Record types

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::duration::DurationKind;

/// Column names of the input file, in file order
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TYPE: &str = "type";
    pub const TITLE: &str = "title";
    pub const DIRECTOR: &str = "director";
    pub const CAST: &str = "cast";
    pub const COUNTRY: &str = "country";
    pub const DATE_ADDED: &str = "date_added";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const RATING: &str = "rating";
    pub const DURATION: &str = "duration";
    pub const LISTED_IN: &str = "listed_in";

    /// Columns derived by the cleaner
    pub const DATE_ADDED_VALID: &str = "date_added_valid";
    pub const DURATION_VALUE: &str = "duration_value";
    pub const DURATION_TYPE: &str = "duration_type";

    pub const INPUT: [&str; 11] = [
        SHOW_ID, TYPE, TITLE, DIRECTOR, CAST, COUNTRY,
        DATE_ADDED, RELEASE_YEAR, RATING, DURATION, LISTED_IN,
    ];

    pub const CLEANED: [&str; 14] = [
        SHOW_ID, TYPE, TITLE, DIRECTOR, CAST, COUNTRY,
        DATE_ADDED, RELEASE_YEAR, RATING, DURATION, LISTED_IN,
        DATE_ADDED_VALID, DURATION_VALUE, DURATION_TYPE,
    ];
}

/// Movie or TV show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

/// One row exactly as read from the input file.
///
/// Every column is optional so that files missing a column, or carrying
/// extra ones, still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTitle {
    pub show_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

impl RawTitle {
    /// Apply `is_missing` to every cell, turning matches into `None`
    pub fn normalize_missing(&mut self, is_missing: impl Fn(&str) -> bool) {
        for cell in [
            &mut self.show_id,
            &mut self.kind,
            &mut self.title,
            &mut self.director,
            &mut self.cast,
            &mut self.country,
            &mut self.date_added,
            &mut self.release_year,
            &mut self.rating,
            &mut self.duration,
            &mut self.listed_in,
        ] {
            if cell.as_deref().is_some_and(&is_missing) {
                *cell = None;
            }
        }
    }
}

/// A cleaned row. Serializes in the column order of the cleaned CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub show_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub rating: String,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
    pub date_added_valid: bool,
    pub duration_value: Option<u32>,
    pub duration_type: DurationKind,
}

impl TitleRecord {
    pub fn content_type(&self) -> Option<ContentType> {
        self.kind.as_deref().and_then(ContentType::from_label)
    }

    pub fn year_added(&self) -> Option<i32> {
        self.date_added.map(|date| date.year())
    }

    /// Years between release and `current_year`
    pub fn age(&self, current_year: i32) -> Option<i32> {
        self.release_year.map(|year| current_year - year)
    }

    /// Genres listed for this title, split on ", "
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.listed_in
            .as_deref()
            .into_iter()
            .flat_map(|list| list.split(", "))
            .filter(|genre| !genre.is_empty())
    }
}
