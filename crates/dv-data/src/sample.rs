//! Synthetic sample dataset used when no input file exists

use std::path::Path;

use dv_core::RawTitle;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::DataError;

const CONTENT_TYPES: &[(&str, f64)] = &[("Movie", 0.7), ("TV Show", 0.3)];

const DIRECTORS: &[(&str, f64)] = &[
    ("John Doe", 0.2),
    ("Jane Smith", 0.2),
    ("Alex Johnson", 0.1),
    ("Unknown", 0.3),
    ("Chris Nolan", 0.1),
    ("Ridley Scott", 0.05),
    ("Unknown Director", 0.05),
];

const COUNTRIES: &[&str] = &[
    "USA", "Canada", "UK", "Nigeria", "India",
    "France", "Japan", "Unknown", "Germany", "Australia",
];

const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const RATINGS: &[(&str, f64)] = &[
    ("PG", 0.1),
    ("TV-MA", 0.2),
    ("R", 0.1),
    ("PG-13", 0.1),
    ("TV-14", 0.15),
    ("TV-PG", 0.1),
    ("TV-Y", 0.05),
    ("TV-Y7", 0.05),
    ("G", 0.05),
    ("NC-17", 0.05),
    ("UR", 0.05),
];

const GENRES: &[&str] = &[
    "Dramas", "Comedies", "Action", "Thriller", "Documentaries",
    "International Movies", "Kids' TV", "Romantic Movies",
];

/// Probability that a generated duration is in minutes rather than seasons
const MOVIE_DURATION_SHARE: f64 = 0.7;

/// Size and seed of the generated dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpec {
    pub rows: usize,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self { rows: 100, seed: 42 }
    }
}

/// Weighted picker over a fixed label table
struct WeightedLabels<'a> {
    labels: &'a [(&'a str, f64)],
    index: WeightedIndex<f64>,
}

impl<'a> WeightedLabels<'a> {
    fn new(labels: &'a [(&'a str, f64)]) -> Result<Self, DataError> {
        let index = WeightedIndex::new(labels.iter().map(|(_, weight)| *weight))
            .map_err(|e| DataError::Generation(e.to_string()))?;
        Ok(Self { labels, index })
    }

    fn pick(&self, rng: &mut ChaCha8Rng) -> &'a str {
        self.labels[self.index.sample(rng)].0
    }
}

/// Seeded generator with a stream that does not change across platforms or
/// rand releases
fn sample_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate `spec.rows` titles. The same spec always yields the same rows.
pub fn generate_titles(spec: &SampleSpec) -> Result<Vec<RawTitle>, DataError> {
    let mut rng = sample_rng(spec.seed);
    let content_types = WeightedLabels::new(CONTENT_TYPES)?;
    let directors = WeightedLabels::new(DIRECTORS)?;
    let ratings = WeightedLabels::new(RATINGS)?;

    let mut titles = Vec::with_capacity(spec.rows);
    for i in 0..spec.rows {
        let kind = content_types.pick(&mut rng);
        let director = directors.pick(&mut rng);
        let country = COUNTRIES.choose(&mut rng).copied().unwrap_or("Unknown");

        let month = MONTHS.choose(&mut rng).copied().unwrap_or("January");
        let day = rng.gen_range(1..28);
        let year = rng.gen_range(2015..2023);
        let release_year: u32 = rng.gen_range(1990..2023);
        let rating = ratings.pick(&mut rng);

        let duration = if rng.gen::<f64>() < MOVIE_DURATION_SHARE {
            format!("{} min", rng.gen_range(60..180))
        } else {
            format!("{} Seasons", rng.gen_range(1..8))
        };

        let genres: Vec<&str> = GENRES.choose_multiple(&mut rng, 2).copied().collect();

        titles.push(RawTitle {
            show_id: Some(format!("s{}", i + 1)),
            kind: Some(kind.to_string()),
            title: Some(format!("Title {}", i + 1)),
            director: Some(director.to_string()),
            cast: Some(format!("Actor {}, Actor {}", cast_letter(i), cast_letter(i + 1))),
            country: Some(country.to_string()),
            date_added: Some(format!("{month} {day}, {year}")),
            release_year: Some(release_year.to_string()),
            rating: Some(rating.to_string()),
            duration: Some(duration),
            listed_in: Some(genres.join(", ")),
        });
    }

    Ok(titles)
}

fn cast_letter(i: usize) -> char {
    char::from(b'A' + (i % 26) as u8)
}

/// Generate the sample dataset and write it as CSV to `path`.
///
/// Returns the number of rows written.
pub fn write_sample(path: &Path, spec: &SampleSpec) -> Result<usize, DataError> {
    let titles = generate_titles(spec)?;

    let mut writer = csv::Writer::from_path(path)?;
    for title in &titles {
        writer.serialize(title)?;
    }
    writer.flush()?;

    debug!(rows = titles.len(), path = %path.display(), "wrote sample dataset");
    Ok(titles.len())
}
