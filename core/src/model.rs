use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 1-5 rating value. Construction is the only place range is checked,
/// so histogram indexing downstream never goes out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawScore", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 { self.0 }
}

impl From<Score> for u8 {
    fn from(s: Score) -> u8 { s.0 }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Scraped datasets carry scores either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Int(i64),
    Text(String),
}

impl TryFrom<RawScore> for Score {
    type Error = String;

    fn try_from(raw: RawScore) -> Result<Self, Self::Error> {
        let value = match &raw {
            RawScore::Int(n) => *n,
            RawScore::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("rating value {s:?} is not an integer"))?,
        };
        u8::try_from(value)
            .ok()
            .and_then(Score::new)
            .ok_or_else(|| format!("rating value {value} outside 1-5"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub class_id: String,
    /// Free text in the "Jun 5th, 2024" convention; see [`crate::date`].
    pub date: String,
    pub rating_quality: Score,
    pub rating_difficulty: Score,
    #[serde(default)]
    pub comment: String,
}

impl Rating {
    pub fn is_for_class(&self, class_id: &str) -> bool {
        self.class_id.trim() == class_id.trim()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    pub name: String,
    #[serde(rename = "ratingList", default)]
    pub rating_list: Vec<Rating>,
}

/// The whole ratings file: a JSON array of professors, in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub professors: Vec<Professor>,
}

impl Dataset {
    pub fn new(professors: Vec<Professor>) -> Self { Self { professors } }

    pub fn num_ratings(&self) -> usize {
        self.professors.iter().map(|p| p.rating_list.len()).sum()
    }
}

/// Counts per score value, stored highest first: index 0 holds the 5s, index 4 the 1s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram(pub [u32; 5]);

impl Histogram {
    pub fn record(&mut self, score: Score) {
        self.0[(Score::MAX - score.get()) as usize] += 1;
    }

    pub fn count(&self, score: Score) -> u32 {
        self.0[(Score::MAX - score.get()) as usize]
    }

    pub fn total(&self) -> u32 { self.0.iter().sum() }
}

/// The individual reviews one professor received for a course.
#[derive(Debug, Clone, Serialize)]
pub struct ProfessorRatings {
    pub name: String,
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummaryRow {
    pub professor_name: String,
    pub latest_rating_date: String,
    pub quality_average: f64,
    pub difficulty_average: f64,
    pub quality_histogram: Histogram,
    pub difficulty_histogram: Histogram,
}

/// Result for one course id from the user's input. Empty rows mean no professor
/// has ratings for that course; this is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGroup {
    pub course_id: String,
    pub rows: Vec<CourseSummaryRow>,
}

impl CourseGroup {
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
