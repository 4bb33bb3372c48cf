//! Click-to-sort for course tables.
//!
//! Every column compares in one of three ways: review dates chronologically,
//! statistics numerically, everything else as plain text. Sorting is stable,
//! so rows that tie keep their relative order across repeated clicks.

use crate::date::parse_date;
use crate::model::{CourseSummaryRow, Score};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction for the next click given the column's current state.
    /// A column that was never sorted starts ascending.
    pub fn next(current: Option<SortDirection>) -> SortDirection {
        match current {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            Some(SortDirection::Descending) | None => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Numeric,
}

/// Columns of a course summary table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Professor,
    LatestRating,
    QualityAverage,
    DifficultyAverage,
    Quality(Score),
    Difficulty(Score),
}

impl Column {
    pub const COUNT: usize = 14;

    pub fn from_index(index: usize) -> Option<Column> {
        let bucket = |i: usize| Score::new((Score::MAX as usize - i) as u8);
        match index {
            0 => Some(Column::Professor),
            1 => Some(Column::LatestRating),
            2 => Some(Column::QualityAverage),
            3 => Some(Column::DifficultyAverage),
            4..=8 => bucket(index - 4).map(Column::Quality),
            9..=13 => bucket(index - 9).map(Column::Difficulty),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = Column> {
        (0..Self::COUNT).filter_map(Column::from_index)
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Professor => ColumnKind::Text,
            Column::LatestRating => ColumnKind::Date,
            _ => ColumnKind::Numeric,
        }
    }

    pub fn header(self) -> String {
        match self {
            Column::Professor => "Professor".into(),
            Column::LatestRating => "Latest Rating".into(),
            Column::QualityAverage => "Avg Quality".into(),
            Column::DifficultyAverage => "Avg Difficulty".into(),
            Column::Quality(s) => format!("Quality {s}"),
            Column::Difficulty(s) => format!("Difficulty {s}"),
        }
    }
}

/// Columns outside the summary layout compare as text.
pub fn column_kind(column: usize) -> ColumnKind {
    Column::from_index(column).map(Column::kind).unwrap_or(ColumnKind::Text)
}

/// Anything that can be shown as a table row of display strings.
pub trait TableRow {
    fn cell(&self, column: usize) -> Option<Cow<'_, str>>;

    /// Value used when `column` sorts numerically. Rows that keep the
    /// underlying number override this so rounding in the display cell
    /// cannot merge distinct values.
    fn numeric_key(&self, column: usize) -> Option<f64> {
        parse_number(self.cell(column).as_deref().unwrap_or(""))
    }
}

impl TableRow for Vec<String> {
    fn cell(&self, column: usize) -> Option<Cow<'_, str>> {
        self.get(column).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl TableRow for CourseSummaryRow {
    fn cell(&self, column: usize) -> Option<Cow<'_, str>> {
        let cell = match Column::from_index(column)? {
            Column::Professor => Cow::Borrowed(self.professor_name.as_str()),
            Column::LatestRating => Cow::Borrowed(self.latest_rating_date.as_str()),
            Column::QualityAverage => Cow::Owned(format!("{:.2}", self.quality_average)),
            Column::DifficultyAverage => Cow::Owned(format!("{:.2}", self.difficulty_average)),
            Column::Quality(s) => Cow::Owned(self.quality_histogram.count(s).to_string()),
            Column::Difficulty(s) => Cow::Owned(self.difficulty_histogram.count(s).to_string()),
        };
        Some(cell)
    }

    fn numeric_key(&self, column: usize) -> Option<f64> {
        let value = match Column::from_index(column)? {
            Column::Professor | Column::LatestRating => return None,
            Column::QualityAverage => self.quality_average,
            Column::DifficultyAverage => self.difficulty_average,
            Column::Quality(s) => self.quality_histogram.count(s) as f64,
            Column::Difficulty(s) => self.difficulty_histogram.count(s) as f64,
        };
        Some(value).filter(|v| !v.is_nan())
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (x, y) => x.is_some().cmp(&y.is_some()),
    }
}

/// Cells that fail to parse for their column kind sort before all valid ones.
pub fn compare_cells(kind: ColumnKind, a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = (a.unwrap_or(""), b.unwrap_or(""));
    match kind {
        ColumnKind::Text => a.cmp(b),
        ColumnKind::Date => parse_date(a).ok().cmp(&parse_date(b).ok()),
        ColumnKind::Numeric => compare_numbers(parse_number(a), parse_number(b)),
    }
}

fn compare_rows<R: TableRow>(kind: ColumnKind, column: usize, a: &R, b: &R) -> Ordering {
    match kind {
        ColumnKind::Numeric => compare_numbers(a.numeric_key(column), b.numeric_key(column)),
        _ => compare_cells(kind, a.cell(column).as_deref(), b.cell(column).as_deref()),
    }
}

/// Stable in-place sort of `rows` by `column`. Returns the direction that was
/// applied, which the caller stores as the column's new state.
pub fn sort_rows<R: TableRow>(rows: &mut [R], column: usize, current: Option<SortDirection>) -> SortDirection {
    let direction = SortDirection::next(current);
    let kind = column_kind(column);
    rows.sort_by(|a, b| {
        let ord = compare_rows(kind, column, a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    direction
}

/// Per-table sort state: one direction per column that has been clicked.
/// Switching columns leaves the other columns' state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSortController {
    directions: HashMap<usize, SortDirection>,
}

impl TableSortController {
    pub fn new() -> Self { Self::default() }

    pub fn from_directions(directions: HashMap<usize, SortDirection>) -> Self { Self { directions } }

    pub fn sort<R: TableRow>(&mut self, rows: &mut [R], column: usize) -> SortDirection {
        let applied = sort_rows(rows, column, self.direction(column));
        self.directions.insert(column, applied);
        tracing::trace!(column, ?applied, rows = rows.len(), "sorted table");
        applied
    }

    pub fn direction(&self, column: usize) -> Option<SortDirection> { self.directions.get(&column).copied() }

    pub fn into_directions(self) -> HashMap<usize, SortDirection> { self.directions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Histogram;

    fn row(name: &str, date: &str, quality: f64) -> CourseSummaryRow {
        CourseSummaryRow {
            professor_name: name.into(),
            latest_rating_date: date.into(),
            quality_average: quality,
            difficulty_average: 3.0,
            quality_histogram: Histogram::default(),
            difficulty_histogram: Histogram::default(),
        }
    }

    fn names(rows: &[CourseSummaryRow]) -> Vec<&str> {
        rows.iter().map(|r| r.professor_name.as_str()).collect()
    }

    const QUALITY: usize = 2;

    #[test]
    fn quality_sorts_ascending_then_descending() {
        let mut rows = vec![row("A", "Jan 1st, 2020", 3.5), row("B", "Jan 1st, 2020", 1.0), row("C", "Jan 1st, 2020", 4.75)];
        let dir = sort_rows(&mut rows, QUALITY, None);
        assert_eq!(dir, SortDirection::Ascending);
        assert_eq!(names(&rows), ["B", "A", "C"]);
        let dir = sort_rows(&mut rows, QUALITY, Some(dir));
        assert_eq!(dir, SortDirection::Descending);
        assert_eq!(names(&rows), ["C", "A", "B"]);
    }

    #[test]
    fn averages_sort_by_value_not_by_rounded_text() {
        // 57/14 and 61/15 both display as "4.07"
        let mut rows = vec![row("Hi", "", 57.0 / 14.0), row("Lo", "", 61.0 / 15.0)];
        assert_eq!(rows[0].cell(QUALITY), rows[1].cell(QUALITY));
        sort_rows(&mut rows, QUALITY, None);
        assert_eq!(names(&rows), ["Lo", "Hi"]);
        sort_rows(&mut rows, QUALITY, Some(SortDirection::Ascending));
        assert_eq!(names(&rows), ["Hi", "Lo"]);
    }

    #[test]
    fn ties_keep_their_original_order() {
        let mut rows = vec![row("A", "", 2.0), row("B", "", 4.0), row("C", "", 2.0), row("D", "", 4.0)];
        let mut ctl = TableSortController::new();
        ctl.sort(&mut rows, QUALITY);
        assert_eq!(names(&rows), ["A", "C", "B", "D"]);
        ctl.sort(&mut rows, QUALITY);
        assert_eq!(names(&rows), ["B", "D", "A", "C"]);
    }

    #[test]
    fn dates_sort_chronologically_not_alphabetically() {
        let mut rows = vec![
            row("A", "Oct 2nd, 2021", 1.0),
            row("B", "Feb 10th, 2022", 1.0),
            row("C", "Apr 1st, 2021", 1.0),
            row("D", "garbage", 1.0),
        ];
        sort_rows(&mut rows, 1, None);
        assert_eq!(names(&rows), ["D", "C", "A", "B"]);
    }

    #[test]
    fn text_columns_compare_lexicographically() {
        let mut rows: Vec<Vec<String>> = ["Zhang", "Adams", "Miller"].iter().map(|n| vec![n.to_string()]).collect();
        sort_rows(&mut rows, 0, None);
        assert_eq!(rows.iter().map(|r| r[0].as_str()).collect::<Vec<_>>(), ["Adams", "Miller", "Zhang"]);
    }

    #[test]
    fn numeric_cells_compare_as_numbers() {
        let mut rows: Vec<Vec<String>> = ["10", "9", "n/a", "100"]
            .iter()
            .map(|v| vec!["x".into(), "".into(), v.to_string()])
            .collect();
        sort_rows(&mut rows, QUALITY, None);
        assert_eq!(rows.iter().map(|r| r[2].as_str()).collect::<Vec<_>>(), ["n/a", "9", "10", "100"]);
    }

    #[test]
    fn each_column_keeps_its_own_direction() {
        let mut rows = vec![row("B", "Jan 1st, 2020", 1.0), row("A", "Jan 2nd, 2020", 2.0)];
        let mut ctl = TableSortController::new();
        assert_eq!(ctl.sort(&mut rows, QUALITY), SortDirection::Ascending);
        assert_eq!(ctl.sort(&mut rows, 0), SortDirection::Ascending);
        assert_eq!(ctl.sort(&mut rows, QUALITY), SortDirection::Descending);
        assert_eq!(names(&rows), ["A", "B"]);
        assert_eq!(ctl.direction(0), Some(SortDirection::Ascending));
        assert_eq!(ctl.direction(5), None);
    }

    #[test]
    fn column_layout() {
        assert_eq!(Column::all().count(), Column::COUNT);
        assert_eq!(Column::from_index(4), Score::new(5).map(Column::Quality));
        assert_eq!(Column::from_index(13), Score::new(1).map(Column::Difficulty));
        assert_eq!(column_kind(1), ColumnKind::Date);
        assert_eq!(column_kind(99), ColumnKind::Text);
    }
}
