use crate::model::CourseGroup;
use crate::sort::{Column, TableRow};
use serde::{Deserialize, Serialize};

pub const NO_RESULTS_MESSAGE: &str = "No professors found for this class ID.";

/// A course group as display strings: what a front end draws and what
/// click-to-sort reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    pub course_id: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RenderedTable {
    pub fn from_group(group: &CourseGroup) -> Self {
        let rows = group
            .rows
            .iter()
            .map(|r| (0..Column::COUNT).map(|c| r.cell(c).unwrap_or_default().into_owned()).collect())
            .collect();
        RenderedTable {
            course_id: group.course_id.clone(),
            headers: Column::all().map(Column::header).collect(),
            rows,
            message: group.is_empty().then(|| NO_RESULTS_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseSummaryRow, Histogram};

    #[test]
    fn renders_headers_cells_and_empty_message() {
        let group = CourseGroup {
            course_id: "CS101".into(),
            rows: vec![CourseSummaryRow {
                professor_name: "Dr. A".into(),
                latest_rating_date: "Jun 5th, 2024".into(),
                quality_average: 4.0,
                difficulty_average: 2.5,
                quality_histogram: Histogram([1, 0, 1, 0, 0]),
                difficulty_histogram: Histogram([0, 0, 1, 1, 0]),
            }],
        };
        let table = RenderedTable::from_group(&group);
        assert_eq!(table.headers.len(), Column::COUNT);
        assert_eq!(table.headers[4], "Quality 5");
        assert_eq!(
            table.rows[0],
            ["Dr. A", "Jun 5th, 2024", "4.00", "2.50", "1", "0", "1", "0", "0", "0", "0", "1", "1", "0"]
        );
        assert!(table.message.is_none());

        let empty = RenderedTable::from_group(&CourseGroup { course_id: "XX".into(), rows: vec![] });
        assert!(empty.rows.is_empty());
        assert_eq!(empty.message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }
}
