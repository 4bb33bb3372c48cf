pub mod aggregate;
pub mod date;
pub mod loader;
pub mod model;
pub mod query;
pub mod sort;
pub mod table;

pub use aggregate::{matching_ratings, professor_ratings, summarize};
pub use date::{parse_date, ComparableDate, DateFormatError};
pub use loader::{DatasetLoader, DatasetLocation, Fetch, LoadError};
pub use model::{CourseGroup, CourseSummaryRow, Dataset, Histogram, Professor, ProfessorRatings, Rating, Score};
pub use query::{split_course_ids, QueryEngine, QueryError};
pub use sort::{sort_rows, Column, ColumnKind, SortDirection, TableRow, TableSortController};
pub use table::{RenderedTable, NO_RESULTS_MESSAGE};
