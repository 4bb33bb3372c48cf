use crate::aggregate::summarize;
use crate::loader::{DatasetLoader, Fetch, LoadError};
use crate::model::{CourseGroup, Dataset};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s,]+").expect("valid regex");
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("error loading professor data: {0}")]
    Load(#[from] LoadError),
}

/// Split free-form input such as `"CS101, MA200  PH110"` into course ids.
/// Order and duplicates are kept.
pub fn split_course_ids(raw: &str) -> Vec<String> {
    SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct QueryEngine<F> {
    loader: DatasetLoader<F>,
}

impl<F: Fetch> QueryEngine<F> {
    pub fn new(loader: DatasetLoader<F>) -> Self { Self { loader } }

    pub async fn dataset(&self) -> Result<Arc<Dataset>, QueryError> {
        Ok(self.loader.load().await?)
    }

    /// One group per course id in `raw`, empty groups included.
    pub async fn query(&self, raw: &str) -> Result<Vec<CourseGroup>, QueryError> {
        Ok(self.query_with_dataset(raw).await?.1)
    }

    /// Like [`QueryEngine::query`], also handing back the dataset the groups
    /// were computed from, for callers that show the underlying reviews.
    pub async fn query_with_dataset(&self, raw: &str) -> Result<(Arc<Dataset>, Vec<CourseGroup>), QueryError> {
        let dataset = self.dataset().await?;
        let groups: Vec<CourseGroup> = split_course_ids(raw)
            .into_iter()
            .map(|course_id| {
                let rows = summarize(&dataset, &course_id);
                CourseGroup { course_id, rows }
            })
            .collect();
        tracing::debug!(query = raw, groups = groups.len(), "query answered");
        Ok((dataset, groups))
    }
}
