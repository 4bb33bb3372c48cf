use crate::date::parse_date;
use crate::model::{CourseSummaryRow, Dataset, Histogram, Professor, ProfessorRatings, Rating};

/// Ratings of `professor` whose class id matches `class_id`, in dataset order.
pub fn matching_ratings<'a>(professor: &'a Professor, class_id: &'a str) -> impl Iterator<Item = &'a Rating> + 'a {
    professor.rating_list.iter().filter(move |r| r.is_for_class(class_id))
}

/// Matching reviews grouped per professor; professors without any are left out.
pub fn professor_ratings(dataset: &Dataset, class_id: &str) -> Vec<ProfessorRatings> {
    dataset
        .professors
        .iter()
        .filter_map(|p| {
            let ratings: Vec<Rating> = matching_ratings(p, class_id).cloned().collect();
            (!ratings.is_empty()).then(|| ProfessorRatings { name: p.name.clone(), ratings })
        })
        .collect()
}

/// One summary row per professor with at least one rating for `class_id`,
/// in the order professors appear in the dataset.
pub fn summarize(dataset: &Dataset, class_id: &str) -> Vec<CourseSummaryRow> {
    dataset
        .professors
        .iter()
        .filter_map(|p| summarize_professor(p, class_id))
        .collect()
}

fn summarize_professor(professor: &Professor, class_id: &str) -> Option<CourseSummaryRow> {
    let mut latest: Option<&Rating> = None;
    let mut latest_key = None;
    let mut quality_sum = 0u32;
    let mut difficulty_sum = 0u32;
    let mut quality_histogram = Histogram::default();
    let mut difficulty_histogram = Histogram::default();
    let mut count = 0u32;

    for rating in matching_ratings(professor, class_id) {
        // Unparseable dates sort as None, i.e. older than any real date.
        let key = parse_date(&rating.date).ok();
        if latest.is_none() || key > latest_key {
            latest = Some(rating);
            latest_key = key;
        }
        quality_sum += rating.rating_quality.get() as u32;
        difficulty_sum += rating.rating_difficulty.get() as u32;
        quality_histogram.record(rating.rating_quality);
        difficulty_histogram.record(rating.rating_difficulty);
        count += 1;
    }

    let latest = latest?;
    if latest_key.is_none() {
        tracing::debug!(professor = %professor.name, date = %latest.date, "no parseable rating date");
    }
    Some(CourseSummaryRow {
        professor_name: professor.name.clone(),
        latest_rating_date: latest.date.clone(),
        quality_average: quality_sum as f64 / count as f64,
        difficulty_average: difficulty_sum as f64 / count as f64,
        quality_histogram,
        difficulty_histogram,
    })
}
