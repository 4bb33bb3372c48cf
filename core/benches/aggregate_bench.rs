use criterion::{criterion_group, criterion_main, Criterion};
use ratings_core::{summarize, sort_rows, Dataset, Professor, Rating, Score};

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

fn synthetic(professors: usize, ratings_each: usize) -> Dataset {
    let score = |n: usize| Score::new((n % 5 + 1) as u8).expect("in range");
    Dataset::new(
        (0..professors)
            .map(|p| Professor {
                name: format!("Professor {p}"),
                rating_list: (0..ratings_each)
                    .map(|r| Rating {
                        class_id: format!("CS{}", 100 + (p + r) % 20),
                        date: format!("{} {}th, {}", MONTHS[r % 12], r % 24 + 4, 2010 + r % 15),
                        rating_quality: score(p + r),
                        rating_difficulty: score(p * 3 + r),
                        comment: String::new(),
                    })
                    .collect(),
            })
            .collect(),
    )
}

fn bench_aggregate(c: &mut Criterion) {
    let dataset = synthetic(500, 40);
    c.bench_function("summarize_course", |b| b.iter(|| summarize(&dataset, "CS105")));
    let rows = summarize(&dataset, "CS105");
    c.bench_function("sort_by_latest_rating", |b| {
        b.iter(|| {
            let mut rows = rows.clone();
            sort_rows(&mut rows, 1, None)
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
