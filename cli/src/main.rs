use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratings_core::{
    parse_date, professor_ratings, Dataset, DatasetLoader, DatasetLocation, ProfessorRatings, QueryEngine, RenderedTable,
    TableSortController,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

const LOAD_ERROR_MESSAGE: &str = "Error loading professor data. Please try again later.";

#[derive(Parser)]
#[command(name = "profrate")]
#[command(about = "Look up professor ratings by course", long_about = None)]
struct Cli {
    /// Ratings dataset: a JSON file path or an http(s) URL
    #[arg(long, global = true, default_value = "data/professor_details.json")]
    data: String,
    /// Timeout in seconds when fetching the dataset over http
    #[arg(long, global = true, default_value_t = 12)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize professors for one or more course ids
    Query {
        /// Course ids separated by whitespace and/or commas, e.g. "CS101, MA200"
        input: String,
        /// Column index to sort by; repeat to click the same or another column again
        #[arg(long = "sort")]
        sort: Vec<usize>,
        /// Also list every matching review
        #[arg(long, default_value_t = false)]
        details: bool,
        /// Print the rendered tables as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load the dataset and report what it contains
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let location = DatasetLocation::parse(&cli.data, Duration::from_secs(cli.timeout_secs))?;
    let engine = QueryEngine::new(DatasetLoader::new(location));

    match cli.command {
        Commands::Query { input, sort, details, json } => {
            let (dataset, groups) = engine.query_with_dataset(&input).await.context(LOAD_ERROR_MESSAGE)?;
            let mut tables: Vec<RenderedTable> = groups.iter().map(RenderedTable::from_group).collect();
            for table in tables.iter_mut() {
                let mut ctl = TableSortController::new();
                for &column in &sort {
                    ctl.sort(&mut table.rows, column);
                }
            }
            if json {
                println!("{}", render_json(&tables, &dataset, details)?);
                return Ok(());
            }
            for table in &tables {
                print_table(table);
                if details {
                    print_reviews(&dataset, &table.course_id);
                }
                println!();
            }
            Ok(())
        }
        Commands::Check => {
            let dataset = engine.dataset().await.context(LOAD_ERROR_MESSAGE)?;
            check(&dataset);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct JsonTable<'a> {
    #[serde(flatten)]
    table: &'a RenderedTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratings: Option<Vec<ProfessorRatings>>,
}

fn render_json(tables: &[RenderedTable], dataset: &Dataset, details: bool) -> serde_json::Result<String> {
    let out: Vec<JsonTable> = tables
        .iter()
        .map(|table| JsonTable {
            table,
            ratings: details.then(|| professor_ratings(dataset, &table.course_id)),
        })
        .collect();
    serde_json::to_string_pretty(&out)
}

fn print_table(table: &RenderedTable) {
    println!("== {}", table.course_id);
    if let Some(msg) = &table.message {
        println!("{msg}");
        return;
    }
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.len()).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    println!("{}", line(&table.headers[..]));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in &table.rows {
        println!("{}", line(&row[..]));
    }
}

fn print_reviews(dataset: &Dataset, course_id: &str) {
    for professor in professor_ratings(dataset, course_id) {
        println!("-- {}", professor.name);
        for r in &professor.ratings {
            println!("  {} quality={} difficulty={} {}", r.date, r.rating_quality, r.rating_difficulty, r.comment);
        }
    }
}

fn check(dataset: &Dataset) {
    let mut courses = BTreeSet::new();
    let mut bad_dates = 0usize;
    for professor in &dataset.professors {
        for rating in &professor.rating_list {
            courses.insert(rating.class_id.trim());
            if let Err(e) = parse_date(&rating.date) {
                bad_dates += 1;
                tracing::warn!(professor = %professor.name, error = %e, "unparseable rating date");
            }
        }
    }
    println!(
        "professors={} ratings={} courses={} unparseable_dates={}",
        dataset.professors.len(),
        dataset.num_ratings(),
        courses.len(),
        bad_dates
    );
}
