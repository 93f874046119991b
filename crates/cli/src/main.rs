use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use engine::{MovieCard, RecommendationEngine};
use poster_client::{PosterClient, PosterConfig};
use recommender::{search_titles, SimilarMovies, DEFAULT_LIMIT};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cards per row in the results grid
const GRID_COLUMNS: usize = 5;

/// Movie Recommendation System
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommends movies similar to a title using a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Path to the catalog bundle (movies + similarity matrix)
    #[arg(short, long, default_value = "data/movie_data.json")]
    bundle: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Exact movie title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Skip poster lookups
        #[arg(long)]
        no_posters: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List catalog titles in order
    List {
        /// Number of titles to show
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Time recommendation lookups for random titles
    Benchmark {
        /// Number of lookups to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog once; everything below shares it read-only
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.bundle).context("Failed to load movie catalog bundle")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            no_posters,
        } => handle_recommend(catalog, title, limit, no_posters).await?,
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::List { limit } => handle_list(&catalog, limit),
        Commands::Benchmark { requests } => handle_benchmark(catalog, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<Catalog>,
    title: String,
    limit: usize,
    no_posters: bool,
) -> Result<()> {
    println!("{}", "🎬 Movie Recommendation System".bold());
    println!("Finding recommendations...");

    if no_posters {
        let recommender = SimilarMovies::new(catalog).with_limit(limit);
        match recommender.recommend(&title) {
            Ok(recs) => {
                print_header(recs.len(), &title);
                for (i, rec) in recs.iter().enumerate() {
                    println!(
                        "{}. {} (id {}) - Score: {:.3}",
                        (i + 1).to_string().green(),
                        rec.title.bold(),
                        rec.movie_id,
                        rec.score
                    );
                }
            }
            Err(e) => print_not_found(&e),
        }
    } else {
        let config = PosterConfig::from_env_or_default();
        let posters = PosterClient::new(config).context("Failed to create poster client")?;
        if !posters.has_credential() {
            debug!("No TMDB API key configured; posters will use placeholders");
        }

        let engine = RecommendationEngine::new(catalog, posters).with_limit(limit);
        match engine.recommend_with_posters(&title).await {
            Ok(cards) => {
                print_header(cards.len(), &title);
                print_grid(&cards);
            }
            Err(e) => print_not_found(&e),
        }
    }

    print_footer();
    Ok(())
}

fn print_header(count: usize, title: &str) {
    println!(
        "{} Top {} movies similar to {}:",
        "✓".green(),
        count,
        title.bold()
    );
}

fn print_not_found(err: &impl Display) {
    debug!("{}", err);
    println!("{}", "Movie not found in database!".red());
    println!(
        "{}",
        "Could not generate recommendations. Please try another movie.".red()
    );
}

fn print_footer() {
    println!("---");
    println!("{}", "Powered by TMDB API".italic());
}

/// Print cards in rows of five, then any poster warnings
fn print_grid(cards: &[MovieCard]) {
    for row in cards.chunks(GRID_COLUMNS) {
        println!();
        for card in row {
            println!(
                "  {}. {}",
                card.rank.to_string().green(),
                card.title.bold()
            );
            println!("     {}", card.poster.url.cyan());
        }
    }

    for card in cards {
        if let Some(warning) = &card.poster.warning {
            println!("{} {}", "⚠".yellow(), warning.yellow());
        }
    }
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    let hits = search_titles(catalog, title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if hits.is_empty() {
        println!("  (no matches)");
    }
    for movie in hits {
        println!("{}: {} (id {})", movie.index, movie.title, movie.movie_id);
    }
}

/// Handle the 'list' command
fn handle_list(catalog: &Catalog, limit: usize) {
    println!("{}", "Select a movie:".bold().blue());
    for movie in catalog.movies().iter().take(limit) {
        println!("  {}", movie.title);
    }
    if catalog.len() > limit {
        println!("  ... and {} more", catalog.len() - limit);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(catalog: Arc<Catalog>, requests: usize) -> Result<()> {
    let recommender = SimilarMovies::new(catalog.clone());

    // Pick random titles from the catalog
    let titles: Vec<&str> = (0..requests)
        .map(|_| {
            let index = rand::random::<u32>() as usize % catalog.len();
            catalog.movies()[index].title.as_str()
        })
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(titles.len());
    for title in titles {
        let start = Instant::now();
        recommender
            .recommend(title)
            .with_context(|| format!("Lookup failed for '{}'", title))?;
        timings.push(start.elapsed());
    }

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32().max(f32::EPSILON);

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}
