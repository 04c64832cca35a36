//! @ai:module:intent CLI for Performance Arena
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on app, config, columns, ranking, report

use anyhow::{Context, Result};
use arena_engine::{
    format_breakdown, format_comparison, format_stats, to_json, Category, CategoryFilter,
    ComparisonResult, OutputFormat, Renderable, Searchable,
};
use clap::{Parser, Subcommand, ValueEnum};
use perf_arena::{
    columns::{post_id_from_fragment, share_link, TagFilter},
    leaderboard, Arena, ArenaConfig, LookupError, MarkdownReporter, ReportGenerator,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "arena.toml";

#[derive(Parser)]
#[command(name = "perf-arena")]
#[command(author, version, about = "Performance Arena - side-by-side product comparison")]
struct Cli {
    /// Path to configuration file (arena.toml is used when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two products by id or name
    Compare {
        a: String,
        b: String,

        /// Only show the category profile's core metrics
        #[arg(long)]
        only_profile: bool,

        /// Show raw values instead of normalized scores
        #[arg(long)]
        raw: bool,

        /// Restrict name lookup to one category
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write JSON, Markdown, HTML and chart reports for a comparison
    Report {
        a: String,
        b: String,

        /// Output directory (defaults to paths.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        only_profile: bool,

        #[arg(long)]
        raw: bool,
    },

    /// Show a product's performance score and its breakdown
    Score {
        query: String,

        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show per-category metric ranges
    Stats {
        #[arg(long)]
        category: Option<String>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Search the catalog
    Search {
        query: String,

        #[arg(long)]
        category: Option<String>,
    },

    /// Compare two randomly picked products
    Random {
        #[arg(long)]
        category: Option<String>,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Rank a category by performance score
    Leaderboard {
        category: String,

        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// List column posts
    Columns {
        #[arg(long)]
        tag: Option<String>,

        /// Number of posts (defaults to columns.limit)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show one column post by id or share link
    Post { id_or_fragment: String },

    /// List column tags
    Tags,

    /// Write the default configuration
    Init {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
    Markdown,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text | Format::Markdown => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "perf_arena=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}

/// @ai:intent 1 for lookups that found nothing, 2 for load and configuration failures
fn exit_code(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<LookupError>().is_some() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { output } = &cli.command {
        return init_config(output);
    }

    let config = load_or_default_config(cli.config)?;

    match cli.command {
        Commands::Compare {
            a,
            b,
            only_profile,
            raw,
            category,
            format,
        } => {
            let arena = Arena::load(config)?;
            let mut session = arena.session(category_filter(category.as_deref()));
            let result = arena.compare_pair(&mut session, &a, &b, only_profile, raw)?;
            println!("{}", render(&result, format));
            Ok(())
        }
        Commands::Report {
            a,
            b,
            output,
            only_profile,
            raw,
        } => {
            let output_dir = output.unwrap_or_else(|| config.paths.output_dir.clone());
            let arena = Arena::load(config)?;
            let mut session = arena.session(CategoryFilter::All);
            let result = arena.compare_pair(&mut session, &a, &b, only_profile, raw)?;

            let files = ReportGenerator::new().generate_all(&result, &output_dir)?;
            for file in files {
                println!("{}", output_dir.join(file).display());
            }
            Ok(())
        }
        Commands::Score { query, format } => {
            let arena = Arena::load(config)?;
            let session = arena.session(CategoryFilter::All);
            let product = arena.resolve(&session, &query)?;
            let breakdown = arena.catalog.breakdown(product);
            println!("{}", format_breakdown(product, breakdown.as_ref(), format.into()));
            Ok(())
        }
        Commands::Stats { category, format } => {
            let arena = Arena::load(config)?;
            show_stats(&arena, category.as_deref(), format);
            Ok(())
        }
        Commands::Search { query, category } => {
            let arena = Arena::load(config)?;
            search(&arena, &query, category.as_deref());
            Ok(())
        }
        Commands::Random {
            category,
            seed,
            format,
        } => {
            let arena = Arena::load(config)?;
            let filter = category_filter(category.as_deref());
            let mut session = arena.session(filter.clone());
            let seed = seed.unwrap_or_else(time_seed);
            tracing::debug!("Random pick with seed {}", seed);

            let result = arena
                .random_pair(&mut session, seed)
                .ok_or_else(|| LookupError::EmptyPool {
                    filter: filter.label().to_string(),
                })?;
            println!("{}", render(&result, format));
            Ok(())
        }
        Commands::Leaderboard { category, format } => {
            let arena = Arena::load(config)?;
            show_leaderboard(&arena, Category::from(category.as_str()), format);
            Ok(())
        }
        Commands::Columns { tag, limit, format } => {
            list_columns(&config, TagFilter::from(tag), limit, format);
            Ok(())
        }
        Commands::Post { id_or_fragment } => show_post(&config, &id_or_fragment),
        Commands::Tags => {
            let feed = Arena::load_feed(&config.paths.columns);
            for tag in feed.tags() {
                println!("{}", tag);
            }
            Ok(())
        }
        Commands::Init { .. } => Ok(()),
    }
}

fn category_filter(category: Option<&str>) -> CategoryFilter {
    CategoryFilter::from(category.unwrap_or_default())
}

fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

/// @ai:intent Render a comparison in the requested format
/// @ai:effects pure
fn render(result: &ComparisonResult, format: Format) -> String {
    match format {
        Format::Markdown => MarkdownReporter::new().render_comparison(result),
        other => format_comparison(result, other.into()),
    }
}

/// @ai:intent Print metric ranges, optionally for one category
/// @ai:effects io
fn show_stats(arena: &Arena, category: Option<&str>, format: Format) {
    let stats = arena.catalog.stats();

    let Some(category) = category.map(Category::from) else {
        println!("{}", format_stats(stats, format.into()));
        return;
    };

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&stats.category(&category), false)),
        OutputFormat::JsonPretty => println!("{}", to_json(&stats.category(&category), true)),
        OutputFormat::Text => {
            println!("{} ({})", category.label(), category);
            match stats.category(&category) {
                Some(ranges) => {
                    for (key, range) in ranges {
                        println!("  {:<16} min {:<12} max {}", key, range.min, range.max);
                    }
                }
                None => println!("  no metric data"),
            }
        }
    }
}

/// @ai:intent Print ranked search hits
/// @ai:effects io
fn search(arena: &Arena, query: &str, category: Option<&str>) {
    let session = arena.session(category_filter(category));
    let pool = session.pool(&arena.catalog);
    let hits = arena.searcher.search(query, &pool);

    if hits.is_empty() {
        println!("No matches for '{}'", query.trim());
        return;
    }

    println!("{:<24} {:<32} {:<10} {:>9}", "ID", "Name", "Category", "Relevance");
    println!("{}", "-".repeat(78));
    for hit in hits {
        println!(
            "{:<24} {:<32} {:<10} {:>9.1}",
            hit.product.id,
            hit.product.name,
            hit.product.category.label(),
            hit.relevance
        );
    }
}

/// @ai:intent Print a category leaderboard
/// @ai:effects io
fn show_leaderboard(arena: &Arena, category: Category, format: Format) {
    let board = leaderboard(&arena.catalog, &category);

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&board, false)),
        OutputFormat::JsonPretty => println!("{}", to_json(&board, true)),
        OutputFormat::Text => {
            println!("{} leaderboard ({} products)", category.label(), board.entries.len());
            println!();
            println!("{:<6} {:<24} {:<32} {:>6}", "Rank", "ID", "Name", "Score");
            println!("{}", "-".repeat(71));
            for entry in &board.entries {
                let score = entry
                    .score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| arena_engine::PLACEHOLDER.to_string());
                println!("{:<6} {:<24} {:<32} {:>6}", entry.rank, entry.id, entry.name, score);
            }
            if let Some(average) = board.average_score {
                println!();
                println!("Average score: {:.1} over {} scored products", average, board.scored);
            }
        }
    }
}

/// @ai:intent Print the column feed listing
/// @ai:effects fs:read, io
fn list_columns(config: &ArenaConfig, filter: TagFilter, limit: Option<usize>, format: Format) {
    let feed = Arena::load_feed(&config.paths.columns);
    let limit = limit.unwrap_or(config.columns.limit);
    let previews = feed.list(&filter, limit, config.columns.excerpt_chars);

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&previews, false)),
        OutputFormat::JsonPretty => println!("{}", to_json(&previews, true)),
        OutputFormat::Text => {
            if previews.is_empty() {
                println!("No posts");
                return;
            }
            for preview in previews {
                let pin = if preview.pinned { "[pinned] " } else { "" };
                println!("{}{}  ({})", pin, preview.title, preview.date);
                println!("  {}", preview.excerpt);
                if !preview.tags.is_empty() {
                    println!("  #{}", preview.tags.join(" #"));
                }
                if !config.columns.base_url.is_empty() {
                    println!("  {}", share_link(&config.columns.base_url, &preview.id));
                }
                println!();
            }
        }
    }
}

/// @ai:intent Print one post with its body clamped to columns.excerpt_chars
/// @ai:effects fs:read, io
fn show_post(config: &ArenaConfig, id_or_fragment: &str) -> Result<()> {
    let feed = Arena::load_feed(&config.paths.columns);
    let id = post_id_from_fragment(id_or_fragment)
        .unwrap_or_else(|| id_or_fragment.trim().to_string());

    let post = feed
        .get(&id)
        .ok_or_else(|| LookupError::PostNotFound { id: id.clone() })?;

    let opened = post.opened(config.columns.excerpt_chars);
    println!("{}", opened.title);
    println!("{}", post.meta_line());
    println!();
    println!("{}", opened.excerpt);
    if !config.columns.base_url.is_empty() {
        println!();
        println!("{}", share_link(&config.columns.base_url, &post.id));
    }
    Ok(())
}

/// @ai:intent Write default configuration
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    ArenaConfig::default()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ArenaConfig> {
    match path {
        Some(p) => ArenaConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG);

            if default_path.exists() {
                ArenaConfig::load(&default_path)
                    .with_context(|| format!("Failed to load config {}", default_path.display()))
            } else {
                Ok(ArenaConfig::default())
            }
        }
    }
}
