use std::path::PathBuf;

use anyhow::{Context, Result};
use book_collector::{
    BookCollector, CatalogVisualization, ChangeLogger, ChildrenShelfNotifier, Config,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format for the final catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain text listing with genre statistics
    Text,
    /// Markdown table
    Markdown,
    /// Pretty-printed JSON snapshot
    Json,
}

/// Command-line arguments for the book collector demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with collector limits and seed books; a built-in demo is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to print the catalog
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also print the change journal
    #[arg(long)]
    history: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", env = "BOOK_COLLECTOR_LOG")]
    log_level: String,
}

/// Install the tracing subscriber
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let collector = match &args.config {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(books = config.books.len(), "Loaded configuration");
            let mut collector = config.build_collector();
            register_observers(&mut collector);
            collector
        }
        None => {
            println!("{}", "Book Collector Demonstration".green().bold());
            println!("============================\n");
            let mut collector = BookCollector::new();
            register_observers(&mut collector);
            run_demo(&mut collector);
            collector
        }
    };

    print_catalog(&collector, args.format)?;

    if args.history {
        println!("\n{}", "Change journal".yellow().bold());
        println!("{}", CatalogVisualization::history_table(&collector));
    }

    Ok(())
}

/// Attach the stock observers
fn register_observers(collector: &mut BookCollector) {
    collector.register_observer(Box::new(ChangeLogger));
    collector.register_observer(Box::new(ChildrenShelfNotifier));
}

/// Walk through every collector operation, including the ones that get rejected
fn run_demo(collector: &mut BookCollector) {
    println!("{}", "Adding books...".yellow().bold());
    for title in [
        "Гарри Поттер",
        "Маша и Медведь",
        "Оно",
        "Винни-Пух",
        "Твин Пикс",
        "Книга с названием 41 символ--------------",
        "",
        "Оно",
    ] {
        collector.add_new_book(title);
    }
    println!("Registered: {collector}\n");

    println!("{}", "Classifying...".yellow().bold());
    for (title, genre) in [
        ("Гарри Поттер", "Фантастика"),
        ("Маша и Медведь", "Мультфильмы"),
        ("Оно", "Ужасы"),
        ("Винни-Пух", "Комедии"),
        ("Твин Пикс", "Детективы"),
        ("Гарри Поттер", "История"),
        ("Герой нашего времени", "Фантастика"),
    ] {
        collector.set_book_genre(title, genre);
    }
    for title in ["Гарри Поттер", "Герой нашего времени"] {
        let genre = collector.get_book_genre(title).unwrap_or("not in the collection");
        println!("  {title}: {genre}");
    }

    println!("\n{}", "Queries".yellow().bold());
    println!("  Фантастика: {:?}", collector.get_books_with_specific_genre("Фантастика"));
    println!("  For children: {:?}", collector.get_books_for_children());

    println!("\n{}", "Favorites".yellow().bold());
    collector.add_book_in_favorites("Оно");
    collector.add_book_in_favorites("Оно");
    collector.add_book_in_favorites("Винни-Пух");
    collector.add_book_in_favorites("Алиса в стране чудес");
    collector.delete_book_from_favorites("Оно");
    collector.delete_book_from_favorites("Оно");
    println!("  {:?}\n", collector.get_list_of_favorites_books());
}

/// Print the catalog in the requested format
fn print_catalog(collector: &BookCollector, format: Format) -> Result<()> {
    match format {
        Format::Text => {
            print!("{}", CatalogVisualization::render_text(collector));
            print!("\n{}", CatalogVisualization::render_stats(collector));
        }
        Format::Markdown => print!("{}", CatalogVisualization::markdown_table(collector)),
        Format::Json => {
            println!("{}", CatalogVisualization::to_json(collector).context("Failed to render JSON")?);
        }
    }
    Ok(())
}
