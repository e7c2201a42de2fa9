use std::fmt::Write as _;

use serde::Serialize;

use crate::{collector::BookCollector, events::CollectorEvent, genre::Genre};

/// One registry entry as it appears in a JSON snapshot
#[derive(Debug, Serialize)]
struct BookRow<'a> {
    /// Book title
    title: &'a str,
    /// Assigned genre, `null` when unassigned
    genre: Option<Genre>,
    /// Whether the genre is children-safe
    for_children: bool,
    /// Whether the book is a favorite
    favorite: bool,
}

/// JSON shape of a whole collector
#[derive(Debug, Serialize)]
struct CatalogSnapshot<'a> {
    /// Registry entries in insertion order
    books: Vec<BookRow<'a>>,
    /// Favorite titles in insertion order
    favorites: Vec<&'a str>,
    /// Children-safe titles in insertion order
    children: Vec<&'a str>,
}

/// Book counts per genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreStats {
    /// Count for every taxonomy genre, in catalog order, zeros included
    pub per_genre: Vec<(Genre, usize)>,
    /// Books without a genre
    pub unassigned: usize,
}

/// Rendering tools for a collector
#[derive(Debug)]
pub struct CatalogVisualization;

impl CatalogVisualization {
    /// Plain text listing, one book per line
    #[must_use]
    pub fn render_text(collector: &BookCollector) -> String {
        let mut out = String::from("=== Book Collection ===\n");

        if collector.is_empty() {
            out.push_str("No books yet.\n");
            return out;
        }

        for (title, genre) in collector.get_books_genre() {
            let star = if collector.is_favorite(title) { "★" } else { " " };
            let genre = genre.map_or("-", Genre::label);
            let _ = writeln!(out, "{star} {title} [{genre}]");
        }

        let _ = writeln!(out, "\n{collector}");
        out
    }

    /// Markdown table of the registry
    #[must_use]
    pub fn markdown_table(collector: &BookCollector) -> String {
        if collector.is_empty() {
            return "No books yet.".to_string();
        }

        let mut table = String::from("| Title | Genre | For children | Favorite |\n");
        table.push_str("|-------|-------|--------------|----------|\n");

        for (title, genre) in collector.get_books_genre() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                Self::escape_cell(title),
                genre.map_or("", Genre::label),
                Self::yes_no(genre.is_some_and(Genre::is_children_safe)),
                Self::yes_no(collector.is_favorite(title)),
            );
        }

        table
    }

    /// Markdown table of the change journal
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history_table(collector: &BookCollector) -> String {
        if collector.history().is_empty() {
            return "No changes recorded yet.".to_string();
        }

        let mut table = String::from("| # | Title | Change |\n");
        table.push_str("|---|-------|--------|\n");

        for (i, event) in collector.history().iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} |",
                i + 1,
                Self::escape_cell(event.title()),
                Self::describe(event)
            );
        }

        table
    }

    /// Count books per genre
    #[must_use]
    pub fn genre_stats(collector: &BookCollector) -> GenreStats {
        let per_genre = Genre::ALL
            .into_iter()
            .map(|genre| (genre, collector.books_with_genre(genre).len()))
            .collect();
        let unassigned =
            collector.get_books_genre().values().filter(|genre| genre.is_none()).count();

        GenreStats { per_genre, unassigned }
    }

    /// Text summary of [`CatalogVisualization::genre_stats`]
    #[must_use]
    pub fn render_stats(collector: &BookCollector) -> String {
        let stats = Self::genre_stats(collector);
        let mut out = String::from("=== Genre Statistics ===\n");

        for (genre, count) in &stats.per_genre {
            let rating = if genre.is_age_restricted() { " (18+)" } else { "" };
            let _ = writeln!(out, "  {genre}{rating}: {count}");
        }
        let _ = writeln!(out, "  без жанра: {}", stats.unassigned);

        out
    }

    /// Pretty-printed JSON snapshot of the registry, favorites and children's shelf
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(collector: &BookCollector) -> Result<String, serde_json::Error> {
        let books = collector
            .get_books_genre()
            .iter()
            .map(|(title, genre)| BookRow {
                title,
                genre: *genre,
                for_children: genre.is_some_and(Genre::is_children_safe),
                favorite: collector.is_favorite(title),
            })
            .collect();

        let snapshot = CatalogSnapshot {
            books,
            favorites: collector.get_list_of_favorites_books(),
            children: collector.get_books_for_children(),
        };

        serde_json::to_string_pretty(&snapshot)
    }

    /// Short description of a change for the journal table
    fn describe(event: &CollectorEvent) -> String {
        match event {
            CollectorEvent::BookAdded { .. } => "📚 added".to_string(),
            CollectorEvent::GenreAssigned { previous: Some(previous), genre, .. } => {
                format!("🏷 {previous} → {genre}")
            }
            CollectorEvent::GenreAssigned { previous: None, genre, .. } => format!("🏷 {genre}"),
            CollectorEvent::FavoriteAdded { .. } => "★ favorited".to_string(),
            CollectorEvent::FavoriteRemoved { .. } => "☆ unfavorited".to_string(),
        }
    }

    /// Keep a title from breaking the table layout
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }

    /// Markdown cell for a flag
    const fn yes_no(flag: bool) -> &'static str {
        if flag { "yes" } else { "no" }
    }
}
