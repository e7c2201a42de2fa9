use std::{collections::VecDeque, fmt};

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::CollectorConfig,
    events::CollectorEvent,
    genre::{Genre, UnknownGenre},
    observers::CollectorObserver,
};

/// Why a collector operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    /// The title is shorter or longer than the configured limits allow
    #[error("title {title:?} has {chars} characters, expected {min}..={max}")]
    TitleLength {
        /// The rejected title
        title: String,
        /// Its length in characters
        chars: usize,
        /// Shortest accepted length
        min: usize,
        /// Longest accepted length
        max: usize,
    },
    /// The title is already registered
    #[error("book {0:?} is already in the collection")]
    DuplicateTitle(String),
    /// The title is not registered
    #[error("book {0:?} is not in the collection")]
    UnknownBook(String),
    /// The genre label is not part of the taxonomy
    #[error(transparent)]
    UnknownGenre(#[from] UnknownGenre),
    /// The book is already a favorite
    #[error("book {0:?} is already in favorites")]
    AlreadyFavorite(String),
    /// The book is not a favorite
    #[error("book {0:?} is not in favorites")]
    NotFavorite(String),
}

/// A catalog of books, their genres and a favorites list
///
/// The mutating operations reject invalid input silently; each has a `try_`
/// counterpart that reports the reason instead.
pub struct BookCollector {
    /// Title to genre, in insertion order; `None` means unassigned
    books_genre: IndexMap<String, Option<Genre>>,
    /// Favorite titles, in insertion order
    favorites: IndexSet<String>,
    /// Title limits and journal size
    config: CollectorConfig,
    /// Most recent accepted changes, oldest first
    history: VecDeque<CollectorEvent>,
    /// Registered change observers
    observers: Vec<Box<dyn CollectorObserver>>,
}

// Manual implementation of Debug for BookCollector
impl fmt::Debug for BookCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookCollector")
            .field("books_genre", &self.books_genre)
            .field("favorites", &self.favorites)
            .field("config", &self.config)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for BookCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl BookCollector {
    /// Create an empty collector accepting titles of 1 to 40 characters
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CollectorConfig::default())
    }

    /// Create an empty collector with the given limits
    #[must_use]
    pub fn with_config(config: &CollectorConfig) -> Self {
        Self {
            books_genre: IndexMap::new(),
            favorites: IndexSet::new(),
            config: config.clone(),
            history: VecDeque::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of accepted changes
    pub fn register_observer(&mut self, observer: Box<dyn CollectorObserver>) {
        self.observers.push(observer);
    }

    /// Add a book with no genre
    ///
    /// Ignored if the title is already registered or its length is outside the
    /// configured limits.
    pub fn add_new_book(&mut self, title: &str) {
        if let Err(err) = self.try_add_new_book(title) {
            debug!(%err, "add_new_book rejected");
        }
    }

    /// Add a book with no genre, reporting why it was rejected
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::DuplicateTitle` if the title is registered and
    /// `CollectorError::TitleLength` if it is too short or too long.
    pub fn try_add_new_book(&mut self, title: &str) -> Result<(), CollectorError> {
        if self.books_genre.contains_key(title) {
            return Err(CollectorError::DuplicateTitle(title.to_string()));
        }

        let chars = title.chars().count();
        let CollectorConfig { min_title_chars: min, max_title_chars: max, .. } = self.config;
        if !(min..=max).contains(&chars) {
            return Err(CollectorError::TitleLength { title: title.to_string(), chars, min, max });
        }

        self.books_genre.insert(title.to_string(), None);
        self.record(CollectorEvent::BookAdded { title: title.to_string() });
        Ok(())
    }

    /// Set the genre of a registered book from its label
    ///
    /// Ignored if the book is not registered or the label is not an exact
    /// match for a taxonomy genre.
    pub fn set_book_genre(&mut self, title: &str, genre: &str) {
        if let Err(err) = self.try_set_book_genre(title, genre) {
            debug!(%err, "set_book_genre rejected");
        }
    }

    /// Set the genre of a registered book from its label, reporting why it was rejected
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::UnknownBook` if the title is not registered and
    /// `CollectorError::UnknownGenre` if the label is not recognized.
    pub fn try_set_book_genre(&mut self, title: &str, genre: &str) -> Result<(), CollectorError> {
        if !self.contains(title) {
            return Err(CollectorError::UnknownBook(title.to_string()));
        }
        let genre = genre.parse::<Genre>()?;
        self.try_assign_genre(title, genre)
    }

    /// Set the genre of a registered book
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::UnknownBook` if the title is not registered.
    pub fn try_assign_genre(&mut self, title: &str, genre: Genre) -> Result<(), CollectorError> {
        let Some(slot) = self.books_genre.get_mut(title) else {
            return Err(CollectorError::UnknownBook(title.to_string()));
        };
        let previous = slot.replace(genre);

        self.record(CollectorEvent::GenreAssigned { title: title.to_string(), previous, genre });
        Ok(())
    }

    /// Genre label of a book, empty if unassigned, `None` if the book is unknown
    #[must_use]
    pub fn get_book_genre(&self, title: &str) -> Option<&'static str> {
        self.genre_of(title).map(|genre| genre.map_or("", Genre::label))
    }

    /// Genre of a book, `Some(None)` if unassigned, `None` if the book is unknown
    #[must_use]
    pub fn genre_of(&self, title: &str) -> Option<Option<Genre>> {
        self.books_genre.get(title).copied()
    }

    /// The whole registry, in insertion order
    #[must_use]
    pub fn get_books_genre(&self) -> &IndexMap<String, Option<Genre>> {
        &self.books_genre
    }

    /// Titles whose genre label equals `genre`, in insertion order
    ///
    /// Books without a genre never match, not even for an empty label.
    #[must_use]
    pub fn get_books_with_specific_genre(&self, genre: &str) -> Vec<&str> {
        genre.parse::<Genre>().map_or_else(|_| Vec::new(), |genre| self.books_with_genre(genre))
    }

    /// Titles classified under `genre`, in insertion order
    #[must_use]
    pub fn books_with_genre(&self, genre: Genre) -> Vec<&str> {
        self.titles_where(|assigned| assigned == genre)
    }

    /// Titles whose genre is children-safe, in insertion order
    #[must_use]
    pub fn get_books_for_children(&self) -> Vec<&str> {
        self.titles_where(Genre::is_children_safe)
    }

    /// Titles with an assigned genre matching `predicate`, in insertion order
    fn titles_where(&self, predicate: impl Fn(Genre) -> bool) -> Vec<&str> {
        self.books_genre
            .iter()
            .filter(|(_, genre)| genre.is_some_and(&predicate))
            .map(|(title, _)| title.as_str())
            .collect()
    }

    /// Append a registered book to favorites
    ///
    /// Ignored if the book is unknown or already a favorite.
    pub fn add_book_in_favorites(&mut self, title: &str) {
        if let Err(err) = self.try_add_book_in_favorites(title) {
            debug!(%err, "add_book_in_favorites rejected");
        }
    }

    /// Append a registered book to favorites, reporting why it was rejected
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::UnknownBook` if the title is not registered and
    /// `CollectorError::AlreadyFavorite` if it is already a favorite.
    pub fn try_add_book_in_favorites(&mut self, title: &str) -> Result<(), CollectorError> {
        if !self.contains(title) {
            return Err(CollectorError::UnknownBook(title.to_string()));
        }
        if !self.favorites.insert(title.to_string()) {
            return Err(CollectorError::AlreadyFavorite(title.to_string()));
        }

        self.record(CollectorEvent::FavoriteAdded { title: title.to_string() });
        Ok(())
    }

    /// Remove a book from favorites, doing nothing if it is not there
    pub fn delete_book_from_favorites(&mut self, title: &str) {
        if let Err(err) = self.try_delete_book_from_favorites(title) {
            debug!(%err, "delete_book_from_favorites rejected");
        }
    }

    /// Remove a book from favorites, reporting if it was not there
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::NotFavorite` if the title is not a favorite.
    pub fn try_delete_book_from_favorites(&mut self, title: &str) -> Result<(), CollectorError> {
        if !self.favorites.shift_remove(title) {
            return Err(CollectorError::NotFavorite(title.to_string()));
        }

        self.record(CollectorEvent::FavoriteRemoved { title: title.to_string() });
        Ok(())
    }

    /// Favorite titles, in the order they were added
    #[must_use]
    pub fn get_list_of_favorites_books(&self) -> Vec<&str> {
        self.favorites.iter().map(String::as_str).collect()
    }

    /// Whether a title is registered
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.books_genre.contains_key(title)
    }

    /// Whether a title is in favorites
    #[must_use]
    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.contains(title)
    }

    /// Number of registered books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books_genre.len()
    }

    /// Whether no book is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books_genre.is_empty()
    }

    /// Limits this collector enforces
    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Accepted changes, oldest first, up to the configured journal size
    #[must_use]
    pub fn history(&self) -> &VecDeque<CollectorEvent> {
        &self.history
    }

    /// Journal an accepted change and notify observers
    fn record(&mut self, event: CollectorEvent) {
        for observer in &self.observers {
            observer.on_change(&event);
        }

        if self.config.history_limit == 0 {
            return;
        }
        if self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }
}

impl fmt::Display for BookCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} books, {} for children, {} favorites",
            self.len(),
            self.get_books_for_children().len(),
            self.favorites.len()
        )
    }
}
