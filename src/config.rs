//! Collector configuration.
//!
//! A configuration file is TOML. Every field is optional; missing fields take
//! the defaults below, which reproduce the stock collector.
//!
//! ```toml
//! [collector]
//! min_title_chars = 1
//! max_title_chars = 40
//! history_limit = 100
//!
//! [[books]]
//! title = "Оно"
//! genre = "Ужасы"
//! favorite = true
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::collector::BookCollector;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML for this layout
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parsed but make no sense together
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Limits a collector enforces on its contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Shortest accepted title, in characters
    #[serde(default = "default_min_title_chars")]
    pub min_title_chars: usize,

    /// Longest accepted title, in characters
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,

    /// Number of journal entries kept before the oldest is dropped
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// Default for [`CollectorConfig::min_title_chars`]
const fn default_min_title_chars() -> usize {
    1
}

/// Default for [`CollectorConfig::max_title_chars`]
const fn default_max_title_chars() -> usize {
    40
}

/// Default for [`CollectorConfig::history_limit`]
const fn default_history_limit() -> usize {
    100
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            min_title_chars: default_min_title_chars(),
            max_title_chars: default_max_title_chars(),
            history_limit: default_history_limit(),
        }
    }
}

impl CollectorConfig {
    /// Check that the limits are usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the minimum title length is zero
    /// or exceeds the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_title_chars == 0 {
            return Err(ConfigError::Validation(
                "min_title_chars must be at least 1".to_string(),
            ));
        }
        if self.min_title_chars > self.max_title_chars {
            return Err(ConfigError::Validation(format!(
                "min_title_chars ({}) exceeds max_title_chars ({})",
                self.min_title_chars, self.max_title_chars
            )));
        }
        Ok(())
    }
}

/// A book to register when a collector is built from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBook {
    /// Title to register
    pub title: String,

    /// Genre label to assign, if any
    #[serde(default)]
    pub genre: Option<String>,

    /// Whether to add the book to favorites
    #[serde(default)]
    pub favorite: bool,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Collector limits
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Books to register on startup
    #[serde(default)]
    pub books: Vec<SeedBook>,
}

impl Config {
    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Validation` for unusable limits.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.collector.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Build a collector and apply the seed books through its ordinary operations
    ///
    /// Seed entries that the collector would reject are skipped the same way
    /// the collector skips them.
    #[must_use]
    pub fn build_collector(&self) -> BookCollector {
        let mut collector = BookCollector::with_config(&self.collector);

        for book in &self.books {
            collector.add_new_book(&book.title);
            if let Some(genre) = &book.genre {
                collector.set_book_genre(&book.title, genre);
            }
            if book.favorite {
                collector.add_book_in_favorites(&book.title);
            }
        }

        collector
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::genre::Genre;

    #[test]
    fn test_empty_file_gives_defaults() -> Result<(), ConfigError> {
        let config = Config::from_toml_str("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.collector.max_title_chars, 40);
        assert_eq!(config.collector.min_title_chars, 1);
        assert_eq!(config.collector.history_limit, 100);
        Ok(())
    }

    #[test]
    fn test_partial_collector_section() -> Result<(), ConfigError> {
        let config = Config::from_toml_str("[collector]\nmax_title_chars = 10\n")?;
        assert_eq!(config.collector.max_title_chars, 10);
        assert_eq!(config.collector.min_title_chars, 1);
        Ok(())
    }

    #[test]
    fn test_validation_rejects_zero_minimum() {
        let result = Config::from_toml_str("[collector]\nmin_title_chars = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_bounds() {
        let result =
            Config::from_toml_str("[collector]\nmin_title_chars = 5\nmax_title_chars = 4\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml_str("[collector\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(Path::new("/nonexistent/book-collector.toml"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn test_seed_books_go_through_validation() -> Result<(), ConfigError> {
        let config = Config::from_toml_str(
            r#"
            [[books]]
            title = "Оно"
            genre = "Ужасы"
            favorite = true

            [[books]]
            title = "Маша и Медведь"
            genre = "История"

            [[books]]
            title = ""
            favorite = true
            "#,
        )?;

        let collector = config.build_collector();

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.genre_of("Оно"), Some(Some(Genre::Horror)));
        assert_eq!(collector.get_book_genre("Маша и Медведь"), Some(""));
        assert_eq!(collector.get_list_of_favorites_books(), vec!["Оно"]);
        Ok(())
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[collector]\nhistory_limit = 3\n\n[[books]]\ntitle = \"Винни-Пух\"")
            .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.collector.history_limit, 3);
        assert_eq!(config.books.len(), 1);
    }
}
