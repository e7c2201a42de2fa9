//! In-memory book catalog with a closed genre taxonomy and a favorites list.
//!
//! This crate provides a [`BookCollector`] that registers titles, classifies
//! them under a fixed set of genres, answers genre and children's-shelf
//! queries, and keeps an ordered list of favorites.

pub mod collector;
pub mod config;
pub mod events;
pub mod genre;
pub mod observers;
pub mod visualization;

pub use collector::{BookCollector, CollectorError};
pub use config::{CollectorConfig, Config, ConfigError};
pub use events::CollectorEvent;
pub use genre::{Genre, UnknownGenre};
pub use observers::{ChangeLogger, ChildrenShelfNotifier, CollectorObserver};
pub use visualization::CatalogVisualization;
