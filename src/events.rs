use std::fmt;

use serde::{Deserialize, Serialize};

use crate::genre::Genre;

/// An accepted change to a collector's state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectorEvent {
    /// A new title entered the registry
    BookAdded {
        /// Title of the new book
        title: String,
    },
    /// A registered book was given a genre
    GenreAssigned {
        /// Title of the classified book
        title: String,
        /// Genre held before the assignment, `None` if it was unassigned
        previous: Option<Genre>,
        /// Genre held after the assignment
        genre: Genre,
    },
    /// A book was appended to the favorites list
    FavoriteAdded {
        /// Title of the favorited book
        title: String,
    },
    /// A book was taken off the favorites list
    FavoriteRemoved {
        /// Title of the removed book
        title: String,
    },
}

impl CollectorEvent {
    /// Title of the book this event concerns
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::BookAdded { title }
            | Self::GenreAssigned { title, .. }
            | Self::FavoriteAdded { title }
            | Self::FavoriteRemoved { title } => title,
        }
    }
}

impl fmt::Display for CollectorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookAdded { title } => write!(f, "added {title:?}"),
            Self::GenreAssigned { title, previous: Some(previous), genre } => {
                write!(f, "{title:?}: {previous} -> {genre}")
            }
            Self::GenreAssigned { title, previous: None, genre } => {
                write!(f, "{title:?}: genre set to {genre}")
            }
            Self::FavoriteAdded { title } => write!(f, "favorited {title:?}"),
            Self::FavoriteRemoved { title } => write!(f, "unfavorited {title:?}"),
        }
    }
}
