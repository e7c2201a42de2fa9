use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a label does not name any genre of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized genre label {0:?}")]
pub struct UnknownGenre(pub String);

/// The closed genre taxonomy a book can be classified under
///
/// Labels are matched literally: `"ФАНТАСТИКА"` is not `Fantasy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Genre {
    /// Science fiction and fantasy
    #[serde(rename = "Фантастика")]
    Fantasy,
    /// Horror, age-restricted
    #[serde(rename = "Ужасы")]
    Horror,
    /// Crime and detective stories, age-restricted
    #[serde(rename = "Детективы")]
    Detective,
    /// Animated stories
    #[serde(rename = "Мультфильмы")]
    Cartoons,
    /// Comedy
    #[serde(rename = "Комедии")]
    Comedy,
}

impl Genre {
    /// Every genre, in catalog order
    pub const ALL: [Self; 5] =
        [Self::Fantasy, Self::Horror, Self::Detective, Self::Cartoons, Self::Comedy];

    /// The label this genre is stored and displayed under
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fantasy => "Фантастика",
            Self::Horror => "Ужасы",
            Self::Detective => "Детективы",
            Self::Cartoons => "Мультфильмы",
            Self::Comedy => "Комедии",
        }
    }

    /// Whether books of this genre may show up on the children's shelf
    #[must_use]
    pub const fn is_children_safe(self) -> bool {
        !self.is_age_restricted()
    }

    /// Whether this genre carries an age rating
    #[must_use]
    pub const fn is_age_restricted(self) -> bool {
        matches!(self, Self::Horror | Self::Detective)
    }

    /// Iterate over the children-safe part of the taxonomy
    pub fn children_safe() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|genre| genre.is_children_safe())
    }

    /// Iterate over the age-restricted part of the taxonomy
    pub fn age_restricted() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|genre| genre.is_age_restricted())
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.label() == label)
            .ok_or_else(|| UnknownGenre(label.to_string()))
    }
}
