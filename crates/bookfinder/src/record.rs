//! The flat, normalized representation of a single book.

use serde::{Serialize, Serializer};

/// Placeholder used for any field that was absent from the source data.
pub const UNKNOWN: &str = "Unknown";

/// Whether a book is offered as an ebook.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EbookAccess {
    /// The book can be bought or read as an ebook.
    Available,
    /// No ebook edition is offered.
    Unavailable,
}

impl From<bool> for EbookAccess {
    fn from(is_ebook: bool) -> Self {
        if is_ebook {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

impl std::fmt::Display for EbookAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("Available"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// The average reader rating of a book.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Rating {
    /// A numeric average rating.
    Score(f64),
    /// No rating was reported.
    Unknown,
}

impl Rating {
    /// The value used when ordering by rating.
    ///
    /// [`Rating::Unknown`] orders as `0.0`, the stored value itself is left as it is.
    #[must_use]
    pub const fn sort_key(self) -> f64 {
        match self {
            Self::Score(score) => score,
            Self::Unknown => 0.0,
        }
    }
}

impl From<Option<f64>> for Rating {
    fn from(score: Option<f64>) -> Self {
        score.map_or(Self::Unknown, Self::Score)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{score}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

// Keeps the JSON shape of a record flat: a number, or the "Unknown" sentinel string.
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(score) => serializer.serialize_f64(*score),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// A book as presented by the application.
///
/// Every field is always populated, absent source data is replaced by [`UNKNOWN`] (or an empty
/// string for the cover url). A [`BookRecord`] has no setters and is never changed once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    title: String,
    author_name: String,
    isbn: String,
    cover_url: String,
    ebook_access: EbookAccess,
    first_publish_year: String,
    #[serde(rename = "ratingSortable")]
    rating: Rating,
}

impl BookRecord {
    /// Create a new [`BookRecord`] from already normalized values.
    #[must_use]
    pub const fn new(
        title: String,
        author_name: String,
        isbn: String,
        cover_url: String,
        ebook_access: EbookAccess,
        first_publish_year: String,
        rating: Rating,
    ) -> Self {
        Self {
            title,
            author_name,
            isbn,
            cover_url,
            ebook_access,
            first_publish_year,
            rating,
        }
    }

    /// Title of the book.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Comma separated author names.
    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// First industry identifier reported for the book.
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Thumbnail url, empty when the book has no cover.
    #[must_use]
    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn ebook_access(&self) -> EbookAccess {
        self.ebook_access
    }

    /// Four digit publishing year.
    #[must_use]
    pub fn first_publish_year(&self) -> &str {
        &self.first_publish_year
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn rating(&self) -> Rating {
        self.rating
    }
}
