//! Validated search queries and the single request made for each of them.

use log::{trace, warn};

use crate::{
    api::{google_books, Client},
    BookRecord, Error, ErrorKind,
};

/// What the text of a [`Query`] should be matched against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchKind {
    /// Match words in the title.
    Title,
    /// Match an exact ISBN-10 or ISBN-13.
    Isbn,
    /// Match an author name.
    Author,
}

impl SearchKind {
    /// The Google Books keyword that restricts a search to this kind.
    #[must_use]
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::Title => "intitle",
            Self::Isbn => "isbn",
            Self::Author => "inauthor",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Isbn => f.write_str("ISBN"),
            Self::Author => f.write_str("author"),
        }
    }
}

/// Search text paired with the [`SearchKind`] it applies to.
///
/// A [`Query`] can only be created from text that is not empty once trimmed, so holding one means
/// a request can be made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    text: String,
    kind: SearchKind,
}

impl Query {
    /// Validate `text` and create a new [`Query`].
    ///
    /// Leading and trailing whitespace is removed and hyphens are removed from ISBNs.
    ///
    /// # Errors
    ///
    /// An [`Err`] with [`ErrorKind::InvalidInput`] is returned when `text` is empty or only
    /// whitespace.
    pub fn new(text: &str, kind: SearchKind) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "Search query is empty"));
        }

        let text = match kind {
            // remove hypen from ISBN-13 (if applicable)
            SearchKind::Isbn => text.replace('-', ""),
            SearchKind::Title | SearchKind::Author => text.to_owned(),
        };

        Ok(Self { text, kind })
    }

    /// The trimmed search text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn kind(&self) -> SearchKind {
        self.kind
    }
}

/// Make a single request for `query` and normalize every volume returned.
///
/// At most [`MAX_RESULTS`](crate::MAX_RESULTS) records are requested. A failed request, a
/// response that cannot be read, or a search without matches all produce an empty [`Vec`]; the
/// cause is logged but never returned and the request is not retried.
pub fn search<C: Client>(client: &C, api_url: &str, query: &Query) -> Vec<BookRecord> {
    match google_books::get_volumes(client, api_url, query) {
        Ok(volumes) => {
            trace!("{} volumes found", volumes.len());
            volumes.into_iter().map(google_books::normalize).collect()
        }
        Err(err) => {
            warn!("Search for {} '{}' failed: {err}", query.kind(), query.text());
            Vec::new()
        }
    }
}
