//! Handlers for the events a user interface produces.

use log::{info, trace};

use crate::{
    api::Client,
    search::{search, Query, SearchKind},
    view::{Controller, ListOptions, Renderer},
    Error, GOOGLE_BOOKS_URL,
};

/// The state of one user's session with the application.
///
/// A user interface forwards each event to the matching handler, supplying the values the user
/// entered (query text, search kind, checkbox state, or the position of the selected record).
/// Rendering happens through the [`Renderer`] given to [`Session::new`].
#[derive(Debug)]
pub struct Session<R, C = reqwest::blocking::Client> {
    controller: Controller<R>,
    client: C,
    api_url: String,
}

impl<R: Renderer> Session<R> {
    /// Create a new [`Session`] that searches the Google Books API.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self::with_api_url(renderer, GOOGLE_BOOKS_URL)
    }

    /// Create a new [`Session`] that searches a Google Books compatible API at `api_url`.
    #[must_use]
    pub fn with_api_url<S: Into<String>>(renderer: R, api_url: S) -> Self {
        Self::with_client(renderer, reqwest::blocking::Client::new(), api_url)
    }
}

impl<R: Renderer, C: Client> Session<R, C> {
    /// Create a new [`Session`] which makes its requests with `client` against `api_url`.
    pub fn with_client<S: Into<String>>(renderer: R, client: C, api_url: S) -> Self {
        Self {
            controller: Controller::new(renderer),
            client,
            api_url: api_url.into(),
        }
    }

    #[allow(missing_docs)]
    pub const fn controller(&self) -> &Controller<R> {
        &self.controller
    }

    /// The base url searches are made against.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Search for `text` and show the records found as a list.
    ///
    /// Returns the number of records found. Failing to reach the API is not an error, it shows
    /// the same empty list as a search without matches.
    ///
    /// # Errors
    ///
    /// An [`Err`] with [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) is returned
    /// when `text` is empty after trimming; no request is made and nothing changes.
    /// An [`Err`] is returned when the [`Renderer`] fails.
    pub fn submit_search(&mut self, text: &str, kind: SearchKind) -> Result<usize, Error> {
        let query = Query::new(text, kind)?;
        let records = search(&self.client, &self.api_url, &query);
        let found = records.len();
        info!("{found} books found for {kind} '{}'", query.text());
        self.controller.replace_working_set(records)?;
        Ok(found)
    }

    /// Show the list ordered by rating, highest first.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the [`Renderer`] fails.
    pub fn sort_by_rating(&mut self) -> Result<(), Error> {
        trace!("Sort by rating selected");
        let options = ListOptions {
            sort_by_rating: true,
            ..self.controller.options()
        };
        self.controller.set_options(options)
    }

    /// Show only the books with an ebook available when `enabled`, or every book when not.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the [`Renderer`] fails.
    pub fn toggle_ebook_filter(&mut self, enabled: bool) -> Result<(), Error> {
        trace!("Ebook filter set to {enabled}");
        let options = ListOptions {
            ebook_only: enabled,
            ..self.controller.options()
        };
        self.controller.set_options(options)
    }

    /// Show the details of the book at `position` (zero based) in the visible list.
    ///
    /// # Errors
    ///
    /// An [`Err`] with [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) is returned
    /// when no book is shown at `position`.
    /// An [`Err`] is returned when the [`Renderer`] fails.
    pub fn select_record(&mut self, position: usize) -> Result<(), Error> {
        self.controller.render_detail(position)
    }
}
