//! The records currently held by the application and how they are being shown.
//!
//! A [`Controller`] keeps the [`WorkingSet`] from the last search together with the
//! [`ListOptions`] chosen by the user, and tells a [`Renderer`] what to draw. The working set is
//! never reordered or trimmed itself: the visible list is derived from it again on every render,
//! so clearing a filter always gets back every record from the last search.

use log::trace;

use crate::{
    ops::{filter_ebook_available, sort_by_rating_descending},
    BookRecord, Error, ErrorKind,
};

/// The presentation side of the application.
///
/// Implementations decide how a list or a single record is laid out, the [`Controller`] decides
/// which one is shown and with which records.
pub trait Renderer {
    /// Replace whatever is shown with a list of `records`, one entry each.
    ///
    /// An empty `records` slice should be drawn as an explicit "nothing found" entry.
    ///
    /// # Errors
    ///
    /// Should only return an [`Err`] when the output cannot be written.
    fn render_list(&mut self, records: &[&BookRecord]) -> Result<(), Error>;

    /// Replace whatever is shown with the details of a single `record`.
    ///
    /// # Errors
    ///
    /// Should only return an [`Err`] when the output cannot be written.
    fn render_detail(&mut self, record: &BookRecord) -> Result<(), Error>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_list(&mut self, records: &[&BookRecord]) -> Result<(), Error> {
        (**self).render_list(records)
    }

    fn render_detail(&mut self, record: &BookRecord) -> Result<(), Error> {
        (**self).render_detail(record)
    }
}

/// The records returned by the last search, in the order the API returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkingSet {
    records: Vec<BookRecord>,
}

impl WorkingSet {
    /// All records of the last search.
    #[must_use]
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<BookRecord>> for WorkingSet {
    fn from(records: Vec<BookRecord>) -> Self {
        Self { records }
    }
}

/// User choices applied to the [`WorkingSet`] when the list is rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Show the highest rated records first.
    pub sort_by_rating: bool,
    /// Only show records with an ebook available.
    pub ebook_only: bool,
}

/// What is currently being shown.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<'a> {
    /// The visible list, after [`ListOptions`] are applied.
    List(Vec<&'a BookRecord>),
    /// A single record.
    Detail(&'a BookRecord),
}

// Detail holds an index into the working set, not into the visible list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Current {
    List,
    Detail(usize),
}

/// Owns the [`WorkingSet`] and switches between the list and detail views.
#[derive(Debug)]
pub struct Controller<R> {
    renderer: R,
    working_set: WorkingSet,
    options: ListOptions,
    current: Current,
}

fn visible(working_set: &WorkingSet, options: ListOptions) -> Vec<&BookRecord> {
    let records = working_set.records();
    if options.sort_by_rating {
        filter_ebook_available(sort_by_rating_descending(records), options.ebook_only)
    } else {
        filter_ebook_available(records, options.ebook_only)
    }
}

impl<R: Renderer> Controller<R> {
    /// Create a new [`Controller`] with an empty [`WorkingSet`] showing the list view.
    ///
    /// Nothing is rendered until the first call to [`Controller::render_list`] or
    /// [`Controller::replace_working_set`].
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            working_set: WorkingSet::default(),
            options: ListOptions::default(),
            current: Current::List,
        }
    }

    /// The records of the last search.
    pub const fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// The options applied to the list view.
    pub const fn options(&self) -> ListOptions {
        self.options
    }

    /// The records that the list view shows, with the current [`ListOptions`] applied.
    pub fn visible(&self) -> Vec<&BookRecord> {
        visible(&self.working_set, self.options)
    }

    /// What is currently being shown.
    pub fn view(&self) -> ViewState<'_> {
        match self.current {
            Current::List => ViewState::List(self.visible()),
            Current::Detail(index) => ViewState::Detail(&self.working_set.records[index]),
        }
    }

    #[allow(missing_docs)]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Swap in the records of a new search and render them as a list.
    ///
    /// The [`ListOptions`] are reset, so the new records are shown unsorted and unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the [`Renderer`] fails, the records are kept regardless.
    pub fn replace_working_set(&mut self, records: Vec<BookRecord>) -> Result<(), Error> {
        trace!("Replacing working set with {} records", records.len());
        self.working_set = WorkingSet::from(records);
        self.options = ListOptions::default();
        self.render_list()
    }

    /// Change the [`ListOptions`] and render the list again.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the [`Renderer`] fails.
    pub fn set_options(&mut self, options: ListOptions) -> Result<(), Error> {
        trace!("List options changed to {options:?}");
        self.options = options;
        self.render_list()
    }

    /// Render every visible record as a list, leaving the detail view if it was shown.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the [`Renderer`] fails.
    pub fn render_list(&mut self) -> Result<(), Error> {
        self.current = Current::List;
        let records = visible(&self.working_set, self.options);
        self.renderer.render_list(&records)
    }

    /// Render the details of the record at `position` in the visible list.
    ///
    /// `position` is zero based and refers to the list as it is currently sorted and filtered.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] with [`ErrorKind::InvalidInput`] when there is no record at `position`,
    /// in which case nothing changes. Returns an [`Err`] when the [`Renderer`] fails.
    pub fn render_detail(&mut self, position: usize) -> Result<(), Error> {
        let record = visible(&self.working_set, self.options)
            .get(position)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("There is no book at position {}", position + 1),
                )
            })?;

        let index = self
            .working_set
            .records
            .iter()
            .position(|r| std::ptr::eq(r, record))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NoValue,
                    "Internal error: visible record should be part of the working set",
                )
            })?;

        trace!("Showing details of '{}'", record.title());
        self.current = Current::Detail(index);
        self.renderer.render_detail(record)
    }
}

#[cfg(test)]
pub(crate) use tests::{Rendered, RecordingRenderer};
