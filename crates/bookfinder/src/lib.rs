#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookfinder
//!
//! bookfinder is a library for searching books with the Google Books API and presenting the
//! results. Every volume returned by the API is normalized into a flat [`BookRecord`], the
//! records of the last search are held by a [`view::Controller`] which can show them as a
//! sorted and/or filtered list or show the details of one of them through a [`Renderer`].
//!
//! A user interface usually only needs a [`Session`]:
//!
//! ```no_run
//! use bookfinder::{BookRecord, Error, Renderer, SearchKind, Session};
//!
//! struct Stdout;
//!
//! impl Renderer for Stdout {
//!     fn render_list(&mut self, records: &[&BookRecord]) -> Result<(), Error> {
//!         for record in records {
//!             println!("{} by {}", record.title(), record.author_name());
//!         }
//!         Ok(())
//!     }
//!
//!     fn render_detail(&mut self, record: &BookRecord) -> Result<(), Error> {
//!         println!("{record:?}");
//!         Ok(())
//!     }
//! }
//!
//! let mut session = Session::new(Stdout);
//! session.submit_search("Dune", SearchKind::Title)?;
//! session.sort_by_rating()?;
//! session.select_record(0)?;
//! # Ok::<(), Error>(())
//! ```

mod api;
mod error;
pub mod ops;
mod record;
mod search;
mod session;
pub mod view;

pub use api::{
    google_books::{normalize, Volume, GOOGLE_BOOKS_URL, MAX_RESULTS},
    Client,
};
pub use error::{Error, ErrorKind};
pub use record::{BookRecord, EbookAccess, Rating, UNKNOWN};
pub use search::{search, Query, SearchKind};
pub use session::Session;
pub use view::Renderer;
