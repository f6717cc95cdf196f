use bookfinder::{SearchKind, Session};

use clap::{ArgEnum, Subcommand};
use eyre::{eyre, Context};
use log::trace;

use crate::{
    interact,
    render::{Frame, JsonRenderer, TextRenderer},
};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search for books and print the results
    ///
    /// At most 10 books are returned for a single search.
    #[clap(arg_required_else_help = true)]
    Search {
        /// The text to search for
        query: String,

        /// What the query should be matched against
        #[clap(short, long, arg_enum, default_value = "title")]
        by: By,

        /// Order the books by their average rating, highest first
        ///
        /// Books without a rating are ordered as if they were rated 0.
        #[clap(short = 'r', long)]
        sort_rating: bool,

        /// Only show books that are available as an ebook
        #[clap(short, long)]
        ebooks_only: bool,

        /// Show the details of the book at this position in the list, starting at 1
        #[clap(short, long)]
        select: Option<usize>,

        /// Print the books as JSON
        #[clap(long)]
        json: bool,
    },

    /// Search and browse books interactively
    Interactive,
}

#[derive(Copy, Clone, Debug, ArgEnum)]
pub enum By {
    Title,
    Isbn,
    Author,
}

impl From<By> for SearchKind {
    fn from(by: By) -> Self {
        match by {
            By::Title => Self::Title,
            By::Isbn => Self::Isbn,
            By::Author => Self::Author,
        }
    }
}

struct SearchOpts {
    sort_rating: bool,
    ebooks_only: bool,
    select: Option<usize>,
}

impl Commands {
    pub fn execute(self, api_url: &str) -> eyre::Result<()> {
        match self {
            Commands::Search {
                query,
                by,
                sort_rating,
                ebooks_only,
                select,
                json,
            } => {
                let opts = SearchOpts {
                    sort_rating,
                    ebooks_only,
                    select,
                };
                let frame = if json {
                    search_once(JsonRenderer::default(), api_url, &query, by, &opts)?
                } else {
                    search_once(TextRenderer::default(), api_url, &query, by, &opts)?
                };
                print!("{frame}");
                Ok(())
            }
            Commands::Interactive => {
                trace!("Starting interactive session against '{api_url}'");
                interact::run(api_url)
            }
        }
    }
}

fn search_once<R: Frame>(
    renderer: R,
    api_url: &str,
    query: &str,
    by: By,
    opts: &SearchOpts,
) -> eyre::Result<String> {
    let mut session = Session::with_api_url(renderer, api_url);

    session
        .submit_search(query, by.into())
        .wrap_err("Cannot search for books")?;

    if opts.sort_rating {
        session.sort_by_rating()?;
    }

    if opts.ebooks_only {
        session.toggle_ebook_filter(true)?;
    }

    if let Some(position) = opts.select {
        trace!("Selecting book {position}");
        let index = position
            .checked_sub(1)
            .ok_or_else(|| eyre!("Book positions start at 1"))?;
        session
            .select_record(index)
            .wrap_err_with(|| format!("Cannot show book {position}"))?;
    }

    Ok(session.controller().renderer().frame().to_owned())
}
