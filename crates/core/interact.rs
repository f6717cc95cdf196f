use std::fmt;

use bookfinder::{ErrorKind, SearchKind, Session};
use dialoguer::Input;
use eyre::{eyre, Context, Result};
use log::{trace, warn};

use crate::render::{Frame, TextRenderer};

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_input(prompt: &str) -> Result<String> {
    // empty input is passed on so the session can reject it
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Search,
    Sort,
    ToggleEbooks,
    View,
    Quit,
}

impl Action {
    const ALL: [Self; 5] = [
        Self::Search,
        Self::Sort,
        Self::ToggleEbooks,
        Self::View,
        Self::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => f.write_str("New search"),
            Self::Sort => f.write_str("Sort by rating"),
            Self::ToggleEbooks => f.write_str("Toggle ebook only filter"),
            Self::View => f.write_str("View a book"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

const SEARCH_KINDS: [SearchKind; 3] = [SearchKind::Title, SearchKind::Author, SearchKind::Isbn];

fn user_search(session: &mut Session<TextRenderer>) -> Result<bool> {
    let kind = SEARCH_KINDS[user_select("Search by", &SEARCH_KINDS)?];
    let text = user_input(&format!("Enter the {kind} to search for"))?;

    match session.submit_search(&text, kind) {
        Ok(found) => {
            trace!("{found} books in the working set");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::InvalidInput => {
            warn!("{err}");
            Ok(false)
        }
        Err(err) => Err(err).wrap_err("Cannot show search results"),
    }
}

fn user_view(session: &mut Session<TextRenderer>) -> Result<bool> {
    let titles: Vec<_> = session
        .controller()
        .visible()
        .iter()
        .map(|record| format!("{} - {}", record.title(), record.author_name()))
        .collect();

    if titles.is_empty() {
        warn!("There are no books to view - try a new search");
        return Ok(false);
    }

    let position = user_select("Choose a book", &titles)?;
    session.select_record(position)?;
    Ok(true)
}

/// Runs the prompt loop until the user quits.
///
/// Every handled action redraws the terminal with the frame rendered by the session.
pub fn run(api_url: &str) -> Result<()> {
    let mut session = Session::with_api_url(TextRenderer::default(), api_url);

    loop {
        let action = Action::ALL[user_select("What would you like to do?", &Action::ALL)?];
        trace!("'{action}' selected");

        let redraw = match action {
            Action::Search => user_search(&mut session)?,
            Action::Sort => {
                session.sort_by_rating()?;
                true
            }
            Action::ToggleEbooks => {
                let enabled = !session.controller().options().ebook_only;
                session.toggle_ebook_filter(enabled)?;
                true
            }
            Action::View => user_view(&mut session)?,
            Action::Quit => return Ok(()),
        };

        if redraw {
            print!("{}", session.controller().renderer().frame());
        }
    }
}
