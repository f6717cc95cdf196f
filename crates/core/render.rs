use std::fmt::Write;

use bookfinder::{BookRecord, Error, ErrorKind, Renderer};

/// A [`Renderer`] that draws into an in-memory frame.
///
/// Every render replaces the frame, the caller decides when it is written to the terminal.
pub trait Frame: Renderer {
    fn frame(&self) -> &str;
}

#[inline]
fn fmt_err(err: std::fmt::Error) -> Error {
    Error::wrap(ErrorKind::IO, err)
}

/// Plain text list and detail views.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: String,
}

impl Frame for TextRenderer {
    fn frame(&self) -> &str {
        &self.frame
    }
}

impl Renderer for TextRenderer {
    fn render_list(&mut self, records: &[&BookRecord]) -> Result<(), Error> {
        self.frame.clear();

        if records.is_empty() {
            self.frame.push_str("No books found.\n");
            return Ok(());
        }

        for (i, record) in records.iter().enumerate() {
            writeln!(
                self.frame,
                "{:>2}. {} - {} ({}) rating: {}, ebook: {}",
                i + 1,
                record.title(),
                record.author_name(),
                record.first_publish_year(),
                record.rating(),
                record.ebook_access(),
            )
            .map_err(fmt_err)?;
        }
        Ok(())
    }

    fn render_detail(&mut self, record: &BookRecord) -> Result<(), Error> {
        self.frame.clear();

        let cover = if record.cover_url().is_empty() {
            "none"
        } else {
            record.cover_url()
        };

        let fields = [
            ("Title", record.title().to_owned()),
            ("Author", record.author_name().to_owned()),
            ("ISBN", record.isbn().to_owned()),
            ("First published", record.first_publish_year().to_owned()),
            ("Rating", record.rating().to_string()),
            ("Ebook", record.ebook_access().to_string()),
            ("Cover", cover.to_owned()),
        ];

        for (label, value) in fields {
            writeln!(self.frame, "{:<16} {value}", format!("{label}:")).map_err(fmt_err)?;
        }
        Ok(())
    }
}

/// JSON output, an array of records for the list view or a single record for the detail view.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    frame: String,
}

impl JsonRenderer {
    fn replace_frame<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.frame = serde_json::to_string_pretty(value).map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        self.frame.push('\n');
        Ok(())
    }
}

impl Frame for JsonRenderer {
    fn frame(&self) -> &str {
        &self.frame
    }
}

impl Renderer for JsonRenderer {
    fn render_list(&mut self, records: &[&BookRecord]) -> Result<(), Error> {
        self.replace_frame(records)
    }

    fn render_detail(&mut self, record: &BookRecord) -> Result<(), Error> {
        self.replace_frame(record)
    }
}
