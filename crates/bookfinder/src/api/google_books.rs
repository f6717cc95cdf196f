use log::{info, trace};
use serde::Deserialize;

use crate::{
    record::{BookRecord, EbookAccess, Rating, UNKNOWN},
    search::Query,
    Error, ErrorKind,
};

use super::Client;

/// Default endpoint of the Google Books volumes API.
pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Number of volumes requested per search, the API is never asked for a second page.
pub const MAX_RESULTS: usize = 10;

pub(crate) fn get_volumes<C: Client>(
    client: &C,
    api_url: &str,
    query: &Query,
) -> Result<Vec<Volume>, Error> {
    let url = request_url(api_url, query)?;
    info!(
        "Searching for {} '{}' using Google Books API",
        query.kind(),
        query.text()
    );

    let GoogleModel { items } = client.get_json(url.as_str())?;

    trace!("Request was successful");

    Ok(items.unwrap_or_default())
}

fn request_url(api_url: &str, query: &Query) -> Result<reqwest::Url, Error> {
    let q = format!("{}:{}", query.kind().qualifier(), query.text());
    let max_results = MAX_RESULTS.to_string();
    reqwest::Url::parse_with_params(
        api_url,
        &[("q", q.as_str()), ("maxResults", max_results.as_str())],
    )
    .map_err(|e| Error::wrap(ErrorKind::InvalidInput, e))
}

/// Convert a single volume from the API into a [`BookRecord`].
///
/// Never fails, each field that cannot be found in `volume` is replaced by its placeholder:
///
/// | field                | source                                        | placeholder   |
/// |----------------------|-----------------------------------------------|---------------|
/// | `title`              | `volumeInfo.title`                            | [`UNKNOWN`]   |
/// | `author_name`        | `volumeInfo.authors` joined with `", "`       | [`UNKNOWN`]   |
/// | `isbn`               | first of `volumeInfo.industryIdentifiers`     | [`UNKNOWN`]   |
/// | `cover_url`          | `volumeInfo.imageLinks.thumbnail`             | `""`          |
/// | `ebook_access`       | `saleInfo.isEbook`                            | `Unavailable` |
/// | `first_publish_year` | year of `volumeInfo.publishedDate`            | [`UNKNOWN`]   |
/// | `rating`             | `volumeInfo.averageRating`                    | `Unknown`     |
#[must_use]
pub fn normalize(volume: Volume) -> BookRecord {
    BookRecord::from(volume)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    // the API leaves `items` out entirely when nothing matched
    items: Option<Vec<Volume>>,
}

/// One item of a Google Books volumes response, before normalization.
///
/// Every part of the item is optional, the API omits whatever it does not know about a volume.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    volume_info: Option<VolumeInfo>,
    sale_info: Option<SaleInfo>,
}

/// Volume information from the Google Book API
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    image_links: Option<ImageLinks>,
    average_rating: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct IndustryIdentifier {
    identifier: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleInfo {
    is_ebook: Option<bool>,
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

// Only a leading `YYYY` component is accepted, anything else is treated as no date at all.
fn year_of(published_date: &str) -> Option<String> {
    published_date
        .split('-')
        .next()
        .filter(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
        .map(ToOwned::to_owned)
}

impl From<Volume> for BookRecord {
    fn from(volume: Volume) -> Self {
        // Deconstruct volume to take ownership of fields (avoids cloning).
        let Volume {
            volume_info,
            sale_info,
        } = volume;
        let VolumeInfo {
            title,
            authors,
            published_date,
            industry_identifiers,
            image_links,
            average_rating,
        } = volume_info.unwrap_or_default();

        let unknown = || UNKNOWN.to_owned();

        let title = title.and_then(non_blank).unwrap_or_else(unknown);

        let author_name = authors
            .map(|authors| {
                authors
                    .into_iter()
                    .filter_map(non_blank)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .and_then(non_blank)
            .unwrap_or_else(unknown);

        let isbn = industry_identifiers
            .unwrap_or_default()
            .into_iter()
            .find_map(|id| id.identifier.and_then(non_blank))
            .unwrap_or_else(unknown);

        let cover_url = image_links
            .and_then(|links| links.thumbnail)
            .unwrap_or_default();

        let ebook_access = sale_info
            .and_then(|sale| sale.is_ebook)
            .map_or(EbookAccess::Unavailable, EbookAccess::from);

        let first_publish_year = published_date
            .as_deref()
            .and_then(year_of)
            .unwrap_or_else(unknown);

        Self::new(
            title,
            author_name,
            isbn,
            cover_url,
            ebook_access,
            first_publish_year,
            Rating::from(average_rating),
        )
    }
}

#[cfg(test)]
pub(crate) use tests::volume_strategy;

#[cfg(test)]
mod tests {
    use super::{GoogleModel, ImageLinks, IndustryIdentifier, SaleInfo, Volume, VolumeInfo};
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        record::{EbookAccess, Rating, UNKNOWN},
        search::{Query, SearchKind},
        Error, ErrorKind,
    };

    use proptest::prelude::*;

    const GOOGLE_BOOKS_JSON: &str = include_str!("../../tests/data/google_books_dune.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(GOOGLE_BOOKS_JSON.to_owned()),
        NoMatchesProducer => Ok(
            r#"{
                "kind": "books#volumes",
                "totalItems": 0
            }"#.to_owned()
        ),
    }

    fn query(text: &str, kind: SearchKind) -> Query {
        Query::new(text, kind).expect("query used in tests is not empty")
    }

    fn get_volumes<P: crate::api::Producer<String>>(
        q: &Query,
    ) -> Result<Vec<Volume>, Error> {
        super::get_volumes(&MockClient::<P>::default(), super::GOOGLE_BOOKS_URL, q)
    }

    #[test]
    fn title_url_format_is_correct() {
        assert!(get_volumes::<ValidJsonProducer>(&query("Dune", SearchKind::Title)).is_ok());
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=intitle%3ADune&maxResults=10");
    }

    #[test]
    fn author_url_format_is_encoded() {
        assert!(
            get_volumes::<ValidJsonProducer>(&query("Frank Herbert", SearchKind::Author)).is_ok()
        );
        assert_url!(
            "https://www.googleapis.com/books/v1/volumes?q=inauthor%3AFrank+Herbert&maxResults=10"
        );
    }

    #[test]
    fn isbn_13_url_format_is_correct() {
        assert!(get_volumes::<ValidJsonProducer>(&query("978-0441172719", SearchKind::Isbn)).is_ok());
        // should strip the hypen in a ISBN-13 string
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=isbn%3A9780441172719&maxResults=10");
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let err = super::get_volumes(
            &MockClient::<ValidJsonProducer>::default(),
            "not a url",
            &query("Dune", SearchKind::Title),
        )
        .unwrap_err();

        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn missing_items_is_zero_volumes() {
        let volumes = get_volumes::<NoMatchesProducer>(&query("Dune", SearchKind::Title))
            .expect("A response without items is not an error");

        assert!(volumes.is_empty());
    }

    #[test]
    fn network_error_is_io_error() {
        let err = get_volumes::<NetworkErrorProducer>(&query("Dune", SearchKind::Title))
            .unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn complete_volume_is_normalized() {
        let mut model: GoogleModel = serde_json::from_str(GOOGLE_BOOKS_JSON).unwrap();
        let record = super::normalize(model.items.as_mut().unwrap().remove(0));

        assert_eq!("Dune", record.title());
        assert_eq!("Frank Herbert", record.author_name());
        // the first identifier wins even though an ISBN-13 is also present
        assert_eq!("0441172717", record.isbn());
        assert_eq!(
            "http://books.google.com/books/content?id=B1hSG45JCX4C&printsec=frontcover&img=1&zoom=1",
            record.cover_url()
        );
        assert_eq!(EbookAccess::Available, record.ebook_access());
        assert_eq!("1990", record.first_publish_year());
        assert_eq!(Rating::Score(4.5), record.rating());
    }

    #[test]
    fn sparse_volumes_use_placeholders() {
        let model: GoogleModel = serde_json::from_str(GOOGLE_BOOKS_JSON).unwrap();
        let mut records = model.items.unwrap().into_iter().map(super::normalize);
        let _ = records.next();

        let messiah = records.next().unwrap();
        assert_eq!("Dune Messiah", messiah.title());
        assert_eq!(UNKNOWN, messiah.author_name());
        assert_eq!(UNKNOWN, messiah.isbn());
        assert_eq!("", messiah.cover_url());
        assert_eq!(EbookAccess::Unavailable, messiah.ebook_access());
        assert_eq!("2008", messiah.first_publish_year());
        assert_eq!(Rating::Unknown, messiah.rating());

        let road = records.next().unwrap();
        assert_eq!(
            "Frank Herbert, Brian Herbert, Kevin J. Anderson",
            road.author_name()
        );
        assert_eq!("9780765312952", road.isbn());
        assert_eq!(EbookAccess::Unavailable, road.ebook_access());
        assert_eq!(UNKNOWN, road.first_publish_year());
        assert_eq!(Rating::Score(3.0), road.rating());
    }

    #[test]
    fn empty_volume_is_all_placeholders() {
        let volume: Volume = serde_json::from_str("{}").unwrap();
        let record = super::normalize(volume);

        assert_eq!(UNKNOWN, record.title());
        assert_eq!(UNKNOWN, record.author_name());
        assert_eq!(UNKNOWN, record.isbn());
        assert_eq!("", record.cover_url());
        assert_eq!(EbookAccess::Unavailable, record.ebook_access());
        assert_eq!(UNKNOWN, record.first_publish_year());
        assert_eq!(Rating::Unknown, record.rating());
    }

    #[test]
    fn null_parts_are_treated_as_missing() {
        let volume: Volume = serde_json::from_str(
            r#"{ "volumeInfo": { "title": null, "authors": [], "imageLinks": null }, "saleInfo": null }"#,
        )
        .unwrap();
        let record = super::normalize(volume);

        assert_eq!(UNKNOWN, record.title());
        assert_eq!(UNKNOWN, record.author_name());
        assert_eq!("", record.cover_url());
    }

    #[test]
    fn unparseable_dates_are_not_partially_parsed() {
        assert_eq!(Some("2002".to_owned()), super::year_of("2002-09-01"));
        assert_eq!(None, super::year_of("Sept 2002"));
        assert_eq!(None, super::year_of("02-09"));
        assert_eq!(None, super::year_of(""));
    }

    pub(crate) fn volume_strategy() -> impl Strategy<Value = Volume> {
        let identifier = proptest::option::of("[0-9X -]{0,13}")
            .prop_map(|identifier| IndustryIdentifier { identifier });

        let info = (
            proptest::option::of(".*"),
            proptest::option::of(proptest::collection::vec(".*", 0..4)),
            proptest::option::of("[0-9]{0,6}(-[0-9]{1,2}){0,2}|.*"),
            proptest::option::of(proptest::collection::vec(identifier, 0..3)),
            proptest::option::of(proptest::option::of(".*")),
            proptest::option::of(0.0f64..=5.0),
        )
            .prop_map(
                |(title, authors, published_date, industry_identifiers, thumbnail, average_rating)| {
                    VolumeInfo {
                        title,
                        authors,
                        published_date,
                        industry_identifiers,
                        image_links: thumbnail.map(|thumbnail| ImageLinks { thumbnail }),
                        average_rating,
                    }
                },
            );

        (
            proptest::option::of(info),
            proptest::option::of(proptest::option::of(any::<bool>())),
        )
            .prop_map(|(volume_info, is_ebook)| Volume {
                volume_info,
                sale_info: is_ebook.map(|is_ebook| SaleInfo { is_ebook }),
            })
    }

    proptest! {
        #[test]
        fn normalize_always_defines_every_field(volume in volume_strategy()) {
            let record = super::normalize(volume);

            prop_assert!(!record.title().trim().is_empty());
            prop_assert!(!record.author_name().trim().is_empty());
            prop_assert!(!record.isbn().trim().is_empty());
            let year = record.first_publish_year();
            prop_assert!(
                year == UNKNOWN || (year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
            );
            if let Rating::Score(score) = record.rating() {
                prop_assert!((0.0..=5.0).contains(&score));
            }
        }
    }
}
