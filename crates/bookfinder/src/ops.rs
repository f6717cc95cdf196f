//! Reordering and subsetting of records.
//!
//! Both operators borrow the records they are given and return a new [`Vec`] of references, the
//! records themselves are never copied or changed.

use crate::{BookRecord, EbookAccess};

/// Order `records` by rating, highest first.
///
/// Records without a numeric rating are ordered as if they were rated `0`. The sort is stable,
/// records with equal ratings keep their relative order.
pub fn sort_by_rating_descending<'a, I>(records: I) -> Vec<&'a BookRecord>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let mut sorted: Vec<_> = records.into_iter().collect();
    sorted.sort_by(|a, b| b.rating().sort_key().total_cmp(&a.rating().sort_key()));
    sorted
}

/// Keep only the records with an ebook available when `enabled` is true.
///
/// When `enabled` is false every record is returned in the same order.
pub fn filter_ebook_available<'a, I>(records: I, enabled: bool) -> Vec<&'a BookRecord>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    records
        .into_iter()
        .filter(|record| !enabled || record.ebook_access() == EbookAccess::Available)
        .collect()
}
