use crate::record::{DisplayRecord, RawRecord};

/// Adapt a category's scraped records and order them by rank.
///
/// Fallback ranks come from each record's index in `raw` *before* sorting;
/// only then is the whole list stable-sorted by `rank.position`, so records
/// sharing a position keep their input order.
pub fn normalize(raw: &[RawRecord]) -> Vec<DisplayRecord> {
    let mut records: Vec<DisplayRecord> = raw
        .iter()
        .enumerate()
        .map(|(index, record)| DisplayRecord::from_raw(record, index))
        .collect();
    records.sort_by_key(|r| r.rank.position);
    records
}
