//! Filter evaluation over stored records

use crate::record::StringRecord;
use crate::store::{RecordStore, StoreResult};

use super::filter::FilterModel;

/// Keeps the records matching `filter`, preserving input order.
pub fn evaluate<I>(filter: &FilterModel, records: I) -> Vec<StringRecord>
where
    I: IntoIterator<Item = StringRecord>,
{
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Evaluates `filter` against a snapshot of the store.
///
/// The snapshot is taken under the store's read lock, so a concurrent insert
/// is either fully visible or not visible at all.
pub fn evaluate_store(store: &dyn RecordStore, filter: &FilterModel) -> StoreResult<Vec<StringRecord>> {
    let records = store.get_all()?;
    let matched = evaluate(filter, records);

    tracing::debug!(
        event = crate::observability::Event::QueryExecuted.as_str(),
        matched = matched.len(),
        "filter evaluated"
    );

    Ok(matched)
}
