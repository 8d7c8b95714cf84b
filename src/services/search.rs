use crate::models::VideoRecord;

/// True when the query is a case-sensitive substring of the title or speaker.
pub fn matches(record: &VideoRecord, query: &str) -> bool {
    record.title.contains(query) || record.speaker.contains(query)
}

/// Returns the records visible for `query`, in catalog order.
///
/// An empty query keeps every record. Matching is plain substring
/// containment without case folding, so "async" does not match "Async".
pub fn filter<'a>(items: &'a [VideoRecord], query: &str) -> Vec<&'a VideoRecord> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|record| matches(record, query)).collect()
}
