use super::types::GuestRecord;

/// Orders records newest-first by `created_at`.
///
/// `records` must be in insertion order. Records sharing a timestamp keep
/// "most recently inserted first", so two creates within the same clock tick
/// still list in reverse creation order.
pub fn sort_newest_first(mut records: Vec<GuestRecord>) -> Vec<GuestRecord> {
    records.reverse();
    // Stable sort: ties keep the reversed insertion order.
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
}
