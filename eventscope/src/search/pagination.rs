use crate::models::EventRecord;

/// Convert a 1-based page number into a result offset.
///
/// Pages below 1 are treated as page 1, so the offset is never negative.
pub fn offset_for(page: i64, page_size: u32) -> u64 {
    let page = page.max(1);
    let offset = i128::from(page_size) * i128::from(page - 1);
    u64::try_from(offset.max(0)).unwrap_or(u64::MAX)
}

/// Parse a sold-count column. Anything that is not an integer counts as 0.
pub fn parse_sold_count(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Total seats sold across `events`, tolerating malformed counts.
pub fn sum_sold_counts(events: &[EventRecord]) -> i64 {
    events
        .iter()
        .map(|event| parse_sold_count(&event.seats_sold))
        .fold(0i64, i64::saturating_add)
}
