use chrono::{DateTime, TimeZone};

use crate::config::PaginationConfig;
use crate::shared::MAX_OFFSET;

/// `true` when `start` is not after `end`. Zero-length ranges are valid.
pub fn is_date_range_valid<Tz1: TimeZone, Tz2: TimeZone>(
    start: &DateTime<Tz1>,
    end: &DateTime<Tz2>,
) -> bool {
    start <= end
}

/// Clamp a requested page to `>= 1` and the page size to
/// `[1, max_page_size]`. A zero page size falls back to the configured
/// default. The page is capped so its offset stays within [`MAX_OFFSET`].
pub fn normalize_pagination(page: u64, page_size: u64, config: &PaginationConfig) -> (u64, u64) {
    let page_size = if page_size == 0 {
        config.default_page_size
    } else {
        page_size
    };
    let page_size = page_size.clamp(1, config.max_page_size.clamp(1, MAX_OFFSET));
    let last_page = MAX_OFFSET / page_size + 1;
    (page.clamp(1, last_page), page_size)
}
