//! Display ordering for content collections.
//!
//! Records carry a manual `order` field. It is neither unique nor
//! contiguous, so ties are broken by creation time and then by id. The
//! result never depends on storage order.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sort key: `order` ascending, then `created_at`, then `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayKey {
    order: i32,
    created_at: DateTime<Utc>,
    id: Uuid,
}

impl DisplayKey {
    pub fn new(order: i32, created_at: DateTime<Utc>, id: Uuid) -> Self {
        Self {
            order,
            created_at,
            id,
        }
    }
}

/// Sort records into display order in place
pub fn sort_for_display<T, F>(records: &mut [T], key: F)
where
    F: Fn(&T) -> DisplayKey,
{
    records.sort_by_key(|record| key(record));
}
