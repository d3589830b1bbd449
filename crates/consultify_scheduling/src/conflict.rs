// --- File: crates/consultify_scheduling/src/conflict.rs ---
//! Overlap detection between candidate and existing slots.

use crate::models::TimeSlot;
use crate::store::{SlotRepository, StoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)`. A slot ending exactly when another begins does not
/// overlap it.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Read-only scan for slots that would collide with a candidate period.
#[derive(Clone)]
pub struct ConflictDetector {
    slots: Arc<dyn SlotRepository>,
}

impl ConflictDetector {
    pub fn new(slots: Arc<dyn SlotRepository>) -> Self {
        Self { slots }
    }

    /// All stored slots whose period intersects `[start, end)`.
    /// `exclude` omits one slot from the result, for validating an edit of
    /// that slot against everything else.
    pub async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let all = self.slots.find_all().await?;
        Ok(all
            .into_iter()
            .filter(|slot| exclude != Some(slot.id))
            .filter(|slot| overlaps(start, end, slot.start_time, slot.end_time))
            .collect())
    }
}
