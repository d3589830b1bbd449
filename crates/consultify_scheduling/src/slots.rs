// --- File: crates/consultify_scheduling/src/slots.rs ---
//! Administrative lifecycle of reservable time slots.

use crate::conflict::ConflictDetector;
use crate::error::SchedulingError;
use crate::models::{SlotRequest, TimeSlot};
use crate::store::SlotRepository;
use chrono::{DateTime, Duration, Utc};
use consultify_common::services::Clock;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Creates, edits, deletes and lists slots.
///
/// Conflict check and insert are not atomic against concurrent inserts;
/// administrative traffic is rare and trusted, and the reconciler plus
/// re-run conflict queries absorb the residual race. Booking traffic is
/// serialized elsewhere (see `AppointmentLifecycle`).
pub struct SlotLifecycle {
    slots: Arc<dyn SlotRepository>,
    conflicts: ConflictDetector,
    clock: Arc<dyn Clock>,
    recurrence_interval: Duration,
}

impl SlotLifecycle {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        clock: Arc<dyn Clock>,
        recurrence_interval: Duration,
    ) -> Self {
        let conflicts = ConflictDetector::new(slots.clone());
        Self {
            slots,
            conflicts,
            clock,
            recurrence_interval,
        }
    }

    /// Publishes a new slot.
    pub async fn create(
        &self,
        request: &SlotRequest,
        created_by: &str,
    ) -> Result<TimeSlot, SchedulingError> {
        let now = self.clock.now();
        self.validate_period(request.start_time, request.end_time, now, None)
            .await?;

        let slot = TimeSlot::new(
            request.start_time,
            request.end_time,
            created_by,
            request.description.clone(),
            now,
        );
        debug!(slot_id = %slot.id, start = %slot.start_time, "creating time slot");
        Ok(self.slots.insert(slot).await?)
    }

    /// Publishes up to `occurrences` copies of the slot, each offset one
    /// recurrence interval further out. Occurrences already in the past or
    /// colliding with an existing slot are skipped, not errors; the batch is
    /// best-effort and returns only what was created, in occurrence order.
    pub async fn create_recurring(
        &self,
        request: &SlotRequest,
        created_by: &str,
        occurrences: u32,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        if request.start_time >= request.end_time {
            return Err(SchedulingError::InvalidRange);
        }

        let mut created = Vec::new();
        for occurrence in 0..occurrences {
            let offset = self.recurrence_interval * occurrence as i32;
            let start = request.start_time + offset;
            let end = request.end_time + offset;
            let now = self.clock.now();

            if start < now {
                debug!(%start, "skipping recurring occurrence in the past");
                continue;
            }
            let conflicting = self.conflicts.find_overlapping(start, end, None).await?;
            if !conflicting.is_empty() {
                debug!(%start, "skipping conflicting recurring occurrence");
                continue;
            }

            let description = request
                .description
                .as_ref()
                .map(|text| format!("{text} (recurring)"));
            let slot = TimeSlot::new(start, end, created_by, description, now);
            created.push(self.slots.insert(slot).await?);
        }
        Ok(created)
    }

    /// Re-times or re-describes a slot. Editing a booked slot is forbidden;
    /// the appointment must be cancelled first.
    pub async fn update(
        &self,
        id: Uuid,
        request: &SlotRequest,
    ) -> Result<TimeSlot, SchedulingError> {
        let mut slot = self
            .slots
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound("time slot"))?;
        if slot.appointment_id.is_some() {
            return Err(SchedulingError::SlotBooked);
        }

        let now = self.clock.now();
        self.validate_period(request.start_time, request.end_time, now, Some(id))
            .await?;

        slot.start_time = request.start_time;
        slot.end_time = request.end_time;
        slot.description = request.description.clone();
        slot.updated_at = now;
        Ok(self.slots.update(slot).await?)
    }

    /// Removes a slot that carries no booking.
    pub async fn delete(&self, id: Uuid) -> Result<(), SchedulingError> {
        let slot = self
            .slots
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound("time slot"))?;
        if slot.appointment_id.is_some() {
            return Err(SchedulingError::SlotBooked);
        }
        self.slots.delete(id).await?;
        Ok(())
    }

    /// Upcoming available slots, ascending.
    pub async fn list_available(&self) -> Result<Vec<TimeSlot>, SchedulingError> {
        Ok(self.slots.find_available_after(self.clock.now()).await?)
    }

    /// Available slots starting within `[start, end]`, ascending.
    pub async fn list_available_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        Ok(self.slots.find_available_between(start, end).await?)
    }

    /// Every slot, ascending.
    pub async fn list_all(&self) -> Result<Vec<TimeSlot>, SchedulingError> {
        Ok(self.slots.find_all().await?)
    }

    /// Every slot starting within `[start, end]`, ascending.
    pub async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        Ok(self.slots.find_in_range(start, end).await?)
    }

    /// Slots published by one administrator, ascending.
    pub async fn list_by_creator(&self, created_by: &str) -> Result<Vec<TimeSlot>, SchedulingError> {
        Ok(self.slots.find_by_creator(created_by).await?)
    }

    async fn validate_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<(), SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidRange);
        }
        if start < now {
            return Err(SchedulingError::PastSlot);
        }
        let conflicting = self.conflicts.find_overlapping(start, end, exclude).await?;
        if !conflicting.is_empty() {
            return Err(SchedulingError::SlotConflict);
        }
        Ok(())
    }
}
