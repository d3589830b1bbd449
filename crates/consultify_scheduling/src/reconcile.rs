// --- File: crates/consultify_scheduling/src/reconcile.rs ---
//! Availability drift repair and expired-slot purge.

use crate::error::SchedulingError;
use crate::store::SlotRepository;
use consultify_common::services::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// What a repair pass changed.
#[derive(Debug, Default, Clone, Copy, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RepairReport {
    /// Slots re-opened because they carried no binding.
    pub released: usize,
    /// Slots re-occupied because they carried a binding.
    pub reclaimed: usize,
}

/// Sweeps the slot store back toward the binding invariant.
///
/// Both passes only move slots toward a consistent state, so they are safe
/// to run repeatedly, concurrently with each other, and concurrently with
/// live booking traffic.
pub struct Reconciler {
    slots: Arc<dyn SlotRepository>,
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    pub fn new(slots: Arc<dyn SlotRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { slots, clock }
    }

    /// Restores `available == appointment_id.is_none()` on every slot where
    /// the two fields disagree, persisting only the slots actually changed.
    pub async fn repair(&self) -> Result<RepairReport, SchedulingError> {
        let now = self.clock.now();
        let mut report = RepairReport::default();

        for mut slot in self.slots.find_all().await? {
            if slot.appointment_id.is_none() && !slot.available {
                slot.available = true;
                slot.updated_at = now;
                self.slots.update(slot).await?;
                report.released += 1;
            } else if slot.appointment_id.is_some() && slot.available {
                slot.available = false;
                slot.updated_at = now;
                self.slots.update(slot).await?;
                report.reclaimed += 1;
            }
        }

        if report.released > 0 || report.reclaimed > 0 {
            info!(
                released = report.released,
                reclaimed = report.reclaimed,
                "repaired inconsistent slot availability"
            );
        }
        Ok(report)
    }

    /// Deletes slots that expired without ever being claimed. A bound slot
    /// is never purged, however old; the appointment record keeps history
    /// queryable on its own.
    pub async fn purge_expired(&self) -> Result<usize, SchedulingError> {
        let now = self.clock.now();
        let expired = self.slots.find_available_ending_before(now).await?;

        let mut removed = 0;
        for slot in expired {
            if self.slots.delete(slot.id).await? {
                removed += 1;
            }
        }
        if removed > 0 {
            info!(removed, "purged expired unclaimed slots");
        }
        Ok(removed)
    }
}
