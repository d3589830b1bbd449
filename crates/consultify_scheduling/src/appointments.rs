// --- File: crates/consultify_scheduling/src/appointments.rs ---
//! Appointment lifecycle: booking, status transitions, cancellation,
//! queries and the reminder sweep.

use crate::error::SchedulingError;
use crate::models::{Appointment, AppointmentStatus, ConsultationDetails};
use crate::notify;
use crate::store::{AppointmentRepository, SlotRepository};
use chrono::Duration;
use consultify_common::services::{BoxedError, Clock, EventKind, NotificationEvent, NotificationSink};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

/// Reason recorded when a cancellation arrives without one.
pub const DEFAULT_CANCEL_REASON: &str = "Cancelled by user";

/// Drives an appointment from booking to its terminal status and keeps the
/// bound slot's availability in step.
///
/// Booking is serialized per slot id through an async lock registry, so two
/// concurrent bookings of the same slot cannot both observe it available:
/// exactly one wins, the other gets `SlotUnavailable`. Bookings of distinct
/// slots never contend.
pub struct AppointmentLifecycle {
    appointments: Arc<dyn AppointmentRepository>,
    slots: Arc<dyn SlotRepository>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink<Error = BoxedError>>,
    reminder_lead: Duration,
    slot_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl AppointmentLifecycle {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        slots: Arc<dyn SlotRepository>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink<Error = BoxedError>>,
        reminder_lead: Duration,
    ) -> Self {
        Self {
            appointments,
            slots,
            clock,
            sink,
            reminder_lead,
            slot_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Claims a slot for a user.
    ///
    /// The appointment record is written first, then the slot is flipped to
    /// occupied. A failure between the two writes leaves an appointment with
    /// no occupied slot; the reconciler's repair pass is the designated
    /// recovery, not an inline retry.
    pub async fn book(
        &self,
        slot_id: Uuid,
        user_id: &str,
        details: ConsultationDetails,
    ) -> Result<Appointment, SchedulingError> {
        let lock = self.slot_lock(slot_id).await;
        let _guard = lock.lock().await;

        let mut slot = self
            .slots
            .find_by_id(slot_id)
            .await?
            .ok_or(SchedulingError::NotFound("time slot"))?;
        if !slot.available {
            return Err(SchedulingError::SlotUnavailable);
        }

        let now = self.clock.now();
        let appointment = Appointment::new(user_id, slot.start_time, details, now);
        let appointment = self.appointments.insert(appointment).await?;

        slot.available = false;
        slot.appointment_id = Some(appointment.id);
        slot.updated_at = now;
        self.slots.update(slot).await?;

        self.publish(EventKind::Booked, notify::render_booked(&appointment), None)
            .await;
        Ok(appointment)
    }

    /// Applies a status administratively.
    ///
    /// Any of the six statuses is accepted regardless of the current value;
    /// transitions are operator overrides, not a checked state machine. A
    /// `Confirmed` status fires the confirmation notification on every call
    /// that passes it, matching the administrative workflow this models.
    /// Slot availability is untouched; only cancellation releases a slot.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        notes: Option<&str>,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound("appointment"))?;

        appointment.status = status;
        if let Some(notes) = notes {
            if !notes.trim().is_empty() {
                appointment.notes = Some(notes.to_string());
            }
        }
        appointment.updated_at = self.clock.now();
        let appointment = self.appointments.update(appointment).await?;

        if status == AppointmentStatus::Confirmed {
            self.publish(
                EventKind::Confirmed,
                notify::render_confirmed(&appointment),
                Some(appointment.user_id.clone()),
            )
            .await;
        }
        Ok(appointment)
    }

    /// Cancels an appointment and releases its slot.
    ///
    /// The appointment record is the source of truth for the user-visible
    /// outcome: when no bound slot can be found (already deleted, or drift
    /// from a partial failure) the cancellation still succeeds and the
    /// missing binding is only logged.
    pub async fn cancel(
        &self,
        id: Uuid,
        reason: Option<&str>,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound("appointment"))?;

        let now = self.clock.now();
        let reason = reason
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(DEFAULT_CANCEL_REASON);
        appointment.status = AppointmentStatus::Cancelled;
        appointment.notes = Some(reason.to_string());
        appointment.updated_at = now;
        let appointment = self.appointments.update(appointment).await?;

        match self.slots.find_by_appointment(id).await? {
            Some(mut slot) => {
                slot.available = true;
                slot.appointment_id = None;
                slot.updated_at = now;
                self.slots.update(slot).await?;
            }
            None => {
                warn!(appointment_id = %id, "no slot bound to cancelled appointment; nothing to release");
            }
        }

        self.publish(
            EventKind::Cancelled,
            notify::render_cancelled(&appointment, reason),
            Some(appointment.user_id.clone()),
        )
        .await;
        Ok(appointment)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Appointment>, SchedulingError> {
        Ok(self.appointments.find_by_id(id).await?)
    }

    /// A user's appointments, most recent first.
    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self.appointments.find_by_user(user_id).await?)
    }

    /// Every appointment, most recent first.
    pub async fn all(&self) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self.appointments.find_all().await?)
    }

    /// Appointments scheduled after now, soonest first.
    pub async fn upcoming(&self) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self.appointments.find_after(self.clock.now()).await?)
    }

    /// Delivers reminders for `Scheduled` appointments starting within the
    /// configured lead window. Each appointment is flagged after delivery so
    /// an overlapping or repeated sweep does not re-send. Returns the number
    /// sent.
    pub async fn send_due_reminders(&self) -> Result<usize, SchedulingError> {
        let now = self.clock.now();
        let due = self
            .appointments
            .find_with_status_between(AppointmentStatus::Scheduled, now, now + self.reminder_lead)
            .await?;

        let mut sent = 0;
        for mut appointment in due {
            if appointment.reminder_sent {
                continue;
            }
            self.publish(
                EventKind::Reminder,
                notify::render_reminder(&appointment),
                Some(appointment.user_id.clone()),
            )
            .await;
            appointment.reminder_sent = true;
            appointment.updated_at = now;
            self.appointments.update(appointment).await?;
            sent += 1;
        }
        Ok(sent)
    }

    async fn slot_lock(&self, slot_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.slot_locks.lock().await;
        locks
            .entry(slot_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fire-and-forget delivery: a failed notification never turns a
    /// completed state change into a reported failure.
    async fn publish(&self, kind: EventKind, message: String, recipient: Option<String>) {
        let event = NotificationEvent {
            kind,
            message,
            recipient,
        };
        if let Err(err) = self.sink.publish(event).await {
            warn!(%kind, "notification delivery failed: {err}");
        }
    }
}
