// --- File: crates/consultify_scheduling/src/store.rs ---
//! Persistence abstractions for slots and appointments.
//!
//! The lifecycle components only ever see these traits; what sits behind
//! them is the deployment's concern. The bundled in-memory implementation
//! ([`memory`]) backs tests and single-process deployments; a durable
//! backend implements the same two traits.

use crate::models::{Appointment, AppointmentStatus, TimeSlot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

/// Storage-layer error types.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An update targeted an entity that does not exist (e.g. deleted by a
    /// concurrent caller).
    #[error("{0} does not exist in the store")]
    Missing(&'static str),

    /// Backend failure. The in-memory store never raises this; real
    /// backends map their driver errors here.
    #[error("storage failure: {0}")]
    Internal(String),
}

/// Repository of reservable time slots.
///
/// All multi-row queries return results ascending by `start_time`.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn insert(&self, slot: TimeSlot) -> Result<TimeSlot, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeSlot>, StoreError>;

    /// Replaces the stored slot. Fails with [`StoreError::Missing`] when the
    /// id is unknown rather than upserting.
    async fn update(&self, slot: TimeSlot) -> Result<TimeSlot, StoreError>;

    /// Returns whether a slot was actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn find_all(&self) -> Result<Vec<TimeSlot>, StoreError>;

    /// Available slots starting strictly after the given instant.
    async fn find_available_after(&self, after: DateTime<Utc>)
        -> Result<Vec<TimeSlot>, StoreError>;

    /// Available slots starting within `[start, end]`.
    async fn find_available_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError>;

    /// All slots starting within `[start, end]`, regardless of availability.
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError>;

    /// Reverse binding lookup: the slot occupied by the given appointment.
    async fn find_by_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<TimeSlot>, StoreError>;

    /// Available slots whose end lies strictly before the cutoff. Feeds the
    /// expiry purge; bound slots are deliberately not matched.
    async fn find_available_ending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError>;

    /// Slots published by one administrator.
    async fn find_by_creator(&self, created_by: &str) -> Result<Vec<TimeSlot>, StoreError>;
}

/// Repository of appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    /// Replaces the stored appointment; [`StoreError::Missing`] when unknown.
    async fn update(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    /// A user's appointments, most recent `scheduled_time` first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Appointment>, StoreError>;

    /// All appointments, most recent `scheduled_time` first.
    async fn find_all(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments scheduled strictly after the given instant, ascending.
    async fn find_after(&self, after: DateTime<Utc>) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments in the given status scheduled within `[from, to]`,
    /// ascending. Feeds the reminder sweep.
    async fn find_with_status_between(
        &self,
        status: AppointmentStatus,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError>;
}
