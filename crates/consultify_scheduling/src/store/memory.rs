// --- File: crates/consultify_scheduling/src/store/memory.rs ---
//! In-memory repository implementations.

use crate::models::{Appointment, AppointmentStatus, TimeSlot};
use crate::store::{AppointmentRepository, SlotRepository, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Map-backed slot repository.
#[derive(Debug, Default)]
pub struct InMemorySlotRepository {
    slots: RwLock<HashMap<Uuid, TimeSlot>>,
}

impl InMemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_ascending(mut slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.sort_by_key(|slot| slot.start_time);
    slots
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn insert(&self, slot: TimeSlot) -> Result<TimeSlot, StoreError> {
        let mut slots = self.slots.write().await;
        slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(slots.get(&id).cloned())
    }

    async fn update(&self, slot: TimeSlot) -> Result<TimeSlot, StoreError> {
        let mut slots = self.slots.write().await;
        if !slots.contains_key(&slot.id) {
            return Err(StoreError::Missing("time slot"));
        }
        slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut slots = self.slots.write().await;
        Ok(slots.remove(&id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(slots.values().cloned().collect()))
    }

    async fn find_available_after(
        &self,
        after: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(
            slots
                .values()
                .filter(|slot| slot.available && slot.start_time > after)
                .cloned()
                .collect(),
        ))
    }

    async fn find_available_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(
            slots
                .values()
                .filter(|slot| {
                    slot.available && slot.start_time >= start && slot.start_time <= end
                })
                .cloned()
                .collect(),
        ))
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(
            slots
                .values()
                .filter(|slot| slot.start_time >= start && slot.start_time <= end)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(slots
            .values()
            .find(|slot| slot.appointment_id == Some(appointment_id))
            .cloned())
    }

    async fn find_available_ending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(
            slots
                .values()
                .filter(|slot| slot.available && slot.end_time < cutoff)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_creator(&self, created_by: &str) -> Result<Vec<TimeSlot>, StoreError> {
        let slots = self.slots.read().await;
        Ok(sorted_ascending(
            slots
                .values()
                .filter(|slot| slot.created_by == created_by)
                .cloned()
                .collect(),
        ))
    }
}

/// Map-backed appointment repository.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_descending(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| b.scheduled_time.cmp(&a.scheduled_time));
    appointments
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(appointments.get(&id).cloned())
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        if !appointments.contains_key(&appointment.id) {
            return Err(StoreError::Missing("appointment"));
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(sorted_descending(
            appointments
                .values()
                .filter(|appointment| appointment.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(sorted_descending(appointments.values().cloned().collect()))
    }

    async fn find_after(&self, after: DateTime<Utc>) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        let mut upcoming: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.scheduled_time > after)
            .cloned()
            .collect();
        upcoming.sort_by_key(|appointment| appointment.scheduled_time);
        Ok(upcoming)
    }

    async fn find_with_status_between(
        &self,
        status: AppointmentStatus,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        let mut matching: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| {
                appointment.status == status
                    && appointment.scheduled_time >= from
                    && appointment.scheduled_time <= to
            })
            .cloned()
            .collect();
        matching.sort_by_key(|appointment| appointment.scheduled_time);
        Ok(matching)
    }
}
