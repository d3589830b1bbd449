// --- File: crates/consultify_scheduling/src/test_support.rs ---
//! Shared fixtures for the in-crate test suites.

use crate::appointments::AppointmentLifecycle;
use crate::models::{ConsultationDetails, SlotRequest};
use crate::reconcile::Reconciler;
use crate::slots::SlotLifecycle;
use crate::store::memory::{InMemoryAppointmentRepository, InMemorySlotRepository};
use crate::store::{AppointmentRepository, SlotRepository};
use chrono::{DateTime, Duration, TimeZone, Utc};
use consultify_common::services::{
    AuthSubject, BoxFuture, BoxedError, Clock, IdentityProvider, ManualClock, NotificationEvent,
    NotificationSink,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed "now" all suites start from: 2025-01-01 09:00 UTC, a Wednesday.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

pub fn details() -> ConsultationDetails {
    ConsultationDetails {
        contact: "user#0001".to_string(),
        topic: "architecture review".to_string(),
        experience_level: "intermediate".to_string(),
        current_situation: "single service, growing team".to_string(),
        expectations: "a concrete migration plan".to_string(),
    }
}

/// Sink that records every published event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingSink {
    pub fn kinds(&self) -> Vec<consultify_common::services::EventKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }
}

impl NotificationSink for RecordingSink {
    type Error = BoxedError;

    fn publish(&self, event: NotificationEvent) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            self.events.lock().unwrap().push(event);
            Ok(())
        })
    }
}

/// Sink that always fails, for verifying delivery errors never surface.
#[derive(Debug, Default)]
pub struct FailingSink;

impl NotificationSink for FailingSink {
    type Error = BoxedError;

    fn publish(&self, _event: NotificationEvent) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            Err(BoxedError(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "sink down",
            ))))
        })
    }
}

/// Identity provider backed by a fixed token table.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, AuthSubject>,
}

impl StaticIdentity {
    pub fn with(mut self, token: &str, subject: &str, admin: bool) -> Self {
        self.tokens.insert(
            token.to_string(),
            AuthSubject {
                subject: subject.to_string(),
                admin,
            },
        );
        self
    }
}

impl IdentityProvider for StaticIdentity {
    fn validate(&self, credential: &str) -> BoxFuture<'_, Option<AuthSubject>, BoxedError> {
        let found = self.tokens.get(credential).cloned();
        Box::pin(async move { Ok(found) })
    }
}

/// One fully wired core over in-memory stores, a manual clock and a
/// recording sink.
pub struct Harness {
    pub slot_store: Arc<InMemorySlotRepository>,
    pub appointment_store: Arc<InMemoryAppointmentRepository>,
    pub clock: Arc<ManualClock>,
    pub sink: Arc<RecordingSink>,
    pub slots: Arc<SlotLifecycle>,
    pub appointments: Arc<AppointmentLifecycle>,
    pub reconciler: Arc<Reconciler>,
}

impl Harness {
    pub fn new() -> Self {
        Self::at(base_time())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        let slot_store = Arc::new(InMemorySlotRepository::new());
        let appointment_store = Arc::new(InMemoryAppointmentRepository::new());
        let clock = Arc::new(ManualClock::new(now));
        let sink = Arc::new(RecordingSink::default());

        let slots_dyn: Arc<dyn SlotRepository> = slot_store.clone();
        let appointments_dyn: Arc<dyn AppointmentRepository> = appointment_store.clone();
        let clock_dyn: Arc<dyn Clock> = clock.clone();
        let sink_dyn: Arc<dyn NotificationSink<Error = BoxedError>> = sink.clone();

        Self {
            slots: Arc::new(SlotLifecycle::new(
                slots_dyn.clone(),
                clock_dyn.clone(),
                Duration::days(7),
            )),
            appointments: Arc::new(AppointmentLifecycle::new(
                appointments_dyn,
                slots_dyn.clone(),
                clock_dyn.clone(),
                sink_dyn,
                Duration::minutes(120),
            )),
            reconciler: Arc::new(Reconciler::new(slots_dyn, clock_dyn)),
            slot_store,
            appointment_store,
            clock,
            sink,
        }
    }

    /// A slot request offset from the harness clock's current instant.
    pub fn slot_request(&self, offset_hours: i64, duration_hours: i64) -> SlotRequest {
        let start = self.clock.now() + Duration::hours(offset_hours);
        SlotRequest {
            start_time: start,
            end_time: start + Duration::hours(duration_hours),
            description: None,
        }
    }
}
