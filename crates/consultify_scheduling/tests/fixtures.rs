// Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use consultify_common::services::{
    BoxFuture, BoxedError, Clock, EventKind, ManualClock, NotificationEvent, NotificationSink,
};
use consultify_scheduling::appointments::AppointmentLifecycle;
use consultify_scheduling::models::{ConsultationDetails, SlotRequest};
use consultify_scheduling::reconcile::Reconciler;
use consultify_scheduling::slots::SlotLifecycle;
use consultify_scheduling::store::memory::{
    InMemoryAppointmentRepository, InMemorySlotRepository,
};
use consultify_scheduling::store::{AppointmentRepository, SlotRepository};
use std::sync::{Arc, Mutex};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

pub fn details() -> ConsultationDetails {
    ConsultationDetails {
        contact: "user#0001".to_string(),
        topic: "scaling a booking system".to_string(),
        experience_level: "advanced".to_string(),
        current_situation: "manual scheduling over email".to_string(),
        expectations: "a working self-service flow".to_string(),
    }
}

/// Sink that records every published event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingSink {
    pub fn kinds(&self) -> Vec<EventKind> {
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

/// The scheduling core wired over in-memory stores, a manual clock and a
/// recording sink, the way the backend service assembles it.
pub struct TestCore {
    pub slot_store: Arc<InMemorySlotRepository>,
    pub appointment_store: Arc<InMemoryAppointmentRepository>,
    pub clock: Arc<ManualClock>,
    pub sink: Arc<RecordingSink>,
    pub slots: Arc<SlotLifecycle>,
    pub appointments: Arc<AppointmentLifecycle>,
    pub reconciler: Arc<Reconciler>,
}

impl TestCore {
    pub fn new() -> Self {
        let slot_store = Arc::new(InMemorySlotRepository::new());
        let appointment_store = Arc::new(InMemoryAppointmentRepository::new());
        let clock = Arc::new(ManualClock::new(base_time()));
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

    pub fn slot_request(&self, offset_hours: i64, duration_hours: i64) -> SlotRequest {
        let start = self.clock.now() + Duration::hours(offset_hours);
        SlotRequest {
            start_time: start,
            end_time: start + Duration::hours(duration_hours),
            description: None,
        }
    }
}
