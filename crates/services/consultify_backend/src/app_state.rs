// --- File: crates/services/consultify_backend/src/app_state.rs ---

use crate::service_factory::ConsultifyServiceFactory;
use chrono::Duration;
use consultify_common::services::{Clock, ServiceFactory, SystemClock};
use consultify_config::AppConfig;
use consultify_scheduling::appointments::AppointmentLifecycle;
use consultify_scheduling::handlers::SchedulingState;
use consultify_scheduling::reconcile::Reconciler;
use consultify_scheduling::slots::SlotLifecycle;
use consultify_scheduling::store::memory::{
    InMemoryAppointmentRepository, InMemorySlotRepository,
};
use consultify_scheduling::store::{AppointmentRepository, SlotRepository};
use std::sync::Arc;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Central access point for external collaborators. Kept on the state
    /// so future routes can request services without re-wiring.
    #[allow(dead_code)]
    pub service_factory: Arc<ConsultifyServiceFactory>,
    pub scheduling: Arc<SchedulingState>,
}

impl AppState {
    /// Wires the scheduling core over the in-memory stores and the
    /// factory-selected collaborators.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(ConsultifyServiceFactory::new(config.clone()));

        let slot_store: Arc<dyn SlotRepository> = Arc::new(InMemorySlotRepository::new());
        let appointment_store: Arc<dyn AppointmentRepository> =
            Arc::new(InMemoryAppointmentRepository::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let scheduling_config = &config.scheduling;
        let slots = Arc::new(SlotLifecycle::new(
            slot_store.clone(),
            clock.clone(),
            Duration::days(scheduling_config.recurrence_interval_days),
        ));
        let appointments = Arc::new(AppointmentLifecycle::new(
            appointment_store,
            slot_store.clone(),
            clock.clone(),
            service_factory.notification_sink(),
            Duration::minutes(scheduling_config.reminder_lead_minutes),
        ));
        let reconciler = Arc::new(Reconciler::new(slot_store, clock));

        let scheduling = Arc::new(SchedulingState {
            config: config.clone(),
            slots,
            appointments,
            reconciler,
            identity: service_factory.identity_provider(),
        });

        Self {
            config,
            service_factory,
            scheduling,
        }
    }
}
