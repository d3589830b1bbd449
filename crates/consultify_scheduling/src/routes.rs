// --- File: crates/consultify_scheduling/src/routes.rs ---

use crate::handlers::{
    all_appointments_handler, book_appointment_handler, cancel_appointment_handler,
    create_recurring_slots_handler, create_slot_handler, delete_slot_handler,
    fix_inconsistencies_handler, list_all_slots_handler, list_available_slots_handler,
    my_appointments_handler, purge_expired_handler, send_reminders_handler,
    update_slot_handler, update_status_handler, upcoming_appointments_handler, SchedulingState,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all scheduling routes.
/// The caller assembles `SchedulingState` (see the backend service) and
/// decides where to nest this router.
pub fn routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/timeslots/available", get(list_available_slots_handler))
        .route(
            "/timeslots",
            get(list_all_slots_handler).post(create_slot_handler),
        )
        .route("/timeslots/recurring", post(create_recurring_slots_handler))
        .route(
            "/timeslots/fix-inconsistencies",
            post(fix_inconsistencies_handler),
        )
        .route("/timeslots/purge-expired", post(purge_expired_handler))
        .route(
            "/timeslots/{id}",
            put(update_slot_handler).delete(delete_slot_handler),
        )
        .route(
            "/appointments",
            get(all_appointments_handler).post(book_appointment_handler),
        )
        .route("/appointments/my", get(my_appointments_handler))
        .route("/appointments/upcoming", get(upcoming_appointments_handler))
        .route("/appointments/send-reminders", post(send_reminders_handler))
        .route("/appointments/{id}/status", put(update_status_handler))
        .route("/appointments/{id}", delete(cancel_appointment_handler))
        .with_state(state)
}
