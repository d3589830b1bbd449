// --- File: crates/consultify_scheduling/src/doc.rs ---

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    Appointment, AppointmentStatus, BookingRequest, CancelRequest, CancellationResponse,
    ConsultationDetails, PurgeResponse, RecurringSlotRequest, ReminderRunResponse, SlotRequest,
    StatusUpdateRequest, TimeSlot,
};
use crate::reconcile::RepairReport;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_available_slots_handler,
        handlers::list_all_slots_handler,
        handlers::create_slot_handler,
        handlers::create_recurring_slots_handler,
        handlers::update_slot_handler,
        handlers::delete_slot_handler,
        handlers::fix_inconsistencies_handler,
        handlers::purge_expired_handler,
        handlers::book_appointment_handler,
        handlers::my_appointments_handler,
        handlers::all_appointments_handler,
        handlers::upcoming_appointments_handler,
        handlers::update_status_handler,
        handlers::cancel_appointment_handler,
        handlers::send_reminders_handler
    ),
    components(
        schemas(
            TimeSlot,
            Appointment,
            AppointmentStatus,
            ConsultationDetails,
            SlotRequest,
            RecurringSlotRequest,
            BookingRequest,
            StatusUpdateRequest,
            CancelRequest,
            CancellationResponse,
            RepairReport,
            PurgeResponse,
            ReminderRunResponse
        )
    ),
    tags(
        (name = "Slots", description = "Administrative slot management"),
        (name = "Appointments", description = "Booking and appointment lifecycle"),
        (name = "Maintenance", description = "Repair, purge and reminder triggers")
    ),
    servers(
        (url = "/api", description = "Consultify API server")
    )
)]
pub struct SchedulingApiDoc;
