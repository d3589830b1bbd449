// --- File: crates/consultify_scheduling/src/handlers.rs ---

use crate::appointments::AppointmentLifecycle;
use crate::error::SchedulingError;
use crate::models::{
    AllSlotsQuery, Appointment, AppointmentStatus, AvailableSlotsQuery, BookingRequest,
    CancelRequest, CancellationResponse, PurgeResponse, RecurringSlotRequest,
    ReminderRunResponse, SlotRequest, StatusUpdateRequest, TimeSlot,
};
use crate::reconcile::{Reconciler, RepairReport};
use crate::slots::SlotLifecycle;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use consultify_common::services::{AuthSubject, IdentityProvider};
use consultify_common::HttpStatusCode;
use consultify_config::AppConfig;
use std::str::FromStr;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

// Shared state for all scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub slots: Arc<SlotLifecycle>,
    pub appointments: Arc<AppointmentLifecycle>,
    pub reconciler: Arc<Reconciler>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Resolves the caller from the `Authorization: Bearer` header.
async fn authenticate(
    state: &SchedulingState,
    headers: &HeaderMap,
) -> Result<AuthSubject, (StatusCode, String)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing bearer token".to_string(),
        ))?;

    match state.identity.validate(token).await {
        Ok(Some(subject)) => Ok(subject),
        Ok(None) => Err((StatusCode::UNAUTHORIZED, "Invalid token".to_string())),
        Err(err) => {
            error!("identity provider failure: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Identity validation failed".to_string(),
            ))
        }
    }
}

fn require_admin(subject: &AuthSubject) -> Result<(), (StatusCode, String)> {
    if subject.admin {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            "Administrator access required".to_string(),
        ))
    }
}

/// Maps a scheduling error to its response. Store internals are reported
/// opaquely; everything else carries the specific message.
fn error_response(err: SchedulingError) -> (StatusCode, String) {
    if let SchedulingError::Store(inner) = &err {
        error!("store failure: {inner}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal storage error".to_string(),
        );
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

// --- Slot handlers ---

/// Handler to list upcoming available slots, optionally for a single day.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/timeslots/available",
    params(AvailableSlotsQuery),
    responses(
        (status = 200, description = "Available slots, ascending by start", body = [TimeSlot]),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Slots"
))]
pub async fn list_available_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, (StatusCode, String)> {
    authenticate(&state, &headers).await?;

    let slots = match query.date {
        Some(date) => {
            let start_of_day = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
            let end_of_day = date.and_hms_opt(23, 59, 59).unwrap().and_utc();
            state
                .slots
                .list_available_between(start_of_day, end_of_day)
                .await
        }
        None => state.slots.list_available().await,
    }
    .map_err(error_response)?;

    Ok(Json(slots))
}

/// Handler to list every slot, with optional range and creator filters.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/timeslots",
    params(AllSlotsQuery),
    responses(
        (status = 200, description = "All slots, ascending by start", body = [TimeSlot]),
        (status = 403, description = "Not an administrator")
    ),
    tag = "Slots"
))]
pub async fn list_all_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Query(query): Query<AllSlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let slots = if let Some(creator) = query.created_by.as_deref() {
        state.slots.list_by_creator(creator).await
    } else if let (Some(from), Some(to)) = (query.from, query.to) {
        state.slots.list_in_range(from, to).await
    } else {
        state.slots.list_all().await
    }
    .map_err(error_response)?;

    Ok(Json(slots))
}

/// Handler to publish a new slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/timeslots",
    request_body = SlotRequest,
    responses(
        (status = 200, description = "Created slot", body = TimeSlot),
        (status = 400, description = "Invalid or past period"),
        (status = 409, description = "Overlaps an existing slot")
    ),
    tag = "Slots"
))]
pub async fn create_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Json(request): Json<SlotRequest>,
) -> Result<Json<TimeSlot>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let slot = state
        .slots
        .create(&request, &subject.subject)
        .await
        .map_err(error_response)?;
    Ok(Json(slot))
}

/// Handler to publish a weekly series of slots, skipping occurrences that
/// are past or conflicting.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/timeslots/recurring",
    request_body = RecurringSlotRequest,
    responses(
        (status = 200, description = "Slots actually created, in occurrence order", body = [TimeSlot]),
        (status = 400, description = "Invalid period")
    ),
    tag = "Slots"
))]
pub async fn create_recurring_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Json(request): Json<RecurringSlotRequest>,
) -> Result<Json<Vec<TimeSlot>>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let created = state
        .slots
        .create_recurring(&request.slot(), &subject.subject, request.occurrences)
        .await
        .map_err(error_response)?;
    Ok(Json(created))
}

/// Handler to edit an unbooked slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/timeslots/{id}",
    params(("id" = Uuid, Path, description = "Slot id")),
    request_body = SlotRequest,
    responses(
        (status = 200, description = "Updated slot", body = TimeSlot),
        (status = 404, description = "Unknown slot"),
        (status = 409, description = "Slot is booked or the new period conflicts")
    ),
    tag = "Slots"
))]
pub async fn update_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<SlotRequest>,
) -> Result<Json<TimeSlot>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let slot = state
        .slots
        .update(id, &request)
        .await
        .map_err(error_response)?;
    Ok(Json(slot))
}

/// Handler to remove an unbooked slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/timeslots/{id}",
    params(("id" = Uuid, Path, description = "Slot id")),
    responses(
        (status = 204, description = "Slot removed"),
        (status = 404, description = "Unknown slot"),
        (status = 409, description = "Slot is booked")
    ),
    tag = "Slots"
))]
pub async fn delete_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    state.slots.delete(id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler to repair slots whose availability disagrees with their binding.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/timeslots/fix-inconsistencies",
    responses(
        (status = 200, description = "Counts of repaired slots", body = RepairReport)
    ),
    tag = "Maintenance"
))]
pub async fn fix_inconsistencies_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<RepairReport>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let report = state.reconciler.repair().await.map_err(error_response)?;
    Ok(Json(report))
}

/// Handler to delete expired slots that were never claimed.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/timeslots/purge-expired",
    responses(
        (status = 200, description = "Number of slots removed", body = PurgeResponse)
    ),
    tag = "Maintenance"
))]
pub async fn purge_expired_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<PurgeResponse>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let removed = state
        .reconciler
        .purge_expired()
        .await
        .map_err(error_response)?;
    Ok(Json(PurgeResponse { removed }))
}

// --- Appointment handlers ---

/// Handler to book an available slot for the caller.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appointments",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Created appointment", body = Appointment),
        (status = 404, description = "Unknown slot"),
        (status = 409, description = "Slot already booked")
    ),
    tag = "Appointments"
))]
pub async fn book_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Appointment>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;

    let appointment = state
        .appointments
        .book(request.slot_id, &subject.subject, request.details)
        .await
        .map_err(error_response)?;
    Ok(Json(appointment))
}

/// Handler to list the caller's own appointments.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appointments/my",
    responses(
        (status = 200, description = "Caller's appointments, most recent first", body = [Appointment])
    ),
    tag = "Appointments"
))]
pub async fn my_appointments_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;

    let appointments = state
        .appointments
        .by_user(&subject.subject)
        .await
        .map_err(error_response)?;
    Ok(Json(appointments))
}

/// Handler to list every appointment.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "All appointments, most recent first", body = [Appointment]),
        (status = 403, description = "Not an administrator")
    ),
    tag = "Appointments"
))]
pub async fn all_appointments_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let appointments = state.appointments.all().await.map_err(error_response)?;
    Ok(Json(appointments))
}

/// Handler to list appointments scheduled after now.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appointments/upcoming",
    responses(
        (status = 200, description = "Upcoming appointments, soonest first", body = [Appointment]),
        (status = 403, description = "Not an administrator")
    ),
    tag = "Appointments"
))]
pub async fn upcoming_appointments_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let appointments = state
        .appointments
        .upcoming()
        .await
        .map_err(error_response)?;
    Ok(Json(appointments))
}

/// Handler to set an appointment's status administratively.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Unknown appointment")
    ),
    tag = "Appointments"
))]
pub async fn update_status_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Appointment>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let status = AppointmentStatus::from_str(&request.status)
        .map_err(|_| error_response(SchedulingError::InvalidStatus(request.status.clone())))?;

    let appointment = state
        .appointments
        .set_status(id, status, request.notes.as_deref())
        .await
        .map_err(error_response)?;
    Ok(Json(appointment))
}

/// Handler to cancel an appointment. Allowed for its owner or for an
/// administrator; the bound slot is released.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Cancellation outcome", body = CancellationResponse),
        (status = 403, description = "Caller is neither owner nor administrator"),
        (status = 404, description = "Unknown appointment")
    ),
    tag = "Appointments"
))]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    request: Option<Json<CancelRequest>>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;

    let appointment = state
        .appointments
        .get(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(SchedulingError::NotFound("appointment")))?;
    if !subject.admin && appointment.user_id != subject.subject {
        return Err((
            StatusCode::FORBIDDEN,
            "Only the owner or an administrator may cancel".to_string(),
        ));
    }

    let reason = request.as_ref().and_then(|body| body.reason.as_deref());
    state
        .appointments
        .cancel(id, reason)
        .await
        .map_err(error_response)?;

    Ok(Json(CancellationResponse {
        success: true,
        message: "Appointment cancelled".to_string(),
    }))
}

/// Handler to deliver reminders for appointments starting soon. Intended
/// for an external cron-like trigger.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appointments/send-reminders",
    responses(
        (status = 200, description = "Number of reminders delivered", body = ReminderRunResponse)
    ),
    tag = "Maintenance"
))]
pub async fn send_reminders_handler(
    State(state): State<Arc<SchedulingState>>,
    headers: HeaderMap,
) -> Result<Json<ReminderRunResponse>, (StatusCode, String)> {
    let subject = authenticate(&state, &headers).await?;
    require_admin(&subject)?;

    let sent = state
        .appointments
        .send_due_reminders()
        .await
        .map_err(error_response)?;
    Ok(Json(ReminderRunResponse { sent }))
}
