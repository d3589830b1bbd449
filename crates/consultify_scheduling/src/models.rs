// --- File: crates/consultify_scheduling/src/models.rs ---

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A reservable time interval published by an administrator.
///
/// `available` and `appointment_id` move together: a consistent slot either
/// carries no binding and is available, or carries exactly one appointment
/// and is not. The reconciler restores this when a partial failure leaves
/// the two fields disagreeing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub available: bool,
    /// The appointment currently occupying this slot, if any.
    pub appointment_id: Option<Uuid>,
    /// Subject id of the administrator who published the slot.
    pub created_by: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        created_by: impl Into<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            available: true,
            appointment_id: None,
            created_by: created_by.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Appointment status values.
///
/// Any of these may be set administratively regardless of the current value;
/// only unknown strings are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "in_progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            _ => Err(()),
        }
    }
}

/// What the requester wants out of the consultation. Opaque to the
/// lifecycle logic; carried through for rendering and history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConsultationDetails {
    /// How to reach the requester during the session.
    pub contact: String,
    pub topic: String,
    pub experience_level: String,
    pub current_situation: String,
    pub expectations: String,
}

/// A user's claim on a time slot.
///
/// Never physically deleted; cancellation is a status transition so history
/// stays queryable. `scheduled_time` is copied from the slot at booking time
/// and survives later slot mutation or deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub details: ConsultationDetails,
    /// Set once a reminder has been delivered for this appointment.
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        user_id: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        details: ConsultationDetails,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            scheduled_time,
            status: AppointmentStatus::Scheduled,
            notes: None,
            details,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        }
    }
}

// --- Request / response types ---

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotRequest {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T10:00:00Z"))]
    pub start_time: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T11:00:00Z"))]
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RecurringSlotRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    /// Number of weekly occurrences to attempt, the first one included.
    #[cfg_attr(feature = "openapi", schema(example = 4))]
    pub occurrences: u32,
}

impl RecurringSlotRequest {
    pub fn slot(&self) -> SlotRequest {
        SlotRequest {
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingRequest {
    pub slot_id: Uuid,
    pub details: ConsultationDetails,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StatusUpdateRequest {
    /// One of the six appointment statuses, snake_case.
    #[cfg_attr(feature = "openapi", schema(example = "confirmed"))]
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailableSlotsQuery {
    /// Restrict to one calendar day (YYYY-MM-DD); all upcoming when absent.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AllSlotsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Restrict to slots published by one administrator.
    pub created_by: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PurgeResponse {
    /// Expired, never-claimed slots that were removed.
    pub removed: usize,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReminderRunResponse {
    /// Reminders delivered by this sweep.
    pub sent: usize,
}
