// --- File: crates/consultify_scheduling/src/error.rs ---
use crate::store::StoreError;
use consultify_common::HttpStatusCode;
use thiserror::Error;

/// Scheduling-specific error kinds.
///
/// Every lifecycle operation returns one of these so callers can map the
/// failure to a precise user-facing response instead of a generic 500.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("end time must be after start time")]
    InvalidRange,

    #[error("cannot schedule a slot in the past")]
    PastSlot,

    #[error("an existing slot overlaps the requested period")]
    SlotConflict,

    #[error("slot is no longer available")]
    SlotUnavailable,

    #[error("slot already has a booked appointment")]
    SlotBooked,

    #[error("unknown appointment status: {0}")]
    InvalidStatus(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::NotFound(_) => 404,
            SchedulingError::InvalidRange => 400,
            SchedulingError::PastSlot => 400,
            SchedulingError::SlotConflict => 409,
            SchedulingError::SlotUnavailable => 409,
            SchedulingError::SlotBooked => 409,
            SchedulingError::InvalidStatus(_) => 400,
            SchedulingError::Store(_) => 500,
        }
    }
}
