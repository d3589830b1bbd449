// --- File: crates/consultify_scheduling/src/notify.rs ---
//! Message rendering for lifecycle notifications.
//!
//! Rendering is the core's concern; delivery is the sink's. Keeping the
//! formats here means every sink implementation sends the same text.

use crate::models::Appointment;

const TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Operator-channel summary of a fresh booking.
pub fn render_booked(appointment: &Appointment) -> String {
    format!(
        "**User:** {}\n**Date/Time:** {}\n**Contact:** {}\n**Topic:** {}\n**Experience:** {}\n**Current situation:** {}\n**Expectations:** {}",
        appointment.user_id,
        appointment.scheduled_time.format(TIME_FORMAT),
        appointment.details.contact,
        appointment.details.topic,
        appointment.details.experience_level,
        appointment.details.current_situation,
        appointment.details.expectations,
    )
}

pub fn render_confirmed(appointment: &Appointment) -> String {
    format!(
        "Your consultation has been confirmed for: {}\nTopic: {}",
        appointment.scheduled_time.format(TIME_FORMAT),
        appointment.details.topic,
    )
}

pub fn render_cancelled(appointment: &Appointment, reason: &str) -> String {
    format!(
        "Your consultation scheduled for {} was cancelled. Reason: {}",
        appointment.scheduled_time.format(TIME_FORMAT),
        reason,
    )
}

pub fn render_reminder(appointment: &Appointment) -> String {
    format!(
        "Your consultation is scheduled for: {}\nTopic: {}\nBe ready and reachable at {}.",
        appointment.scheduled_time.format(TIME_FORMAT),
        appointment.details.topic,
        appointment.details.contact,
    )
}
