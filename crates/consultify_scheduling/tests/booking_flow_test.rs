mod fixtures;

use chrono::Duration;
use consultify_common::services::EventKind;
use consultify_scheduling::error::SchedulingError;
use consultify_scheduling::models::{Appointment, AppointmentStatus, TimeSlot};
use fixtures::{details, TestCore};

#[tokio::test]
async fn test_booking_flow_end_to_end() {
    // This test walks the full lifecycle over one slot: publish, book,
    // double-booking refusal, cancel, rebook, confirm, reminder sweep.
    let core = TestCore::new();

    // Step 1: an administrator publishes a slot two hours out
    let slot = publish_slot(&core).await;

    // Step 2: user U books it and it leaves the availability listing
    let appointment = book(&core, &slot, "user-u").await;
    verify_slot_unavailable(&core, &slot).await;

    // Step 3: user V is refused while U holds the slot
    let err = core
        .appointments
        .book(slot.id, "user-v", details())
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::SlotUnavailable));

    // Step 4: U cancels and the slot is bookable again
    cancel(&core, &appointment).await;
    let available = core.slots.list_available().await.unwrap();
    assert!(available.iter().any(|candidate| candidate.id == slot.id));

    // Step 5: V books the released slot and it gets confirmed
    let rebooked = book(&core, &slot, "user-v").await;
    confirm(&core, &rebooked).await;

    // Step 6: the reminder sweep delivers exactly once
    let sent = core.appointments.send_due_reminders().await.unwrap();
    assert_eq!(sent, 0); // V's appointment is Confirmed, not Scheduled

    let extra_slot = core
        .slots
        .create(&core.slot_request(1, 1), "admin")
        .await
        .unwrap();
    core.appointments
        .book(extra_slot.id, "user-w", details())
        .await
        .unwrap();
    assert_eq!(core.appointments.send_due_reminders().await.unwrap(), 1);
    assert_eq!(core.appointments.send_due_reminders().await.unwrap(), 0);

    // Every state change left its event trail
    assert_eq!(
        core.sink.kinds(),
        vec![
            EventKind::Booked,
            EventKind::Cancelled,
            EventKind::Booked,
            EventKind::Confirmed,
            EventKind::Booked,
            EventKind::Reminder,
        ]
    );
}

#[tokio::test]
async fn test_drift_repair_and_expiry_purge() {
    let core = TestCore::new();

    let claimed = core
        .slots
        .create(&core.slot_request(2, 1), "admin")
        .await
        .unwrap();
    let idle = core
        .slots
        .create(&core.slot_request(4, 1), "admin")
        .await
        .unwrap();
    core.appointments
        .book(claimed.id, "user-u", details())
        .await
        .unwrap();

    // simulate the partial failure repair exists for: the appointment
    // write landed but the slot flip did not
    use consultify_scheduling::store::SlotRepository;
    let mut drifted = core
        .slot_store
        .find_by_id(claimed.id)
        .await
        .unwrap()
        .unwrap();
    drifted.available = true;
    core.slot_store.update(drifted).await.unwrap();

    let report = core.reconciler.repair().await.unwrap();
    assert_eq!(report.reclaimed, 1);
    assert_eq!(report.released, 0);

    // a day later both slots have ended; only the unclaimed one is purged
    core.clock.advance(Duration::hours(24));
    let removed = core.reconciler.purge_expired().await.unwrap();
    assert_eq!(removed, 1);
    assert!(core
        .slot_store
        .find_by_id(idle.id)
        .await
        .unwrap()
        .is_none());
    assert!(core
        .slot_store
        .find_by_id(claimed.id)
        .await
        .unwrap()
        .is_some());
}

async fn publish_slot(core: &TestCore) -> TimeSlot {
    let slot = core
        .slots
        .create(&core.slot_request(2, 1), "admin")
        .await
        .unwrap();
    assert!(slot.available);
    slot
}

async fn book(core: &TestCore, slot: &TimeSlot, user: &str) -> Appointment {
    let appointment = core
        .appointments
        .book(slot.id, user, details())
        .await
        .unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.scheduled_time, slot.start_time);
    appointment
}

async fn verify_slot_unavailable(core: &TestCore, slot: &TimeSlot) {
    let available = core.slots.list_available().await.unwrap();
    assert!(available.iter().all(|candidate| candidate.id != slot.id));
}

async fn cancel(core: &TestCore, appointment: &Appointment) {
    let cancelled = core
        .appointments
        .cancel(appointment.id, Some("schedule clash"))
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

async fn confirm(core: &TestCore, appointment: &Appointment) {
    let confirmed = core
        .appointments
        .set_status(appointment.id, AppointmentStatus::Confirmed, None)
        .await
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
}
