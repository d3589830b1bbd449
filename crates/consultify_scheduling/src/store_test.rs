#[cfg(test)]
mod tests {
    use crate::models::{Appointment, AppointmentStatus, TimeSlot};
    use crate::store::memory::{InMemoryAppointmentRepository, InMemorySlotRepository};
    use crate::store::{AppointmentRepository, SlotRepository, StoreError};
    use crate::test_support::{base_time, details};
    use chrono::Duration;

    fn slot_at(offset_hours: i64) -> TimeSlot {
        let start = base_time() + Duration::hours(offset_hours);
        TimeSlot::new(start, start + Duration::hours(1), "admin", None, base_time())
    }

    fn appointment_at(offset_hours: i64, user: &str) -> Appointment {
        Appointment::new(
            user,
            base_time() + Duration::hours(offset_hours),
            details(),
            base_time(),
        )
    }

    #[tokio::test]
    async fn slot_queries_sort_ascending_by_start() {
        let store = InMemorySlotRepository::new();
        let late = store.insert(slot_at(9)).await.unwrap();
        let early = store.insert(slot_at(1)).await.unwrap();
        let middle = store.insert(slot_at(5)).await.unwrap();

        let all = store.find_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![early.id, middle.id, late.id]);

        let between = store
            .find_available_between(early.start_time, middle.start_time)
            .await
            .unwrap();
        let ids: Vec<_> = between.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![early.id, middle.id]);
    }

    #[tokio::test]
    async fn slot_update_of_unknown_id_is_missing() {
        let store = InMemorySlotRepository::new();
        let err = store.update(slot_at(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
    }

    #[tokio::test]
    async fn available_queries_skip_occupied_slots() {
        let store = InMemorySlotRepository::new();
        let mut occupied = slot_at(1);
        occupied.available = false;
        occupied.appointment_id = Some(uuid::Uuid::new_v4());
        let occupied = store.insert(occupied).await.unwrap();
        let free = store.insert(slot_at(2)).await.unwrap();

        let after = store.find_available_after(base_time()).await.unwrap();
        let ids: Vec<_> = after.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![free.id]);

        // the occupied slot is still visible to the unfiltered range query
        let ranged = store
            .find_in_range(occupied.start_time, free.start_time)
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);
    }

    #[tokio::test]
    async fn reverse_binding_lookup_finds_the_occupying_slot() {
        let store = InMemorySlotRepository::new();
        let appointment_id = uuid::Uuid::new_v4();
        let mut bound = slot_at(1);
        bound.available = false;
        bound.appointment_id = Some(appointment_id);
        let bound = store.insert(bound).await.unwrap();
        store.insert(slot_at(2)).await.unwrap();

        let found = store.find_by_appointment(appointment_id).await.unwrap();
        assert_eq!(found.map(|slot| slot.id), Some(bound.id));

        let missing = store
            .find_by_appointment(uuid::Uuid::new_v4())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn expiry_query_requires_available_and_past_end() {
        let store = InMemorySlotRepository::new();
        let expired = store.insert(slot_at(-5)).await.unwrap();
        let mut expired_bound = slot_at(-3);
        expired_bound.available = false;
        expired_bound.appointment_id = Some(uuid::Uuid::new_v4());
        store.insert(expired_bound).await.unwrap();
        store.insert(slot_at(4)).await.unwrap();

        let purgeable = store
            .find_available_ending_before(base_time())
            .await
            .unwrap();
        let ids: Vec<_> = purgeable.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![expired.id]);
    }

    #[tokio::test]
    async fn appointment_queries_honor_their_orderings() {
        let store = InMemoryAppointmentRepository::new();
        let early = store.insert(appointment_at(1, "user-u")).await.unwrap();
        let late = store.insert(appointment_at(9, "user-u")).await.unwrap();
        let other = store.insert(appointment_at(5, "user-v")).await.unwrap();

        let all = store.find_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![late.id, other.id, early.id]);

        let mine = store.find_by_user("user-u").await.unwrap();
        let ids: Vec<_> = mine.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![late.id, early.id]);

        // strictly after, ascending
        let upcoming = store
            .find_after(early.scheduled_time)
            .await
            .unwrap();
        let ids: Vec<_> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![other.id, late.id]);
    }

    #[tokio::test]
    async fn status_window_query_uses_inclusive_bounds() {
        let store = InMemoryAppointmentRepository::new();
        let at_start = store.insert(appointment_at(0, "user-u")).await.unwrap();
        let at_end = store.insert(appointment_at(2, "user-u")).await.unwrap();
        let mut outside = appointment_at(3, "user-u");
        outside.status = AppointmentStatus::Scheduled;
        store.insert(outside).await.unwrap();
        let mut wrong_status = appointment_at(1, "user-u");
        wrong_status.status = AppointmentStatus::Cancelled;
        store.insert(wrong_status).await.unwrap();

        let due = store
            .find_with_status_between(
                AppointmentStatus::Scheduled,
                at_start.scheduled_time,
                at_end.scheduled_time,
            )
            .await
            .unwrap();
        let ids: Vec<_> = due.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![at_start.id, at_end.id]);
    }

    #[tokio::test]
    async fn appointment_update_of_unknown_id_is_missing() {
        let store = InMemoryAppointmentRepository::new();
        let err = store
            .update(appointment_at(1, "user-u"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
    }
}
