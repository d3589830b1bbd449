#[cfg(test)]
mod tests {
    use crate::handlers::SchedulingState;
    use crate::routes::routes;
    use crate::test_support::{Harness, StaticIdentity};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use consultify_config::{AppConfig, ServerConfig};
    use consultify_common::services::Clock;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state_for(harness: &Harness) -> Arc<SchedulingState> {
        let identity = StaticIdentity::default()
            .with("admin-token", "admin-1", true)
            .with("user-token", "user-u", false);

        Arc::new(SchedulingState {
            config: Arc::new(AppConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
                use_notify: false,
                scheduling: Default::default(),
                notify: None,
                auth: None,
            }),
            slots: harness.slots.clone(),
            appointments: harness.appointments.clone(),
            reconciler: harness.reconciler.clone(),
            identity: Arc::new(identity),
        })
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let harness = Harness::new();
        let router = routes(state_for(&harness));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/timeslots/available")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_admin_cannot_use_the_admin_surface() {
        let harness = Harness::new();
        let router = routes(state_for(&harness));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/timeslots")
                    .header("authorization", "Bearer user-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_creates_a_slot_and_a_user_books_it() {
        let harness = Harness::new();
        let state = state_for(&harness);

        let start = harness.clock.now() + chrono::Duration::hours(1);
        let end = start + chrono::Duration::hours(1);
        let create_body = serde_json::json!({
            "start_time": start,
            "end_time": end,
            "description": "intro call",
        });

        let response = routes(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/timeslots")
                    .header("authorization", "Bearer admin-token")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&create_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let slot = harness.slots.list_available().await.unwrap().remove(0);
        let booking_body = serde_json::json!({
            "slot_id": slot.id,
            "details": {
                "contact": "user#0001",
                "topic": "intro",
                "experience_level": "new",
                "current_situation": "exploring",
                "expectations": "an overview",
            },
        });

        let response = routes(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/appointments")
                    .header("authorization", "Bearer user-token")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&booking_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mine = harness.appointments.by_user("user-u").await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn unknown_status_value_is_a_bad_request() {
        let harness = Harness::new();
        let router = routes(state_for(&harness));

        let body = serde_json::json!({ "status": "postponed" });
        let response = router
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/appointments/{}/status", uuid::Uuid::new_v4()))
                    .header("authorization", "Bearer admin-token")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
