// --- File: crates/services/consultify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Selects the concrete collaborators the scheduling core runs against:
//! webhook or log-only notification delivery, and the static token identity
//! provider.

use crate::identity::StaticTokenProvider;
use consultify_common::services::{
    BoxFuture, BoxedError, IdentityProvider, NotificationEvent, NotificationSink, ServiceFactory,
};
use consultify_config::AppConfig;
use consultify_notify::{TracingNotifier, WebhookNotifier};
use std::sync::Arc;
use tracing::{info, warn};

/// Adapts a concrete sink to the boxed error type the core consumes.
struct BoxedSink<S> {
    inner: S,
}

impl<S> NotificationSink for BoxedSink<S>
where
    S: NotificationSink,
{
    type Error = BoxedError;

    fn publish(&self, event: NotificationEvent) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            self.inner
                .publish(event)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

pub struct ConsultifyServiceFactory {
    // Kept so the factory can re-derive services on future reconfiguration.
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    notification_sink: Arc<dyn NotificationSink<Error = BoxedError>>,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl ConsultifyServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let notification_sink: Arc<dyn NotificationSink<Error = BoxedError>> = if config.use_notify
        {
            match config
                .notify
                .as_ref()
                .and_then(|notify| notify.webhook_url.clone())
            {
                Some(url) => {
                    info!("Initializing webhook notification sink");
                    Arc::new(BoxedSink {
                        inner: WebhookNotifier::new(url),
                    })
                }
                None => {
                    warn!("use_notify is set but no webhook_url is configured; events will be logged only");
                    Arc::new(BoxedSink {
                        inner: TracingNotifier,
                    })
                }
            }
        } else {
            info!("Notification delivery disabled; events will be logged only");
            Arc::new(BoxedSink {
                inner: TracingNotifier,
            })
        };

        let identity_provider: Arc<dyn IdentityProvider> =
            Arc::new(StaticTokenProvider::from_config(config.auth.as_ref()));

        Self {
            config,
            notification_sink,
            identity_provider,
        }
    }
}

impl ServiceFactory for ConsultifyServiceFactory {
    fn notification_sink(&self) -> Arc<dyn NotificationSink<Error = BoxedError>> {
        self.notification_sink.clone()
    }

    fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.identity_provider.clone()
    }
}
