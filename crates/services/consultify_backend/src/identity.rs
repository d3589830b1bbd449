// --- File: crates/services/consultify_backend/src/identity.rs ---
//! Static bearer-token identity provider.
//!
//! Maps the configured API token table to authenticated subjects. It stands
//! in for a full identity service behind the same narrow contract: token
//! issuance and renewal happen elsewhere.

use consultify_common::services::{AuthSubject, BoxFuture, BoxedError, IdentityProvider};
use consultify_config::AuthConfig;
use std::collections::HashMap;
use tracing::warn;

pub struct StaticTokenProvider {
    tokens: HashMap<String, AuthSubject>,
}

impl StaticTokenProvider {
    pub fn from_config(auth: Option<&AuthConfig>) -> Self {
        let mut tokens = HashMap::new();
        if let Some(auth) = auth {
            for entry in &auth.tokens {
                tokens.insert(
                    entry.token.clone(),
                    AuthSubject {
                        subject: entry.subject.clone(),
                        admin: entry.admin,
                    },
                );
            }
        }
        if tokens.is_empty() {
            warn!("no API tokens configured; every request will be rejected");
        }
        Self { tokens }
    }
}

impl IdentityProvider for StaticTokenProvider {
    fn validate(&self, credential: &str) -> BoxFuture<'_, Option<AuthSubject>, BoxedError> {
        let found = self.tokens.get(credential).cloned();
        Box::pin(async move { Ok(found) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consultify_config::ApiToken;

    #[tokio::test]
    async fn known_tokens_resolve_with_their_privilege() {
        let auth = AuthConfig {
            tokens: vec![
                ApiToken {
                    token: "admin-token".to_string(),
                    subject: "admin-1".to_string(),
                    admin: true,
                },
                ApiToken {
                    token: "user-token".to_string(),
                    subject: "user-u".to_string(),
                    admin: false,
                },
            ],
        };
        let provider = StaticTokenProvider::from_config(Some(&auth));

        let admin = provider.validate("admin-token").await.unwrap().unwrap();
        assert_eq!(admin.subject, "admin-1");
        assert!(admin.admin);

        let user = provider.validate("user-token").await.unwrap().unwrap();
        assert!(!user.admin);

        assert!(provider.validate("stale-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_config_rejects_everything() {
        let provider = StaticTokenProvider::from_config(None);
        assert!(provider.validate("anything").await.unwrap().is_none());
    }
}
