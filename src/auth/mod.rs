//! Auth session module.
//!
//! Wraps the external session provider as a cloneable handle yielding the
//! current identity or none. Mutation actions treat an absent identity as
//! "not applicable" and no-op silently rather than erroring.

use std::sync::{Arc, RwLock};

use crate::config::Config;

/// The authenticated user, as issued by the session provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Shared session handle. Clones observe the same session, matching the
/// provider's persisted-session behavior across screens.
#[derive(Clone, Default)]
pub struct AuthSession {
    inner: Arc<RwLock<Option<AuthUser>>>,
}

impl AuthSession {
    /// A session with nobody signed in.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A session with `user` already signed in.
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Current identity, or none.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn sign_in(&self, user: AuthUser) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    pub fn sign_out(&self) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether the current user is the configured admin account.
    pub fn is_admin(&self, config: &Config) -> bool {
        match (&self.current_user(), &config.admin_email) {
            (Some(user), Some(admin_email)) => user.email.as_deref() == Some(admin_email.as_str()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config(admin_email: Option<&str>) -> Config {
        Config {
            db_path: PathBuf::from(":memory:"),
            admin_email: admin_email.map(|s| s.to_string()),
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = AuthSession::signed_out();
        assert!(session.current_user().is_none());

        session.sign_in(AuthUser {
            id: "u1".to_string(),
            email: Some("reader@example.com".to_string()),
        });
        assert_eq!(session.current_user().map(|u| u.id), Some("u1".to_string()));

        session.sign_out();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_clones_share_session() {
        let session = AuthSession::signed_out();
        let other = session.clone();

        session.sign_in(AuthUser {
            id: "u1".to_string(),
            email: None,
        });
        assert!(other.current_user().is_some());
    }

    #[test]
    fn test_is_admin() {
        let config = test_config(Some("admin@example.com"));

        let admin = AuthSession::signed_in(AuthUser {
            id: "u1".to_string(),
            email: Some("admin@example.com".to_string()),
        });
        assert!(admin.is_admin(&config));

        let reader = AuthSession::signed_in(AuthUser {
            id: "u2".to_string(),
            email: Some("reader@example.com".to_string()),
        });
        assert!(!reader.is_admin(&config));

        assert!(!AuthSession::signed_out().is_admin(&config));
        assert!(!admin.is_admin(&test_config(None)));
    }
}
