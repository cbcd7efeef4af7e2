//! Sign-in state passed explicitly to the code that needs it.
//!
//! A [`SessionContext`] is created at login, dropped back to anonymous at
//! logout, and treated as anonymous once its expiry has passed. Callers hand
//! it to whatever needs the buyer's identity (for example
//! [`crate::order::OrderDraft::build`]) instead of reading ambient storage.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// The signed-in buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend user ID.
    pub id: UserId,
    /// Login email.
    pub email: Email,
}

/// Sign-in state for one client.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone, Default)]
pub struct SessionContext {
    state: SessionState,
}

#[derive(Clone, Default)]
enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        user: SessionUser,
        token: SecretString,
        expires_at: DateTime<Utc>,
    },
}

impl SessionContext {
    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for a buyer who has just logged in.
    #[must_use]
    pub const fn authenticated(
        user: SessionUser,
        token: SecretString,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            state: SessionState::Authenticated {
                user,
                token,
                expires_at,
            },
        }
    }

    /// Record a successful login, replacing any previous sign-in.
    pub fn sign_in(&mut self, user: SessionUser, token: SecretString, expires_at: DateTime<Utc>) {
        tracing::info!(user_id = %user.id, %expires_at, "Signed in");
        *self = Self::authenticated(user, token, expires_at);
    }

    /// Forget the signed-in buyer and their token.
    pub fn sign_out(&mut self) {
        if let SessionState::Authenticated { user, .. } = &self.state {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        self.state = SessionState::Anonymous;
    }

    /// The signed-in buyer, unless the session is anonymous or expired.
    #[must_use]
    pub fn current_user(&self, now: DateTime<Utc>) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated {
                user, expires_at, ..
            } if now < *expires_at => Some(user),
            _ => None,
        }
    }

    /// The bearer token for backend calls, unless anonymous or expired.
    #[must_use]
    pub fn bearer_token(&self, now: DateTime<Utc>) -> Option<&SecretString> {
        match &self.state {
            SessionState::Authenticated {
                token, expires_at, ..
            } if now < *expires_at => Some(token),
            _ => None,
        }
    }

    /// Whether a non-expired sign-in is present.
    #[must_use]
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.current_user(now).is_some()
    }

    /// When the sign-in expires, if there is one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SessionState::Authenticated { expires_at, .. } => Some(*expires_at),
            SessionState::Anonymous => None,
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            SessionState::Anonymous => f.write_str("SessionContext::Anonymous"),
            SessionState::Authenticated {
                user, expires_at, ..
            } => f
                .debug_struct("SessionContext::Authenticated")
                .field("user", user)
                .field("token", &"[REDACTED]")
                .field("expires_at", expires_at)
                .finish(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use secrecy::ExposeSecret;

    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: UserId::new("u-1"),
            email: Email::parse("buyer@krishi.com.bd").unwrap(),
        }
    }

    #[test]
    fn test_anonymous_has_no_user() {
        let session = SessionContext::anonymous();
        assert!(!session.is_authenticated(Utc::now()));
        assert!(session.bearer_token(Utc::now()).is_none());
        assert!(session.expires_at().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let now = Utc::now();
        let mut session = SessionContext::anonymous();
        session.sign_in(user(), SecretString::from("tok-123"), now + Duration::hours(1));

        assert_eq!(session.current_user(now), Some(&user()));
        assert_eq!(
            session.bearer_token(now).unwrap().expose_secret(),
            "tok-123"
        );

        session.sign_out();
        assert!(session.current_user(now).is_none());
    }

    #[test]
    fn test_expired_session_is_anonymous() {
        let now = Utc::now();
        let session = SessionContext::authenticated(
            user(),
            SecretString::from("tok-123"),
            now - Duration::seconds(1),
        );
        assert!(!session.is_authenticated(now));
        assert!(session.bearer_token(now).is_none());
        assert!(session.expires_at().is_some());
    }

    #[test]
    fn test_expiry_is_exclusive() {
        let now = Utc::now();
        let session = SessionContext::authenticated(user(), SecretString::from("t"), now);
        assert!(!session.is_authenticated(now));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::authenticated(
            user(),
            SecretString::from("super_secret_bearer"),
            Utc::now(),
        );
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("buyer@krishi.com.bd"));
        assert!(!debug_output.contains("super_secret_bearer"));
    }
}
