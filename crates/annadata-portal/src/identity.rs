//! # Identity Provider Contract
//!
//! Sign-up and sign-in are delegated to an external identity provider; this
//! module only defines the contract ([`IdentityProvider`]) and the admin
//! gate built on top of it. No credentials are checked locally.
//!
//! ```text
//! Credentials ──sign_in──▶ Session ──AdminGate::authorize──▶ AdminGrant
//! ```
//!
//! An [`AdminGrant`] can only be obtained from an [`AdminGate`]; it is the
//! token the view navigator requires before entering the admin view.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum password length accepted before contacting the provider.
pub const MIN_PASSWORD_LEN: usize = 6;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors surfaced by identity operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email address {0:?}")]
    InvalidEmail(String),

    #[error("password must be at least 6 characters")]
    WeakPassword,

    #[error("an account already exists for {0}")]
    IdentityExists(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session is missing or expired")]
    InvalidSession,

    #[error("{0} is not authorized for administration")]
    NotAdmin(String),

    /// The provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

// ─── Credentials & Sessions ──────────────────────────────────────────

/// Email/password credentials. The password is never printed.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validate the shape of the credentials. The email is trimmed and
    /// lowercased.
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, AuthError> {
        let email = email.trim().to_lowercase();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(AuthError::InvalidEmail(email));
        }
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The secret, for handing to the provider.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An authenticated session issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    /// The provider's identity for the user (their email).
    pub identity: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            identity: identity.into(),
            issued_at: Utc::now(),
        }
    }
}

/// The external authentication collaborator.
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// The live session for `session_id`, if any.
    fn validate_session(&self, session_id: Uuid) -> Option<Session>;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for std::sync::Arc<P> {
    fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        (**self).sign_up(credentials)
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        (**self).sign_in(credentials)
    }

    fn validate_session(&self, session_id: Uuid) -> Option<Session> {
        (**self).validate_session(session_id)
    }
}

// ─── Admin Gate ──────────────────────────────────────────────────────

/// Proof that a session was authorized for the admin view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGrant {
    identity: String,
    granted_at: DateTime<Utc>,
}

impl AdminGrant {
    pub(crate) fn new(identity: String) -> Self {
        Self {
            identity,
            granted_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }
}

/// Decides whether a session may enter the admin view.
pub trait AdminGate {
    fn authorize(&self, session_id: Uuid) -> Result<AdminGrant, AuthError>;
}

/// Admits live sessions whose identity is on an allow-list.
pub struct AllowListAdminGate<P> {
    provider: P,
    admins: BTreeSet<String>,
}

impl<P: IdentityProvider> AllowListAdminGate<P> {
    /// Identities are compared lowercased.
    pub fn new<I, S>(provider: P, admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            provider,
            admins: admins
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

impl<P: IdentityProvider> AdminGate for AllowListAdminGate<P> {
    fn authorize(&self, session_id: Uuid) -> Result<AdminGrant, AuthError> {
        let session = self
            .provider
            .validate_session(session_id)
            .ok_or(AuthError::InvalidSession)?;
        let identity = session.identity.to_lowercase();
        if !self.admins.contains(&identity) {
            tracing::warn!(identity = %identity, "admin access denied");
            return Err(AuthError::NotAdmin(identity));
        }
        tracing::info!(identity = %identity, "admin access granted");
        Ok(AdminGrant::new(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::BTreeMap;

    /// In-memory provider for exercising the contract.
    #[derive(Default)]
    struct FakeProvider {
        accounts: Mutex<BTreeMap<String, String>>,
        sessions: Mutex<BTreeMap<Uuid, Session>>,
    }

    impl IdentityProvider for FakeProvider {
        fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
            let mut accounts = self.accounts.lock();
            if accounts.contains_key(credentials.email()) {
                return Err(AuthError::IdentityExists(credentials.email().to_string()));
            }
            accounts.insert(
                credentials.email().to_string(),
                credentials.password().to_string(),
            );
            drop(accounts);
            self.sign_in(credentials)
        }

        fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
            let ok = self.accounts.lock().get(credentials.email()).map(String::as_str)
                == Some(credentials.password());
            if !ok {
                return Err(AuthError::InvalidCredentials);
            }
            let session = Session::new(credentials.email());
            self.sessions.lock().insert(session.session_id, session.clone());
            Ok(session)
        }

        fn validate_session(&self, session_id: Uuid) -> Option<Session> {
            self.sessions.lock().get(&session_id).cloned()
        }
    }

    fn creds(email: &str) -> Credentials {
        Credentials::new(email, "secret-pass").unwrap()
    }

    #[test]
    fn credentials_validate_shape() {
        assert!(matches!(
            Credentials::new("not-an-email", "secret-pass"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert_eq!(
            Credentials::new("a@b.in", "123").unwrap_err(),
            AuthError::WeakPassword
        );
        assert_eq!(creds(" Farmer@Example.IN ").email(), "farmer@example.in");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let dbg = format!("{:?}", creds("a@b.in"));
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("secret-pass"));
    }

    #[test]
    fn provider_contract_round_trip() {
        let provider = FakeProvider::default();
        let session = provider.sign_up(&creds("a@b.in")).unwrap();
        assert_eq!(provider.validate_session(session.session_id), Some(session));
        assert!(matches!(
            provider.sign_up(&creds("a@b.in")),
            Err(AuthError::IdentityExists(_))
        ));
        let wrong = Credentials::new("a@b.in", "other-pass").unwrap();
        assert_eq!(provider.sign_in(&wrong), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn allow_list_gate() {
        let provider = std::sync::Arc::new(FakeProvider::default());
        let admin = provider.sign_up(&creds("officer@agri.gov.in")).unwrap();
        let farmer = provider.sign_up(&creds("farmer@example.in")).unwrap();
        let gate = AllowListAdminGate::new(provider.clone(), ["Officer@agri.gov.in"]);

        let grant = gate.authorize(admin.session_id).unwrap();
        assert_eq!(grant.identity(), "officer@agri.gov.in");

        assert_eq!(
            gate.authorize(farmer.session_id),
            Err(AuthError::NotAdmin("farmer@example.in".to_string()))
        );
        assert_eq!(
            gate.authorize(Uuid::new_v4()),
            Err(AuthError::InvalidSession)
        );
    }
}
