//! Identity providers.
//!
//! Identity is only a partition key for saved boards: the library never
//! inspects it beyond [`Identity::uid`].

use crate::error::AuthError;
use crate::notify::{Notifier, Subscription};
use std::collections::HashMap;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque, stable user id.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

pub type IdentityCallback = Box<dyn FnMut(&Option<Identity>)>;

pub trait AuthProvider {
    fn current_identity(&self) -> Option<Identity>;
    fn sign_in(&mut self, credentials: &Credentials) -> Result<Identity, AuthError>;
    /// Create an account and sign it in.
    fn sign_up(&mut self, credentials: &Credentials) -> Result<Identity, AuthError>;
    fn sign_out(&mut self) -> Result<(), AuthError>;
    /// Called with the new identity (or `None`) on every sign-in/out.
    fn on_change(&mut self, callback: IdentityCallback) -> Subscription;
}

/// In-memory email/password accounts, for tests and offline use.
#[derive(Default)]
pub struct StaticAuth {
    accounts: HashMap<String, (String, Identity)>,
    current: Option<Identity>,
    watchers: Notifier<Option<Identity>>,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that starts signed in as `uid`.
    pub fn signed_in(uid: &str) -> Self {
        Self {
            current: Some(Identity {
                uid: uid.to_owned(),
                email: None,
                display_name: None,
            }),
            ..Self::default()
        }
    }

    fn set_current(&mut self, identity: Option<Identity>) {
        self.current = identity;
        log::debug!(
            "auth: {}",
            self.current.as_ref().map_or("signed out", |i| i.uid.as_str())
        );
        self.watchers.notify(&self.current);
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

impl AuthProvider for StaticAuth {
    fn current_identity(&self) -> Option<Identity> {
        self.current.clone()
    }

    fn sign_in(&mut self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let email = normalize_email(&credentials.email)?;
        let identity = match self.accounts.get(&email) {
            Some((password, identity)) if *password == credentials.password => identity.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_up(&mut self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if self.accounts.contains_key(&email) {
            return Err(AuthError::AccountExists(email));
        }
        let identity = Identity {
            uid: format!("uid-{}", self.accounts.len() + 1),
            display_name: email.split('@').next().map(str::to_owned),
            email: Some(email.clone()),
        };
        self.accounts
            .insert(email, (credentials.password.clone(), identity.clone()));
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        if self.current.is_some() {
            self.set_current(None);
        }
        Ok(())
    }

    fn on_change(&mut self, callback: IdentityCallback) -> Subscription {
        self.watchers.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn sign_up_then_in() {
        let mut auth = StaticAuth::new();
        let creds = Credentials::new("Coach@Club.com", "secret1");
        let id = auth.sign_up(&creds).unwrap();
        assert_eq!(id.email.as_deref(), Some("coach@club.com"));
        auth.sign_out().unwrap();
        assert_eq!(auth.current_identity(), None);
        assert_eq!(auth.sign_in(&creds).unwrap(), id);
    }

    #[test]
    fn rejects_bad_input() {
        let mut auth = StaticAuth::new();
        assert_eq!(
            auth.sign_up(&Credentials::new("nobody", "secret1")),
            Err(AuthError::InvalidEmail("nobody".into()))
        );
        assert_eq!(
            auth.sign_up(&Credentials::new("a@b.io", "123")),
            Err(AuthError::WeakPassword(MIN_PASSWORD_LEN))
        );
        auth.sign_up(&Credentials::new("a@b.io", "123456")).unwrap();
        assert_eq!(
            auth.sign_in(&Credentials::new("a@b.io", "654321")),
            Err(AuthError::InvalidCredentials)
        );
        assert!(matches!(
            auth.sign_up(&Credentials::new("a@b.io", "123456")),
            Err(AuthError::AccountExists(_))
        ));
    }

    #[test]
    fn watchers_follow_sign_in_state() {
        let mut auth = StaticAuth::new();
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = seen.clone();
        let _sub = auth.on_change(Box::new(move |id: &Option<Identity>| {
            sink.borrow_mut().push(id.as_ref().map(|i| i.uid.clone()));
        }));
        auth.sign_up(&Credentials::new("a@b.io", "123456")).unwrap();
        auth.sign_out().unwrap();
        auth.sign_out().unwrap();
        assert_eq!(*seen.borrow(), vec![Some("uid-1".to_owned()), None]);
    }
}
