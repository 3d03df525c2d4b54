//! Identity pushed in from the page.
//!
//! Sign-in runs in the host's auth SDK; the bridge is only told who is
//! signed in, which decides the storage partition.

use pb_store::auth::IdentityCallback;
use pb_store::{AuthError, AuthProvider, Credentials, Identity, Notifier, Subscription};

#[derive(Default)]
pub struct HostAuth {
    current: Option<Identity>,
    watchers: Notifier<Option<Identity>>,
}

impl HostAuth {
    /// Record the host's sign-in state and notify watchers on change.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        if self.current == identity {
            return;
        }
        self.current = identity;
        log::debug!(
            "host identity: {}",
            self.current.as_ref().map_or("signed out", |i| i.uid.as_str())
        );
        self.watchers.notify(&self.current);
    }
}

impl AuthProvider for HostAuth {
    fn current_identity(&self) -> Option<Identity> {
        self.current.clone()
    }

    fn sign_in(&mut self, _credentials: &Credentials) -> Result<Identity, AuthError> {
        Err(AuthError::Backend("sign-in is handled by the page".into()))
    }

    fn sign_up(&mut self, _credentials: &Credentials) -> Result<Identity, AuthError> {
        Err(AuthError::Backend("sign-up is handled by the page".into()))
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        self.set_identity(None);
        Ok(())
    }

    fn on_change(&mut self, callback: IdentityCallback) -> Subscription {
        self.watchers.subscribe(callback)
    }
}
