//! Saved-board library for the current user.
//!
//! Combines an [`AuthProvider`] and a [`BoardStore`]: the signed-in identity
//! picks the partition, saves are stamped and validated, and failures are
//! logged and returned without touching anything else. Only one request may
//! be in flight. The plain calls claim and release the library themselves;
//! hosts that drive storage asynchronously take a [`RequestGuard`] with
//! [`BoardLibrary::begin_request`], hold it across the await, make their
//! calls through the `*_with` forms and disable their controls while
//! [`BoardLibrary::is_busy`] is set.

use crate::auth::AuthProvider;
use crate::error::{StoreError, StoreResult};
use crate::notify::Subscription;
use crate::store::{BoardStore, BoardsCallback, Owner};
use chrono::Utc;
use pb_core::record::BoardRecord;
use std::cell::Cell;
use std::rc::Rc;

/// Marks the library busy until dropped.
#[derive(Debug)]
pub struct RequestGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

pub struct BoardLibrary<A, S> {
    auth: A,
    store: S,
    busy: Rc<Cell<bool>>,
}

impl<A: AuthProvider, S: BoardStore> BoardLibrary<A, S> {
    pub fn new(auth: A, store: S) -> Self {
        Self {
            auth,
            store,
            busy: Rc::new(Cell::new(false)),
        }
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut A {
        &mut self.auth
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Partition for the current identity; `Local` when signed out.
    pub fn owner(&self) -> Owner {
        match self.auth.current_identity() {
            Some(identity) => Owner::User(identity.uid),
            None => Owner::Local,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claim the library for one request. Fails with `Busy` while another
    /// guard is alive.
    pub fn begin_request(&self) -> StoreResult<RequestGuard> {
        if self.busy.replace(true) {
            return Err(StoreError::Busy);
        }
        Ok(RequestGuard {
            busy: self.busy.clone(),
        })
    }

    /// A guard from another library does not hold this one.
    fn check(&self, guard: &RequestGuard) -> StoreResult<()> {
        if Rc::ptr_eq(&guard.busy, &self.busy) {
            Ok(())
        } else {
            Err(StoreError::Busy)
        }
    }

    /// Save `record` under its (trimmed) name, stamped with the current time.
    pub fn save(&mut self, record: BoardRecord) -> StoreResult<()> {
        let guard = self.begin_request()?;
        self.save_with(&guard, record)
    }

    /// [`BoardLibrary::save`] inside a request the caller already holds.
    pub fn save_with(&mut self, guard: &RequestGuard, mut record: BoardRecord) -> StoreResult<()> {
        self.check(guard)?;
        record.name = validate_name(&record.name)?;
        record.updated_at = Utc::now();
        let owner = self.owner();
        log::debug!("saving board {:?} for {owner:?}", record.name);
        self.store
            .save(&owner, record)
            .inspect_err(|e| log::warn!("save failed: {e}"))
    }

    /// Save `record`, replacing the board called `previous`. Renaming an
    /// existing board removes the old name.
    pub fn save_over(&mut self, previous: &str, record: BoardRecord) -> StoreResult<()> {
        let guard = self.begin_request()?;
        self.save_over_with(&guard, previous, record)
    }

    pub fn save_over_with(
        &mut self,
        guard: &RequestGuard,
        previous: &str,
        record: BoardRecord,
    ) -> StoreResult<()> {
        let renamed = previous.trim() != record.name.trim();
        self.save_with(guard, record)?;
        if renamed {
            let owner = self.owner();
            match self.store.delete(&owner, previous.trim()) {
                Ok(()) | Err(StoreError::NotFound(_)) => {}
                Err(e) => {
                    log::warn!("removing renamed board failed: {e}");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Boards of the current owner, newest first.
    pub fn list(&self) -> StoreResult<Vec<BoardRecord>> {
        let guard = self.begin_request()?;
        self.list_with(&guard)
    }

    pub fn list_with(&self, guard: &RequestGuard) -> StoreResult<Vec<BoardRecord>> {
        self.check(guard)?;
        self.store
            .list(&self.owner())
            .inspect_err(|e| log::warn!("list failed: {e}"))
    }

    /// One board by name.
    pub fn load(&self, name: &str) -> StoreResult<BoardRecord> {
        let guard = self.begin_request()?;
        self.load_with(&guard, name)
    }

    pub fn load_with(&self, guard: &RequestGuard, name: &str) -> StoreResult<BoardRecord> {
        self.list_with(guard)?
            .into_iter()
            .find(|b| b.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))
    }

    pub fn delete(&mut self, name: &str) -> StoreResult<()> {
        let guard = self.begin_request()?;
        self.delete_with(&guard, name)
    }

    pub fn delete_with(&mut self, guard: &RequestGuard, name: &str) -> StoreResult<()> {
        self.check(guard)?;
        let owner = self.owner();
        self.store
            .delete(&owner, name)
            .inspect_err(|e| log::warn!("delete failed: {e}"))
    }

    /// Watch the current owner's boards. The subscription does not follow
    /// later sign-ins; resubscribe from an auth change callback.
    pub fn subscribe(&mut self, callback: BoardsCallback) -> Subscription {
        let owner = self.owner();
        self.store.subscribe(&owner, callback)
    }
}

/// Board names are trimmed and must be non-empty. `/` is rejected because
/// remote backends use the name as a document key.
pub fn validate_name(name: &str) -> StoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(StoreError::InvalidName(name.to_owned()));
    }
    Ok(trimmed.to_owned())
}
