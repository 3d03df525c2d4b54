//! Board persistence and identity.
//!
//! The editor never talks to storage directly. A [`BoardLibrary`] pairs an
//! [`AuthProvider`] with a [`BoardStore`] and partitions saved boards by the
//! signed-in identity, falling back to a single local partition when nobody
//! is signed in.

pub mod auth;
pub mod error;
pub mod library;
pub mod notify;
pub mod store;

pub use auth::{AuthProvider, Credentials, Identity, StaticAuth};
pub use error::{AuthError, StoreError, StoreResult};
pub use library::{BoardLibrary, RequestGuard};
pub use notify::{Notifier, Subscription};
pub use store::{BoardStore, JsonFileStore, MemoryStore, Owner};
