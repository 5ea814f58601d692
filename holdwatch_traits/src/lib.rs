//! Collaborator seams for the hold monitoring dashboard: the wall clock, the
//! realtime data store and the authentication provider.

pub mod auth;
pub mod clock;
pub mod store;

pub use auth::{AuthError, AuthProvider, Credentials, Session};
pub use clock::{LocalClock, ManualClock, WallClock};
pub use store::{ChangeHandler, DataStore, StoreError, SubscriptionId};
