//! Simulated collaborators for the dashboard: an in-process realtime store and
//! a local authentication provider. Used by the CLI replay mode and tests.

pub mod auth;
pub mod memory;

pub use auth::LocalAuth;
pub use memory::{MemoryStore, normalize_path};
