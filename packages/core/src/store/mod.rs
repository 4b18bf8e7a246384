//! Store layer: owns the session, serves snapshots, notifies subscribers.

pub mod session_store;
pub mod snapshot;
pub mod subscription;

pub use session_store::SessionStore;
pub use snapshot::Snapshot;
pub use subscription::{Subscription, SubscriptionId};
