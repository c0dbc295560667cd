//! `itrack-lib`: in-process issue tracking library.
//!
//! Holds an ordered issue collection in memory and persists it as one JSON
//! array under a single key of a pluggable [`KeyValueSlot`].
//!
//! # Quick Start
//!
//! ```no_run
//! use itrack_lib::{FileSlot, IssueDraft, IssuePersistence, IssueStore, IssueUpdate, Status};
//!
//! // Load (or seed) the collection
//! let mut store = IssueStore::open(IssuePersistence::new(FileSlot::new(".itrack")));
//!
//! // Create
//! let issue = store.add(IssueDraft::new("New task", "Details")).unwrap();
//!
//! // Update
//! store.update(&issue.id, &IssueUpdate::status(Status::InProgress)).unwrap();
//!
//! // Remove
//! store.remove(&issue.id).unwrap();
//! ```

pub mod error;
pub mod model;
pub mod persist;
pub mod slot;
pub mod store;

pub use error::{Result, TrackerError};
pub use model::{Issue, IssueDraft, IssueUpdate, Priority, Status};
pub use persist::{IssuePersistence, LoadSource, Loaded, SlotReport};
pub use slot::{FileSlot, KeyValueSlot, MemorySlot, validate_key};
pub use store::{ChangeKind, IssueStore, StoreChange, SubscriptionId};

/// Version of this library crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
