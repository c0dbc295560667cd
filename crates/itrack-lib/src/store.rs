//! In-memory issue store backed by an ordered `Vec`.
//!
//! The store is the single source of truth for a session. Every effective
//! mutation rewrites the persisted collection and then notifies subscribers.
//! Updates and removals that name an unknown id change nothing and are not
//! errors.

use std::fmt;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::{Result, TrackerError};
use crate::model::{Issue, IssueDraft, IssueUpdate, now_millis};
use crate::persist::{IssuePersistence, LoadSource};
use crate::slot::KeyValueSlot;

/// Kind of change a subscriber is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// A committed change to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub id: String,
}

/// Handle returned by [`IssueStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange, &[Issue])>;

/// Ordered issue collection with persistence and change notification.
pub struct IssueStore<S> {
    issues: Vec<Issue>,
    persistence: IssuePersistence<S>,
    load_source: LoadSource,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S> fmt::Debug for IssueStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueStore")
            .field("issues", &self.issues.len())
            .field("load_source", &self.load_source)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueSlot> IssueStore<S> {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the store, loading the persisted collection once.
    #[must_use]
    pub fn open(persistence: IssuePersistence<S>) -> Self {
        let loaded = persistence.load();
        debug!(count = loaded.issues.len(), source = ?loaded.source, "issue store opened");
        Self {
            issues: loaded.issues,
            persistence,
            load_source: loaded.source,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// How the initial collection was obtained.
    #[must_use]
    pub const fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    #[must_use]
    pub const fn persistence(&self) -> &IssuePersistence<S> {
        &self.persistence
    }

    /// Write the current collection, replacing whatever the slot holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot write fails.
    pub fn flush(&mut self) -> Result<()> {
        self.persistence.save(&self.issues)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new issue built from `draft`.
    ///
    /// The id and creation time are generated here, never taken from the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the collection fails.
    pub fn add(&mut self, draft: IssueDraft) -> Result<Issue> {
        let id = generate_id(|candidate| self.contains(candidate));
        let issue = Issue {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            created_at: now_millis(),
        };

        self.issues.push(issue.clone());
        debug!(id = %issue.id, title = %issue.title, "issue added");
        self.commit(ChangeKind::Added, &issue.id)?;

        Ok(issue)
    }

    /// Replace the supplied mutable fields of the issue with `id`.
    ///
    /// Returns `Ok(None)` without touching anything when no issue matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the collection fails.
    pub fn update(&mut self, id: &str, update: &IssueUpdate) -> Result<Option<Issue>> {
        let Some(issue) = self.issues.iter_mut().find(|issue| issue.id == id) else {
            trace!(id, "update ignored: no such issue");
            return Ok(None);
        };

        update.apply_to(issue);
        let updated = issue.clone();
        debug!(id, status = %updated.status, priority = %updated.priority, "issue updated");
        self.commit(ChangeKind::Updated, id)?;

        Ok(Some(updated))
    }

    /// Remove the issue with `id`, keeping the order of the rest.
    ///
    /// Returns the removed issue, or `Ok(None)` when no issue matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the collection fails.
    pub fn remove(&mut self, id: &str) -> Result<Option<Issue>> {
        let Some(index) = self.issues.iter().position(|issue| issue.id == id) else {
            trace!(id, "remove ignored: no such issue");
            return Ok(None);
        };

        let removed = self.issues.remove(index);
        debug!(id, "issue removed");
        self.commit(ChangeKind::Removed, id)?;

        Ok(Some(removed))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All issues in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.issues.iter().any(|issue| issue.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Resolve user input to a full issue id.
    ///
    /// Tries an exact match, then a unique case-insensitive id prefix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` for blank input, `AmbiguousId` when several ids
    /// share the prefix, and `IssueNotFound` when none do.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TrackerError::InvalidId { id: String::new() });
        }

        if self.contains(input) {
            return Ok(input.to_string());
        }

        let needle = input.to_lowercase();
        let matches: Vec<String> = self
            .issues
            .iter()
            .filter(|issue| issue.id.to_lowercase().starts_with(&needle))
            .map(|issue| issue.id.clone())
            .collect();

        match matches.len() {
            0 => Err(TrackerError::IssueNotFound {
                id: input.to_string(),
            }),
            1 => Ok(matches.into_iter().next().unwrap_or_default()),
            _ => Err(TrackerError::AmbiguousId {
                partial: input.to_string(),
                matches,
            }),
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register `listener` to run after every committed change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange, &[Issue]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn commit(&mut self, kind: ChangeKind, id: &str) -> Result<()> {
        self.persistence.save(&self.issues)?;

        let change = StoreChange {
            kind,
            id: id.to_string(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&change, &self.issues);
        }
        Ok(())
    }
}

/// Generate a random 128-bit issue id that `exists` does not already know.
fn generate_id<F>(exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = Uuid::new_v4().to_string();
        if !exists(&id) {
            return id;
        }
    }
}
