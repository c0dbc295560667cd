//! Issue list view: display rows plus the per-row actions.

use chrono::{DateTime, Datelike, Utc};
use itrack_lib::{Issue, IssueStore, IssueUpdate, KeyValueSlot, Priority, Status};
use tracing::debug;

/// One rendered entry of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRow {
    pub id: String,
    pub title: String,
    /// Creation date as `M/D/YYYY` (UTC).
    pub created: String,
    pub status: Status,
    pub priority: Priority,
    pub description: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            title: issue.title.clone(),
            created: format_date(&issue.created_at),
            status: issue.status,
            priority: issue.priority,
            description: issue.description.clone(),
        }
    }
}

/// Action triggered from a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    SetStatus { id: String, status: Status },
    SetPriority { id: String, priority: Priority },
    Update { id: String, update: IssueUpdate },
    Delete { id: String },
}

impl ListAction {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::SetStatus { id, .. }
            | Self::SetPriority { id, .. }
            | Self::Update { id, .. }
            | Self::Delete { id } => id,
        }
    }
}

/// Result of dispatching a [`ListAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The issue after the update.
    Applied(Issue),
    /// The issue that was deleted.
    Removed(Issue),
    /// No issue has the action's id; nothing changed.
    NoMatch,
}

/// Renders the collection and routes row actions to the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueListView;

#[allow(clippy::unused_self)]
impl IssueListView {
    /// One row per issue, in store order.
    #[must_use]
    pub fn rows(&self, issues: &[Issue]) -> Vec<IssueRow> {
        issues.iter().map(IssueRow::from).collect()
    }

    /// Apply `action` to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store error if persisting the change fails.
    pub fn dispatch<S: KeyValueSlot>(
        &self,
        action: ListAction,
        store: &mut IssueStore<S>,
    ) -> itrack_lib::Result<ActionOutcome> {
        debug!(?action, "list action");
        let outcome = match action {
            ListAction::SetStatus { id, status } => store
                .update(&id, &IssueUpdate::status(status))?
                .map(ActionOutcome::Applied),
            ListAction::SetPriority { id, priority } => store
                .update(&id, &IssueUpdate::priority(priority))?
                .map(ActionOutcome::Applied),
            ListAction::Update { id, update } => {
                store.update(&id, &update)?.map(ActionOutcome::Applied)
            }
            ListAction::Delete { id } => store.remove(&id)?.map(ActionOutcome::Removed),
        };
        Ok(outcome.unwrap_or(ActionOutcome::NoMatch))
    }
}

/// Locale-free `M/D/YYYY` rendering of a timestamp's UTC date.
#[must_use]
pub fn format_date(ts: &DateTime<Utc>) -> String {
    format!("{}/{}/{}", ts.month(), ts.day(), ts.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use itrack_lib::{IssuePersistence, MemorySlot};

    fn store() -> IssueStore<MemorySlot> {
        IssueStore::open(IssuePersistence::new(MemorySlot::new()))
    }

    #[test]
    fn test_rows_follow_store_order() {
        let store = store();
        let rows = IssueListView.rows(store.list());

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(rows[0].title, "Fix login bug");
        assert_eq!(rows[0].created, "1/15/2024");
        assert_eq!(rows[1].created, "1/20/2024");
        assert_eq!(rows[2].created, "1/10/2024");
        assert_eq!(rows[0].status, Status::InProgress);
        assert_eq!(rows[2].priority, Priority::Low);
    }

    #[test]
    fn test_format_date_uses_utc_calendar_day() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date(&ts), "12/31/2023");
    }

    #[test]
    fn test_set_status_action() {
        let mut store = store();
        let outcome = IssueListView
            .dispatch(
                ListAction::SetStatus {
                    id: "2".to_string(),
                    status: Status::Done,
                },
                &mut store,
            )
            .unwrap();

        let ActionOutcome::Applied(issue) = outcome else {
            panic!("expected Applied, got {outcome:?}");
        };
        assert_eq!(issue.status, Status::Done);
        assert_eq!(issue.priority, Priority::Medium);
    }

    #[test]
    fn test_combined_update_action() {
        let mut store = store();
        let update = IssueUpdate {
            status: Some(Status::Todo),
            priority: Some(Priority::High),
        };
        let outcome = IssueListView
            .dispatch(
                ListAction::Update {
                    id: "3".to_string(),
                    update,
                },
                &mut store,
            )
            .unwrap();
        let issue = store.get("3").cloned().unwrap();
        assert_eq!(outcome, ActionOutcome::Applied(issue.clone()));
        assert_eq!(issue.status, Status::Todo);
        assert_eq!(issue.priority, Priority::High);
    }

    #[test]
    fn test_delete_action_then_no_match() {
        let mut store = store();
        let delete = ListAction::Delete {
            id: "1".to_string(),
        };

        let first = IssueListView.dispatch(delete.clone(), &mut store).unwrap();
        assert!(matches!(first, ActionOutcome::Removed(ref issue) if issue.id == "1"));

        let second = IssueListView.dispatch(delete, &mut store).unwrap();
        assert_eq!(second, ActionOutcome::NoMatch);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unknown_id_is_no_match() {
        let mut store = store();
        let outcome = IssueListView
            .dispatch(
                ListAction::SetPriority {
                    id: "nope".to_string(),
                    priority: Priority::High,
                },
                &mut store,
            )
            .unwrap();
        assert_eq!(outcome, ActionOutcome::NoMatch);
        assert_eq!(store.persistence().slot().get("issues"), None);
    }

    #[test]
    fn test_action_id() {
        let action = ListAction::SetPriority {
            id: "abc".to_string(),
            priority: Priority::Low,
        };
        assert_eq!(action.id(), "abc");
    }
}
