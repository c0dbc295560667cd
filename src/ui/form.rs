//! Creation form: pending field values that become a new issue on submit.

use itrack_lib::{Issue, IssueDraft, IssueStore, KeyValueSlot, Priority, Status};

/// Values the form starts from and returns to after a submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormDefaults {
    pub status: Status,
    pub priority: Priority,
}

/// Issue creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueForm {
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    defaults: FormDefaults,
}

impl Default for IssueForm {
    fn default() -> Self {
        Self::new(FormDefaults::default())
    }
}

impl IssueForm {
    #[must_use]
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: defaults.status,
            priority: defaults.priority,
            defaults,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub const fn defaults(&self) -> FormDefaults {
        self.defaults
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Draft built from the current field values.
    #[must_use]
    pub fn draft(&self) -> IssueDraft {
        IssueDraft::new(self.title.clone(), self.description.clone())
            .with_status(self.status)
            .with_priority(self.priority)
    }

    /// Return every field to its default.
    pub fn reset(&mut self) {
        *self = Self::new(self.defaults);
    }

    /// Add the pending issue to `store`, then reset the form.
    ///
    /// Titles are not validated; an empty title is stored as is.
    ///
    /// # Errors
    ///
    /// Returns the store error if persisting fails. The fields are kept so
    /// the submit can be retried.
    pub fn submit<S: KeyValueSlot>(
        &mut self,
        store: &mut IssueStore<S>,
    ) -> itrack_lib::Result<Issue> {
        let issue = store.add(self.draft())?;
        self.reset();
        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itrack_lib::{IssuePersistence, MemorySlot, TrackerError};

    struct BrokenSlot;

    impl KeyValueSlot for BrokenSlot {
        fn read(&self, _key: &str) -> itrack_lib::Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> itrack_lib::Result<()> {
            Err(TrackerError::Storage("disk full".to_string()))
        }
    }

    fn store() -> IssueStore<MemorySlot> {
        IssueStore::open(IssuePersistence::new(MemorySlot::new()))
    }

    #[test]
    fn test_new_form_uses_defaults() {
        let form = IssueForm::new(FormDefaults {
            status: Status::InProgress,
            priority: Priority::Medium,
        });
        assert_eq!(form.title(), "");
        assert_eq!(form.description(), "");
        assert_eq!(form.status(), Status::InProgress);
        assert_eq!(form.priority(), Priority::Medium);
    }

    #[test]
    fn test_submit_adds_issue_and_resets() {
        let mut store = store();
        let mut form = IssueForm::default();
        form.set_title("X");
        form.set_description("Y");
        form.set_status(Status::Done);
        form.set_priority(Priority::High);

        let issue = form.submit(&mut store).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.list().last(), Some(&issue));
        assert_eq!(issue.title, "X");
        assert_eq!(issue.description, "Y");
        assert_eq!(issue.status, Status::Done);
        assert_eq!(issue.priority, Priority::High);
        assert_eq!(form, IssueForm::default());
    }

    #[test]
    fn test_empty_title_is_accepted() {
        let mut store = store();
        let mut form = IssueForm::default();
        let issue = form.submit(&mut store).unwrap();
        assert_eq!(issue.title, "");
        assert_eq!(issue.status, Status::Todo);
        assert_eq!(issue.priority, Priority::Low);
    }

    #[test]
    fn test_failed_submit_keeps_fields() {
        let mut store = IssueStore::open(IssuePersistence::new(BrokenSlot));
        let mut form = IssueForm::default();
        form.set_title("Keep me");

        assert!(form.submit(&mut store).is_err());
        assert_eq!(form.title(), "Keep me");
    }
}
