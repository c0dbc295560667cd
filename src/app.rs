//! Application shell.
//!
//! Owns the issue store for one session and hands out the form and list
//! view that operate on it.

use crate::config::Settings;
use crate::ui::{FormDefaults, IssueForm, IssueListView};
use itrack_lib::{ChangeKind, FileSlot, IssuePersistence, IssueStore, LoadSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Session context: workspace, settings and the loaded store.
pub struct App {
    workspace: PathBuf,
    settings: Settings,
    store: IssueStore<FileSlot>,
    form: IssueForm,
    list_view: IssueListView,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("workspace", &self.workspace)
            .field("settings", &self.settings)
            .field("issues", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Open the store kept in `workspace` and wire up change logging.
    ///
    /// Loading never fails; unreadable data falls back to the initial
    /// collection with a warning.
    #[must_use]
    pub fn open(workspace: &Path, settings: Settings) -> Self {
        let persistence = IssuePersistence::new(FileSlot::new(workspace))
            .with_key(settings.storage_key.clone())
            .with_seed(settings.seed);
        let mut store = IssueStore::open(persistence);

        if let LoadSource::Recovered { reason } = store.load_source() {
            warn!(workspace = %workspace.display(), %reason, "using initial issues");
        }

        store.subscribe(|change, issues| {
            let verb = match change.kind {
                ChangeKind::Added => "added",
                ChangeKind::Updated => "updated",
                ChangeKind::Removed => "removed",
            };
            debug!(id = %change.id, total = issues.len(), "issue {verb}");
        });

        let form = IssueForm::new(FormDefaults {
            status: settings.default_status,
            priority: settings.default_priority,
        });

        Self {
            workspace: workspace.to_path_buf(),
            settings,
            store,
            form,
            list_view: IssueListView,
        }
    }

    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &IssueStore<FileSlot> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut IssueStore<FileSlot> {
        &mut self.store
    }

    #[must_use]
    pub const fn list_view(&self) -> IssueListView {
        self.list_view
    }

    /// The form together with the store it submits to.
    pub fn form(&mut self) -> (&mut IssueForm, &mut IssueStore<FileSlot>) {
        (&mut self.form, &mut self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itrack_lib::{Priority, Status};
    use tempfile::TempDir;

    #[test]
    fn test_open_fresh_workspace_shows_seeds_without_writing() {
        let temp = TempDir::new().unwrap();
        let app = App::open(temp.path(), Settings::default());

        assert_eq!(app.store().len(), 3);
        assert_eq!(app.store().load_source(), &LoadSource::Missing);
        assert!(!temp.path().join("issues.json").exists());
    }

    #[test]
    fn test_form_defaults_come_from_settings() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            default_status: Status::InProgress,
            default_priority: Priority::High,
            ..Settings::default()
        };
        let mut app = App::open(temp.path(), settings);

        let (form, store) = app.form();
        form.set_title("From form");
        let issue = form.submit(store).unwrap();

        assert_eq!(issue.status, Status::InProgress);
        assert_eq!(issue.priority, Priority::High);
        assert!(temp.path().join("issues.json").is_file());
    }

    #[test]
    fn test_custom_key_and_no_seed() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            storage_key: "work".to_string(),
            seed: false,
            ..Settings::default()
        };
        let mut app = App::open(temp.path(), settings.clone());
        assert!(app.store().is_empty());

        let (form, store) = app.form();
        form.set_title("Only one");
        form.submit(store).unwrap();
        assert!(temp.path().join("work.json").is_file());

        let reopened = App::open(temp.path(), settings);
        assert_eq!(reopened.store().len(), 1);
        assert_eq!(reopened.store().list()[0].title, "Only one");
    }

    #[test]
    fn test_malformed_file_recovers_to_seeds() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("issues.json"), "{not json").unwrap();

        let app = App::open(temp.path(), Settings::default());
        assert!(matches!(
            app.store().load_source(),
            LoadSource::Recovered { .. }
        ));
        assert_eq!(app.store().len(), 3);
    }
}
