use itrack_lib::Issue;
use serde::Serialize;

/// What a mutating command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationAction {
    Created,
    Updated,
    Deleted,
    /// The id matched nothing; the collection is unchanged.
    Unchanged,
}

/// JSON result of create/update/delete.
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutput {
    pub action: MutationAction,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}

impl MutationOutput {
    #[must_use]
    pub fn new(action: MutationAction, id: impl Into<String>, issue: Option<Issue>) -> Self {
        Self {
            action,
            id: id.into(),
            issue,
        }
    }
}
