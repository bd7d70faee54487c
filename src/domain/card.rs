use autosurgeon::{Hydrate, Reconcile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current wall-clock time as unix milliseconds, the unit stored in board documents.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `None` when `millis` is outside the range `chrono` can represent
pub(crate) fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// A single checklist entry on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// A file or link attached to a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub added_at: i64,
}

/// A comment left on a card by a board member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: i64,
}

/// A card on the board.
///
/// Timestamps are unix milliseconds; use [`Card::created`], [`Card::updated`]
/// and [`Card::due`] for `chrono` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub column_id: String,
    pub position: String,
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub due_date: Option<i64>,
    pub assignee: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    pub attachments: Vec<Attachment>,
    pub comments: Vec<Comment>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Card {
    /// Creates a card with a fresh identifier, stamped with the current time
    pub fn new(column_id: String, position: String, title: String, description: String) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            column_id,
            position,
            title,
            description,
            labels: Vec::new(),
            due_date: None,
            assignee: None,
            checklist: Vec::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_at)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.updated_at)
    }

    pub fn due(&self) -> Option<DateTime<Utc>> {
        self.due_date.and_then(millis_to_utc)
    }

    /// Bumps `updated_at` to now, never moving it backwards
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }

    /// Applies every field present in `update` and bumps `updated_at`
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(labels) = update.labels {
            self.labels = labels;
        }
        update.due_date.apply_to(&mut self.due_date);
        update.assignee.apply_to(&mut self.assignee);
        self.touch();
    }
}

/// Fields supplied when adding a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub title: String,
    pub description: String,
}

impl NewCard {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Edit to a nullable card field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value alone
    #[default]
    Unchanged,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::Set(value) => *slot = Some(value),
            Self::Clear => *slot = None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Partial card edit. Omitted fields never touch the stored card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub due_date: FieldUpdate<i64>,
    pub assignee: FieldUpdate<String>,
}

impl CardUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = FieldUpdate::Set(due.timestamp_millis());
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = FieldUpdate::Clear;
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = FieldUpdate::Set(assignee.into());
        self
    }

    pub fn clear_assignee(mut self) -> Self {
        self.assignee = FieldUpdate::Clear;
        self
    }

    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.due_date.is_unchanged()
            && self.assignee.is_unchanged()
    }
}
