use crate::domain::{
    id::{CardId, ListId},
    state::is_blank,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Workflow status of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::InReview => write!(f, "In Review"),
            Self::Done => write!(f, "Done"),
        }
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid statuses: todo, in_progress, in_review, done",
                s
            )),
        }
    }
}

/// Card priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            )),
        }
    }
}

/// Rounds and clamps a percentage into `0..=100`
pub fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 100.0) as u8
    }
}

// Stored snapshots may carry fractional or out-of-range numbers.
fn deserialize_progress<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(clamp_progress))
}

/// A single task on a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub list_id: ListId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_progress"
    )]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Creates a bare card, the shape of the built-in seed data (no timestamps)
    pub fn new(id: CardId, title: String, list_id: ListId) -> Self {
        Self {
            id,
            title,
            description: None,
            list_id,
            due_date: None,
            status: None,
            progress: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            priority: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builds a card from a creation payload, stamped with `now`
    pub fn from_new(id: CardId, new: NewCard, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            list_id: new.list_id,
            due_date: new.due_date,
            status: new.status,
            progress: new.progress.map(|p| p.min(100)),
            labels: new.labels,
            assignees: new.assignees,
            priority: new.priority,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reassigns the owning list; nothing else on the card changes
    pub fn move_to(&mut self, list_id: ListId) {
        self.list_id = list_id;
    }

    /// Overwrites every field present in `update`
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(title) = update.title {
            if !is_blank(&title) {
                self.title = title;
            }
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
        if let Some(priority) = update.priority {
            self.priority = Some(priority);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(progress) = update.progress {
            self.progress = Some(progress.min(100));
        }
        if let Some(labels) = update.labels {
            self.labels = labels;
        }
        if let Some(assignees) = update.assignees {
            self.assignees = assignees;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Payload for the add-card operation
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub title: String,
    pub list_id: ListId,
    pub description: Option<String>,
    pub status: Option<CardStatus>,
    pub priority: Option<Priority>,
    pub progress: Option<u8>,
    pub due_date: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

impl NewCard {
    pub fn new(title: impl Into<String>, list_id: ListId) -> Self {
        Self {
            title: title.into(),
            list_id,
            description: None,
            status: None,
            priority: None,
            progress: None,
            due_date: None,
            labels: Vec::new(),
            assignees: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Payload for the update-card operation.
///
/// `None` leaves a field untouched. `due_date` is doubly optional so that an
/// edit can clear it (`Some(None)`).
#[derive(Debug, Clone, PartialEq)]
pub struct CardUpdate {
    pub id: CardId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<CardStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub progress: Option<u8>,
    pub labels: Option<Vec<String>>,
    pub assignees: Option<Vec<String>>,
}

impl CardUpdate {
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
            progress: None,
            labels: None,
            assignees: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: CardStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn assignees(mut self, assignees: Vec<String>) -> Self {
        self.assignees = Some(assignees);
        self
    }
}

/// Payload for the move-card operation, as reported by a finished drag.
///
/// Only `destination_list_id` is acted on: lists keep no card ordering, so
/// the drop index is carried for callers but never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCard {
    pub card_id: CardId,
    pub source_list_id: ListId,
    pub destination_list_id: ListId,
    pub destination_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(CardId::from_stamp(1), "Write docs".to_string(), ListId::from_stamp(1))
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(CardStatus::from_str("todo").unwrap(), CardStatus::Todo);
        assert_eq!(
            CardStatus::from_str("In Progress").unwrap(),
            CardStatus::InProgress
        );
        assert_eq!(
            CardStatus::from_str("in-review").unwrap(),
            CardStatus::InReview
        );
        assert!(CardStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&CardStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5.0), 0);
        assert_eq!(clamp_progress(42.4), 42);
        assert_eq!(clamp_progress(99.6), 100);
        assert_eq!(clamp_progress(250.0), 100);
        assert_eq!(clamp_progress(f64::NAN), 0);
    }

    #[test]
    fn test_from_new_stamps_timestamps() {
        let now = Utc::now();
        let new = NewCard::new("Buy milk", ListId::from_stamp(1))
            .with_priority(Priority::High)
            .with_progress(140);
        let card = Card::from_new(CardId::from_stamp(9), new, now);

        assert_eq!(card.title, "Buy milk");
        assert_eq!(card.priority, Some(Priority::High));
        assert_eq!(card.progress, Some(100));
        assert_eq!(card.created_at, Some(now));
        assert_eq!(card.updated_at, Some(now));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut card = card().with_description("Public API");
        card.status = Some(CardStatus::Todo);

        card.apply(CardUpdate::new(card.id.clone()).progress(30));

        assert_eq!(card.title, "Write docs");
        assert_eq!(card.description.as_deref(), Some("Public API"));
        assert_eq!(card.status, Some(CardStatus::Todo));
        assert_eq!(card.progress, Some(30));
        assert!(card.updated_at.is_some());
    }

    #[test]
    fn test_apply_ignores_blank_title() {
        let mut card = card();
        card.apply(CardUpdate::new(card.id.clone()).title("   "));
        assert_eq!(card.title, "Write docs");
    }

    #[test]
    fn test_apply_can_clear_due_date() {
        let mut card = card();
        card.apply(CardUpdate::new(card.id.clone()).due_date(Some(Utc::now())));
        assert!(card.due_date.is_some());

        card.apply(CardUpdate::new(card.id.clone()).due_date(None));
        assert!(card.due_date.is_none());
    }

    #[test]
    fn test_move_to_rewrites_list_only() {
        let mut card = card().with_description("Public API");
        card.move_to(ListId::from_stamp(2));

        assert_eq!(card.list_id.as_str(), "list-2");
        assert_eq!(card.title, "Write docs");
        assert_eq!(card.description.as_deref(), Some("Public API"));
        assert!(card.updated_at.is_none());
    }

    #[test]
    fn test_bare_card_serialization_omits_optional_fields() {
        let json = serde_json::to_string(&card()).unwrap();
        assert_eq!(
            json,
            r#"{"id":"card-1","title":"Write docs","listId":"list-1"}"#
        );
    }

    #[test]
    fn test_deserialize_browser_shaped_card() {
        let json = r#"{
            "id": "card-1700000000000",
            "title": "Header",
            "description": "",
            "listId": "list-2",
            "status": "in_review",
            "priority": "low",
            "progress": 150,
            "dueDate": "2024-05-01T00:00:00.000Z",
            "labels": ["ui"],
            "createdAt": "2024-04-01T10:00:00.000Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.status, Some(CardStatus::InReview));
        assert_eq!(card.priority, Some(Priority::Low));
        assert_eq!(card.progress, Some(100));
        assert_eq!(card.labels, vec!["ui".to_string()]);
        assert!(card.due_date.is_some());
        assert!(card.updated_at.is_none());
    }
}
