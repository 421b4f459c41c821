use crate::domain::card::{Card, CardStatus, Priority};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for ordering the cards of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    Title,
    Status,
    Priority,
    #[default]
    Created,
    Updated,
    Due,
    Progress,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "priority" => Ok(SortField::Priority),
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "due" => Ok(SortField::Due),
            "progress" => Ok(SortField::Progress),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: title, status, priority, created, updated, due, progress",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts cards in place by `field` and `order`.
///
/// The sort is stable, so cards that compare equal keep their insertion
/// order. Cards missing the sorted value (no status, no timestamps, ...)
/// always go after the ones that have it, whatever the direction.
///
/// # Examples
/// ```
/// use kanban_core::domain::card::Card;
/// use kanban_core::domain::id::{CardId, ListId};
/// use kanban_core::domain::sorting::{sort_cards, SortField, SortOrder};
///
/// let b = Card::new(CardId::from_stamp(2), "B".to_string(), ListId::from_stamp(1));
/// let a = Card::new(CardId::from_stamp(1), "a".to_string(), ListId::from_stamp(1));
/// let mut cards = vec![&b, &a];
///
/// sort_cards(&mut cards, SortField::Title, SortOrder::Ascending);
/// assert_eq!(cards[0].title, "a");
/// ```
pub fn sort_cards(cards: &mut [&Card], field: SortField, order: SortOrder) {
    cards.sort_by(|a, b| match field {
        SortField::Title => directed(
            a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            order,
        ),
        SortField::Status => compare_option(
            a.status.map(status_rank),
            b.status.map(status_rank),
            order,
        ),
        SortField::Priority => compare_option(
            a.priority.map(priority_rank),
            b.priority.map(priority_rank),
            order,
        ),
        SortField::Created => compare_option(a.created_at, b.created_at, order),
        SortField::Updated => compare_option(a.updated_at, b.updated_at, order),
        SortField::Due => compare_option(a.due_date, b.due_date, order),
        SortField::Progress => compare_option(a.progress, b.progress, order),
    });
}

fn directed(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => cmp,
        SortOrder::Descending => cmp.reverse(),
    }
}

/// Workflow position: Todo → InProgress → InReview → Done
fn status_rank(status: CardStatus) -> u8 {
    match status {
        CardStatus::Todo => 0,
        CardStatus::InProgress => 1,
        CardStatus::InReview => 2,
        CardStatus::Done => 3,
    }
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Low => 0,
        Priority::Medium => 1,
        Priority::High => 2,
    }
}

/// Compares two optional values; `None` sorts last in both directions
fn compare_option<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{CardId, ListId};
    use chrono::{Duration, Utc};

    fn card(n: i64, title: &str) -> Card {
        Card::new(CardId::from_stamp(n), title.to_string(), ListId::from_stamp(1))
    }

    fn titles(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_sort_cards_by_title_case_insensitive() {
        let (a, b, c) = (card(1, "zebra"), card(2, "Apple"), card(3, "BANANA"));
        let mut cards = vec![&a, &b, &c];

        sort_cards(&mut cards, SortField::Title, SortOrder::Ascending);
        assert_eq!(titles(&cards), vec!["Apple", "BANANA", "zebra"]);

        sort_cards(&mut cards, SortField::Title, SortOrder::Descending);
        assert_eq!(titles(&cards), vec!["zebra", "BANANA", "Apple"]);
    }

    #[test]
    fn test_sort_cards_newest_first() {
        let now = Utc::now();
        let mut old = card(1, "old");
        old.created_at = Some(now - Duration::days(2));
        let mut new = card(2, "new");
        new.created_at = Some(now);
        let seeded = card(3, "seeded");

        let mut cards = vec![&seeded, &old, &new];
        sort_cards(&mut cards, SortField::Created, SortOrder::Descending);

        assert_eq!(titles(&cards), vec!["new", "old", "seeded"]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let mut due = card(1, "due");
        due.due_date = Some(Utc::now());
        let undated = card(2, "undated");

        let mut cards = vec![&undated, &due];
        sort_cards(&mut cards, SortField::Due, SortOrder::Ascending);
        assert_eq!(titles(&cards), vec!["due", "undated"]);

        sort_cards(&mut cards, SortField::Due, SortOrder::Descending);
        assert_eq!(titles(&cards), vec!["due", "undated"]);
    }

    #[test]
    fn test_sort_by_status_follows_workflow() {
        let mut done = card(1, "done");
        done.status = Some(CardStatus::Done);
        let mut todo = card(2, "todo");
        todo.status = Some(CardStatus::Todo);
        let mut review = card(3, "review");
        review.status = Some(CardStatus::InReview);

        let mut cards = vec![&done, &todo, &review];
        sort_cards(&mut cards, SortField::Status, SortOrder::Ascending);

        assert_eq!(titles(&cards), vec!["todo", "review", "done"]);
    }

    #[test]
    fn test_sort_by_priority_and_progress() {
        let mut low = card(1, "low");
        low.priority = Some(Priority::Low);
        low.progress = Some(90);
        let mut high = card(2, "high");
        high.priority = Some(Priority::High);
        high.progress = Some(10);

        let mut cards = vec![&low, &high];
        sort_cards(&mut cards, SortField::Priority, SortOrder::Descending);
        assert_eq!(titles(&cards), vec!["high", "low"]);

        sort_cards(&mut cards, SortField::Progress, SortOrder::Descending);
        assert_eq!(titles(&cards), vec!["low", "high"]);
    }

    #[test]
    fn test_equal_cards_keep_insertion_order() {
        let (a, b, c) = (card(1, "a"), card(2, "b"), card(3, "c"));
        let mut cards = vec![&a, &b, &c];

        sort_cards(&mut cards, SortField::Created, SortOrder::Descending);
        assert_eq!(titles(&cards), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_sort_options() {
        assert_eq!(SortField::from_str("Due").unwrap(), SortField::Due);
        assert!(SortField::from_str("id").is_err());
        assert_eq!(SortOrder::from_str("ASC").unwrap(), SortOrder::Ascending);
        assert!(SortOrder::from_str("up").is_err());
    }
}
