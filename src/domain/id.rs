use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            const PREFIX: &'static str = $prefix;

            /// Creates an ID from a numeric stamp (e.g. `card-1700000000000`)
            pub fn from_stamp(stamp: i64) -> Self {
                Self(format!("{}-{}", Self::PREFIX, stamp))
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Numeric suffix, when the ID was derived from a stamp
            pub fn stamp(&self) -> Option<i64> {
                self.0
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .and_then(|digits| digits.parse().ok())
            }
        }

        impl FromStr for $name {
            type Err = crate::error::KanbanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                match trimmed
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                {
                    Some(rest) if !rest.is_empty() => Ok(Self(trimmed.to_string())),
                    _ => Err(crate::error::KanbanError::InvalidId {
                        kind: $prefix,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a board (e.g. `board-1`, `board-1700000000000`)
    BoardId,
    "board"
);
entity_id!(
    /// Identifier of a list
    ListId,
    "list"
);
entity_id!(
    /// Identifier of a card
    CardId,
    "card"
);

/// Hands out timestamp-derived identifiers.
///
/// Stamps are Unix milliseconds, but never repeat: a request landing in the
/// same millisecond as the previous one (or after the clock stepped back)
/// gets the previous stamp plus one. Once `i64::MAX` has been issued the
/// generator is exhausted and returns `None`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_stamp: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose next stamp is strictly greater than `stamp`
    pub fn after(stamp: i64) -> Self {
        Self { last_stamp: stamp }
    }

    /// The most recently issued stamp
    pub fn last_stamp(&self) -> i64 {
        self.last_stamp
    }

    fn next_stamp(&mut self) -> Option<i64> {
        let now = Utc::now().timestamp_millis();
        self.last_stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp.checked_add(1)?
        };
        Some(self.last_stamp)
    }

    pub fn board_id(&mut self) -> Option<BoardId> {
        self.next_stamp().map(BoardId::from_stamp)
    }

    pub fn list_id(&mut self) -> Option<ListId> {
        self.next_stamp().map(ListId::from_stamp)
    }

    pub fn card_id(&mut self) -> Option<CardId> {
        self.next_stamp().map(CardId::from_stamp)
    }
}
