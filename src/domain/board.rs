use crate::domain::id::BoardId;
use serde::{Deserialize, Serialize};

/// A kanban workspace; lists point at it through `board_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
}

impl Board {
    pub fn new(id: BoardId, title: String) -> Self {
        Self { id, title }
    }
}
