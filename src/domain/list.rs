use crate::domain::id::{BoardId, ListId};
use serde::{Deserialize, Serialize};

/// A column within a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub board_id: BoardId,
}

impl List {
    pub fn new(id: ListId, title: String, board_id: BoardId) -> Self {
        Self {
            id,
            title,
            board_id,
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_uses_camel_case_board_reference() {
        let list = List::new(
            ListId::from_stamp(1),
            "To Do".to_string(),
            BoardId::from_stamp(1),
        );
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"id":"list-1","title":"To Do","boardId":"board-1"}"#);

        let parsed: List = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list);
    }
}
