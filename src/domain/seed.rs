use crate::domain::{
    board::Board,
    card::Card,
    id::{BoardId, CardId, ListId},
    list::List,
    state::AppState,
};

/// The dataset shown on first launch: one board, four workflow lists and a
/// handful of cards without timestamps.
pub fn demo_state() -> AppState {
    let board_id = BoardId::from_stamp(1);
    let list = |n: i64, title: &str| {
        List::new(ListId::from_stamp(n), title.to_string(), board_id.clone())
    };
    let card = |n: i64, title: &str, description: &str, list: i64| {
        Card::new(CardId::from_stamp(n), title.to_string(), ListId::from_stamp(list))
            .with_description(description)
    };

    AppState::from_parts(
        vec![Board::new(board_id.clone(), "Web Project - Dashboard".to_string())],
        vec![
            list(1, "To Do"),
            list(2, "In Progress"),
            list(3, "In Review"),
            list(4, "Done"),
        ],
        vec![
            card(1, "Create the Figma mockups", "Draw mockups for the main pages", 1),
            card(2, "Set up the router", "Wire up navigation between pages", 1),
            card(3, "Implement the header", "Build the header with navigation", 2),
            card(4, "Style the login form", "Apply the stylesheet to the form", 2),
            card(5, "Home page", "Review the design and animations", 3),
            card(6, "API documentation", "Write the developer documentation", 4),
        ],
        Some(board_id),
    )
}
