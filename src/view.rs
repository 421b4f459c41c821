//! Read-side projections of the state tree and the bridge from drag gestures
//! to the move action.

use crate::{
    config::SortConfig,
    domain::{
        sort_cards, AppState, Board, BoardId, Card, CardId, CardStatus, List, ListId, MoveCard,
        NewCard, Priority,
    },
    store::Action,
};

/// A list with the cards currently assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub list: &'a List,
    pub cards: Vec<&'a Card>,
}

/// One board as it is displayed: its lists in insertion order, each with
/// its cards in the configured order
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub lists: Vec<ListView<'a>>,
}

impl<'a> BoardView<'a> {
    /// Builds the view for `route_board_id`, or, without a route, for the
    /// current board and then the first board. `None` when the routed board
    /// does not exist or there are no boards at all.
    pub fn project(
        state: &'a AppState,
        route_board_id: Option<&BoardId>,
        sort: SortConfig,
    ) -> Option<Self> {
        let board = match route_board_id {
            Some(id) => state.board(id)?,
            None => state
                .current_board()
                .or_else(|| state.boards().first())?,
        };

        let lists = state
            .lists_for_board(&board.id)
            .map(|list| {
                let mut cards: Vec<&Card> = state.cards_for_list(&list.id).collect();
                sort_cards(&mut cards, sort.field, sort.order);
                ListView { list, cards }
            })
            .collect();

        Some(Self { board, lists })
    }

    pub fn list(&self, id: &ListId) -> Option<&ListView<'a>> {
        self.lists.iter().find(|view| &view.list.id == id)
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|view| view.cards.len()).sum()
    }
}

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Card,
    List,
}

/// A drop zone and the index within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// Completion report of a drag gesture, as delivered by the drag-and-drop
/// layer. `destination` is `None` when the item was dropped outside any zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub draggable_id: String,
    pub kind: DragKind,
    pub source: DraggableLocation,
    pub destination: Option<DraggableLocation>,
}

/// Turns a finished drag into the action to dispatch, if any.
///
/// Drops outside a zone, drops back onto the starting slot and list drags
/// produce nothing.
pub fn on_drag_end(result: &DropResult) -> Option<Action> {
    let destination = result.destination.as_ref()?;
    if destination == &result.source {
        return None;
    }

    match result.kind {
        DragKind::Card => {
            let parsed = (
                result.draggable_id.parse::<CardId>(),
                result.source.droppable_id.parse::<ListId>(),
                destination.droppable_id.parse::<ListId>(),
            );
            match parsed {
                (Ok(card_id), Ok(source_list_id), Ok(destination_list_id)) => {
                    Some(Action::MoveCard(MoveCard {
                        card_id,
                        source_list_id,
                        destination_list_id,
                        destination_index: destination.index,
                    }))
                }
                _ => {
                    tracing::debug!(
                        draggable = %result.draggable_id,
                        "drop with unrecognised ids"
                    );
                    None
                }
            }
        }
        DragKind::List => None,
    }
}

/// Status a new card gets from the title of the list it is created in
pub fn default_status_for_list(title: &str) -> CardStatus {
    let title = title.to_lowercase();
    if title.contains("progress") || title.contains("en cours") {
        CardStatus::InProgress
    } else if title.contains("review") || title.contains("révision") {
        CardStatus::InReview
    } else if title.contains("done") || title.contains("terminé") {
        CardStatus::Done
    } else {
        CardStatus::Todo
    }
}

/// Creation payload for a card added from a list's quick-add field
pub fn new_card_for_list(list: &List, title: impl Into<String>) -> NewCard {
    NewCard::new(title, list.id.clone())
        .with_status(default_status_for_list(&list.title))
        .with_priority(Priority::Medium)
        .with_progress(0)
        .with_description("")
}
