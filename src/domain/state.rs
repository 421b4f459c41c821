use crate::domain::{
    board::Board,
    card::{Card, CardUpdate, MoveCard, NewCard},
    id::{BoardId, CardId, IdGenerator, ListId},
    list::List,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The normalized state tree: three flat collections joined by foreign keys,
/// plus the board the user is looking at.
///
/// Collections keep insertion order, which is also display order. Every
/// mutation is total: an unknown id, an unknown parent or a blank title makes
/// the call a no-op that reports `false`/`None` and leaves the state as it was.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    boards: Vec<Board>,
    #[serde(default)]
    lists: Vec<List>,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    current_board_id: Option<BoardId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        boards: Vec<Board>,
        lists: Vec<List>,
        cards: Vec<Card>,
        current_board_id: Option<BoardId>,
    ) -> Self {
        Self {
            boards,
            lists,
            cards,
            current_board_id,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn current_board_id(&self) -> Option<&BoardId> {
        self.current_board_id.as_ref()
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| &board.id == id)
    }

    pub fn list(&self, id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// The current board, if it is set and still exists
    pub fn current_board(&self) -> Option<&Board> {
        self.current_board_id.as_ref().and_then(|id| self.board(id))
    }

    /// Lists of a board in insertion order
    pub fn lists_for_board<'a>(&'a self, board_id: &'a BoardId) -> impl Iterator<Item = &'a List> {
        self.lists.iter().filter(move |list| &list.board_id == board_id)
    }

    /// Cards of a list in insertion order
    pub fn cards_for_list<'a>(&'a self, list_id: &'a ListId) -> impl Iterator<Item = &'a Card> {
        self.cards.iter().filter(move |card| &card.list_id == list_id)
    }

    /// Highest numeric stamp among all stored ids, so a generator seeded from
    /// it never reissues one of them
    pub fn latest_id_stamp(&self) -> i64 {
        let boards = self.boards.iter().filter_map(|b| b.id.stamp());
        let lists = self.lists.iter().filter_map(|l| l.id.stamp());
        let cards = self.cards.iter().filter_map(|c| c.id.stamp());
        boards.chain(lists).chain(cards).fold(0, i64::max)
    }

    /// Adds a board and makes it the current one
    pub fn add_board(&mut self, ids: &mut IdGenerator, title: &str) -> Option<BoardId> {
        if is_blank(title) {
            return None;
        }
        let id = ids.board_id()?;
        self.boards.push(Board::new(id.clone(), title.to_string()));
        self.current_board_id = Some(id.clone());
        Some(id)
    }

    pub fn set_current_board(&mut self, id: &BoardId) -> bool {
        if self.board(id).is_none() {
            return false;
        }
        self.current_board_id = Some(id.clone());
        true
    }

    pub fn add_list(
        &mut self,
        ids: &mut IdGenerator,
        title: &str,
        board_id: &BoardId,
    ) -> Option<ListId> {
        if is_blank(title) {
            return None;
        }
        self.board(board_id)?;

        let id = ids.list_id()?;
        self.lists.push(List::new(id.clone(), title.to_string(), board_id.clone()));
        Some(id)
    }

    pub fn add_card(&mut self, ids: &mut IdGenerator, new: NewCard) -> Option<CardId> {
        if is_blank(&new.title) {
            return None;
        }
        self.list(&new.list_id)?;

        let id = ids.card_id()?;
        self.cards.push(Card::from_new(id.clone(), new, Utc::now()));
        Some(id)
    }

    pub fn update_card(&mut self, update: CardUpdate) -> bool {
        match self.cards.iter_mut().find(|card| card.id == update.id) {
            Some(card) => {
                card.apply(update);
                true
            }
            None => false,
        }
    }

    /// Removes exactly one card; every other card is left untouched
    pub fn delete_card(&mut self, id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| &card.id != id);
        self.cards.len() != before
    }

    /// Reassigns a card to another list. Only `list_id` changes.
    pub fn move_card(&mut self, request: &MoveCard) -> bool {
        if self.list(&request.destination_list_id).is_none() {
            return false;
        }
        match self
            .cards
            .iter_mut()
            .find(|card| card.id == request.card_id)
        {
            Some(card) if card.list_id != request.destination_list_id => {
                card.move_to(request.destination_list_id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn update_list(&mut self, id: &ListId, title: &str) -> bool {
        if is_blank(title) {
            return false;
        }
        match self.lists.iter_mut().find(|list| &list.id == id) {
            Some(list) => {
                list.set_title(title.to_string());
                true
            }
            None => false,
        }
    }

    /// Removes a list together with every card it holds.
    ///
    /// Returns the number of cards removed with it, or `None` if the list
    /// does not exist.
    pub fn delete_list(&mut self, id: &ListId) -> Option<usize> {
        let position = self.lists.iter().position(|list| &list.id == id)?;
        self.lists.remove(position);

        let before = self.cards.len();
        self.cards.retain(|card| &card.list_id != id);
        Some(before - self.cards.len())
    }
}

/// Titles are stored as given; whitespace-only ones are rejected
pub(crate) fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}
