pub mod board;
pub mod card;
pub mod id;
pub mod list;
pub mod seed;
pub mod sorting;
pub mod state;

pub use board::Board;
pub use card::{Card, CardStatus, CardUpdate, MoveCard, NewCard, Priority};
pub use id::{BoardId, CardId, IdGenerator, ListId};
pub use list::List;
pub use sorting::{sort_cards, SortField, SortOrder};
pub use state::AppState;
