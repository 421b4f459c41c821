//! # Kanban Core
//!
//! State model, persistence and view projections for a boards → lists →
//! cards kanban.
//!
//! The whole board lives in one normalized [`AppState`]. A [`Store`] applies
//! named [`Action`]s to it synchronously and mirrors every change into a
//! single slot of an injected [`Storage`] backend, so the crate carries no
//! dependency on a particular UI or storage medium.

pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod theme;
pub mod view;

// Re-export commonly used types
pub use config::{SeedMode, SortConfig, StoreConfig};
pub use domain::{
    AppState, Board, BoardId, Card, CardId, CardStatus, CardUpdate, List, ListId, MoveCard,
    NewCard, Priority,
};
pub use error::{KanbanError, Result};
pub use persistence::PersistenceBridge;
pub use storage::Storage;
pub use store::{Action, Outcome, Store};
pub use theme::{Theme, ThemePreference};
pub use view::{on_drag_end, BoardView, DragKind, DraggableLocation, DropResult, ListView};
