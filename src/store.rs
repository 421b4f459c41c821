use crate::{
    config::StoreConfig,
    domain::{AppState, BoardId, CardId, CardUpdate, IdGenerator, ListId, MoveCard, NewCard},
    error::Result,
    persistence::{seed_state, PersistenceBridge},
    storage::Storage,
    theme::{self, Theme, ThemePreference},
    view::{on_drag_end, BoardView, DropResult},
};

/// The named mutations a caller can dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddBoard { title: String },
    SetCurrentBoard(BoardId),
    AddList { title: String, board_id: BoardId },
    AddCard(NewCard),
    UpdateCard(CardUpdate),
    DeleteCard(CardId),
    MoveCard(MoveCard),
    UpdateList { id: ListId, title: String },
    DeleteList(ListId),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBoard { .. } => "add_board",
            Self::SetCurrentBoard(_) => "set_current_board",
            Self::AddList { .. } => "add_list",
            Self::AddCard(_) => "add_card",
            Self::UpdateCard(_) => "update_card",
            Self::DeleteCard(_) => "delete_card",
            Self::MoveCard(_) => "move_card",
            Self::UpdateList { .. } => "update_list",
            Self::DeleteList(_) => "delete_list",
        }
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    BoardCreated(BoardId),
    ListCreated(ListId),
    CardCreated(CardId),
    Applied,
    /// Unknown id, unknown parent, blank title or no fresh id left; nothing
    /// changed
    Ignored,
}

impl Outcome {
    fn from_flag(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

type Listener = Box<dyn FnMut(&AppState) + Send>;

/// Single owner of the state tree.
///
/// Every dispatched action runs to completion synchronously against the
/// in-memory state; when it changed something, the full snapshot is written
/// through the bridge and subscribers are called with the new state.
pub struct Store<S: Storage> {
    state: AppState,
    ids: IdGenerator,
    bridge: PersistenceBridge<S>,
    config: StoreConfig,
    listeners: Vec<Listener>,
}

impl<S: Storage> Store<S> {
    /// Opens a store on `storage`, loading the snapshot or the configured seed
    pub async fn open(storage: S, config: StoreConfig) -> Self {
        let bridge = PersistenceBridge::new(storage, config.state_key.clone(), config.seed);
        let state = bridge.load().await;
        tracing::info!(
            key = bridge.key(),
            boards = state.boards().len(),
            lists = state.lists().len(),
            cards = state.cards().len(),
            "opened kanban store"
        );

        Self {
            ids: IdGenerator::after(state.latest_id_stamp()),
            state,
            bridge,
            config,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        self.bridge.storage()
    }

    /// Registers a callback run after every applied action
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies an action, mirrors the new snapshot to storage and notifies
    /// subscribers. Ignored actions neither write nor notify.
    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        let name = action.name();
        let outcome = self.apply(action);

        if outcome.is_ignored() {
            tracing::debug!(action = name, "action ignored");
            return outcome;
        }

        tracing::debug!(action = name, outcome = ?outcome, "action applied");
        self.bridge.save(&self.state).await;
        self.notify();
        outcome
    }

    fn apply(&mut self, action: Action) -> Outcome {
        let state = &mut self.state;
        let ids = &mut self.ids;

        match action {
            Action::AddBoard { title } => state
                .add_board(ids, &title)
                .map_or(Outcome::Ignored, Outcome::BoardCreated),
            Action::SetCurrentBoard(id) => Outcome::from_flag(state.set_current_board(&id)),
            Action::AddList { title, board_id } => state
                .add_list(ids, &title, &board_id)
                .map_or(Outcome::Ignored, Outcome::ListCreated),
            Action::AddCard(new) => state
                .add_card(ids, new)
                .map_or(Outcome::Ignored, Outcome::CardCreated),
            Action::UpdateCard(update) => Outcome::from_flag(state.update_card(update)),
            Action::DeleteCard(id) => Outcome::from_flag(state.delete_card(&id)),
            Action::MoveCard(request) => Outcome::from_flag(state.move_card(&request)),
            Action::UpdateList { id, title } => {
                Outcome::from_flag(state.update_list(&id, &title))
            }
            Action::DeleteList(id) => match state.delete_list(&id) {
                Some(removed_cards) => {
                    tracing::debug!(list = %id, removed_cards, "list deleted with its cards");
                    Outcome::Applied
                }
                None => Outcome::Ignored,
            },
        }
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    pub async fn add_board(&mut self, title: impl Into<String>) -> Option<BoardId> {
        match self.dispatch(Action::AddBoard { title: title.into() }).await {
            Outcome::BoardCreated(id) => Some(id),
            _ => None,
        }
    }

    pub async fn set_current_board(&mut self, id: BoardId) -> bool {
        !self.dispatch(Action::SetCurrentBoard(id)).await.is_ignored()
    }

    pub async fn add_list(
        &mut self,
        title: impl Into<String>,
        board_id: BoardId,
    ) -> Option<ListId> {
        let action = Action::AddList {
            title: title.into(),
            board_id,
        };
        match self.dispatch(action).await {
            Outcome::ListCreated(id) => Some(id),
            _ => None,
        }
    }

    pub async fn add_card(&mut self, new: NewCard) -> Option<CardId> {
        match self.dispatch(Action::AddCard(new)).await {
            Outcome::CardCreated(id) => Some(id),
            _ => None,
        }
    }

    pub async fn update_card(&mut self, update: CardUpdate) -> bool {
        !self.dispatch(Action::UpdateCard(update)).await.is_ignored()
    }

    pub async fn delete_card(&mut self, id: CardId) -> bool {
        !self.dispatch(Action::DeleteCard(id)).await.is_ignored()
    }

    pub async fn move_card(&mut self, request: MoveCard) -> bool {
        !self.dispatch(Action::MoveCard(request)).await.is_ignored()
    }

    pub async fn update_list(&mut self, id: ListId, title: impl Into<String>) -> bool {
        let action = Action::UpdateList {
            id,
            title: title.into(),
        };
        !self.dispatch(action).await.is_ignored()
    }

    pub async fn delete_list(&mut self, id: ListId) -> bool {
        !self.dispatch(Action::DeleteList(id)).await.is_ignored()
    }

    /// Dispatches the move a finished drag asks for, if any
    pub async fn handle_drop(&mut self, result: &DropResult) -> Outcome {
        match on_drag_end(result) {
            Some(action) => self.dispatch(action).await,
            None => Outcome::Ignored,
        }
    }

    pub async fn theme_preference(&self) -> ThemePreference {
        theme::load_preference(self.storage(), &self.config).await
    }

    /// Stores a theme preference and returns the theme it resolves to
    pub async fn set_theme_preference(
        &self,
        preference: ThemePreference,
        system_prefers_dark: bool,
    ) -> Result<Theme> {
        theme::save_preference(
            self.storage(),
            &self.config,
            preference,
            system_prefers_dark,
        )
        .await
    }

    /// Projects a board for display, sorted per the configured card order
    pub fn view(&self, route_board_id: Option<&BoardId>) -> Option<BoardView<'_>> {
        BoardView::project(&self.state, route_board_id, self.config.sort)
    }

    pub fn export(&self) -> Result<String> {
        self.bridge.export(&self.state)
    }

    /// Replaces the whole state with a backup
    pub async fn import(&mut self, text: &str) -> Result<()> {
        let state = self.bridge.import(text).await?;
        self.ids = IdGenerator::after(self.ids.last_stamp().max(state.latest_id_stamp()));
        self.state = state;
        self.notify();
        Ok(())
    }

    /// Drops the stored snapshot and starts over from the seed
    pub async fn reset(&mut self) -> Result<()> {
        self.bridge.clear().await?;
        self.state = seed_state(self.config.seed);
        self.ids = IdGenerator::after(self.ids.last_stamp().max(self.state.latest_id_stamp()));
        self.notify();
        Ok(())
    }
}
