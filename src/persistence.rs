//! Mirrors the whole state tree into a single storage slot.
//!
//! The snapshot is the JSON text `{"board": <AppState>}`, the layout the
//! browser build wrote to local storage, so snapshots move freely between
//! the two.

use crate::{
    config::SeedMode,
    domain::{seed, AppState},
    error::Result,
    storage::Storage,
};
use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    board: &'a AppState,
}

/// Serializes a state into snapshot text
pub fn encode(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(&SnapshotRef { board: state })?)
}

/// Parses snapshot text; a bare state object without the `board` wrapper is
/// accepted too. Anything other than a JSON object is rejected.
pub fn decode(text: &str) -> Result<AppState> {
    let mut value: Value = serde_json::from_str(text)?;
    let board = value.get_mut("board").map(Value::take);
    let state = board.unwrap_or(value);
    if !state.is_object() {
        return Err(serde_json::Error::custom("snapshot state is not a JSON object").into());
    }
    Ok(AppState::deserialize(state)?)
}

/// The state used when nothing usable is stored
pub fn seed_state(mode: SeedMode) -> AppState {
    match mode {
        SeedMode::Demo => seed::demo_state(),
        SeedMode::Empty => AppState::new(),
    }
}

pub struct PersistenceBridge<S: Storage> {
    storage: S,
    key: String,
    seed: SeedMode,
}

impl<S: Storage> PersistenceBridge<S> {
    pub fn new(storage: S, key: impl Into<String>, seed: SeedMode) -> Self {
        Self {
            storage,
            key: key.into(),
            seed,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored snapshot, falling back to the seed when the slot is
    /// empty, unreadable or does not parse. Never fails.
    pub async fn load(&self) -> AppState {
        match self.storage.get(&self.key).await {
            Ok(Some(text)) => match decode(&text) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(
                        key = %self.key,
                        error = %err,
                        "stored state does not parse, using seed"
                    );
                    seed_state(self.seed)
                }
            },
            Ok(None) => {
                tracing::debug!(
                    key = %self.key,
                    seed = ?self.seed,
                    "no stored state, using seed"
                );
                seed_state(self.seed)
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "failed to read stored state, using seed"
                );
                seed_state(self.seed)
            }
        }
    }

    /// Writes the full snapshot, reporting failures to the caller
    pub async fn try_save(&self, state: &AppState) -> Result<()> {
        let text = encode(state)?;
        self.storage.set(&self.key, &text).await
    }

    /// Fire-and-forget write: failures are logged and dropped.
    ///
    /// Returns whether the snapshot reached storage.
    pub async fn save(&self, state: &AppState) -> bool {
        match self.try_save(state).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to persist state");
                false
            }
        }
    }

    /// Pretty-printed snapshot for backups
    pub fn export(&self, state: &AppState) -> Result<String> {
        Ok(serde_json::to_string_pretty(&SnapshotRef { board: state })?)
    }

    /// Parses a backup and writes it to the slot
    pub async fn import(&self, text: &str) -> Result<AppState> {
        let state = decode(text)?;
        self.try_save(&state).await?;
        Ok(state)
    }

    /// Empties the slot, so the next load starts from the seed
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        domain::{IdGenerator, NewCard},
        error::KanbanError,
        storage::MemoryStorage,
    };
    use async_trait::async_trait;

    /// Storage whose writes always fail
    pub(crate) struct ReadOnlyStorage;

    #[async_trait]
    impl Storage for ReadOnlyStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(KanbanError::StorageError("quota exceeded".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(KanbanError::StorageError("quota exceeded".to_string()))
        }

        async fn keys(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn bridge(seed: SeedMode) -> PersistenceBridge<MemoryStorage> {
        PersistenceBridge::new(MemoryStorage::new(), "trello-clone-state", seed)
    }

    #[tokio::test]
    async fn test_round_trip_is_deep_equal() {
        let bridge = bridge(SeedMode::Empty);
        let mut state = seed::demo_state();
        let mut ids = IdGenerator::after(state.latest_id_stamp());
        let list = state.lists()[0].id.clone();
        state
            .add_card(&mut ids, NewCard::new("Buy milk", list).with_progress(10))
            .unwrap();

        assert!(bridge.save(&state).await);
        assert_eq!(bridge.load().await, state);
    }

    #[tokio::test]
    async fn test_empty_slot_uses_seed() {
        assert_eq!(bridge(SeedMode::Demo).load().await, seed::demo_state());
        assert_eq!(bridge(SeedMode::Empty).load().await, AppState::new());
    }

    #[tokio::test]
    async fn test_corrupt_slot_uses_seed() {
        let bridge = bridge(SeedMode::Empty);
        bridge
            .storage()
            .set("trello-clone-state", "{not json")
            .await
            .unwrap();

        assert_eq!(bridge.load().await, AppState::new());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let bridge = PersistenceBridge::new(ReadOnlyStorage, "state", SeedMode::Demo);

        assert!(!bridge.save(&seed::demo_state()).await);
        assert!(bridge.try_save(&seed::demo_state()).await.is_err());
    }

    #[test]
    fn test_snapshot_layout() {
        let text = encode(&AppState::new()).unwrap();
        assert_eq!(
            text,
            r#"{"board":{"boards":[],"lists":[],"cards":[],"currentBoardId":null}}"#
        );
    }

    #[test]
    fn test_decode_browser_snapshot() {
        let text = r#"{"board":{
            "boards":[{"id":"board-1","title":"Projet"}],
            "lists":[{"id":"list-1","title":"À faire","boardId":"board-1"}],
            "cards":[{"id":"card-1","title":"Maquette","listId":"list-1"}],
            "currentBoardId":"board-1"
        }}"#;

        let state = decode(text).unwrap();
        assert_eq!(state.boards().len(), 1);
        assert_eq!(state.cards()[0].list_id.as_str(), "list-1");
        assert_eq!(state.current_board().unwrap().title, "Projet");
    }

    #[test]
    fn test_decode_bare_state() {
        let state = decode(r#"{"boards":[{"id":"board-9","title":"Bare"}]}"#).unwrap();
        assert_eq!(state.boards()[0].title, "Bare");
        assert!(state.current_board_id().is_none());
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        for text in ["[]", "null", "42", r#"{"board":[]}"#, r#"{"board":null}"#] {
            assert!(
                matches!(decode(text), Err(KanbanError::SerializationError(_))),
                "{text}"
            );
        }
    }

    #[tokio::test]
    async fn test_array_slot_uses_seed() {
        let bridge = bridge(SeedMode::Demo);
        bridge.storage().set("trello-clone-state", "[]").await.unwrap();

        assert_eq!(bridge.load().await, seed::demo_state());
    }

    #[tokio::test]
    async fn test_export_import() {
        let source = bridge(SeedMode::Demo);
        let text = source.export(&seed::demo_state()).unwrap();

        let target = bridge(SeedMode::Empty);
        let imported = target.import(&text).await.unwrap();

        assert_eq!(imported, seed::demo_state());
        assert_eq!(target.load().await, seed::demo_state());
    }

    #[tokio::test]
    async fn test_import_rejects_garbage_without_writing() {
        let bridge = bridge(SeedMode::Empty);

        assert!(bridge.import("[1, 2, 3]").await.is_err());
        assert!(bridge.import(r#"{"board":{"cards":[{"id":"card-1"}]}}"#).await.is_err());
        assert_eq!(bridge.storage().get("trello-clone-state").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let bridge = bridge(SeedMode::Empty);
        bridge.save(&seed::demo_state()).await;
        bridge.clear().await.unwrap();

        assert_eq!(bridge.load().await, AppState::new());
    }
}
