use crate::error::EditorError;
use crate::rows::{RowArena, RowId};
use promptpad_api::PromptsProvider;
use promptpad_shared::{Prompt, PromptKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Quiet window after the last edit before an autosave fires.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

/// Whether the initial fetch has populated the table. Until it has, every
/// save attempt is suppressed so an early edit cannot overwrite the stored
/// document with a half-empty table. A failed load stays `NotLoaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
}

/// Outcome notifications for background autosaves. Operations invoked
/// directly, such as [`EditorSession::save_now`], report through their
/// return value instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Saved,
    SaveFailed(String),
}

/// The editing state machine: an ordered row arena behind an initial-load
/// guard, with a trailing-edge debounced autosave. Every edit restarts the
/// quiet window; only the last scheduled save in a burst runs, and a save
/// that has already started is never aborted by a later edit.
pub struct EditorSession {
    provider: Arc<dyn PromptsProvider>,
    rows: RowArena,
    load_state: LoadState,
    pending_autosave: Option<CancellationToken>,
    event_tx: mpsc::UnboundedSender<EditorEvent>,
}

impl EditorSession {
    pub fn new(
        provider: Arc<dyn PromptsProvider>,
    ) -> (Self, mpsc::UnboundedReceiver<EditorEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Self {
                provider,
                rows: RowArena::default(),
                load_state: LoadState::default(),
                pending_autosave: None,
                event_tx,
            },
            event_rx,
        )
    }

    /// Fetches the stored document and rebuilds the table from it. On
    /// failure the table is left as it was and the load guard stays down.
    pub async fn load(&mut self) -> Result<(), EditorError> {
        let prompts = self
            .provider
            .fetch_prompts()
            .await
            .map_err(EditorError::Fetch)?;
        self.rows = RowArena::from_prompts(prompts);
        self.load_state = LoadState::Loaded;
        debug!("Loaded {} prompts", self.rows.len());
        Ok(())
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn rows(&self) -> &RowArena {
        &self.rows
    }

    /// Full-table serialization in display order, exactly what a save sends.
    pub fn snapshot(&self) -> Vec<Prompt> {
        self.rows.snapshot()
    }

    /// Appends a freshly seeded row and schedules an autosave.
    pub fn add_row(&mut self) -> RowId {
        let id = self.rows.push(Prompt {
            kind: Some(PromptKind::System),
            name: "New Prompt".to_string(),
            prompt: String::new(),
        });
        self.schedule_autosave();
        id
    }

    /// Removes a row and schedules an autosave. There is no undo.
    pub fn delete_row(&mut self, id: RowId) -> bool {
        if self.rows.remove(id).is_none() {
            return false;
        }
        self.schedule_autosave();
        true
    }

    pub fn set_kind(&mut self, id: RowId, kind: PromptKind) -> bool {
        self.edit(id, |prompt| prompt.kind = Some(kind))
    }

    pub fn set_name(&mut self, id: RowId, name: impl Into<String>) -> bool {
        let name = name.into();
        self.edit(id, |prompt| prompt.name = name)
    }

    pub fn set_prompt(&mut self, id: RowId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.edit(id, |prompt| prompt.prompt = text)
    }

    /// Hands back the row's text for the caller to place on a clipboard.
    /// Reading never schedules a save.
    pub fn copy_prompt(&self, id: RowId) -> Option<String> {
        self.rows.get(id).map(|row| row.prompt.prompt.clone())
    }

    /// Saves the current table immediately, bypassing the debounce. A
    /// pending debounced save is left untouched; if it fires later it sends
    /// the same or newer state. Before a successful load this is refused.
    pub async fn save_now(&self) -> Result<(), EditorError> {
        if self.load_state != LoadState::Loaded {
            return Err(EditorError::NotLoaded);
        }
        self.provider
            .replace_prompts(&self.rows.snapshot())
            .await
            .map_err(EditorError::Save)
    }

    fn edit(&mut self, id: RowId, apply: impl FnOnce(&mut Prompt)) -> bool {
        match self.rows.prompt_mut(id) {
            Some(prompt) => {
                apply(prompt);
                self.schedule_autosave();
                true
            }
            None => false,
        }
    }

    /// Restarts the quiet window. The cancellation token is observed only
    /// while the timer sleeps; once the window elapses the save runs to
    /// completion even if further edits arrive meanwhile.
    fn schedule_autosave(&mut self) {
        if self.load_state != LoadState::Loaded {
            return;
        }
        if let Some(pending) = self.pending_autosave.take() {
            pending.cancel();
        }

        let cancel = CancellationToken::new();
        self.pending_autosave = Some(cancel.clone());

        let provider = self.provider.clone();
        let event_tx = self.event_tx.clone();
        let payload = self.rows.snapshot();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(AUTOSAVE_DELAY) => {
                    match provider.replace_prompts(&payload).await {
                        Ok(()) => {
                            let _ = event_tx.send(EditorEvent::Saved);
                        }
                        Err(e) => {
                            error!("Autosave failed: {}", e);
                            let _ = event_tx.send(EditorEvent::SaveFailed(e));
                        }
                    }
                }
            }
        });
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_autosave.take() {
            pending.cancel();
        }
    }
}
