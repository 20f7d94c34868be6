//! The browser editor's state machine as a library: an ordered row arena,
//! the initial-load guard, and the debounced autosave, driven through a
//! `PromptsProvider` so the whole edit-save loop runs without a browser.

pub mod error;
pub mod rows;
pub mod session;

pub use error::EditorError;
pub use rows::{PromptRow, RowArena, RowId};
pub use session::{AUTOSAVE_DELAY, EditorEvent, EditorSession, LoadState};
