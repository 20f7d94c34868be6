pub mod models;

pub use models::{Prompt, PromptKind};
