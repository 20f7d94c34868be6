use async_trait::async_trait;
use promptpad_shared::Prompt;

pub mod remote;

pub use remote::{ClientConfig, RemoteClient};

/// Access to a prompt document: fetch it whole, replace it whole. There is
/// no partial update; every write overwrites the full stored sequence.
#[async_trait]
pub trait PromptsProvider: Send + Sync {
    async fn fetch_prompts(&self) -> Result<Vec<Prompt>, String>;
    async fn replace_prompts(&self, prompts: &[Prompt]) -> Result<(), String>;
}
