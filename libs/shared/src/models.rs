use serde::{Deserialize, Serialize};

/// Role a prompt is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptKind {
    #[default]
    System,
    User,
}

/// One named prompt, in the shape stored on disk and sent over the wire.
///
/// The role serializes under the `type` key and may be absent in stored
/// documents. Absence is preserved through (de)serialization: rendering
/// applies the `System` default without touching the document, and the
/// stored value only changes once a save writes the rendered state back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PromptKind>,
    pub name: String,
    pub prompt: String,
}

impl Prompt {
    /// Role to display when the stored entry omits `type`.
    pub fn kind_or_default(&self) -> PromptKind {
        self.kind.unwrap_or_default()
    }
}
