use promptpad_shared::{Prompt, PromptKind};
use uuid::Uuid;

/// Stable synthetic identifier for one row. The wire format is positional,
/// so identifiers never leave the process; they exist to keep row handles
/// valid across mid-list deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// One table row: a prompt plus its synthetic identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRow {
    pub id: RowId,
    pub prompt: Prompt,
}

/// Ordered row storage. Display order, save order, and iteration order are
/// the same order.
#[derive(Debug, Default)]
pub struct RowArena {
    rows: Vec<PromptRow>,
}

impl RowArena {
    pub fn from_prompts(prompts: Vec<Prompt>) -> Self {
        Self {
            rows: prompts
                .into_iter()
                .map(|prompt| PromptRow {
                    id: RowId::new(),
                    prompt,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row identifiers in display order.
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptRow> {
        self.rows.iter()
    }

    pub fn get(&self, id: RowId) -> Option<&PromptRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn prompt_mut(&mut self, id: RowId) -> Option<&mut Prompt> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .map(|row| &mut row.prompt)
    }

    /// Appends a row and hands back its identifier.
    pub fn push(&mut self, prompt: Prompt) -> RowId {
        let id = RowId::new();
        self.rows.push(PromptRow { id, prompt });
        id
    }

    pub fn remove(&mut self, id: RowId) -> Option<Prompt> {
        let index = self.rows.iter().position(|row| row.id == id)?;
        Some(self.rows.remove(index).prompt)
    }

    /// What a save sends: every row in display order, with the rendered
    /// `System` default applied to rows that had no stored type.
    pub fn snapshot(&self) -> Vec<Prompt> {
        self.rows
            .iter()
            .map(|row| Prompt {
                kind: Some(row.prompt.kind_or_default()),
                name: row.prompt.name.clone(),
                prompt: row.prompt.prompt.clone(),
            })
            .collect()
    }
}
