//! The user's not-yet-submitted input.

use serde::{Deserialize, Serialize};

/// Which branch of the draft counts toward validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    File,
}

/// An uploaded file held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// The pending input: free text or a single file, plus the chosen mode.
///
/// Both branches are retained when the mode switches; only validity changes.
/// Nothing here is ever reset automatically - the user owns every mutation.
#[derive(Debug, Clone, Default)]
pub struct InputDraft {
    mode: InputMode,
    text: String,
    file: Option<FileAttachment>,
}

impl InputDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn file(&self) -> Option<&FileAttachment> {
        self.file.as_ref()
    }

    /// Switch the active branch. Clears no data.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_file(&mut self, file: FileAttachment) {
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// True iff the active branch has content: trimmed text in `Text` mode,
    /// an attached file in `File` mode. The inactive branch is ignored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self.mode {
            InputMode::Text => !self.text.trim().is_empty(),
            InputMode::File => self.file.is_some(),
        }
    }

    /// What the submitted content looks like from the user's side: the raw
    /// text, or the file's name. Feeds the subject fallback and the outcome's
    /// `original_content`.
    #[must_use]
    pub fn original_content(&self) -> String {
        match self.mode {
            InputMode::Text => self.text.clone(),
            InputMode::File => self
                .file
                .as_ref()
                .map(|f| f.name.clone())
                .unwrap_or_default(),
        }
    }
}
