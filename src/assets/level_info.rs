//! # Level Info
//!
//! Every map level is paired with an info resource that the map bytes only reference by
//! index: the ceiling height, the text entries triggers point at, and the sound cues.
//! Decoding code reaches it only through the `LevelInfo` trait. `InfoTable` is a plain
//! serde-backed implementation for tools and tests.

use std::collections::HashMap;

use serde::Deserialize;

/// A narrative text entry resolved for a trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextData<'a> {
    /// The text shown to the player.
    pub text: &'a str,
    /// Whether the text is shown only the first time the cell is entered.
    pub displayed_once: bool,
}

/// What a map decode needs from the paired info resource.
pub trait LevelInfo {
    /// Ceiling height in arena units, if the resource defines one.
    fn ceiling_height(&self) -> Option<u16>;

    /// The narrative text at `index`. Returns `None` for missing indices and for entries
    /// that are keys or riddles rather than plain text.
    fn text(&self, index: usize) -> Option<TextData<'_>>;

    /// The sound identifier at `index`.
    fn sound(&self, index: usize) -> Option<&str>;
}

/// A text entry of the info table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InfoText {
    /// Plain narrative text.
    Text {
        /// Displayed text.
        text: String,
        /// Shown only once per load.
        #[serde(default)]
        displayed_once: bool,
    },
    /// A key the player can pick up.
    Key {
        /// Key identifier.
        id: u32,
    },
    /// A riddle with its answer.
    Riddle {
        /// The question.
        riddle: String,
        /// The accepted answer.
        answer: String,
    },
}

/// An info resource held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InfoTable {
    /// Ceiling height in arena units.
    pub ceiling_height: Option<u16>,
    /// Text entries by index.
    pub texts: HashMap<usize, InfoText>,
    /// Sound identifiers by index.
    pub sounds: Vec<String>,
}

impl InfoTable {
    /// Parses an info table from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl LevelInfo for InfoTable {
    fn ceiling_height(&self) -> Option<u16> {
        self.ceiling_height
    }

    fn text(&self, index: usize) -> Option<TextData<'_>> {
        match self.texts.get(&index)? {
            InfoText::Text {
                text,
                displayed_once,
            } => Some(TextData {
                text,
                displayed_once: *displayed_once,
            }),
            InfoText::Key { .. } | InfoText::Riddle { .. } => None,
        }
    }

    fn sound(&self, index: usize) -> Option<&str> {
        self.sounds.get(index).map(String::as_str)
    }
}
