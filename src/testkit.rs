//! Builders for synthetic map buffers and an in-memory info table, used by the tests.
//!
//! Compiled for unit tests and behind the `testkit` feature for integration tests.

use byteorder::{ByteOrder, LittleEndian};

use crate::assets::level::{MapDimensions, LEVEL_TAG};
use crate::assets::level_info::{InfoTable, InfoText};

fn push_u16(bytes: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    LittleEndian::write_u16(&mut buf, value);
    bytes.extend_from_slice(&buf);
}

fn push_sized_tag(bytes: &mut Vec<u8>, label: &[u8], payload: &[u8]) {
    bytes.extend_from_slice(label);
    push_u16(bytes, payload.len() as u16);
    bytes.extend_from_slice(payload);
}

/// Packs tile words in file order.
pub fn words_to_bytes(words: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 2);
    for word in words {
        push_u16(&mut bytes, *word);
    }
    bytes
}

/// Writes the tags of one `LEVL` region.
pub struct LevelBuilder {
    dimensions: MapDimensions,
    tags: Vec<u8>,
}

impl LevelBuilder {
    /// Starts an empty level for a map of the given size.
    pub fn new(dimensions: MapDimensions) -> Self {
        LevelBuilder {
            dimensions,
            tags: Vec::new(),
        }
    }

    /// Appends an arbitrary sized tag.
    pub fn raw_tag(mut self, label: &[u8; 4], payload: &[u8]) -> Self {
        push_sized_tag(&mut self.tags, label, payload);
        self
    }

    /// Appends a `NAME` tag.
    pub fn name(self, name: &str) -> Self {
        self.raw_tag(b"NAME", name.as_bytes())
    }

    /// Appends an `INFO` tag.
    pub fn info(self, info: &str) -> Self {
        self.raw_tag(b"INFO", info.as_bytes())
    }

    /// Appends a `NUMF` tag.
    pub fn numf(mut self, count: u8) -> Self {
        self.tags.extend_from_slice(b"NUMF");
        self.tags.push(count);
        self
    }

    fn word_tag(self, label: &[u8; 4], words: &[u16]) -> Self {
        assert_eq!(words.len(), self.dimensions.cell_count(), "one word per cell");
        let payload = words_to_bytes(words);
        self.raw_tag(label, &payload)
    }

    /// Appends a `FLOR` tag from words in file order.
    pub fn flor(self, words: &[u16]) -> Self {
        self.word_tag(b"FLOR", words)
    }

    /// Appends a `MAP1` tag from words in file order.
    pub fn map1(self, words: &[u16]) -> Self {
        self.word_tag(b"MAP1", words)
    }

    /// Appends a `MAP2` tag from words in file order.
    pub fn map2(self, words: &[u16]) -> Self {
        self.word_tag(b"MAP2", words)
    }

    /// Appends a `TARG` tag from words in file order.
    pub fn targ(self, words: &[u16]) -> Self {
        self.word_tag(b"TARG", words)
    }

    /// Appends a `LOCK` tag.
    pub fn lock(self, locks: &[(u8, u8, u8)]) -> Self {
        let payload: Vec<u8> = locks.iter().flat_map(|&(x, y, level)| [x, y, level]).collect();
        self.raw_tag(b"LOCK", &payload)
    }

    /// Appends a `TRIG` tag; `None` indices are stored as -1.
    pub fn trig(self, triggers: &[(u8, u8, Option<u8>, Option<u8>)]) -> Self {
        let payload: Vec<u8> = triggers
            .iter()
            .flat_map(|&(x, y, text, sound)| [x, y, text.unwrap_or(0xFF), sound.unwrap_or(0xFF)])
            .collect();
        self.raw_tag(b"TRIG", &payload)
    }

    /// Appends a `LOOT` tag.
    pub fn loot(self, payload: &[u8]) -> Self {
        self.raw_tag(b"LOOT", payload)
    }

    /// Wraps the tags in a `LEVL` header.
    pub fn build(self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.tags.len() + 6);
        push_sized_tag(&mut bytes, LEVEL_TAG.as_bytes(), &self.tags);
        bytes
    }
}

/// Writes a complete map buffer: an `MHDR` header followed by levels.
pub struct MapBuilder {
    dimensions: MapDimensions,
    start_points: Vec<(u16, u16)>,
    starting_level: u8,
    declared_levels: Option<u8>,
    levels: Vec<Vec<u8>>,
}

impl MapBuilder {
    /// Starts a map with no levels and no start points.
    pub fn new(width: u16, depth: u16) -> Self {
        MapBuilder {
            dimensions: MapDimensions::new(width as usize, depth as usize),
            start_points: Vec::new(),
            starting_level: 0,
            declared_levels: None,
            levels: Vec::new(),
        }
    }

    /// Dimensions levels of this map must be built with.
    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Adds a start point in arena units.
    pub fn start_point(mut self, x: u16, z: u16) -> Self {
        self.start_points.push((x, z));
        self
    }

    /// Sets the starting level index.
    pub fn starting_level(mut self, index: u8) -> Self {
        self.starting_level = index;
        self
    }

    /// Overrides the level count written to the header.
    pub fn declared_levels(mut self, count: u8) -> Self {
        self.declared_levels = Some(count);
        self
    }

    /// Appends a level built by `LevelBuilder`.
    pub fn level(mut self, level: Vec<u8>) -> Self {
        self.levels.push(level);
        self
    }

    /// Serializes the header and all levels.
    pub fn build(self) -> Vec<u8> {
        let mut header = vec![0u8, self.start_points.len() as u8];
        for slot in 0..4 {
            push_u16(&mut header, self.start_points.get(slot).map_or(0, |p| p.0));
        }
        for slot in 0..4 {
            push_u16(&mut header, self.start_points.get(slot).map_or(0, |p| p.1));
        }
        header.push(self.starting_level);
        header.push(self.declared_levels.unwrap_or(self.levels.len() as u8));
        header.push(0);
        push_u16(&mut header, self.dimensions.width as u16);
        push_u16(&mut header, self.dimensions.depth as u16);
        // Trailing header bytes the reader skips.
        header.extend_from_slice(&[0u8; 36]);

        let mut bytes = Vec::new();
        push_sized_tag(&mut bytes, b"MHDR", &header);
        for level in self.levels {
            bytes.extend(level);
        }
        bytes
    }
}

/// An info table with the given ceiling and no texts or sounds.
pub fn info_with_ceiling(height: u16) -> InfoTable {
    InfoTable {
        ceiling_height: Some(height),
        ..InfoTable::default()
    }
}

/// Adds a plain narrative text entry to an info table.
pub fn with_text(mut info: InfoTable, index: usize, text: &str, displayed_once: bool) -> InfoTable {
    info.texts.insert(
        index,
        InfoText::Text {
            text: text.to_string(),
            displayed_once,
        },
    );
    info
}
