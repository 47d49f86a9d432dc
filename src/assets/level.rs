//! # Level Module
//!
//! A `Level` is one map level exactly as stored in the container: header strings, raw
//! tile arrays, locks and triggers. Nothing here interprets tile words; that happens in
//! the voxel decoder.
//!
//! ## Tag Dispatch
//!
//! Each level tag has one loader, registered in the static `TAG_LOADERS` table. The table
//! is the whole format contract for a level region: a label missing from it is a format
//! error, and each loader validates its own payload size.

use log::debug;
use phf::phf_map;

use super::tag_reader::{self, label_lossy, Tag, TagFraming};
use crate::error::{FormatError, FormatResult};

/// Grid dimensions shared by every level of a map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapDimensions {
    /// Cells along X.
    pub width: usize,
    /// Cells along Z.
    pub depth: usize,
}

impl MapDimensions {
    /// Creates dimensions from header values.
    pub fn new(width: usize, depth: usize) -> Self {
        MapDimensions { width, depth }
    }

    /// Number of cells in one layer.
    pub fn cell_count(&self) -> usize {
        self.width * self.depth
    }

    /// Byte length of a word-per-cell array (`FLOR`, `MAP1`, `MAP2`, `TARG`).
    pub fn word_array_len(&self) -> usize {
        2 * self.cell_count()
    }
}

/// A locked door or chest position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lock {
    /// Arena X.
    pub x: u8,
    /// Arena Z.
    pub y: u8,
    /// Difficulty of the lock.
    pub lock_level: u8,
}

/// A map cell tied to a text entry and/or a sound cue of the level info table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// Arena X.
    pub x: u8,
    /// Arena Z.
    pub y: u8,
    /// Text entry index, `None` when stored as -1.
    pub text_index: Option<u8>,
    /// Sound entry index, `None` when stored as -1.
    pub sound_index: Option<u8>,
}

/// Stored value meaning "no index".
const ABSENT_INDEX: u8 = 0xFF;

fn optional_index(byte: u8) -> Option<u8> {
    (byte != ABSENT_INDEX).then_some(byte)
}

/// One decoded map level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Level {
    /// Display name.
    pub name: String,
    /// Filename of the paired info (configuration) resource.
    pub info: String,
    /// Number of floor textures.
    pub numf: u8,
    /// Floor tile words.
    pub flor: Vec<u8>,
    /// Primary wall tile words.
    pub map1: Vec<u8>,
    /// Secondary wall tile words.
    pub map2: Vec<u8>,
    /// Target data.
    pub targ: Vec<u8>,
    /// Loot payload, kept verbatim.
    pub loot: Vec<u8>,
    /// Lock records in file order.
    pub lock: Vec<Lock>,
    /// Trigger records in file order.
    pub trig: Vec<Trigger>,
}

/// Every tag a level region may contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Level name.
    Name,
    /// Info resource filename.
    Info,
    /// Floor texture count.
    Numf,
    /// Floor tiles.
    Flor,
    /// Primary wall tiles.
    Map1,
    /// Secondary wall tiles.
    Map2,
    /// Target data.
    Targ,
    /// Lock records.
    Lock,
    /// Trigger records.
    Trig,
    /// Loot data.
    Loot,
}

type TagLoader = fn(&mut Level, &Tag<'_>, &MapDimensions) -> FormatResult<()>;

/// A registered tag: its framing and the loader that fills the level from its payload.
pub struct TagEntry {
    /// Which tag this is.
    pub kind: TagKind,
    /// How the payload is delimited.
    pub framing: TagFraming,
    load: TagLoader,
}

/// Label to loader table for level regions.
pub static TAG_LOADERS: phf::Map<&'static str, TagEntry> = phf_map! {
    "NAME" => TagEntry { kind: TagKind::Name, framing: TagFraming::Sized, load: load_name },
    "INFO" => TagEntry { kind: TagKind::Info, framing: TagFraming::Sized, load: load_info },
    "NUMF" => TagEntry { kind: TagKind::Numf, framing: TagFraming::Fixed(1), load: load_numf },
    "FLOR" => TagEntry { kind: TagKind::Flor, framing: TagFraming::Sized, load: load_flor },
    "MAP1" => TagEntry { kind: TagKind::Map1, framing: TagFraming::Sized, load: load_map1 },
    "MAP2" => TagEntry { kind: TagKind::Map2, framing: TagFraming::Sized, load: load_map2 },
    "TARG" => TagEntry { kind: TagKind::Targ, framing: TagFraming::Sized, load: load_targ },
    "LOCK" => TagEntry { kind: TagKind::Lock, framing: TagFraming::Sized, load: load_lock },
    "TRIG" => TagEntry { kind: TagKind::Trig, framing: TagFraming::Sized, load: load_trig },
    "LOOT" => TagEntry { kind: TagKind::Loot, framing: TagFraming::Sized, load: load_loot },
};

/// Looks up the loader entry for a raw label.
pub fn tag_entry(label: &[u8]) -> Option<&'static TagEntry> {
    std::str::from_utf8(label)
        .ok()
        .and_then(|label| TAG_LOADERS.get(label))
}

/// Header label that opens every level region.
pub const LEVEL_TAG: &str = "LEVL";

impl Level {
    /// Decodes the level whose `LEVL` tag starts at `offset`.
    ///
    /// # Arguments
    /// * `buffer` - The whole map buffer
    /// * `offset` - Offset of the `LEVL` label
    /// * `dimensions` - Map width and depth from the header
    ///
    /// # Returns
    /// The level and the number of bytes from `offset` to where the next `LEVL` tag
    /// would start.
    pub fn load(
        buffer: &[u8],
        offset: usize,
        dimensions: &MapDimensions,
    ) -> FormatResult<(Level, usize)> {
        let levl = tag_reader::expect_tag(buffer, offset, LEVEL_TAG)?;

        // Tags are read against the region only, so none can spill into the next level.
        let region = &buffer[..levl.next_offset];
        let mut level = Level::default();
        let mut cursor = levl.next_offset - levl.payload.len();

        while cursor < region.len() {
            let label = tag_reader::peek_label(region, cursor)?;
            let entry = tag_entry(&label).ok_or_else(|| FormatError::UnknownTag {
                label: label_lossy(&label),
                offset: cursor,
            })?;
            let tag = tag_reader::read_tag(region, cursor, entry.framing)?;
            (entry.load)(&mut level, &tag, dimensions)?;
            debug!(
                "Loaded {:?} tag ({} bytes) at offset {}",
                entry.kind,
                tag.payload.len(),
                cursor
            );
            cursor = tag.next_offset;
        }

        Ok((level, levl.consumed()))
    }
}

fn text_payload(payload: &[u8]) -> String {
    let text = payload.split(|byte| *byte == 0).next().unwrap_or_default();
    String::from_utf8_lossy(text).trim().to_string()
}

fn word_array(
    tag: &Tag<'_>,
    name: &'static str,
    dimensions: &MapDimensions,
) -> FormatResult<Vec<u8>> {
    let expected = dimensions.word_array_len();
    if tag.payload.len() != expected {
        return Err(FormatError::PayloadSize {
            tag: name,
            expected: expected.to_string(),
            found: tag.payload.len(),
        });
    }
    Ok(tag.payload.to_vec())
}

fn records<'a>(
    tag: &Tag<'a>,
    name: &'static str,
    record_size: usize,
) -> FormatResult<std::slice::ChunksExact<'a, u8>> {
    if tag.payload.len() % record_size != 0 {
        return Err(FormatError::PayloadSize {
            tag: name,
            expected: format!("a multiple of {record_size}"),
            found: tag.payload.len(),
        });
    }
    Ok(tag.payload.chunks_exact(record_size))
}

fn load_name(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.name = text_payload(tag.payload);
    Ok(())
}

fn load_info(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.info = text_payload(tag.payload);
    Ok(())
}

fn load_numf(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.numf = tag.payload[0];
    Ok(())
}

fn load_flor(level: &mut Level, tag: &Tag<'_>, dimensions: &MapDimensions) -> FormatResult<()> {
    level.flor = word_array(tag, "FLOR", dimensions)?;
    Ok(())
}

fn load_map1(level: &mut Level, tag: &Tag<'_>, dimensions: &MapDimensions) -> FormatResult<()> {
    level.map1 = word_array(tag, "MAP1", dimensions)?;
    Ok(())
}

fn load_map2(level: &mut Level, tag: &Tag<'_>, dimensions: &MapDimensions) -> FormatResult<()> {
    level.map2 = word_array(tag, "MAP2", dimensions)?;
    Ok(())
}

fn load_targ(level: &mut Level, tag: &Tag<'_>, dimensions: &MapDimensions) -> FormatResult<()> {
    level.targ = word_array(tag, "TARG", dimensions)?;
    Ok(())
}

fn load_lock(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.lock.extend(records(tag, "LOCK", 3)?.map(|record| Lock {
        x: record[0],
        y: record[1],
        lock_level: record[2],
    }));
    Ok(())
}

fn load_trig(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.trig.extend(records(tag, "TRIG", 4)?.map(|record| Trigger {
        x: record[0],
        y: record[1],
        text_index: optional_index(record[2]),
        sound_index: optional_index(record[3]),
    }));
    Ok(())
}

fn load_loot(level: &mut Level, tag: &Tag<'_>, _: &MapDimensions) -> FormatResult<()> {
    level.loot = tag.payload.to_vec();
    Ok(())
}
