//! # Map Container
//!
//! `RawContainer` owns the decoded bytes of one map file together with the header values
//! shared by all of its levels: dimensions, entrance points and the starting level.
//!
//! ## Layout
//!
//! The buffer opens with an `MHDR` tag, followed by one `LEVL` tag per level:
//!
//! ```text
//! MHDR <u16 len> [unknown u8][count u8][x u16 * 4][z u16 * 4]
//!                [start u8][levels u8][unknown u8][width u16][depth u16]...
//! LEVL <u16 len> <tags...>
//! LEVL <u16 len> <tags...>
//! ```

use byteorder::{ByteOrder, LittleEndian};
use cgmath::Point2;
use log::{debug, warn};

use super::level::{Level, MapDimensions};
use super::tag_reader;
use crate::error::{FormatError, FormatResult};

/// Label of the map header tag.
pub const HEADER_TAG: &str = "MHDR";

/// Smallest header payload holding every field the reader uses.
pub const MIN_HEADER_SIZE: usize = 25;

/// Slots for entrance points in the header.
pub const START_POINT_SLOTS: usize = 4;

/// Divisor converting arena units (start points, heights) into voxel units.
pub const ARENA_UNITS: f64 = 128.0;

/// A decoded map file.
#[derive(Clone, Debug)]
pub struct RawContainer {
    bytes: Box<[u8]>,
    dimensions: MapDimensions,
    starting_level_index: usize,
    start_points: Vec<Point2<u16>>,
    levels: Vec<Level>,
}

impl RawContainer {
    /// Parses the header and every level of `bytes`.
    ///
    /// # Arguments
    /// * `bytes` - Full file contents, already decompressed by the caller
    ///
    /// # Returns
    /// The container, or the first format violation found. Levels are kept in file order.
    pub fn parse(bytes: Vec<u8>) -> FormatResult<Self> {
        let bytes = bytes.into_boxed_slice();
        let header = tag_reader::expect_tag(&bytes, 0, HEADER_TAG)?;
        let fields = header.payload;
        if fields.len() < MIN_HEADER_SIZE {
            return Err(FormatError::PayloadSize {
                tag: HEADER_TAG,
                expected: format!("at least {MIN_HEADER_SIZE}"),
                found: fields.len(),
            });
        }

        let declared_points = fields[1] as usize;
        if declared_points > START_POINT_SLOTS {
            warn!(
                "Map header declares {} start points, only {} slots exist",
                declared_points, START_POINT_SLOTS
            );
        }
        let start_points = (0..declared_points.min(START_POINT_SLOTS))
            .map(|slot| {
                let x = LittleEndian::read_u16(&fields[2 + slot * 2..]);
                let z = LittleEndian::read_u16(&fields[10 + slot * 2..]);
                Point2::new(x, z)
            })
            .collect();

        let starting_level = fields[18];
        let level_count = fields[19];
        let width = LittleEndian::read_u16(&fields[21..]);
        let depth = LittleEndian::read_u16(&fields[23..]);

        if width == 0 || depth == 0 {
            return Err(FormatError::EmptyDimensions { width, depth });
        }
        if starting_level >= level_count {
            return Err(FormatError::StartingLevel {
                index: starting_level,
                count: level_count,
            });
        }

        let dimensions = MapDimensions::new(width as usize, depth as usize);
        let mut levels = Vec::with_capacity(level_count as usize);
        let mut offset = header.next_offset;
        while levels.len() < level_count as usize {
            if offset >= bytes.len() {
                return Err(FormatError::LevelCount {
                    declared: level_count as usize,
                    found: levels.len(),
                });
            }
            let (level, span) = Level::load(&bytes, offset, &dimensions)?;
            debug!("Read level {:?} ({} bytes)", level.name, span);
            levels.push(level);
            offset += span;
        }

        if offset < bytes.len() {
            debug!("{} trailing bytes after the last level", bytes.len() - offset);
        }

        Ok(RawContainer {
            bytes,
            dimensions,
            starting_level_index: starting_level as usize,
            start_points,
            levels,
        })
    }

    /// The file bytes this container was parsed from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Dimensions shared by every level.
    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Map width in cells.
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Map depth in cells.
    pub fn depth(&self) -> usize {
        self.dimensions.depth
    }

    /// Level the player enters the map on.
    pub fn starting_level_index(&self) -> usize {
        self.starting_level_index
    }

    /// Entrance points in arena units, as stored.
    pub fn start_points(&self) -> &[Point2<u16>] {
        &self.start_points
    }

    /// All levels in file order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level at `index`.
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// The first level in the file.
    pub fn default_level(&self) -> &Level {
        // parse() rejects maps without levels through the starting level check.
        &self.levels[0]
    }
}
