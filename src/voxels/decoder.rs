//! # Level Decoder
//!
//! Turns a level's raw floor and wall arrays into a `VoxelGrid` plus its descriptor table.
//!
//! ## Traversal
//!
//! Tile words are stored starting from the map's far corner, so the decoder walks X from
//! `width - 1` down to 0 and, inside each column, Z from `depth - 1` down to 0, taking the
//! next word of each array at every step. Floors land at y = 0, walls and platforms at y = 1.
//!
//! ## Atomicity
//!
//! The grid is built locally and only returned once every cell has been decoded, so a
//! failed decode never leaves a half-written grid behind.

use log::debug;

use super::registry::{TileKey, VoxelMetadataRegistry};
use super::tile::{self, FloorTile, WallTile};
use super::voxel_data::VoxelData;
use super::voxel_grid::VoxelGrid;
use crate::assets::container::ARENA_UNITS;
use crate::assets::level::{Level, MapDimensions};
use crate::assets::level_info::LevelInfo;
use crate::config::DecodeOptions;
use crate::error::{ConfigError, FormatError, Result};

/// Layer floors are written to.
pub const FLOOR_Y: usize = 0;

/// Layer walls and platforms are written to.
pub const WALL_Y: usize = 1;

/// Counts of what a decode placed, for logging and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Floor voxels written.
    pub floors: usize,
    /// Cells left open by a chasm.
    pub chasms: usize,
    /// Solid walls written.
    pub walls: usize,
    /// Raised platforms written.
    pub platforms: usize,
    /// Map object words left to entity spawning.
    pub objects: usize,
}

/// The renderer-facing result of decoding one level.
#[derive(Clone, Debug)]
pub struct DecodedLevel {
    /// Voxel ids.
    pub grid: VoxelGrid,
    /// Descriptors indexed by the ids in `grid`; entry 0 is air.
    pub voxel_data: Vec<VoxelData>,
    /// What was placed.
    pub stats: DecodeStats,
}

impl DecodedLevel {
    /// The descriptor a cell refers to.
    pub fn voxel_data_at(&self, x: usize, y: usize, z: usize) -> Option<&VoxelData> {
        self.grid
            .get(x, y, z)
            .and_then(|id| self.voxel_data.get(id as usize))
    }
}

/// Decodes levels of one map against its info resource.
pub struct LevelDecoder<'a> {
    dimensions: MapDimensions,
    info: &'a dyn LevelInfo,
    options: DecodeOptions,
}

impl<'a> LevelDecoder<'a> {
    /// Creates a decoder for levels of the given dimensions.
    pub fn new(dimensions: MapDimensions, info: &'a dyn LevelInfo, options: DecodeOptions) -> Self {
        LevelDecoder {
            dimensions,
            info,
            options,
        }
    }

    /// Ceiling height in voxel units, checked against the info resource.
    fn ceiling_height(&self) -> std::result::Result<f64, ConfigError> {
        match self.info.ceiling_height() {
            None => Err(ConfigError::MissingCeilingHeight),
            Some(0) => Err(ConfigError::CeilingHeightOutOfRange(0)),
            Some(height) => Ok(f64::from(height) / ARENA_UNITS),
        }
    }

    fn check_array(&self, bytes: &[u8], tag: &'static str) -> std::result::Result<(), FormatError> {
        let expected = self.dimensions.word_array_len();
        if bytes.len() != expected {
            return Err(FormatError::PayloadSize {
                tag,
                expected: expected.to_string(),
                found: bytes.len(),
            });
        }
        Ok(())
    }

    /// Decodes `level` into a fresh grid and descriptor table.
    ///
    /// # Arguments
    /// * `level` - A level of the map these dimensions belong to
    ///
    /// # Returns
    /// The decoded level, a `FormatError` if the floor or wall array is missing or of the
    /// wrong size, or a `ConfigError` if the options are unusable. The ceiling height is
    /// only read once a solid wall needs it, and is an error only then.
    pub fn decode(&self, level: &Level) -> Result<DecodedLevel> {
        self.options.validate()?;
        self.check_array(&level.flor, "FLOR")?;
        self.check_array(&level.map1, "MAP1")?;

        let MapDimensions { width, depth } = self.dimensions;
        let mut grid = VoxelGrid::new(width, self.options.grid_height, depth);
        let mut registry = VoxelMetadataRegistry::new();
        let mut stats = DecodeStats::default();
        let mut word_index = 0;
        let mut resolved_ceiling = None;

        for x in (0..width).rev() {
            for z in (0..depth).rev() {
                let floor_word = tile::tile_word(&level.flor, word_index);
                let wall_word = tile::tile_word(&level.map1, word_index);
                word_index += 1;

                match tile::classify_floor(floor_word) {
                    FloorTile::Chasm(_) => stats.chasms += 1,
                    FloorTile::Textured { texture_id } => {
                        let id = registry.get_or_create(TileKey::floor(floor_word), || {
                            VoxelData::new(texture_id)
                        })?;
                        grid.set(x, FLOOR_Y, z, id);
                        stats.floors += 1;
                    }
                }

                match tile::classify_wall(wall_word) {
                    WallTile::Empty => {}
                    WallTile::Object(_) => stats.objects += 1,
                    WallTile::Solid { texture_id } => {
                        let ceiling_height = match resolved_ceiling {
                            Some(height) => height,
                            None => *resolved_ceiling.insert(self.ceiling_height()?),
                        };
                        let id = registry.get_or_create(TileKey::wall(wall_word), || {
                            solid_wall(texture_id, ceiling_height)
                        })?;
                        grid.set(x, WALL_Y, z, id);
                        stats.walls += 1;
                    }
                    WallTile::Platform {
                        height,
                        cap_id,
                        side_id,
                    } => {
                        let id = registry.get_or_create(TileKey::wall(wall_word), || {
                            raised_platform(height, cap_id, side_id)
                        })?;
                        grid.set(x, WALL_Y, z, id);
                        stats.platforms += 1;
                    }
                }
            }
        }

        debug!(
            "Decoded level {:?}: {} descriptors, {:?}",
            level.name,
            registry.len(),
            stats
        );

        Ok(DecodedLevel {
            grid,
            voxel_data: registry.into_voxel_data(),
            stats,
        })
    }
}

/// Descriptor of a regular 1x1 wall reaching the ceiling.
pub fn solid_wall(texture_id: u8, ceiling_height: f64) -> VoxelData {
    VoxelData::with_textures(texture_id, texture_id, texture_id, 0.0, ceiling_height, 0.0, 1.0)
}

/// Descriptor of a raised platform of `height` arena units.
pub fn raised_platform(height: u8, cap_id: u8, side_id: u8) -> VoxelData {
    let textures = tile::resolve_platform_textures(cap_id, side_id);
    let platform_height = f64::from(height) / ARENA_UNITS;
    // The top V coordinate is clamped at 0 for platforms taller than one voxel.
    let top_v = (1.0 - platform_height).max(0.0);
    let bottom_v = 1.0;

    VoxelData::with_textures(
        textures.side_id,
        textures.cap_id,
        textures.cap_id,
        0.0,
        platform_height,
        top_v,
        bottom_v,
    )
}
