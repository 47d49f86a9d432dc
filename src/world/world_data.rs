//! # World Data Module
//!
//! `WorldData` is everything the rest of the game reads about the active level: the voxel
//! grid and descriptor table for the renderer, and the trigger table for the event system.
//!
//! ## Loading
//!
//! A load runs to completion before returning: level selection, voxel decode and trigger
//! extraction all happen on fresh state. `reload` swaps the new world in only once all of
//! that has succeeded, so a failed load keeps the previous level intact.

use cgmath::Point2;
use log::info;

use super::coordinates::CoordinateMapper;
use super::triggers::{TextTrigger, TriggerTable};
use crate::assets::container::RawContainer;
use crate::assets::level_info::LevelInfo;
use crate::config::DecodeOptions;
use crate::error::{ConfigError, Result};
use crate::voxels::decoder::{DecodeStats, LevelDecoder};
use crate::voxels::{VoxelData, VoxelGrid};

/// The decoded state of one level.
///
/// # Examples
///
/// ```no_run
/// # use mif_voxels::{InfoTable, RawContainer, WorldData, DecodeOptions};
/// # fn demo(container: &RawContainer, info: &InfoTable) -> mif_voxels::Result<()> {
/// let world = WorldData::load(container, 0, info, DecodeOptions::default())?;
/// let floor = world.voxel_grid().get(0, 0, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WorldData {
    voxel_grid: VoxelGrid,
    voxel_data: Vec<VoxelData>,
    triggers: TriggerTable,
    level_index: usize,
    level_name: String,
    stats: DecodeStats,
}

impl WorldData {
    /// Decodes level `level_index` of `container` into a new world.
    ///
    /// # Arguments
    /// * `container` - The parsed map
    /// * `level_index` - Which level to decode
    /// * `info` - The level's paired info resource
    /// * `options` - Decode options
    ///
    /// # Returns
    /// The world, or the error that stopped the load.
    pub fn load(
        container: &RawContainer,
        level_index: usize,
        info: &dyn LevelInfo,
        options: DecodeOptions,
    ) -> Result<Self> {
        let level = container.level(level_index).ok_or(ConfigError::LevelIndex {
            index: level_index,
            count: container.levels().len(),
        })?;

        let dimensions = container.dimensions();
        let decoded = LevelDecoder::new(dimensions, info, options).decode(level)?;
        let triggers = TriggerTable::extract(&level.trig, &CoordinateMapper::new(dimensions), info);

        info!(
            "Loaded level {} {:?} (info {:?}, {} textures, {}x{}): {} descriptors, \
             {} text and {} sound triggers",
            level_index,
            level.name,
            level.info,
            level.numf,
            dimensions.width,
            dimensions.depth,
            decoded.voxel_data.len(),
            triggers.text_count(),
            triggers.sound_count()
        );

        Ok(WorldData {
            voxel_grid: decoded.grid,
            voxel_data: decoded.voxel_data,
            triggers,
            level_index,
            level_name: level.name.clone(),
            stats: decoded.stats,
        })
    }

    /// Replaces this world with level `level_index` of `container`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn reload(
        &mut self,
        container: &RawContainer,
        level_index: usize,
        info: &dyn LevelInfo,
        options: DecodeOptions,
    ) -> Result<()> {
        let world = WorldData::load(container, level_index, info, options)?;
        *self = world;
        Ok(())
    }

    /// The voxel id grid.
    pub fn voxel_grid(&self) -> &VoxelGrid {
        &self.voxel_grid
    }

    /// Descriptors indexed by grid ids.
    pub fn voxel_data(&self) -> &[VoxelData] {
        &self.voxel_data
    }

    /// All triggers of the level.
    pub fn triggers(&self) -> &TriggerTable {
        &self.triggers
    }

    /// The text trigger at a voxel cell.
    pub fn text_trigger(&self, voxel: Point2<i32>) -> Option<&TextTrigger> {
        self.triggers.text_trigger(voxel)
    }

    /// The text trigger at a voxel cell, for updating its display state.
    pub fn text_trigger_mut(&mut self, voxel: Point2<i32>) -> Option<&mut TextTrigger> {
        self.triggers.text_trigger_mut(voxel)
    }

    /// The sound identifier at a voxel cell.
    pub fn sound_trigger(&self, voxel: Point2<i32>) -> Option<&str> {
        self.triggers.sound_trigger(voxel)
    }

    /// Index of the loaded level within its map.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Name of the loaded level.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// What the decode placed.
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }
}

/// A world plus what the session needs to place the player.
#[derive(Clone, Debug)]
pub struct MapLoad {
    /// The decoded starting level.
    pub world: WorldData,
    /// First entrance point in voxel space, if the map defines any.
    pub player_start: Option<Point2<f64>>,
    /// Level the player starts on.
    pub starting_level_index: usize,
}

impl MapLoad {
    /// Decodes the starting level of `container` and resolves the player's entrance.
    pub fn load(
        container: &RawContainer,
        info: &dyn LevelInfo,
        options: DecodeOptions,
    ) -> Result<Self> {
        let starting_level_index = container.starting_level_index();
        let world = WorldData::load(container, starting_level_index, info, options)?;
        let mapper = CoordinateMapper::new(container.dimensions());
        let player_start = container.start_points().first().map(|raw| mapper.point(*raw));

        Ok(MapLoad {
            world,
            player_start,
            starting_level_index,
        })
    }
}
