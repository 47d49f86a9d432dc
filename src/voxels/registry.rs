//! # Voxel Metadata Registry
//!
//! Collapses repeated raw tile words into one shared `VoxelData`. A registry lives for
//! exactly one decode: tile words only identify a descriptor within the level being
//! decoded, so a new decode always starts from a new registry.

use std::collections::HashMap;

use super::voxel_data::VoxelData;
use super::VoxelId;
use crate::error::{FormatError, FormatResult};

/// Which tile array a raw word came from. Floor and wall words with the same value
/// describe unrelated voxels and must not share a descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileLayer {
    /// A `FLOR` word.
    Floor,
    /// A `MAP1` word.
    Wall,
}

/// Deduplication key of a descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Source array.
    pub layer: TileLayer,
    /// The raw 16-bit word.
    pub raw: u16,
}

impl TileKey {
    /// Key for a floor word.
    pub fn floor(raw: u16) -> Self {
        TileKey {
            layer: TileLayer::Floor,
            raw,
        }
    }

    /// Key for a wall word.
    pub fn wall(raw: u16) -> Self {
        TileKey {
            layer: TileLayer::Wall,
            raw,
        }
    }
}

/// Per-decode descriptor table with its key index.
#[derive(Debug)]
pub struct VoxelMetadataRegistry {
    mappings: HashMap<TileKey, VoxelId>,
    voxel_data: Vec<VoxelData>,
}

impl VoxelMetadataRegistry {
    /// Creates a registry whose table holds only the air descriptor at id 0.
    pub fn new() -> Self {
        VoxelMetadataRegistry {
            mappings: HashMap::new(),
            voxel_data: vec![VoxelData::air()],
        }
    }

    /// Returns the id registered for `key`, creating its descriptor on first use.
    ///
    /// # Arguments
    /// * `key` - Layer and raw word identifying the descriptor
    /// * `factory` - Builds the descriptor; only called when `key` is new
    ///
    /// # Returns
    /// The descriptor id, or `FormatError::DescriptorOverflow` once ids run out.
    pub fn get_or_create<F>(&mut self, key: TileKey, factory: F) -> FormatResult<VoxelId>
    where
        F: FnOnce() -> VoxelData,
    {
        if let Some(id) = self.mappings.get(&key) {
            return Ok(*id);
        }

        let id = VoxelId::try_from(self.voxel_data.len()).map_err(|_| {
            FormatError::DescriptorOverflow {
                limit: VoxelId::MAX as usize + 1,
            }
        })?;
        self.voxel_data.push(factory());
        self.mappings.insert(key, id);
        Ok(id)
    }

    /// Number of descriptors, air included.
    pub fn len(&self) -> usize {
        self.voxel_data.len()
    }

    /// True when only air is registered.
    pub fn is_empty(&self) -> bool {
        self.voxel_data.len() == 1
    }

    /// The descriptor table so far.
    pub fn voxel_data(&self) -> &[VoxelData] {
        &self.voxel_data
    }

    /// Consumes the registry, yielding the descriptor table indexed by id.
    pub fn into_voxel_data(self) -> Vec<VoxelData> {
        self.voxel_data
    }
}

impl Default for VoxelMetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_registered_first() {
        let registry = VoxelMetadataRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.voxel_data(), &[VoxelData::air()]);
    }

    #[test]
    fn repeated_keys_share_one_descriptor() {
        let mut registry = VoxelMetadataRegistry::new();
        let mut calls = 0;

        let first = registry
            .get_or_create(TileKey::wall(0x0707), || {
                calls += 1;
                VoxelData::new(7)
            })
            .unwrap();
        let second = registry
            .get_or_create(TileKey::wall(0x0707), || {
                calls += 1;
                VoxelData::new(8)
            })
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(calls, 1);
        assert_eq!(registry.voxel_data()[1], VoxelData::new(7));
    }

    #[test]
    fn layers_keep_separate_descriptors() {
        let mut registry = VoxelMetadataRegistry::new();
        let floor = registry.get_or_create(TileKey::floor(0x0505), || VoxelData::new(5)).unwrap();
        let wall = registry.get_or_create(TileKey::wall(0x0505), || VoxelData::new(5)).unwrap();

        assert_ne!(floor, wall);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn ids_are_assigned_in_creation_order() {
        let mut registry = VoxelMetadataRegistry::new();
        let ids: Vec<_> = [3u16, 1, 2, 1]
            .iter()
            .map(|raw| {
                registry
                    .get_or_create(TileKey::floor(*raw), || VoxelData::new(*raw as u8))
                    .unwrap()
            })
            .collect();

        assert_eq!(ids, [1, 2, 3, 2]);
        assert_eq!(registry.into_voxel_data().len(), 4);
    }
}
