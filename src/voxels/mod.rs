//! # Voxels
//!
//! The runtime scene representation a level decodes into, and the decoder itself.
//!
//! ## Architecture
//!
//! * **VoxelData**: one renderable surface description (textures, height, texture bounds)
//! * **VoxelGrid**: dense array of small ids, one per cell, each indexing a `VoxelData` table
//! * **VoxelMetadataRegistry**: hands out one id per distinct raw tile word during a decode
//! * **Tile**: classification of packed floor and wall words
//! * **LevelDecoder**: walks a level's tile arrays and fills a grid
//!
//! ## Memory
//!
//! Cells store ids rather than descriptors, so a grid costs two bytes per cell no matter how
//! many wall kinds a level uses. Air is id 0 and the renderer skips it.

pub mod decoder;
pub mod registry;
pub mod tile;
pub mod voxel_data;
pub mod voxel_grid;

/// Integer type of a grid cell, indexing the descriptor table.
pub type VoxelId = u16;

pub use decoder::{DecodedLevel, LevelDecoder};
pub use registry::VoxelMetadataRegistry;
pub use voxel_data::VoxelData;
pub use voxel_grid::VoxelGrid;
