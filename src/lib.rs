#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # MIF Voxels
//!
//! Decodes tile-based map containers into a voxel scene: a dense grid of small ids, the
//! shared descriptor table those ids index, and the text and sound triggers of the level.
//!
//! ## Key Modules
//!
//! * `assets` - The tagged container format: header, levels, and the paired info resource
//! * `voxels` - Voxel descriptors, the id grid, and the tile-word decoder
//! * `world` - Coordinate transform, trigger tables, and whole-level loading
//! * `config` - Decode options
//! * `error` - Error taxonomy of a map load
//!
//! ## Data Flow
//!
//! 1. `RawContainer::parse` reads the header and every `LEVL` region into `Level` records
//! 2. `LevelDecoder` classifies each floor and wall word and fills a `VoxelGrid`
//! 3. `TriggerTable::extract` maps trigger records to voxel cells
//! 4. `WorldData` / `MapLoad` bundle the result for the renderer and the event system
//!
//! ## Usage
//!
//! ```no_run
//! use mif_voxels::{DecodeOptions, InfoTable, MapLoad, RawContainer};
//!
//! fn load(bytes: Vec<u8>, info_json: &str) -> mif_voxels::Result<MapLoad> {
//!     let container = RawContainer::parse(bytes)?;
//!     let info = InfoTable::from_json(info_json)?;
//!     MapLoad::load(&container, &info, DecodeOptions::default())
//! }
//! ```

use std::path::Path;

use log::info;

pub mod assets;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
pub mod voxels;
pub mod world;

pub use assets::{InfoTable, Level, LevelInfo, RawContainer};
pub use config::DecodeOptions;
pub use error::{ConfigError, FormatError, LoadError, Result};
pub use voxels::{DecodedLevel, LevelDecoder, VoxelData, VoxelGrid, VoxelMetadataRegistry};
pub use world::{MapLoad, TextTrigger, TriggerTable, WorldData};

/// Sets up logging the way the command line tool uses it: stdout, filtered by `RUST_LOG`.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
}

/// Reads a map file and its JSON info table from disk and loads the starting level.
///
/// # Arguments
/// * `map_path` - Decompressed map container
/// * `info_path` - Info table as JSON
/// * `options` - Decode options
pub fn load_map_files(
    map_path: &Path,
    info_path: &Path,
    options: DecodeOptions,
) -> Result<MapLoad> {
    let bytes = std::fs::read(map_path)?;
    let info_json = std::fs::read_to_string(info_path)?;

    let container = RawContainer::parse(bytes)?;
    let info_table = InfoTable::from_json(&info_json)?;
    info!(
        "Parsed {} ({}x{}, {} levels)",
        map_path.display(),
        container.width(),
        container.depth(),
        container.levels().len()
    );

    MapLoad::load(&container, &info_table, options)
}
