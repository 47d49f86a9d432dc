//! # MIF Voxels Inspector
//!
//! Decodes a map file with its info table and logs what was loaded.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- START.MIF start_inf.json [options.json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use mif_voxels::DecodeOptions;

fn options_from(path: Option<PathBuf>) -> mif_voxels::Result<DecodeOptions> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(DecodeOptions::default()),
    }
}

fn main() -> ExitCode {
    mif_voxels::init_logging();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(map_path), Some(info_path)) = (args.next(), args.next()) else {
        eprintln!("usage: mif-voxels <map file> <info json> [options json]");
        return ExitCode::FAILURE;
    };

    let load = options_from(args.next())
        .and_then(|options| mif_voxels::load_map_files(&map_path, &info_path, options));

    match load {
        Ok(load) => {
            let world = &load.world;
            let grid = world.voxel_grid();
            info!(
                "Level {} {:?}: {}x{}x{} grid, {} solid cells, {} descriptors",
                load.starting_level_index,
                world.level_name(),
                grid.width(),
                grid.height(),
                grid.depth(),
                grid.solid_count(),
                world.voxel_data().len()
            );
            info!("{:?}", world.stats());
            info!(
                "{} text triggers, {} sound triggers, player start {:?}",
                world.triggers().text_count(),
                world.triggers().sound_count(),
                load.player_start
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Map load failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
