use std::path::Path;

use cgmath::Point2;
use mif_voxels::testkit::{info_with_ceiling, LevelBuilder, MapBuilder};
use mif_voxels::voxels::voxel_grid::AIR_ID;
use mif_voxels::{
    ConfigError, DecodeOptions, InfoTable, LoadError, MapLoad, RawContainer, VoxelData, WorldData,
};

const INFO_JSON: &str = r#"{
    "ceiling_height": 128,
    "texts": { "2": { "kind": "text", "text": "Welcome", "displayed_once": true } },
    "sounds": []
}"#;

fn single_level(
    width: u16,
    depth: u16,
    build: impl FnOnce(LevelBuilder) -> LevelBuilder,
) -> RawContainer {
    let map = MapBuilder::new(width, depth);
    let level = build(LevelBuilder::new(map.dimensions()).name("Test")).build();
    RawContainer::parse(map.level(level).build()).unwrap()
}

fn load(container: &RawContainer) -> WorldData {
    let info = InfoTable::from_json(INFO_JSON).unwrap();
    WorldData::load(container, 0, &info, DecodeOptions::default()).unwrap()
}

#[test]
fn repeated_floor_shares_one_descriptor() {
    // Bytes 02 05 on disk: the high byte of the little-endian word is texture 5.
    let floor = u16::from_le_bytes([0x02, 0x05]);
    let container = single_level(2, 2, |level| level.flor(&[floor; 4]).map1(&[0; 4]));
    let world = load(&container);

    assert_eq!(world.voxel_data(), &[VoxelData::air(), VoxelData::new(5)]);
    for x in 0..2 {
        for z in 0..2 {
            assert_eq!(world.voxel_grid().get(x, 0, z), Some(1));
            assert_eq!(world.voxel_grid().get(x, 1, z), Some(AIR_ID));
        }
    }
}

#[test]
fn walls_platforms_and_objects() {
    // File order on a 2x2 map visits (1, 1), (1, 0), (0, 1), (0, 0).
    let container = single_level(2, 2, |level| {
        level.flor(&[0x0502; 4]).map1(&[0x0707, 0x1203, 0x0000, 0x8001])
    });
    let world = load(&container);
    let grid = world.voxel_grid();
    let data_at = |x, z| world.voxel_data()[grid.get(x, 1, z).unwrap() as usize];

    let wall = data_at(1, 1);
    assert_eq!(wall.texture_ids(), [7, 7, 7]);
    assert_eq!((wall.y_offset, wall.y_size), (0.0, 1.0));
    assert_eq!((wall.top_v, wall.bottom_v), (0.0, 1.0));

    let platform = data_at(1, 0);
    assert_eq!(platform.texture_ids(), [3, 0, 0]);
    assert_eq!(platform.y_size, 18.0 / 128.0);
    assert_eq!(platform.top_v, 1.0 - 18.0 / 128.0);
    assert_eq!(platform.bottom_v, 1.0);

    assert_eq!(grid.get(0, 1, 1), Some(AIR_ID));
    assert_eq!(grid.get(0, 1, 0), Some(AIR_ID));
    assert_eq!(world.stats().objects, 1);
    assert_eq!(world.voxel_data().len(), 4);
}

#[test]
fn trigger_lands_on_mapped_cell() {
    let container = single_level(8, 8, |level| {
        level
            .flor(&[0x0502; 64])
            .map1(&[0; 64])
            .trig(&[(5, 3, Some(2), None)])
    });
    let world = load(&container);

    let text = world.text_trigger(Point2::new(2, 4)).unwrap();
    assert_eq!(text.text(), "Welcome");
    assert!(text.is_single_display());
    assert!(!text.has_been_displayed());
    assert_eq!(world.triggers().text_count(), 1);
    assert_eq!(world.triggers().sound_count(), 0);
    assert_eq!(world.sound_trigger(Point2::new(2, 4)), None);
}

#[test]
fn chasms_leave_the_floor_open() {
    let container = single_level(3, 1, |level| level.flor(&[0x0C00, 0x0D00, 0x0E00]).map1(&[0; 3]));
    let world = load(&container);

    assert_eq!(world.voxel_grid().solid_count(), 0);
    assert_eq!(world.voxel_data(), &[VoxelData::air()]);
    assert_eq!(world.stats().chasms, 3);
}

#[test]
fn decoding_is_deterministic() {
    let build = |level: LevelBuilder| {
        level
            .flor(&[0x0502, 0x0C00, 0x0902, 0x0502, 0x0103, 0x0902])
            .map1(&[0x0303, 0x2031, 0, 0x8004, 0x0303, 0x4025])
    };
    let first = load(&single_level(3, 2, build));
    let second = load(&single_level(3, 2, build));

    assert_eq!(first.voxel_grid(), second.voxel_grid());
    assert_eq!(first.voxel_data(), second.voxel_data());
    assert_eq!(first.voxel_grid().as_bytes(), second.voxel_grid().as_bytes());
}

#[test]
fn map_load_places_player_at_first_entrance() {
    let map = MapBuilder::new(8, 8).start_point(192, 640).start_point(64, 64);
    let level = LevelBuilder::new(map.dimensions())
        .flor(&[0x0502; 64])
        .map1(&[0; 64])
        .build();
    let container = RawContainer::parse(map.level(level).build()).unwrap();

    let load =
        MapLoad::load(&container, &info_with_ceiling(128), DecodeOptions::default()).unwrap();
    assert_eq!(load.player_start, Some(Point2::new(6.5, 3.0)));
    assert_eq!(load.starting_level_index, 0);
}

#[test]
fn missing_map_file_is_an_io_error() {
    let err = mif_voxels::load_map_files(
        Path::new("does-not-exist.mif"),
        Path::new("does-not-exist.json"),
        DecodeOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn ceiling_is_only_required_by_solid_walls() {
    let no_ceiling = InfoTable::default();

    let floors = single_level(2, 2, |level| level.flor(&[0x0502; 4]).map1(&[0, 0x1203, 0, 0]));
    let world = WorldData::load(&floors, 0, &no_ceiling, DecodeOptions::default()).unwrap();
    assert_eq!(world.voxel_grid().solid_count(), 5);

    let walls = single_level(2, 2, |level| level.flor(&[0x0502; 4]).map1(&[0, 0, 0x0707, 0]));
    let err = WorldData::load(&walls, 0, &no_ceiling, DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Config(ConfigError::MissingCeilingHeight)));
}
