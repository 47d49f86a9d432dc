//! # Assets
//!
//! Byte-level access to map files. Nothing in this module knows about voxels:
//!
//! * **tag_reader**: splits a buffer into labelled chunks
//! * **level**: the per-level record and the tag loader table that fills it
//! * **container**: the map header and the ordered list of levels
//! * **level_info**: the paired configuration resource a level refers to by index

pub mod container;
pub mod level;
pub mod level_info;
pub mod tag_reader;

pub use container::RawContainer;
pub use level::{Level, Lock, MapDimensions, Trigger};
pub use level_info::{InfoTable, InfoText, LevelInfo, TextData};
