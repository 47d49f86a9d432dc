//! # World
//!
//! What a decoded level looks like to the rest of the game.
//!
//! * **coordinates**: the arena-to-voxel axis transform
//! * **triggers**: text and sound events keyed by voxel cell
//! * **world_data**: the active level's grid, descriptors and triggers, and atomic loading
//!
//! ## Thread Safety
//!
//! Loading is single-threaded and finishes before returning. A loaded `WorldData` is plain
//! owned data: it can be shared read-only with a render thread. The only field mutated after
//! load is a text trigger's display flag, which the event system updates between frames.

pub mod coordinates;
pub mod triggers;
pub mod world_data;

pub use coordinates::{arena_to_voxel, CoordinateMapper};
pub use triggers::{TextTrigger, TriggerTable};
pub use world_data::{MapLoad, WorldData};
