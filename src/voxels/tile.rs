//! # Tile Module
//!
//! Interpretation of the packed 16-bit tile words of the floor and wall arrays.
//!
//! ## Floor words
//!
//! The high byte is a floor texture id. Three reserved ids mark chasms, which get no floor
//! voxel.
//!
//! ## Wall words
//!
//! ```text
//! bit 15      : map object (sprite, spawn point...) rather than a voxel
//! bits 8..=14 : most significant byte (MSB)
//! bits 0..=6  : least significant byte (LSB)
//! ```
//!
//! A zero word is empty. MSB == LSB is a solid wall textured with that id. Otherwise the
//! word is a raised platform: MSB is its height in arena units, the low nibble is the side
//! texture and the next nibble is the cap texture.

use byteorder::{ByteOrder, LittleEndian};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Reserved floor texture ids that mark a chasm instead of a floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ChasmKind {
    /// A dry pit.
    DRY = 0x0C,
    /// Water.
    WET = 0x0D,
    /// Lava.
    LAVA = 0x0E,
}

/// What a floor word asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloorTile {
    /// No floor voxel; the chasm is drawn elsewhere.
    Chasm(ChasmKind),
    /// A floor voxel with one texture.
    Textured {
        /// Floor texture id.
        texture_id: u8,
    },
}

/// What a wall word asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallTile {
    /// Nothing in this cell.
    Empty,
    /// A map object handled by entity spawning; carries the raw word.
    Object(u16),
    /// A full-height wall.
    Solid {
        /// Texture used on every face.
        texture_id: u8,
    },
    /// A partial-height block.
    Platform {
        /// Height in arena units.
        height: u8,
        /// Cap texture nibble.
        cap_id: u8,
        /// Side texture nibble.
        side_id: u8,
    },
}

const OBJECT_FLAG: u16 = 0x8000;

/// Reads the little-endian word for cell `index` of a tile array.
pub fn tile_word(bytes: &[u8], index: usize) -> u16 {
    LittleEndian::read_u16(&bytes[index * 2..])
}

/// Classifies a floor word.
pub fn classify_floor(word: u16) -> FloorTile {
    let texture_id = ((word & 0xFF00) >> 8) as u8;
    match ChasmKind::from_u8(texture_id) {
        Some(chasm) => FloorTile::Chasm(chasm),
        None => FloorTile::Textured { texture_id },
    }
}

/// Classifies a wall word.
pub fn classify_wall(word: u16) -> WallTile {
    if word & OBJECT_FLAG != 0 {
        return WallTile::Object(word);
    }
    if word == 0 {
        return WallTile::Empty;
    }

    let most_sig_byte = ((word & 0x7F00) >> 8) as u8;
    let least_sig_byte = (word & 0x007F) as u8;
    if most_sig_byte == least_sig_byte {
        WallTile::Solid {
            texture_id: most_sig_byte,
        }
    } else {
        WallTile::Platform {
            height: most_sig_byte,
            cap_id: ((word & 0x00F0) >> 4) as u8,
            side_id: (word & 0x000F) as u8,
        }
    }
}

/// Texture ids a platform is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlatformTextures {
    /// Vertical faces.
    pub side_id: u8,
    /// Top and bottom faces.
    pub cap_id: u8,
}

/// Maps a platform word's texture nibbles to texture ids.
///
/// The nibbles are passed through unchanged: they are indices into the info resource's
/// box-cap and box-side lists, not texture ids.
// TODO: resolve cap_id through the info resource's BOXCAP list and side_id through its
// BOXSIDE list once `LevelInfo` exposes them.
pub fn resolve_platform_textures(cap_id: u8, side_id: u8) -> PlatformTextures {
    PlatformTextures { side_id, cap_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chasm_ids_have_no_floor() {
        assert_eq!(classify_floor(0x0C00), FloorTile::Chasm(ChasmKind::DRY));
        assert_eq!(classify_floor(0x0D7F), FloorTile::Chasm(ChasmKind::WET));
        assert_eq!(classify_floor(0x0E01), FloorTile::Chasm(ChasmKind::LAVA));
    }

    #[test]
    fn other_floor_ids_are_textures() {
        assert_eq!(classify_floor(0x0502), FloorTile::Textured { texture_id: 5 });
        assert_eq!(classify_floor(0x0F00), FloorTile::Textured { texture_id: 0x0F });
        assert_eq!(classify_floor(0x0000), FloorTile::Textured { texture_id: 0 });
    }

    #[test]
    fn top_bit_is_an_object_regardless_of_payload() {
        assert_eq!(classify_wall(0x8001), WallTile::Object(0x8001));
        assert_eq!(classify_wall(0x8000), WallTile::Object(0x8000));
        assert_eq!(classify_wall(0xFFFF), WallTile::Object(0xFFFF));
    }

    #[test]
    fn equal_bytes_are_solid() {
        assert_eq!(classify_wall(0x0707), WallTile::Solid { texture_id: 7 });
        assert_eq!(classify_wall(0x0000), WallTile::Empty);
    }

    #[test]
    fn unequal_bytes_are_platforms() {
        assert_eq!(
            classify_wall(0x1203),
            WallTile::Platform {
                height: 0x12,
                cap_id: 0,
                side_id: 3
            }
        );
        assert_eq!(
            classify_wall(0x4025),
            WallTile::Platform {
                height: 0x40,
                cap_id: 2,
                side_id: 5
            }
        );
    }

    #[test]
    fn bit_seven_is_ignored_when_comparing_bytes() {
        // 0x0787: LSB masks to 0x07, same as the MSB.
        assert_eq!(classify_wall(0x0787), WallTile::Solid { texture_id: 7 });
    }

    #[test]
    fn resolver_passes_nibbles_through() {
        assert_eq!(
            resolve_platform_textures(2, 5),
            PlatformTextures { side_id: 5, cap_id: 2 }
        );
    }

    #[test]
    fn tile_words_are_little_endian() {
        let bytes = [0x02, 0x05, 0x07, 0x07];
        assert_eq!(tile_word(&bytes, 0), 0x0502);
        assert_eq!(tile_word(&bytes, 1), 0x0707);
    }
}
