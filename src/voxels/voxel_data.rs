//! # Voxel Data Module
//!
//! A `VoxelData` describes how one kind of voxel is drawn: which textures cover its sides,
//! floor and ceiling faces, how tall it is and which part of the side texture is sampled.
//! Grid cells never hold a `VoxelData` directly, only an index into a shared table of them.

/// Texture slots of a voxel, in the order the renderer samples them.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum VoxelFace {
    /// The four vertical faces.
    SIDE = 0,
    /// The bottom face.
    FLOOR = 1,
    /// The top face.
    CEILING = 2,
}

/// Renderable description of a voxel, shared by every cell that references it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelData {
    /// Texture of the vertical faces.
    pub side_id: u8,
    /// Texture of the bottom face.
    pub floor_id: u8,
    /// Texture of the top face.
    pub ceiling_id: u8,
    /// Offset of the voxel's bottom from the cell floor, in voxel units.
    pub y_offset: f64,
    /// Height of the voxel, in voxel units.
    pub y_size: f64,
    /// Texture V coordinate sampled at the top of the side faces.
    pub top_v: f64,
    /// Texture V coordinate sampled at the bottom of the side faces.
    pub bottom_v: f64,
}

impl VoxelData {
    /// A full-size cube using one texture everywhere.
    pub fn new(texture_id: u8) -> Self {
        VoxelData::with_textures(texture_id, texture_id, texture_id, 0.0, 1.0, 0.0, 1.0)
    }

    /// Fully specified voxel data.
    ///
    /// # Arguments
    /// * `side_id`, `floor_id`, `ceiling_id` - Texture ids for each face group
    /// * `y_offset`, `y_size` - Vertical placement in voxel units
    /// * `top_v`, `bottom_v` - Side texture coordinate bounds
    pub fn with_textures(
        side_id: u8,
        floor_id: u8,
        ceiling_id: u8,
        y_offset: f64,
        y_size: f64,
        top_v: f64,
        bottom_v: f64,
    ) -> Self {
        VoxelData {
            side_id,
            floor_id,
            ceiling_id,
            y_offset,
            y_size,
            top_v,
            bottom_v,
        }
    }

    /// The descriptor used for empty cells. It is always entry 0 of a descriptor table.
    pub fn air() -> Self {
        VoxelData::new(0)
    }

    /// Texture ids indexed by `VoxelFace`.
    pub fn texture_ids(&self) -> [u8; 3] {
        [self.side_id, self.floor_id, self.ceiling_id]
    }

    /// The texture id covering `face`.
    pub fn texture_for(&self, face: VoxelFace) -> u8 {
        self.texture_ids()[face as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_texture_voxel_fills_every_slot() {
        let data = VoxelData::new(9);
        assert_eq!(data.texture_ids(), [9, 9, 9]);
        assert_eq!((data.y_offset, data.y_size), (0.0, 1.0));
        assert_eq!((data.top_v, data.bottom_v), (0.0, 1.0));
    }

    #[test]
    fn faces_index_their_slots() {
        let data = VoxelData::with_textures(1, 2, 3, 0.0, 0.5, 0.5, 1.0);
        assert_eq!(data.texture_for(VoxelFace::SIDE), 1);
        assert_eq!(data.texture_for(VoxelFace::FLOOR), 2);
        assert_eq!(data.texture_for(VoxelFace::CEILING), 3);
    }
}
