//! # Voxel Grid Module
//!
//! A dense `width x height x depth` array of voxel ids. Each id indexes the descriptor
//! table produced alongside the grid; id 0 is always air.
//!
//! ## Memory Layout
//!
//! Cells are stored X-fastest, then Y, then Z:
//!
//! `index = x + y * width + z * width * height`
//!
//! so one horizontal row of a layer is contiguous, which is the order the renderer walks.

use super::VoxelId;

/// Id every cell starts with.
pub const AIR_ID: VoxelId = 0;

/// Dense id grid for one decoded level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    voxels: Vec<VoxelId>,
}

impl VoxelGrid {
    /// Creates a grid filled with air.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        VoxelGrid {
            width,
            height,
            depth,
            voxels: vec![AIR_ID; width * height * depth],
        }
    }

    /// Cells along X.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along Y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells along Z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        (x < self.width && y < self.height && z < self.depth)
            .then(|| x + (y * self.width) + (z * self.width * self.height))
    }

    /// The id at a cell, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<VoxelId> {
        self.index(x, y, z).map(|index| self.voxels[index])
    }

    /// Writes the id at a cell.
    ///
    /// # Panics
    /// Panics if the cell lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: VoxelId) {
        let index = self
            .index(x, y, z)
            .unwrap_or_else(|| {
                panic!(
                    "voxel ({x}, {y}, {z}) outside {}x{}x{} grid",
                    self.width, self.height, self.depth
                )
            });
        self.voxels[index] = id;
    }

    /// All ids in storage order.
    pub fn voxels(&self) -> &[VoxelId] {
        &self.voxels
    }

    /// The id array as raw bytes, for direct upload by the renderer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }

    /// Resets every cell to air.
    pub fn clear(&mut self) {
        self.voxels.fill(AIR_ID);
    }

    /// Number of cells holding something other than air.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|id| **id != AIR_ID).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_air() {
        let grid = VoxelGrid::new(3, 5, 2);
        assert_eq!(grid.voxels().len(), 30);
        assert_eq!(grid.solid_count(), 0);
        assert_eq!(grid.get(2, 4, 1), Some(AIR_ID));
        assert_eq!(grid.get(3, 0, 0), None);
    }

    #[test]
    fn storage_order_is_x_then_y_then_z() {
        let mut grid = VoxelGrid::new(2, 3, 2);
        grid.set(1, 2, 1, 7);
        assert_eq!(grid.voxels()[1 + 2 * 2 + 2 * 3], 7);
        assert_eq!(grid.get(1, 2, 1), Some(7));
    }

    #[test]
    fn bytes_view_matches_ids() {
        let mut grid = VoxelGrid::new(1, 1, 2);
        grid.set(0, 0, 1, 0x0102);
        assert_eq!(grid.as_bytes().len(), 4);
        assert_eq!(&grid.as_bytes()[2..], &0x0102u16.to_ne_bytes());
    }

    #[test]
    fn clear_restores_air() {
        let mut grid = VoxelGrid::new(2, 2, 2);
        grid.set(0, 1, 0, 3);
        grid.clear();
        assert_eq!(grid, VoxelGrid::new(2, 2, 2));
    }

    #[test]
    #[should_panic]
    fn set_outside_grid_panics() {
        VoxelGrid::new(1, 1, 1).set(0, 1, 0, 1);
    }
}
