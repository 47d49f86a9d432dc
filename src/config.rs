//! Decode options.

use serde::Deserialize;

use crate::error::ConfigError;

/// Grid height used when nothing else is configured.
pub const DEFAULT_GRID_HEIGHT: usize = 5;

/// Layers the decoder writes: floor at y = 0, walls at y = 1.
pub const DECODED_LAYERS: usize = 2;

/// Tunables for turning a level into a voxel grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Voxel layers allocated per column.
    pub grid_height: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            grid_height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl DecodeOptions {
    /// Checks that the options can hold a decoded level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_height < DECODED_LAYERS {
            return Err(ConfigError::GridHeight(self.grid_height));
        }
        Ok(())
    }
}
