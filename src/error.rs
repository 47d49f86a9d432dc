//! # Error Module
//!
//! Failure taxonomy for a map load. Every variant here is fatal for the load in progress:
//! no partially decoded grid is ever published. Tolerated anomalies (a trigger pointing at
//! a missing text or sound entry) are not errors and never reach this module.

use thiserror::Error;

/// The byte layout of the map buffer does not match the container format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A read ran past the end of the buffer or the enclosing level region.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, had {available}")]
    UnexpectedEof {
        /// Offset the read started at.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the enclosing region.
        available: usize,
    },

    /// A tag label that no loader is registered for.
    #[error("unknown tag {label:?} at offset {offset}")]
    UnknownTag {
        /// The label as read, lossily converted to text.
        label: String,
        /// Offset of the label.
        offset: usize,
    },

    /// A tag other than the one the format requires at this position.
    #[error("expected tag {expected} at offset {offset}, found {found:?}")]
    UnexpectedTag {
        /// The required label.
        expected: &'static str,
        /// The label actually read.
        found: String,
        /// Offset of the label.
        offset: usize,
    },

    /// A tag payload whose size violates what its loader accepts.
    #[error("tag {tag} has a {found} byte payload, expected {expected}")]
    PayloadSize {
        /// Label of the offending tag.
        tag: &'static str,
        /// Human readable description of the accepted size.
        expected: String,
        /// Declared payload size.
        found: usize,
    },

    /// Width or depth of zero in the map header.
    #[error("map dimensions {width}x{depth} are empty")]
    EmptyDimensions {
        /// Declared width.
        width: u16,
        /// Declared depth.
        depth: u16,
    },

    /// The header names a starting level beyond the declared level count.
    #[error("starting level {index} is out of range for {count} levels")]
    StartingLevel {
        /// Declared starting level.
        index: u8,
        /// Declared level count.
        count: u8,
    },

    /// The buffer holds fewer levels than the header declares.
    #[error("header declares {declared} levels but only {found} were present")]
    LevelCount {
        /// Level count from the header.
        declared: usize,
        /// Levels actually read.
        found: usize,
    },

    /// More distinct descriptors than a voxel id can address.
    #[error("descriptor table exceeds {limit} entries")]
    DescriptorOverflow {
        /// Largest addressable id count.
        limit: usize,
    },
}

/// The paired configuration resource or the decode options cannot satisfy the level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The info table has no ceiling height.
    #[error("ceiling height is missing from the level info")]
    MissingCeilingHeight,

    /// The info table has a ceiling height that cannot be used.
    #[error("ceiling height {0} is out of range")]
    CeilingHeightOutOfRange(u16),

    /// The decode options request a grid too short for floor and wall layers.
    #[error("grid height {0} cannot hold the floor and wall layers")]
    GridHeight(usize),

    /// A level index the container does not hold.
    #[error("level {index} requested but the map has {count} levels")]
    LevelIndex {
        /// Requested level.
        index: usize,
        /// Levels in the container.
        count: usize,
    },
}

/// Anything that aborts a map load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Malformed map bytes.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Unusable configuration.
    #[error("config mismatch: {0}")]
    Config(#[from] ConfigError),

    /// Reading an input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The info table could not be parsed.
    #[error("info table: {0}")]
    Info(#[from] serde_json::Error),
}

/// Result of byte-level container parsing.
pub type FormatResult<T> = std::result::Result<T, FormatError>;

/// Result of a complete map load.
pub type Result<T> = std::result::Result<T, LoadError>;
