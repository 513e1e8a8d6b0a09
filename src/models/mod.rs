//! Data models for `CoordLink`
//!
//! Coordinates are transient values: they are created by parsing user input
//! and handed straight back to the caller.

pub mod coordinate;

pub use coordinate::Coordinate;
