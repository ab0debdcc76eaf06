#![allow(clippy::bool_comparison)]

pub mod primitive;
pub mod strategy;
pub mod tree;

// Reexport necessary items.
pub use strategy::{DimensionChoice, GroupingChoice, SeedChoice, SplitChoice};
pub use tree::{axis::AxisTree, group::GroupTree, BuildError, BuildParameter};

pub extern crate fastrand;
