//! Preset constants.

pub mod catalog;
pub mod front3d;
