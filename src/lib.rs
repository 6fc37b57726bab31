//! Moodgarden - a procedural mood garden core

pub mod core;
pub mod flower;
pub mod generation;
pub mod garden;
pub mod atmosphere;
