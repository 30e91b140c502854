//! Domain models for MOBS.

pub mod metadata;
pub mod tenant;
