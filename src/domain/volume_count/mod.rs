// src/domain/volume_count/mod.rs
//
// Volume-count domain: pure value objects describing how many volumes a
// series has and which catalog entries back that answer.
//
// No persistence, no I/O. The matching rules live in
// services::volume_count_rules.

pub mod value_objects;

pub use value_objects::{
    IsbnLookup, ResolvedVolumeCount, SeriesMatchCandidate, VolumeCountSource, VolumeCoverEntry,
};
