// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod series;
pub mod statistics;
pub mod volume;
pub mod volume_count;
pub mod wishlist;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Series Domain
pub use series::{validate_series, validate_total_volumes, NewSeries, Series};

// Volume Domain
pub use volume::{validate_volume_number, Volume};

// Statistics Domain (Derived Data)
pub use statistics::{LibraryStats, SeriesOwnership};

// Wishlist (Derived Data)
pub use wishlist::{missing_volumes, WishlistEntry};

// Volume Count Value Objects
pub use volume_count::{
    IsbnLookup, ResolvedVolumeCount, SeriesMatchCandidate, VolumeCountSource, VolumeCoverEntry,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
