//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Random (dice draws; swapped for seeded or fixed sources in tests)

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of inclusive integer draws.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw from `min..=max`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
