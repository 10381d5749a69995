//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use streamvis_rs::types::Viewport;

/// Viewport the reference layout numbers are given for
pub const REFERENCE_VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

/// Upper bound on ticks for a packet to cross the reference layout twice
pub const MAX_JOURNEY_TICKS: usize = 2000;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
