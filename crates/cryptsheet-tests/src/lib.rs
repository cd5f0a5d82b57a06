//! cryptsheet End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full slicing flow:
//!
//! - Pipeline: catalog -> frame sets -> published blobs
//! - **Determinism**: byte-identical variants across runs
//! - Geometry: tiling and scaling properties over arbitrary inputs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cryptsheet-tests
//! ```
//!
//! ## Fixtures
//!
//! [`fixtures::DataDirFixture`] builds a throwaway data directory holding
//! generated sprite sheets and a matching `catalog.json`:
//!
//! ```rust,ignore
//! use cryptsheet_tests::fixtures::DataDirFixture;
//!
//! let mut data = DataDirFixture::new();
//! data.add_enemy("Bat", "A", 4, 128, 64);
//! data.write_catalog();
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{
    compute_hash, digest_variants, verify_determinism, DeterminismResult, VariantDigest,
};
pub use fixtures::{sheet_pixels, DataDirFixture};
