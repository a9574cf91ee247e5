//! quadseg-test - Regression test framework for quadseg
//!
//! Integration tests record every check through a [`RegParams`] instead of
//! asserting immediately, so one run reports all failing checks of a test
//! together with their running index.
//!
//! # Usage
//!
//! ```ignore
//! use quadseg_test::RegParams;
//!
//! let mut rp = RegParams::new("quadtree_build");
//! rp.compare_values(7.0, tree.leaf_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::RegParams;
