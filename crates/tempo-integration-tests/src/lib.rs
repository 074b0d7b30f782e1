//! Integration test crate for the Tempo account store.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end account flows across multiple workspace
//! crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p tempo-integration-tests -- --ignored
//! ```
