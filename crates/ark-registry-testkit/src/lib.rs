//! # ARK Registry Testkit
//!
//! Testing utilities for the ARK registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an in-memory [`EntityGraph`](ark_registry_locator::EntityGraph)
//!   with a builder API for wiring up authorities, organizations,
//!   schemes, and nested units
//! - **Generators**: proptest strategies for NAANs, names, and qualifiers
//!
//! ## Fixtures
//!
//! ```rust
//! use ark_registry_core::Naan;
//! use ark_registry_testkit::GraphFixture;
//!
//! let mut graph = GraphFixture::new();
//! let container = graph.organization(Naan::new(17));
//! let unit = graph.unit_in(container);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ark_registry_testkit::generators::{naan, minted_name};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(naan in naan(), name in minted_name()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::GraphFixture;
