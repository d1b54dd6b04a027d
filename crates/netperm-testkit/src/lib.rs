//! # Netperm Testkit
//!
//! Testing utilities for netperm.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Parse vectors**: Operator-facing entries with their expected outcome
//! - **Generators**: Proptest strategies for flags, tokens, subnets, and entries
//!
//! ## Parse Vectors
//!
//! ```rust
//! use netperm_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches) in verify_all_vectors() {
//!     assert!(matches, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use netperm::SubnetPermission;
//! use netperm_testkit::generators::SubnetEntryParams;
//!
//! proptest! {
//!     #[test]
//!     fn entry_parses(params: SubnetEntryParams) {
//!         let perm = SubnetPermission::try_parse(&params.to_entry()).unwrap();
//!         prop_assert_eq!(perm.flags, params.expected_flags());
//!     }
//! }
//! ```

pub mod generators;
pub mod vectors;

pub use generators::SubnetEntryParams;
pub use vectors::{all_vectors, run_vector, verify_all_vectors, ParseVector};
