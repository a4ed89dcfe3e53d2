//! # ARK Registry Core
//!
//! Pure primitives for the ARK registry: identifier values, the configured
//! name shape, and the two-dialect identifier grammar.
//!
//! This crate contains no I/O and no storage. Everything here is
//! deterministic computation over identifier strings.
//!
//! ## Key Types
//!
//! - [`Ark`] - A parsed ARK identifier: `naan/name[/qualifier]`
//! - [`Naan`] - Name Assigning Authority Number
//! - [`NamingAuthority`] - An organization permitted to mint identifiers
//! - [`NameShape`] - Configuration for the shape of locally minted names
//!
//! ## Grammar
//!
//! ARK strings come in two dialects: the strict shape this registry mints
//! itself, and the permissive shape accepted from foreign authorities.
//! See the [`grammar`] module.

pub mod error;
pub mod grammar;
pub mod types;

pub use error::{CoreError, ParseNaanError};
pub use grammar::{extract_ark_from_uri, parse_external, ArkGrammar, BODY_ALPHABET};
pub use types::{Ark, Naan, NameShape, NamingAuthority};
