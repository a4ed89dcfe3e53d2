//! Strong type definitions for the ARK registry.
//!
//! Identifier components are newtypes so a NAAN is never confused with an
//! entity id or a plain integer at a call site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNaanError;

/// A Name Assigning Authority Number.
///
/// Integer identifying the authority that minted a name. Rendered in
/// identifiers as its plain decimal form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Naan(pub u64);

impl Naan {
    /// Create a NAAN from its integer value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the integer value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Naan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Naan({})", self.0)
    }
}

impl fmt::Display for Naan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Naan {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for Naan {
    type Err = ParseNaanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self).map_err(|e| ParseNaanError {
            input: s.to_string(),
            reason: e.to_string(),
        })
    }
}

/// An organization permitted to mint identifiers.
///
/// Created administratively, never by the allocation path itself, and
/// immutable once created. `who` and `what` are each unique in whatever
/// system stores authorities; this core only carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingAuthority {
    /// Human-readable organization name.
    pub who: String,
    /// The authority's NAAN.
    pub what: Naan,
}

/// A parsed ARK identifier.
///
/// A value, not an owned record: the registry produces the string and the
/// surrounding system stores it on the entity. Canonical string form is
/// `naan/name[/qualifier]`; [`Ark::uri`] prepends the `ark:/` scheme.
///
/// An `Ark` carrying a qualifier is always scoped under a parent entity
/// whose own unqualified identifier supplies the `name` component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ark {
    naan: Naan,
    name: String,
    qualifier: Option<String>,
}

impl Ark {
    /// Create an unqualified identifier.
    pub fn new(naan: Naan, name: impl Into<String>) -> Self {
        Self {
            naan,
            name: name.into(),
            qualifier: None,
        }
    }

    /// Create an identifier scoped under a parent name by a qualifier.
    pub fn with_qualifier(
        naan: Naan,
        name: impl Into<String>,
        qualifier: impl Into<String>,
    ) -> Self {
        Self {
            naan,
            name: name.into(),
            qualifier: Some(qualifier.into()),
        }
    }

    /// The authority number component.
    pub fn naan(&self) -> Naan {
        self.naan
    }

    /// The name component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The qualifier component, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Canonical URI form: `ark:/naan/name[/qualifier]`.
    pub fn uri(&self) -> String {
        format!("ark:/{}", self)
    }
}

impl fmt::Display for Ark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.naan, self.name)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "/{}", qualifier)?;
        }
        Ok(())
    }
}

/// Shape of locally minted names.
///
/// Replaces the module-level prefix/length globals of older deployments
/// with explicit configuration handed to the grammar and the generator.
///
/// A minted name is `prefix + body + control_char` where the body is drawn
/// from the lowercase alphanumeric alphabet. The control character is a
/// fixed literal marker distinguishing locally minted names from foreign
/// ones; it is not a computed checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameShape {
    /// Fixed literal prefix of every minted name.
    pub prefix: String,
    /// Number of random body characters.
    pub body_length: usize,
    /// Fixed trailing literal of every minted name.
    pub control_char: char,
    /// Number of random characters in a minted qualifier.
    pub qualifier_length: usize,
}

impl NameShape {
    /// Total length of a minted name: prefix + body + control character.
    pub fn name_length(&self) -> usize {
        self.prefix.len() + self.body_length + self.control_char.len_utf8()
    }
}

impl Default for NameShape {
    fn default() -> Self {
        Self {
            prefix: "rf".to_string(),
            body_length: 7,
            control_char: 'g',
            qualifier_length: 10,
        }
    }
}
