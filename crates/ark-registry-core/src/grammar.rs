//! The two-dialect ARK identifier grammar.
//!
//! Internally minted identifiers follow a strict shape derived from the
//! configured [`NameShape`]; identifiers supplied by foreign authorities
//! are matched permissively. Both parsers return `None` on malformed
//! input; callers decide whether that is fatal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CoreError;
use crate::types::{Ark, Naan, NameShape};

/// Permissive dialect: `[ark:/]<naan>/<name>[/<qualifier>]` with name and
/// qualifier as arbitrary word characters.
static EXTERNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:ark:/)?(?P<naan>\d+)/(?P<name>\w+)(?:/(?P<qualifier>\w+))?$")
        .expect("external ARK pattern is valid")
});

/// Alphabet of generated name and qualifier bodies.
pub const BODY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Strict-dialect parser compiled from a [`NameShape`].
///
/// The internal shape is `[ark:/]<naan>/<prefix><body><control>[/<qualifier>]`
/// where the body has exactly `shape.body_length` characters from the
/// lowercase alphanumeric alphabet.
#[derive(Debug, Clone)]
pub struct ArkGrammar {
    internal: Regex,
}

impl ArkGrammar {
    /// Compile the strict pattern for the given shape.
    pub fn new(shape: &NameShape) -> Result<Self, CoreError> {
        if shape.body_length == 0 {
            return Err(CoreError::InvalidShape(
                "body_length must be at least 1".to_string(),
            ));
        }
        let pattern = format!(
            r"^(?:ark:/)?(?P<naan>\d+)/(?P<name>{prefix}[a-z0-9]{{{len}}}{control})(?:/(?P<qualifier>\w+))?$",
            prefix = regex::escape(&shape.prefix),
            len = shape.body_length,
            control = regex::escape(&shape.control_char.to_string()),
        );
        Ok(Self {
            internal: Regex::new(&pattern)?,
        })
    }

    /// Parse a candidate in the strict internal dialect.
    ///
    /// Returns `None` when the candidate does not match the configured
    /// shape, including names minted by foreign authorities.
    pub fn parse_internal(&self, candidate: &str) -> Option<Ark> {
        captures_to_ark(self.internal.captures(candidate)?)
    }
}

/// Parse a candidate in the permissive external dialect.
///
/// Accepts identifiers minted by a foreign authority that do not follow
/// this registry's own name shape. Returns `None` on malformed input.
pub fn parse_external(candidate: &str) -> Option<Ark> {
    captures_to_ark(EXTERNAL.captures(candidate)?)
}

/// Extract an ARK identifier embedded in an arbitrary URL.
///
/// Finds the `ark:/` marker, keeps exactly the first two path segments
/// after it (any qualifier or sub-resource is discarded), and strips
/// fragment and query suffixes. Returns `None` when no well-formed
/// `naan/name` pair follows the marker.
pub fn extract_ark_from_uri(url: &str) -> Option<Ark> {
    let (_, rest) = url.split_once("ark:/")?;
    let mut segments = rest.splitn(3, '/');
    let naan = segments.next()?;
    let name = segments.next()?;
    let mut ark = format!("{}/{}", naan, name);
    for delim in ['#', '?'] {
        if let Some(pos) = ark.find(delim) {
            ark.truncate(pos);
        }
    }
    parse_external(&ark)
}

fn captures_to_ark(caps: regex::Captures<'_>) -> Option<Ark> {
    // u64 overflow on an absurd digit run is a non-match, not a panic
    let naan: Naan = caps.name("naan")?.as_str().parse().ok()?;
    let name = caps.name("name")?.as_str();
    match caps.name("qualifier") {
        Some(q) => Some(Ark::with_qualifier(naan, name, q.as_str())),
        None => Some(Ark::new(naan, name)),
    }
}
