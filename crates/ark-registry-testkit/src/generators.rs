//! Proptest strategies for identifier components.

use proptest::prelude::*;

use ark_registry_core::{Naan, NameShape};

/// Strategy producing registered-looking NAANs.
pub fn naan() -> impl Strategy<Value = Naan> {
    (1u64..=99_999_999).prop_map(Naan::new)
}

/// Strategy producing names with the locally minted shape: prefix, random
/// body, trailing control character.
pub fn minted_name() -> impl Strategy<Value = String> {
    let shape = NameShape::default();
    let pattern = format!(
        "{}[a-z0-9]{{{}}}{}",
        regex::escape(&shape.prefix),
        shape.body_length,
        shape.control_char
    );
    proptest::string::string_regex(&pattern).expect("valid name pattern")
}

/// Strategy producing qualifiers of the configured length.
pub fn qualifier() -> impl Strategy<Value = String> {
    let shape = NameShape::default();
    proptest::string::string_regex(&format!("[a-z0-9]{{{}}}", shape.qualifier_length))
        .expect("valid qualifier pattern")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_registry_core::ArkGrammar;

    proptest! {
        #[test]
        fn test_minted_names_match_strict_grammar(
            naan in naan(),
            name in minted_name(),
        ) {
            let grammar = ArkGrammar::new(&NameShape::default()).unwrap();
            let raw = format!("{}/{}", naan, name);
            let ark = grammar.parse_internal(&raw).unwrap();
            prop_assert_eq!(ark.naan(), naan);
            prop_assert_eq!(ark.name(), name.as_str());
            prop_assert!(ark.qualifier().is_none());
        }

        #[test]
        fn test_qualified_names_match_strict_grammar(
            naan in naan(),
            name in minted_name(),
            qualifier in qualifier(),
        ) {
            let grammar = ArkGrammar::new(&NameShape::default()).unwrap();
            let raw = format!("{}/{}/{}", naan, name, qualifier);
            let ark = grammar.parse_internal(&raw).unwrap();
            prop_assert_eq!(ark.qualifier(), Some(qualifier.as_str()));
        }

        #[test]
        fn test_minted_names_have_fixed_length(name in minted_name()) {
            prop_assert_eq!(name.len(), NameShape::default().name_length());
        }
    }
}
