//! Canonical lookup keys for person names.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// A person name reduced to a formatting-independent key.
///
/// The key is lowercased, stripped of everything except ASCII letters and
/// whitespace, split into tokens and rejoined in sorted order with single
/// spaces. `"John Smith"` and `"Smith, John"` therefore compare equal. The
/// key is not collision-free: two different people with the same tokens
/// share it.
///
/// # Examples
/// ```
/// use orgtree_core::NormalizedName;
///
/// assert_eq!(NormalizedName::new("Smith, John"), NormalizedName::new("  john   SMITH "));
/// assert_eq!(NormalizedName::new("O'Brien-Kelly").as_str(), "obrienkelly");
/// assert!(NormalizedName::new("").is_empty());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalizes a raw name.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let stripped: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();
        let mut tokens: Vec<&str> = stripped.split_whitespace().collect();
        tokens.sort_unstable();
        Self(tokens.join(" "))
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the key has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the sorted name tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }
}

impl Borrow<str> for NormalizedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a raw name. Shorthand for [`NormalizedName::new`].
#[must_use]
pub fn normalize(raw: &str) -> NormalizedName {
    NormalizedName::new(raw)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("John Smith", "john smith")]
    #[case("Smith, John", "john smith")]
    #[case("  Mary\tAnne  O'Neil ", "anne mary oneil")]
    #[case("Dr. Zoë Adams", "adams dr zo")]
    #[case("12345", "")]
    #[case("", "")]
    fn normalizes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw).as_str(), expected);
    }

    #[rstest]
    fn tokens_skip_nothing_for_simple_names() {
        let name = normalize("Carol Ann Jones");
        assert_eq!(name.tokens().collect::<Vec<_>>(), ["ann", "carol", "jones"]);
    }

    #[rstest]
    fn borrows_as_str_for_map_lookups() {
        let mut map = std::collections::HashMap::new();
        map.insert(normalize("Alice Jones"), 1_u8);
        assert_eq!(map.get("alice jones"), Some(&1));
    }

    fn name_tokens() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Za-z]{1,8}", 1..5)
    }

    proptest! {
        #[test]
        fn token_order_and_case_are_irrelevant(
            tokens in name_tokens(),
            seed in any::<u64>(),
            upper in any::<bool>(),
        ) {
            let original = tokens.join(" ");
            let mut shuffled = tokens.clone();
            let len = shuffled.len();
            shuffled.rotate_left(usize::try_from(seed % len as u64).unwrap_or(0));
            let mut variant = shuffled.join("  ");
            if upper {
                variant = variant.to_uppercase();
            } else {
                variant = variant.to_lowercase();
            }
            prop_assert_eq!(normalize(&original), normalize(&variant));
        }

        #[test]
        fn normalization_is_idempotent(raw in ".{0,40}") {
            let once = normalize(&raw);
            let twice = normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }
    }
}
