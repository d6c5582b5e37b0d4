//! Maps free-text country aliases to canonical country names.

use regex::Regex;

/// Ordered alias table; the first pattern that matches wins.
pub struct CountryCanonicalizer {
    patterns: Vec<(Regex, &'static str)>,
}

impl CountryCanonicalizer {
    pub fn new() -> Self {
        let table: &[(&str, &'static str)] = &[
            (r"(?i)\b(USA|United States|US|America)\b", "United States"),
            (r"(?i)\b(UK|United Kingdom|Britain|England)\b", "United Kingdom"),
            (r"(?i)\b(Canada)\b", "Canada"),
            (r"(?i)\b(Australia)\b", "Australia"),
            (r"(?i)\b(New Zealand|NZ)\b", "New Zealand"),
        ];

        let patterns = table
            .iter()
            .map(|(pattern, canonical)| {
                (
                    Regex::new(pattern).expect("country alias pattern is valid"),
                    *canonical,
                )
            })
            .collect();

        Self { patterns }
    }

    /// Scan a raw location string for a known country alias. Matching is
    /// done against the whole text, not just a pre-extracted country field,
    /// so an alias anywhere in the string takes precedence over positional
    /// inference.
    pub fn canonicalize(&self, text: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .find(|(regex, _)| regex.is_match(text))
            .map(|(_, canonical)| *canonical)
    }

    /// Apply the alias table on top of a positionally-inferred country.
    /// A match overrides the inference; no match leaves it as-is.
    pub fn apply(&self, raw_text: &str, inferred: Option<String>) -> Option<String> {
        match self.canonicalize(raw_text) {
            Some(canonical) => Some(canonical.to_string()),
            None => inferred,
        }
    }
}

impl Default for CountryCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_aliases() {
        let canon = CountryCanonicalizer::new();
        assert_eq!(canon.canonicalize("Mansfield, Ohio, USA"), Some("United States"));
        assert_eq!(canon.canonicalize("somewhere in america"), Some("United States"));
        assert_eq!(canon.canonicalize("London, England"), Some("United Kingdom"));
        assert_eq!(canon.canonicalize("Matamata, NZ"), Some("New Zealand"));
        assert_eq!(canon.canonicalize("Toronto, Canada"), Some("Canada"));
    }

    #[test]
    fn no_alias_means_no_match() {
        let canon = CountryCanonicalizer::new();
        assert_eq!(canon.canonicalize("Paris, France"), None);
        // "US" only matches as a whole word.
        assert_eq!(canon.canonicalize("Muse studio"), None);
    }

    #[test]
    fn is_idempotent_on_canonical_names() {
        let canon = CountryCanonicalizer::new();
        for name in ["United States", "United Kingdom", "Canada", "Australia", "New Zealand"] {
            let once = canon.canonicalize(name).unwrap();
            assert_eq!(once, name);
            let twice = canon.canonicalize(once).unwrap();
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn apply_overrides_positional_inference() {
        let canon = CountryCanonicalizer::new();
        // Splitter guessed "Ohio" as country; the alias hit wins.
        assert_eq!(
            canon.apply("Mansfield, Ohio, USA", Some("Ohio".to_string())),
            Some("United States".to_string())
        );
        // No alias: the inference stands.
        assert_eq!(
            canon.apply("Paris, France", Some("France".to_string())),
            Some("France".to_string())
        );
        assert_eq!(canon.apply("Paris, France", None), None);
    }
}
