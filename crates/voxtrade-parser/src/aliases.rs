use std::collections::{BTreeMap, HashMap};

use crate::error::VocabularyError;
use crate::normalize::{strip_punctuation, NormalizedTranscript};
use crate::synonyms::canonical_action;

/// Spoken variant -> canonical instrument symbol.
///
/// Built once from a canonical -> variants map and never mutated. Variants
/// are keyed by the same normalization transcripts get (synonyms included),
/// so lookups ignore case, punctuation and extra spacing but are otherwise exact.
/// A variant may not contain an action word: the synonym table would fold
/// unregistered spellings ("bye", "by") onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentAliasTable {
    by_variant: HashMap<String, String>,
}

fn variant_key(text: &str) -> String {
    NormalizedTranscript::new(text).to_string()
}

impl InstrumentAliasTable {
    pub fn from_map(map: &BTreeMap<String, Vec<String>>) -> Result<Self, VocabularyError> {
        let mut by_variant: HashMap<String, String> = HashMap::new();

        for (canonical, variants) in map {
            let canonical = canonical.trim();
            if canonical.is_empty() {
                return Err(VocabularyError::EmptyCanonical);
            }

            for variant in variants {
                if strip_punctuation(variant)
                    .split_whitespace()
                    .any(|token| canonical_action(token).is_some())
                {
                    return Err(VocabularyError::ActionWordVariant {
                        canonical: canonical.to_string(),
                        variant: variant.trim().to_string(),
                    });
                }

                let key = variant_key(variant);
                if key.is_empty() {
                    return Err(VocabularyError::EmptyVariant {
                        canonical: canonical.to_string(),
                    });
                }

                match by_variant.get(&key) {
                    Some(existing) if existing != canonical => {
                        return Err(VocabularyError::ConflictingVariant {
                            variant: key,
                            first: existing.clone(),
                            second: canonical.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_variant.insert(key, canonical.to_string());
                    }
                }
            }
        }

        if by_variant.is_empty() {
            return Err(VocabularyError::NoInstrumentAliases);
        }

        Ok(Self { by_variant })
    }

    /// Resolve a spoken instrument to its canonical symbol.
    pub fn resolve(&self, spoken: &str) -> Option<&str> {
        self.by_variant.get(&variant_key(spoken)).map(String::as_str)
    }

    pub fn variant_count(&self) -> usize {
        self.by_variant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_variant.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, Vec<&str>)>) -> Result<InstrumentAliasTable, VocabularyError> {
        let map: BTreeMap<String, Vec<String>> = entries
            .into_iter()
            .map(|(canonical, variants)| {
                (
                    canonical.to_string(),
                    variants.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect();
        InstrumentAliasTable::from_map(&map)
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let aliases = table(vec![("TCS", vec!["TCS"])]).unwrap();
        assert_eq!(aliases.resolve("tcs"), Some("TCS"));
        assert_eq!(aliases.resolve("TCS"), Some("TCS"));
        assert_eq!(aliases.resolve("Tcs"), Some("TCS"));
    }

    #[test]
    fn lookup_is_exact() {
        let aliases = table(vec![("TCS", vec!["TCS"])]).unwrap();
        assert_eq!(aliases.resolve("TC"), None);
        assert_eq!(aliases.resolve("TCSL"), None);
        assert_eq!(aliases.resolve("TCS LTD"), None);
        assert_eq!(aliases.resolve("UNKNOWNSTOCK"), None);
    }

    #[test]
    fn multi_word_variants() {
        let aliases = table(vec![("TCS", vec!["TCS", "Tata Consultancy", "T.C.S."])]).unwrap();
        assert_eq!(aliases.resolve("TATA CONSULTANCY"), Some("TCS"));
        assert_eq!(aliases.resolve("  tata   consultancy "), Some("TCS"));
        assert_eq!(aliases.resolve("TCS"), Some("TCS"));
        assert_eq!(aliases.variant_count(), 2);
    }

    #[test]
    fn canonical_symbol_kept_verbatim() {
        let aliases = table(vec![("M&M", vec!["MAHINDRA", "M AND M"])]).unwrap();
        assert_eq!(aliases.resolve("mahindra"), Some("M&M"));
        assert_eq!(aliases.resolve("M&M"), None);
    }

    #[test]
    fn variants_containing_action_words_are_rejected() {
        assert_eq!(
            table(vec![("BYCO", vec!["BY"])]).unwrap_err(),
            VocabularyError::ActionWordVariant {
                canonical: "BYCO".to_string(),
                variant: "BY".to_string(),
            }
        );
        assert!(matches!(
            table(vec![("SELFSTORE", vec!["Self Store"])]),
            Err(VocabularyError::ActionWordVariant { .. })
        ));
        assert!(matches!(
            table(vec![("X", vec!["BUY"])]),
            Err(VocabularyError::ActionWordVariant { .. })
        ));
    }

    #[test]
    fn unregistered_spellings_never_resolve() {
        let aliases = table(vec![("BYCO", vec!["BYCO"]), ("TCS", vec!["TCS"])]).unwrap();
        for spoken in ["buy", "bye", "by", "BYCOS", "TCSS"] {
            assert_eq!(aliases.resolve(spoken), None, "{spoken}");
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(table(vec![]).unwrap_err(), VocabularyError::NoInstrumentAliases);
        assert_eq!(
            table(vec![("TCS", vec![])]).unwrap_err(),
            VocabularyError::NoInstrumentAliases
        );
    }

    #[test]
    fn conflicting_variant_is_rejected() {
        let err = table(vec![("TCS", vec!["TATA"]), ("TATAMOTORS", vec!["tata"])]).unwrap_err();
        assert!(matches!(err, VocabularyError::ConflictingVariant { .. }));
    }

    #[test]
    fn empty_entries_are_rejected() {
        assert_eq!(
            table(vec![(" ", vec!["X"])]).unwrap_err(),
            VocabularyError::EmptyCanonical
        );
        assert!(matches!(
            table(vec![("TCS", vec!["..."])]).unwrap_err(),
            VocabularyError::EmptyVariant { .. }
        ));
    }
}
