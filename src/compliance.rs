// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Compliance of a repository against the five fair-software.eu recommendations
//!
//! A [`Compliance`] holds one tri-state value per recommendation, always in the
//! order repository, license, registry, citation, checklist. The position is
//! what identifies the recommendation, both in memory and in the badge text.

use crate::checks::Recommendation;
use crate::error::{FairbotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between encoded symbols in a badge URL (two spaces)
pub const ENCODED_SEPARATOR: &str = "%20%20";

/// Display symbols used when rendering a compliance vector.
///
/// Deserializing goes through [`Symbols::new`], so a pair of identical
/// symbols is rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SymbolPair")]
pub struct Symbols {
    compliant: char,
    noncompliant: char,
}

impl Symbols {
    /// Create a symbol pair. The two symbols must differ.
    pub fn new(compliant: char, noncompliant: char) -> Result<Self> {
        if compliant == noncompliant {
            return Err(FairbotError::IdenticalSymbols(compliant));
        }
        Ok(Self {
            compliant,
            noncompliant,
        })
    }

    pub fn compliant(&self) -> char {
        self.compliant
    }

    pub fn noncompliant(&self) -> char {
        self.noncompliant
    }
}

/// Unchecked wire form of [`Symbols`]
#[derive(Deserialize)]
struct SymbolPair {
    compliant: char,
    noncompliant: char,
}

impl TryFrom<SymbolPair> for Symbols {
    type Error = FairbotError;

    fn try_from(pair: SymbolPair) -> Result<Self> {
        Self::new(pair.compliant, pair.noncompliant)
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            compliant: '\u{25CF}',
            noncompliant: '\u{25CB}',
        }
    }
}

/// Compliance vector over the five recommendations.
///
/// Equality compares the five values *and* the symbol pair, so two vectors
/// with identical values but different symbols are not equal.
///
/// There is deliberately no `PartialOrd`: "more compliant" is decided by the
/// number of compliant fields alone (see [`Compliance::exceeds`]), which would
/// disagree with `==` for distinct vectors of equal count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compliance {
    repository: Option<bool>,
    license: Option<bool>,
    registry: Option<bool>,
    citation: Option<bool>,
    checklist: Option<bool>,
    #[serde(skip)]
    symbols: Symbols,
}

impl Compliance {
    /// Vector with all five values known
    pub fn new(repository: bool, license: bool, registry: bool, citation: bool, checklist: bool) -> Self {
        Self::from_values([
            Some(repository),
            Some(license),
            Some(registry),
            Some(citation),
            Some(checklist),
        ])
    }

    /// Vector from values in recommendation order
    pub fn from_values(values: [Option<bool>; 5]) -> Self {
        let [repository, license, registry, citation, checklist] = values;
        Self {
            repository,
            license,
            registry,
            citation,
            checklist,
            symbols: Symbols::default(),
        }
    }

    /// Vector where every value is unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Replace the display symbols
    pub fn with_symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn symbols(&self) -> Symbols {
        self.symbols
    }

    /// The five values in recommendation order
    pub fn values(&self) -> [Option<bool>; 5] {
        [
            self.repository,
            self.license,
            self.registry,
            self.citation,
            self.checklist,
        ]
    }

    pub fn repository(&self) -> Option<bool> {
        self.repository
    }

    pub fn license(&self) -> Option<bool> {
        self.license
    }

    pub fn registry(&self) -> Option<bool> {
        self.registry
    }

    pub fn citation(&self) -> Option<bool> {
        self.citation
    }

    pub fn checklist(&self) -> Option<bool> {
        self.checklist
    }

    /// Iterate over the five values in recommendation order.
    ///
    /// Each call starts a fresh iterator.
    pub fn iter(&self) -> impl Iterator<Item = Option<bool>> {
        self.values().into_iter()
    }

    /// Value for one recommendation
    pub fn get(&self, recommendation: Recommendation) -> Option<bool> {
        self.values()[recommendation.index()]
    }

    /// Number of fields equal to `value`
    pub fn count(&self, value: Option<bool>) -> usize {
        self.iter().filter(|v| *v == value).count()
    }

    /// Number of compliant fields
    pub fn compliant_count(&self) -> usize {
        self.count(Some(true))
    }

    /// Whether this vector has strictly more compliant fields than `other`
    pub fn exceeds(&self, other: &Compliance) -> bool {
        self.compliant_count() > other.compliant_count()
    }

    /// One symbol per recommendation; anything other than `Some(true)` renders as non-compliant
    pub fn as_symbols(&self) -> [char; 5] {
        self.values().map(|v| {
            if v == Some(true) {
                self.symbols.compliant
            } else {
                self.symbols.noncompliant
            }
        })
    }

    /// Percent-encoded symbols joined by an encoded double space, for badge URLs
    pub fn encode(&self) -> String {
        self.as_symbols()
            .iter()
            .map(|c| urlencoding::encode(c.encode_utf8(&mut [0; 4])).into_owned())
            .collect::<Vec<_>>()
            .join(ENCODED_SEPARATOR)
    }

    /// Decode badge text using the default symbols
    pub fn decode(text: &str) -> Self {
        Self::decode_with(text, Symbols::default())
    }

    /// Decode badge text.
    ///
    /// The text is percent-decoded and stripped of spaces; anything that does
    /// not leave exactly five symbols decodes to an all-unknown vector. Any
    /// symbol other than the compliant one reads as non-compliant.
    pub fn decode_with(text: &str, symbols: Symbols) -> Self {
        let unknown = Self::unknown().with_symbols(symbols);

        let Ok(decoded) = urlencoding::decode(text) else {
            return unknown;
        };
        let found: Vec<char> = decoded.chars().filter(|c| *c != ' ').collect();
        let Ok(found) = <[char; 5]>::try_from(found) else {
            return unknown;
        };

        Self::from_values(found.map(|c| Some(c == symbols.compliant))).with_symbols(symbols)
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.as_symbols();
        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_COMPLIANT: &str =
        "%E2%97%8F%20%20%E2%97%8F%20%20%E2%97%8F%20%20%E2%97%8F%20%20%E2%97%8F";

    #[test]
    fn test_encode_all_compliant() {
        let c = Compliance::new(true, true, true, true, true);
        assert_eq!(c.encode(), ALL_COMPLIANT);
    }

    #[test]
    fn test_encode_renders_unknown_as_noncompliant() {
        let c = Compliance::from_values([Some(true), None, Some(false), None, Some(true)]);
        assert_eq!(c.as_symbols(), ['●', '○', '○', '○', '●']);
    }

    #[test]
    fn test_decode_round_trip() {
        let c = Compliance::new(true, false, true, false, false);
        assert_eq!(Compliance::decode(&c.encode()), c);
    }

    #[test]
    fn test_decode_round_trip_custom_symbols() {
        let symbols = Symbols::new('Y', 'n').unwrap();
        let c = Compliance::new(false, true, true, false, true).with_symbols(symbols);
        assert_eq!(Compliance::decode_with(&c.encode(), symbols), c);
    }

    #[test]
    fn test_decode_plain_symbols_with_spaces() {
        let c = Compliance::decode("● ○ ● ○ ●");
        assert_eq!(c, Compliance::new(true, false, true, false, true));
    }

    #[test]
    fn test_decode_wrong_length_is_unknown() {
        for text in ["", "%E2%97%8F", "●●●●", "●●●●●●", "%E2%97%8F%20%20%E2%97%8F-green"] {
            let c = Compliance::decode(text);
            assert_eq!(c.count(None), 5, "expected all unknown for {:?}", text);
        }
    }

    #[test]
    fn test_decode_invalid_utf8_is_unknown() {
        assert_eq!(Compliance::decode("%FF%FF%FF%FF%FF"), Compliance::unknown());
    }

    #[test]
    fn test_count() {
        let c = Compliance::from_values([Some(true), Some(false), None, Some(true), Some(true)]);
        assert_eq!(c.count(Some(true)), 3);
        assert_eq!(c.count(Some(false)), 1);
        assert_eq!(c.count(None), 1);
    }

    #[test]
    fn test_equality_includes_symbols() {
        let a = Compliance::new(true, true, false, false, true);
        let b = a.clone().with_symbols(Symbols::new('+', '-').unwrap());
        assert_eq!(a.values(), b.values());
        assert_ne!(a, b);
    }

    #[test]
    fn test_exceeds_counts_compliant_fields() {
        let more = Compliance::new(true, true, false, false, false);
        let fewer = Compliance::new(false, false, false, false, true);
        assert!(more.exceeds(&fewer));
        assert!(!fewer.exceeds(&more));

        // same count, different fields: neither exceeds the other
        let other = Compliance::new(false, false, true, true, false);
        assert!(!more.exceeds(&other));
        assert!(!other.exceeds(&more));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let c = Compliance::new(true, false, true, false, true);
        let first: Vec<_> = c.iter().collect();
        let second: Vec<_> = c.iter().collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_symbols_rejected() {
        assert!(matches!(
            Symbols::new('x', 'x'),
            Err(FairbotError::IdenticalSymbols('x'))
        ));
    }

    #[test]
    fn test_deserialize_rejects_identical_symbols() {
        let err = serde_json::from_str::<Symbols>(r#"{"compliant":"x","noncompliant":"x"}"#);
        assert!(err.is_err());

        let ok = serde_json::from_str::<Symbols>(r#"{"compliant":"+","noncompliant":"-"}"#).unwrap();
        assert_eq!(ok, Symbols::new('+', '-').unwrap());
    }

    #[test]
    fn test_accessors_follow_recommendation_order() {
        let c = Compliance::from_values([Some(true), Some(false), None, Some(true), Some(false)]);
        assert_eq!(c.repository(), c.get(Recommendation::Repository));
        assert_eq!(c.license(), Some(false));
        assert_eq!(c.registry(), None);
        assert_eq!(c.citation(), c.get(Recommendation::Citation));
        assert_eq!(c.checklist(), Some(false));
    }

    #[test]
    fn test_display() {
        let c = Compliance::new(true, false, false, false, true);
        assert_eq!(c.to_string(), "● ○ ○ ○ ●");
    }
}
