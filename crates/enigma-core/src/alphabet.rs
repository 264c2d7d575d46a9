// Alphabet: symbol-to-index and index-to-symbol mapping.

use crate::{EnigmaError, RESERVED_SYMBOLS};
use hashbrown::HashMap;

/// An ordered, duplicate-free set of encodable symbols.
///
/// Symbol number `k` has index `k`. The mapping is fixed at construction and
/// every lookup is O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Maps index to symbol.
    symbols: Vec<char>,
    /// Maps symbol back to its index.
    indices: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `chars`, in order.
    ///
    /// Rejects an empty alphabet, repeated symbols, whitespace, and the
    /// reserved symbols `(`, `)` and `*`.
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        if chars.is_empty() {
            return Err(EnigmaError::Alphabet("alphabet is empty".to_string()));
        }

        let mut symbols = Vec::with_capacity(chars.len());
        let mut indices = HashMap::with_capacity(chars.len());

        for ch in chars.chars() {
            if RESERVED_SYMBOLS.contains(&ch) {
                return Err(EnigmaError::Alphabet(format!(
                    "reserved symbol '{ch}' in alphabet"
                )));
            }
            if ch.is_whitespace() {
                return Err(EnigmaError::Alphabet(
                    "whitespace in alphabet".to_string(),
                ));
            }
            if indices.insert(ch, symbols.len()).is_some() {
                return Err(EnigmaError::Alphabet(format!(
                    "symbol '{ch}' appears more than once"
                )));
            }
            symbols.push(ch);
        }

        Ok(Self { symbols, indices })
    }

    /// Number of symbols.
    #[inline]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    /// The symbol at `index`, where `0 <= index < size()`.
    pub fn symbol(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// The index of `symbol`, which must be in the alphabet.
    pub fn index(&self, symbol: char) -> Result<usize, EnigmaError> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::UnknownSymbol(symbol))
    }

    /// All symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.symbols {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    #[test]
    fn index_and_symbol_are_inverse() {
        let alpha = Alphabet::new(UPPER).unwrap();
        assert_eq!(alpha.size(), 26);
        for i in 0..alpha.size() {
            assert_eq!(alpha.index(alpha.symbol(i).unwrap()).unwrap(), i);
        }
        assert_eq!(alpha.index('A').unwrap(), 0);
        assert_eq!(alpha.index('Z').unwrap(), 25);
        assert_eq!(alpha.symbol(7).unwrap(), 'H');
    }

    #[test]
    fn contains_only_declared_symbols() {
        let alpha = Alphabet::new("XYZ").unwrap();
        assert!(alpha.contains('Y'));
        assert!(!alpha.contains('A'));
        assert!(!alpha.contains('y'));
    }

    #[test]
    fn non_letter_symbols_are_allowed() {
        let alpha = Alphabet::new("01.-\u{00c4}").unwrap();
        assert_eq!(alpha.size(), 5);
        assert_eq!(alpha.index('\u{00c4}').unwrap(), 4);
        assert_eq!(alpha.to_string(), "01.-\u{00c4}");
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let alpha = Alphabet::new("ABC").unwrap();
        assert_eq!(alpha.index('D'), Err(EnigmaError::UnknownSymbol('D')));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let alpha = Alphabet::new("ABC").unwrap();
        assert_eq!(
            alpha.symbol(3),
            Err(EnigmaError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn reject_duplicates() {
        assert!(matches!(
            Alphabet::new("ABCA"),
            Err(EnigmaError::Alphabet(_))
        ));
    }

    #[test]
    fn reject_reserved_symbols() {
        for bad in ["AB(", "A)B", "*AB"] {
            assert!(
                matches!(Alphabet::new(bad), Err(EnigmaError::Alphabet(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn reject_whitespace_and_empty() {
        assert!(Alphabet::new("AB C").is_err());
        assert!(Alphabet::new("").is_err());
    }
}
