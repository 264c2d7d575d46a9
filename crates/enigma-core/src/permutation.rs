// Permutations over an alphabet, parsed from cycle notation.

use std::sync::Arc;

use crate::{Alphabet, EnigmaError};

/// A bijection over the indices `0..alphabet.size()`.
///
/// Built from cycle notation such as `(AELT)(BK)`, where each symbol maps to
/// the one after it and the last symbol of a cycle maps back to the first.
/// Symbols not named in any cycle map to themselves.
///
/// Both the forward and the inverse table are filled in once at
/// construction, so `permute` and `invert` are plain lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parse `cycles` relative to `alphabet`.
    ///
    /// Whitespace is ignored. Empty text yields the identity.
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];

        // Indices of the cycle currently being read; None outside parentheses.
        let mut open: Option<Vec<usize>> = None;

        for ch in cycles.chars() {
            if ch.is_whitespace() {
                continue;
            }
            match ch {
                '(' => {
                    if open.is_some() {
                        return Err(EnigmaError::MalformedCycle(format!(
                            "nested '(' in \"{cycles}\""
                        )));
                    }
                    open = Some(Vec::new());
                }
                ')' => match open.take() {
                    Some(cycle) => link_cycle(&mut forward, &cycle),
                    None => {
                        return Err(EnigmaError::MalformedCycle(format!(
                            "unbalanced ')' in \"{cycles}\""
                        )));
                    }
                },
                _ => {
                    let Some(cycle) = open.as_mut() else {
                        return Err(EnigmaError::MalformedCycle(format!(
                            "symbol '{ch}' outside of a cycle in \"{cycles}\""
                        )));
                    };
                    let index = alphabet.index(ch)?;
                    if seen[index] {
                        return Err(EnigmaError::MalformedCycle(format!(
                            "symbol '{ch}' appears more than once in \"{cycles}\""
                        )));
                    }
                    seen[index] = true;
                    cycle.push(index);
                }
            }
        }

        if open.is_some() {
            return Err(EnigmaError::MalformedCycle(format!(
                "unterminated cycle in \"{cycles}\""
            )));
        }

        Ok(Self::from_table(forward, alphabet))
    }

    /// The permutation that maps every index to itself.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let forward = (0..alphabet.size()).collect();
        Self::from_table(forward, alphabet)
    }

    fn from_table(forward: Vec<usize>, alphabet: Arc<Alphabet>) -> Self {
        let mut inverse = vec![0; forward.len()];
        for (from, &to) in forward.iter().enumerate() {
            inverse[to] = from;
        }
        Self {
            alphabet,
            forward,
            inverse,
        }
    }

    /// Number of indices permuted (the alphabet size).
    #[inline]
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Reduce `p` modulo `size()` into `0..size()`, negative values included.
    #[inline]
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Apply the permutation to `index` modulo the alphabet size.
    #[inline]
    pub fn permute(&self, index: usize) -> usize {
        self.forward[index % self.size()]
    }

    /// Apply the inverse permutation to `index` modulo the alphabet size.
    #[inline]
    pub fn invert(&self, index: usize) -> usize {
        self.inverse[index % self.size()]
    }

    /// Apply the permutation to a symbol of the alphabet.
    pub fn permute_symbol(&self, symbol: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.index(symbol)?;
        self.alphabet.symbol(self.permute(index))
    }

    /// Apply the inverse permutation to a symbol of the alphabet.
    pub fn invert_symbol(&self, symbol: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.index(symbol)?;
        self.alphabet.symbol(self.invert(index))
    }

    /// True iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(from, &to)| from != to)
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }
}

/// Point each member of `cycle` at the next one, closing the loop.
fn link_cycle(forward: &mut [usize], cycle: &[usize]) {
    for (pos, &from) in cycle.iter().enumerate() {
        forward[from] = cycle[(pos + 1) % cycle.len()];
    }
}

/// Canonical cycle notation: fixed points omitted, each cycle starting at its
/// lowest index, cycles ordered by that index.
impl std::fmt::Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols = self.alphabet.symbols();
        let mut visited = vec![false; self.size()];
        for start in 0..self.size() {
            if visited[start] || self.forward[start] == start {
                continue;
            }
            write!(f, "(")?;
            let mut index = start;
            while !visited[index] {
                visited[index] = true;
                write!(f, "{}", symbols[index])?;
                index = self.forward[index];
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
    const REFLECTOR_B: &str = "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";

    fn upper() -> Arc<Alphabet> {
        Arc::new(Alphabet::new(UPPER).unwrap())
    }

    fn perm(cycles: &str) -> Permutation {
        Permutation::new(cycles, upper()).unwrap()
    }

    /// Check every symbol of `alpha` against the expected image in `images`.
    fn check_perm(p: &Permutation, alpha: &str, images: &str) {
        for (from, to) in alpha.chars().zip(images.chars()) {
            assert_eq!(p.permute_symbol(from).unwrap(), to, "{from} -> {to}");
            assert_eq!(p.invert_symbol(to).unwrap(), from, "{to} <- {from}");
        }
    }

    #[test]
    fn identity_when_no_cycles() {
        let p = perm("");
        check_perm(&p, UPPER, UPPER);
        assert!(!p.derangement());
        assert_eq!(p, Permutation::identity(upper()));
    }

    #[test]
    fn rotor_i_wiring() {
        let p = perm(ROTOR_I);
        check_perm(&p, UPPER, "EKMFLGDQVZNTOWYHXUSPAIBRCJ");
    }

    #[test]
    fn whitespace_is_ignored() {
        let spaced = perm(" ( A B C ) ( D E ) ");
        let tight = perm("(ABC)(DE)");
        assert_eq!(spaced, tight);
        assert_eq!(tight.permute(0), 1);
        assert_eq!(tight.permute(2), 0);
        assert_eq!(tight.invert(0), 2);
        assert_eq!(tight.permute(3), 4);
        assert_eq!(tight.permute(4), 3);
        assert_eq!(tight.permute(25), 25);
    }

    #[test]
    fn inverse_law_and_closure() {
        for cycles in [ROTOR_I, REFLECTOR_B, "(ANOUPFRIMBZTLWKSVEGCJYDHXQ)", "(AQ)(EP)", ""] {
            let p = perm(cycles);
            let n = p.size();
            for i in 0..n {
                assert!(p.permute(i) < n);
                assert!(p.invert(i) < n);
                assert_eq!(p.invert(p.permute(i)), i);
                assert_eq!(p.permute(p.invert(i)), i);
            }
        }
    }

    #[test]
    fn derangement_iff_no_fixed_point() {
        let reflector = perm(REFLECTOR_B);
        assert!(reflector.derangement());
        assert!((0..26).all(|i| reflector.permute(i) != i));

        // (S) is a one-symbol cycle, so S stays put.
        let rotor = perm(ROTOR_I);
        assert!(!rotor.derangement());
        assert_eq!(rotor.permute_symbol('S').unwrap(), 'S');

        let small = Alphabet::new("AB").unwrap();
        assert!(Permutation::new("(AB)", Arc::new(small)).unwrap().derangement());
    }

    #[test]
    fn indices_wrap_modulo_size() {
        let p = perm("(ABC)");
        assert_eq!(p.permute(26), p.permute(0));
        assert_eq!(p.invert(27), p.invert(1));
        assert_eq!(p.wrap(-1), 25);
        assert_eq!(p.wrap(-27), 25);
        assert_eq!(p.wrap(52), 0);
        assert_eq!(p.permute(p.wrap(-26)), 1);
    }

    #[test]
    fn unknown_symbol_in_cycle() {
        let err = Permutation::new("(AB1)", upper()).unwrap_err();
        assert_eq!(err, EnigmaError::UnknownSymbol('1'));
    }

    #[test]
    fn repeated_symbol_is_malformed() {
        for bad in ["(ABA)", "(AB)(CA)"] {
            assert!(matches!(
                Permutation::new(bad, upper()),
                Err(EnigmaError::MalformedCycle(_))
            ));
        }
    }

    #[test]
    fn unbalanced_parentheses_are_malformed() {
        for bad in ["(AB", "AB)", "((AB))", "(AB)C", ")("] {
            assert!(
                matches!(
                    Permutation::new(bad, upper()),
                    Err(EnigmaError::MalformedCycle(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn symbol_lookup_outside_alphabet() {
        let p = perm("(AB)");
        assert_eq!(p.permute_symbol('a'), Err(EnigmaError::UnknownSymbol('a')));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(perm("(CAB) (ED) (F)").to_string(), "(ABC)(DE)");
        assert_eq!(perm("").to_string(), "");
        let p = perm(ROTOR_I);
        assert_eq!(perm(&p.to_string()), p);
    }
}
