// Rotor catalog: every rotor a machine may be fitted with, keyed by name.

use std::sync::Arc;

use enigma_core::Alphabet;
use hashbrown::HashMap;

use crate::{MachineError, Rotor};

/// Immutable set of available rotors.
///
/// Names are matched case-insensitively. Rotors stay at position 0 in the
/// catalog; a machine clones the ones it needs, so machines built from the
/// same catalog never share rotor state.
#[derive(Debug, Clone)]
pub struct RotorCatalog {
    alphabet: Arc<Alphabet>,
    /// Rotors in definition order.
    rotors: Vec<Rotor>,
    /// Upper-cased name to position in `rotors`.
    by_name: HashMap<String, usize>,
}

impl RotorCatalog {
    /// Build a catalog over `alphabet` from `rotors`.
    ///
    /// Fails if two rotors share a name (ignoring case) or a rotor is wired
    /// over a different alphabet.
    pub fn new(
        alphabet: Arc<Alphabet>,
        rotors: impl IntoIterator<Item = Rotor>,
    ) -> Result<Self, MachineError> {
        let mut catalog = Self {
            alphabet,
            rotors: Vec::new(),
            by_name: HashMap::new(),
        };
        for rotor in rotors {
            catalog.add(rotor)?;
        }
        Ok(catalog)
    }

    fn add(&mut self, rotor: Rotor) -> Result<(), MachineError> {
        if **rotor.alphabet() != *self.alphabet {
            return Err(MachineError::AlphabetMismatch(format!(
                "rotor {}",
                rotor.name()
            )));
        }
        let key = rotor.name().to_uppercase();
        if self.by_name.contains_key(&key) {
            return Err(MachineError::DuplicateRotor(rotor.name().to_string()));
        }
        self.by_name.insert(key, self.rotors.len());
        self.rotors.push(rotor);
        Ok(())
    }

    /// Look up a rotor by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Rotor> {
        self.by_name
            .get(&name.to_uppercase())
            .map(|&i| &self.rotors[i])
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Rotors in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }

    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigma_core::Permutation;

    fn alpha() -> Arc<Alphabet> {
        Arc::new(Alphabet::new("ABCD").unwrap())
    }

    fn rotors(alpha: &Arc<Alphabet>) -> Vec<Rotor> {
        let perm = |c: &str| Permutation::new(c, alpha.clone()).unwrap();
        vec![
            Rotor::reflector("R1", perm("(AB)(CD)")).unwrap(),
            Rotor::fixed("Beta", perm("(ABC)")),
            Rotor::moving("I", perm("(ABCD)"), "B").unwrap(),
        ]
    }

    #[test]
    fn lookup_ignores_case() {
        let alpha = alpha();
        let catalog = RotorCatalog::new(alpha.clone(), rotors(&alpha)).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("BETA").unwrap().name(), "Beta");
        assert_eq!(catalog.get("beta").unwrap().name(), "Beta");
        assert_eq!(catalog.get("r1").unwrap().name(), "R1");
        assert!(catalog.get("II").is_none());
    }

    #[test]
    fn keeps_definition_order() {
        let alpha = alpha();
        let catalog = RotorCatalog::new(alpha.clone(), rotors(&alpha)).unwrap();
        let names: Vec<&str> = catalog.iter().map(Rotor::name).collect();
        assert_eq!(names, ["R1", "Beta", "I"]);
    }

    #[test]
    fn reject_duplicate_names() {
        let alpha = alpha();
        let mut list = rotors(&alpha);
        list.push(Rotor::fixed(
            "BETA",
            Permutation::identity(alpha.clone()),
        ));
        assert_eq!(
            RotorCatalog::new(alpha, list).unwrap_err(),
            MachineError::DuplicateRotor("BETA".to_string())
        );
    }

    #[test]
    fn reject_foreign_alphabet() {
        let other = Arc::new(Alphabet::new("ABCDE").unwrap());
        let stray = Rotor::fixed("Gamma", Permutation::identity(other));
        assert!(matches!(
            RotorCatalog::new(alpha(), vec![stray]),
            Err(MachineError::AlphabetMismatch(_))
        ));
    }

    #[test]
    fn empty_catalog() {
        let catalog = RotorCatalog::new(alpha(), Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
