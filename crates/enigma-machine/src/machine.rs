// The machine: rotor slots, plugboard, stepping and the encoding pipeline.
//
// Slot 0 holds the reflector, the next `num_rotors - pawls` slots hold fixed
// rotors, and the rightmost `pawls` slots hold moving rotors. The rightmost
// slot is closest to the keyboard.

use std::sync::Arc;

use enigma_core::{Alphabet, Permutation};

use crate::{MachineError, Rotor, RotorCatalog};

/// A configured rotor cipher machine.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    catalog: Arc<RotorCatalog>,
    /// Inserted rotors, owned by this machine. Empty until `insert_rotors`.
    slots: Vec<Rotor>,
    plugboard: Permutation,
}

impl Machine {
    /// A machine over `alphabet` with `num_rotors` slots, of which the
    /// rightmost `pawls` rotate. Requires `0 < pawls < num_rotors`.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        catalog: Arc<RotorCatalog>,
    ) -> Result<Self, MachineError> {
        if pawls == 0 || pawls >= num_rotors {
            return Err(MachineError::InvalidPawlCount {
                rotors: num_rotors,
                pawls,
            });
        }
        if **catalog.alphabet() != *alphabet {
            return Err(MachineError::AlphabetMismatch("rotor catalog".to_string()));
        }
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Self {
            alphabet,
            num_rotors,
            pawls,
            catalog,
            slots: Vec::new(),
            plugboard,
        })
    }

    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls, and so of rotating slots.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Currently inserted rotors, reflector first. Empty before insertion.
    pub fn slots(&self) -> &[Rotor] {
        &self.slots
    }

    /// Index of the leftmost rotating slot.
    #[inline]
    fn first_moving(&self) -> usize {
        self.num_rotors - self.pawls
    }

    /// Fit the slots with the catalog rotors named in `names`, reflector
    /// first. Each rotor starts at position 0.
    ///
    /// Nothing changes unless every name resolves and the kinds line up:
    /// reflector in slot 0, fixed rotors up to the first pawl, moving rotors
    /// after it.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), MachineError> {
        if names.len() != self.num_rotors {
            return Err(MachineError::WrongRotorCount {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }

        let mut slots: Vec<Rotor> = Vec::with_capacity(self.num_rotors);
        for name in names {
            let name = name.as_ref();
            let rotor = self
                .catalog
                .get(name)
                .ok_or_else(|| MachineError::UnknownRotor(name.to_string()))?;
            if slots.iter().any(|r| r.name() == rotor.name()) {
                return Err(MachineError::RepeatedRotor(rotor.name().to_string()));
            }
            slots.push(rotor.clone());
        }

        let first_moving = self.first_moving();
        for (slot, rotor) in slots.iter().enumerate() {
            let expected = if slot == 0 {
                (rotor.reflecting(), "a reflector")
            } else if slot < first_moving {
                (!rotor.reflecting() && !rotor.rotates(), "a fixed rotor")
            } else {
                (rotor.rotates(), "a moving rotor")
            };
            if !expected.0 {
                return Err(MachineError::InvalidRotorOrder {
                    slot,
                    name: rotor.name().to_string(),
                    expected: expected.1,
                });
            }
        }

        self.slots = slots;
        Ok(())
    }

    /// Set the positions of every slot but the reflector from `setting`,
    /// one symbol per slot, left to right.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), MachineError> {
        if self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }

        let positions = setting
            .chars()
            .map(|ch| {
                self.alphabet
                    .index(ch)
                    .map_err(|_| MachineError::SymbolNotInAlphabet(ch))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if positions.len() != self.num_rotors - 1 {
            return Err(MachineError::WrongSettingLength {
                expected: self.num_rotors - 1,
                actual: positions.len(),
            });
        }

        for (rotor, position) in self.slots[1..].iter_mut().zip(positions) {
            rotor.set(position)?;
        }
        Ok(())
    }

    /// Replace the plugboard. It must be built over the machine's alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), MachineError> {
        if **plugboard.alphabet() != *self.alphabet {
            return Err(MachineError::AlphabetMismatch("plugboard".to_string()));
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Window settings of every slot but the reflector, left to right.
    pub fn positions(&self) -> String {
        self.slots.iter().skip(1).map(Rotor::setting).collect()
    }

    /// Advance the rotating slots for one keystroke.
    ///
    /// Which slots move is decided entirely from the notch state before
    /// the keystroke:
    /// - the rightmost slot always moves;
    /// - a slot moves when its right neighbour sits at a notch;
    /// - a slot sitting at its own notch moves itself as well, provided its
    ///   left neighbour rotates (that neighbour's pawl catches the notch and
    ///   pushes both). This is the double step.
    fn step(&mut self) {
        let n = self.slots.len();
        let first_moving = self.first_moving();
        let at_notch: Vec<bool> = self.slots.iter().map(Rotor::at_notch).collect();

        let mut moves = vec![false; n];
        moves[n - 1] = true;
        for slot in first_moving..n {
            if slot + 1 < n && at_notch[slot + 1] {
                moves[slot] = true;
            }
            if at_notch[slot] && slot > first_moving {
                moves[slot] = true;
                moves[slot - 1] = true;
            }
        }

        for (rotor, _) in self.slots.iter_mut().zip(moves).filter(|(_, m)| *m) {
            rotor.advance();
        }
    }

    /// Step the rotors, then encode the symbol with index `c`.
    ///
    /// `c` is taken modulo the alphabet size.
    pub fn convert(&mut self, c: usize) -> Result<usize, MachineError> {
        if self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }
        self.step();

        let mut c = self.plugboard.permute(c);
        for rotor in self.slots.iter().rev() {
            c = rotor.convert_forward(c);
        }
        for rotor in &self.slots[1..] {
            c = rotor.convert_backward(c)?;
        }
        Ok(self.plugboard.permute(c))
    }

    /// Encode `symbols` in order, stepping once per symbol.
    ///
    /// Every symbol is checked against the alphabet before the first step,
    /// so an invalid message leaves the rotors where they were.
    pub fn convert_symbols(&mut self, symbols: &[char]) -> Result<Vec<char>, MachineError> {
        let indices = symbols
            .iter()
            .map(|&ch| self.alphabet.index(ch))
            .collect::<Result<Vec<_>, _>>()?;
        if !indices.is_empty() && self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }

        let mut out = Vec::with_capacity(indices.len());
        for index in indices {
            let converted = self.convert(index)?;
            out.push(self.alphabet.symbol(converted)?);
        }
        Ok(out)
    }

    /// Encode every symbol of `message`. See [`Machine::convert_symbols`].
    pub fn convert_message(&mut self, message: &str) -> Result<String, MachineError> {
        let symbols: Vec<char> = message.chars().collect();
        Ok(self.convert_symbols(&symbols)?.into_iter().collect())
    }
}
