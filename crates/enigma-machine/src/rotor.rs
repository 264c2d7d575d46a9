// Rotors: a fixed wiring plus a rotational offset.

use std::sync::Arc;

use enigma_core::{Alphabet, Permutation};

use crate::MachineError;

/// The three kinds of rotor a slot can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Advances under a pawl. `notches` holds the positions at which it
    /// also pushes its left neighbour.
    Moving { notches: Vec<usize> },
    /// Never advances, though its position may be set by hand.
    Fixed,
    /// Fixed at position 0 at the turn-around end of the stack. The signal
    /// passes through it once, so it has no backward conversion.
    Reflecting,
}

/// A rotor: name, wiring and current position.
///
/// The wiring is applied relative to the position, so a rotor at position
/// `p` maps `c` to `permute(c + p) - p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    position: usize,
}

impl Rotor {
    /// A rotating rotor whose notches are the symbols of `notches`.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, MachineError> {
        let name = name.into();
        let alphabet = permutation.alphabet();

        let mut positions = Vec::new();
        for ch in notches.chars() {
            let index = alphabet.index(ch).map_err(|_| MachineError::InvalidNotch {
                name: name.clone(),
                reason: format!("'{ch}' is not in the alphabet"),
            })?;
            if !positions.contains(&index) {
                positions.push(index);
            }
        }
        if positions.is_empty() {
            return Err(MachineError::InvalidNotch {
                name,
                reason: "no notches given".to_string(),
            });
        }

        Ok(Self::with_kind(
            name,
            permutation,
            RotorKind::Moving { notches: positions },
        ))
    }

    /// A non-rotating rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name.into(), permutation, RotorKind::Fixed)
    }

    /// A reflector. Its wiring must not map any symbol to itself.
    pub fn reflector(
        name: impl Into<String>,
        permutation: Permutation,
    ) -> Result<Self, MachineError> {
        let name = name.into();
        if !permutation.derangement() {
            return Err(MachineError::NotADerangement(name));
        }
        Ok(Self::with_kind(name, permutation, RotorKind::Reflecting))
    }

    fn with_kind(name: String, permutation: Permutation, kind: RotorKind) -> Self {
        Self {
            name,
            permutation,
            kind,
            position: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Current rotational offset, in `0..size()`.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The symbol showing in the window at the current position.
    pub fn setting(&self) -> char {
        self.alphabet().symbols()[self.position]
    }

    /// True for rotors that advance under a pawl.
    pub fn rotates(&self) -> bool {
        match self.kind {
            RotorKind::Moving { .. } => true,
            RotorKind::Fixed | RotorKind::Reflecting => false,
        }
    }

    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflecting)
    }

    /// True when the current position is one of the notches.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.position),
            RotorKind::Fixed | RotorKind::Reflecting => false,
        }
    }

    /// Rotate one position forward. No-op for rotors that do not rotate.
    pub fn advance(&mut self) {
        match self.kind {
            RotorKind::Moving { .. } => self.position = (self.position + 1) % self.size(),
            RotorKind::Fixed | RotorKind::Reflecting => {}
        }
    }

    /// Set the rotational offset. `position` is taken modulo the alphabet
    /// size; a reflector only accepts positions that reduce to 0.
    pub fn set(&mut self, position: usize) -> Result<(), MachineError> {
        if self.reflecting() && position % self.size() != 0 {
            return Err(MachineError::InvalidReflectorPosition {
                name: self.name.clone(),
                position,
            });
        }
        self.position = position % self.size();
        Ok(())
    }

    /// Pass `index` through the wiring from the keyboard side. `index` is
    /// taken modulo the alphabet size.
    #[inline]
    pub fn convert_forward(&self, index: usize) -> usize {
        let n = self.size();
        let contact = self.permutation.permute(index % n + self.position);
        (contact + n - self.position) % n
    }

    /// Pass `index` through the wiring on the way back from the reflector.
    pub fn convert_backward(&self, index: usize) -> Result<usize, MachineError> {
        if self.reflecting() {
            return Err(MachineError::UnsupportedConversion(self.name.clone()));
        }
        let n = self.size();
        let contact = self.permutation.invert(index % n + self.position);
        Ok((contact + n - self.position) % n)
    }
}
