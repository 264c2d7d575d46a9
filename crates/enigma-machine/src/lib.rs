//! Rotor cipher machine engine.
//!
//! # Architecture
//!
//! - [`rotor`] -- Moving, fixed and reflecting rotors over a shared wiring model
//! - [`catalog`] -- Immutable name-to-rotor catalog the machine draws from
//! - [`machine`] -- Rotor slots, plugboard, stepping and the per-symbol pipeline
//!
//! The engine never performs I/O; every failure is returned as a
//! [`MachineError`].

pub mod catalog;
pub mod machine;
pub mod rotor;

pub use catalog::RotorCatalog;
pub use machine::Machine;
pub use rotor::{Rotor, RotorKind};

use enigma_core::EnigmaError;

/// Error type for rotor, catalog and machine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    #[error(transparent)]
    Symbol(#[from] EnigmaError),
    #[error("unknown rotor: {0}")]
    UnknownRotor(String),
    #[error("rotor {0} is defined more than once")]
    DuplicateRotor(String),
    #[error("rotor {0} is inserted more than once")]
    RepeatedRotor(String),
    #[error("wrong number of rotors: expected {expected}, got {actual}")]
    WrongRotorCount { expected: usize, actual: usize },
    #[error("invalid rotor order: slot {slot} ({name}) must be {expected}")]
    InvalidRotorOrder {
        slot: usize,
        name: String,
        expected: &'static str,
    },
    #[error("wrong setting length: expected {expected} symbols, got {actual}")]
    WrongSettingLength { expected: usize, actual: usize },
    #[error("setting symbol '{0}' is not in the alphabet")]
    SymbolNotInAlphabet(char),
    #[error("reflector {name} has only one position, cannot set it to {position}")]
    InvalidReflectorPosition { name: String, position: usize },
    #[error("reflector {0} has no backward conversion")]
    UnsupportedConversion(String),
    #[error("invalid pawl count: need 0 < pawls ({pawls}) < rotors ({rotors})")]
    InvalidPawlCount { rotors: usize, pawls: usize },
    #[error("moving rotor {name} has an invalid notch: {reason}")]
    InvalidNotch { name: String, reason: String },
    #[error("reflector {0} maps a symbol to itself")]
    NotADerangement(String),
    #[error("{0} is built over a different alphabet")]
    AlphabetMismatch(String),
    #[error("no rotors have been inserted")]
    RotorsNotInserted,
}
