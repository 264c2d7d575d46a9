//! Symbol-level primitives for rotor cipher machines.
//!
//! Everything else in the workspace is built on two types:
//!
//! - [`alphabet::Alphabet`] -- bijection between symbols and dense indices
//! - [`permutation::Permutation`] -- a bijection over those indices, written
//!   in cycle notation such as `(ABC)(DE)`
//!
//! Both are immutable once constructed and are shared between machines
//! through `Arc`.

pub mod alphabet;
pub mod permutation;

pub use alphabet::Alphabet;
pub use permutation::Permutation;

/// Symbols with a fixed meaning in every text format; they can never be
/// members of an alphabet.
pub const RESERVED_SYMBOLS: [char; 3] = ['(', ')', '*'];

/// Error type for alphabet and permutation construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnigmaError {
    #[error("invalid alphabet: {0}")]
    Alphabet(String),
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
    #[error("index {index} is out of range for an alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("malformed cycle notation: {0}")]
    MalformedCycle(String),
}
