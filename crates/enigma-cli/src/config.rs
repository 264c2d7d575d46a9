// Machine configuration file.
//
// The file is a sequence of whitespace-separated tokens:
//
//   ALPHABET
//   NUM_ROTORS PAWLS
//   NAME TYPE CYCLES...     (repeated, one rotor each)
//
// TYPE is `M` followed by the notch symbols for a moving rotor, `N` for a
// fixed rotor, or `R` for a reflector. CYCLES are the tokens that start with
// `(`; together they give the rotor's wiring in cycle notation.

use std::sync::Arc;

use enigma_core::{Alphabet, Permutation};
use enigma_machine::{Machine, Rotor, RotorCatalog};
use tracing::debug;

use crate::CliError;

/// Everything a configuration file describes.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub alphabet: Arc<Alphabet>,
    pub num_rotors: usize,
    pub pawls: usize,
    pub catalog: Arc<RotorCatalog>,
}

impl MachineConfig {
    /// Build a machine with no rotors inserted yet.
    pub fn build(&self) -> Result<Machine, CliError> {
        Ok(Machine::new(
            self.alphabet.clone(),
            self.num_rotors,
            self.pawls,
            self.catalog.clone(),
        )?)
    }
}

/// A token and the (1-based) line it was read from.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.lines()
        .enumerate()
        .flat_map(|(i, line)| {
            line.split_whitespace()
                .map(move |text| Token { text, line: i + 1 })
        })
        .collect()
}

/// Parse a configuration file.
pub fn read_config(text: &str) -> Result<MachineConfig, CliError> {
    let tokens = tokenize(text);
    let mut tokens = tokens.into_iter().peekable();

    let alpha_token = tokens.next().ok_or(CliError::Truncated("an alphabet"))?;
    let alphabet = Alphabet::new(alpha_token.text).map_err(|e| CliError::Config {
        line: alpha_token.line,
        message: e.to_string(),
    })?;
    let alphabet = Arc::new(alphabet);

    let num_rotors = read_count(tokens.next(), "the number of rotor slots")?;
    let pawls = read_count(tokens.next(), "the number of pawls")?;

    let mut rotors: Vec<Rotor> = Vec::new();
    while let Some(name) = tokens.next() {
        let kind = tokens.next().ok_or(CliError::Truncated("a rotor type"))?;

        let mut cycles = String::new();
        while let Some(tok) = tokens.next_if(|t| t.text.starts_with('(')) {
            cycles.push_str(tok.text);
        }

        rotors.push(read_rotor(name, kind, &cycles, &alphabet)?);
    }

    let catalog = RotorCatalog::new(alphabet.clone(), rotors)?;
    debug!(
        alphabet = %alphabet,
        num_rotors,
        pawls,
        rotors = catalog.len(),
        "read machine configuration"
    );

    Ok(MachineConfig {
        alphabet,
        num_rotors,
        pawls,
        catalog: Arc::new(catalog),
    })
}

fn read_count(token: Option<Token<'_>>, what: &'static str) -> Result<usize, CliError> {
    let token = token.ok_or(CliError::Truncated(what))?;
    token.text.parse().map_err(|_| CliError::Config {
        line: token.line,
        message: format!("expected {what}, found \"{}\"", token.text),
    })
}

/// Build one rotor from its name token, type token and joined cycle text.
fn read_rotor(
    name: Token<'_>,
    kind: Token<'_>,
    cycles: &str,
    alphabet: &Arc<Alphabet>,
) -> Result<Rotor, CliError> {
    let config_error = |message: String| CliError::Config {
        line: name.line,
        message,
    };

    if name.text.contains(['(', ')']) {
        return Err(config_error(format!("invalid rotor name \"{}\"", name.text)));
    }
    if !cycles.is_empty() && !cycles.ends_with(')') {
        return Err(config_error(format!(
            "rotor {}: cycles must end with ')'",
            name.text
        )));
    }

    let permutation = Permutation::new(cycles, alphabet.clone())
        .map_err(|e| config_error(format!("rotor {}: {e}", name.text)))?;

    let mut chars = kind.text.chars();
    let rotor = match (chars.next(), chars.as_str()) {
        (Some('M'), notches) => Rotor::moving(name.text, permutation, notches),
        (Some('N'), "") => Ok(Rotor::fixed(name.text, permutation)),
        (Some('R'), "") => Rotor::reflector(name.text, permutation),
        _ => {
            return Err(CliError::Config {
                line: kind.line,
                message: format!(
                    "rotor {}: invalid rotor type \"{}\"",
                    name.text, kind.text
                ),
            });
        }
    };
    rotor.map_err(|e| config_error(e.to_string()))
}
