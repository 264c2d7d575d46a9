// Message processing over a stream of input lines.
//
// A line starting with `*` reconfigures the machine. Every other non-blank
// line is a message: its whitespace is dropped and the remaining symbols are
// converted. Blank lines are passed through as blank output lines.

use enigma_core::{Alphabet, EnigmaError};
use enigma_machine::Machine;
use tracing::info;

use crate::{CliError, Settings};

/// Convert every message line of `input`, returning one output line per
/// message or blank line. Settings lines produce no output.
pub fn process(machine: &mut Machine, input: &str) -> Result<Vec<String>, CliError> {
    let mut out = Vec::new();
    let mut configured = false;
    let mut converted = 0usize;

    for (i, text) in input.lines().enumerate() {
        let line = i + 1;
        let trimmed = text.trim();

        if trimmed.starts_with('*') {
            let settings = Settings::parse(trimmed, machine.num_rotors(), line)?;
            settings
                .apply(machine)
                .map_err(|source| CliError::Input { line, source })?;
            configured = true;
        } else if trimmed.is_empty() {
            out.push(String::new());
        } else if !configured {
            return Err(CliError::MissingSettings { line });
        } else {
            let symbols = normalize(trimmed, machine.alphabet())
                .map_err(|e| CliError::Input { line, source: e.into() })?;
            let result = machine
                .convert_symbols(&symbols)
                .map_err(|source| CliError::Input { line, source })?;
            converted += result.len();
            out.push(result.into_iter().collect());
        }
    }

    info!(lines = out.len(), symbols = converted, "processed input");
    Ok(out)
}

/// Drop whitespace and map each character onto the alphabet, falling back
/// to its ASCII uppercase form when only that is a member.
fn normalize(text: &str, alphabet: &Alphabet) -> Result<Vec<char>, EnigmaError> {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            if alphabet.contains(ch) {
                Ok(ch)
            } else if alphabet.contains(ch.to_ascii_uppercase()) {
                Ok(ch.to_ascii_uppercase())
            } else {
                Err(EnigmaError::UnknownSymbol(ch))
            }
        })
        .collect()
}
