// Settings lines: `* ROTOR... SETTING [PLUGBOARD CYCLES...]`

use enigma_core::Permutation;
use enigma_machine::{Machine, MachineError};
use tracing::debug;

use crate::CliError;

/// A parsed settings line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rotor names, reflector first.
    pub rotors: Vec<String>,
    /// Initial window symbols for every slot but the reflector.
    pub setting: String,
    /// Plugboard cycle text; empty for no plugboard.
    pub plugboard: String,
}

impl Settings {
    /// Split a settings line for a machine with `num_rotors` slots.
    ///
    /// `line` is the 1-based input line number, used in errors.
    pub fn parse(text: &str, num_rotors: usize, line: usize) -> Result<Self, CliError> {
        let settings_error = |message: String| CliError::Settings { line, message };

        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("*") => {}
            _ => return Err(settings_error("settings line must start with '*'".to_string())),
        }

        let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(String::from).collect();
        if rotors.len() < num_rotors {
            return Err(settings_error(format!(
                "expected {num_rotors} rotor names, found {}",
                rotors.len()
            )));
        }

        let setting = tokens
            .next()
            .ok_or_else(|| settings_error("missing initial rotor setting".to_string()))?
            .to_string();

        let plugboard = tokens.collect::<Vec<_>>().join(" ");

        Ok(Self {
            rotors,
            setting,
            plugboard,
        })
    }

    /// Insert the rotors, set their positions and replace the plugboard.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), MachineError> {
        machine.insert_rotors(&self.rotors)?;
        machine.set_rotors(&self.setting)?;
        let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;
        machine.set_plugboard(plugboard)?;
        debug!(
            rotors = ?self.rotors,
            setting = %self.setting,
            plugboard = %machine.plugboard(),
            "configured machine"
        );
        Ok(())
    }
}
