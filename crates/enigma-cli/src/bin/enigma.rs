// enigma: Encrypt or decrypt messages with a configured rotor machine.
//
// Reads a machine configuration file, then processes an input stream of
// settings lines (starting with `*`) and message lines. Each message line
// is printed converted, in groups of five symbols.
//
// Usage:
//   enigma CONFIG [INPUT [OUTPUT]]
//
// INPUT defaults to stdin and OUTPUT to stdout. Set RUST_LOG=debug to see
// the machine configuration on stderr.

use std::fs;
use std::io::{self, Read, Write};

use enigma_cli::{CliError, GROUP_WIDTH};

fn main() {
    enigma_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if enigma_cli::wants_help(&args) {
        println!("enigma: Encrypt or decrypt messages with a rotor cipher machine.");
        println!();
        println!("Usage: enigma CONFIG [INPUT [OUTPUT]]");
        println!();
        println!("CONFIG names the machine configuration file. Messages are read");
        println!("from INPUT (default: stdin) and written to OUTPUT (default: stdout)");
        println!("in groups of five symbols.");
        println!();
        println!("Input lines starting with '*' choose the machine settings:");
        println!("  * REFLECTOR ROTOR... SETTING [PLUGBOARD CYCLES...]");
        println!();
        println!("Options:");
        println!("  -h, --help   Print this help");
        return;
    }

    if let Err(e) = run(&args) {
        enigma_cli::fatal(&e.to_string());
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    if args.is_empty() || args.len() > 3 {
        return Err(CliError::Usage(
            "expected 1 to 3 arguments: CONFIG [INPUT [OUTPUT]]".to_string(),
        ));
    }

    let config = read_file(&args[0])?;
    let input = match args.get(1) {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            buf
        }
    };

    let mut machine = enigma_cli::read_config(&config)?.build()?;
    let lines = enigma_cli::process(&mut machine, &input)?;
    let rendered = enigma_cli::render(&lines, GROUP_WIDTH);

    match args.get(2) {
        Some(path) => fs::write(path, rendered).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        }),
        None => {
            let stdout = io::stdout();
            let mut out = io::BufWriter::new(stdout.lock());
            out.write_all(rendered.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|source| CliError::Io {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
    }
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}
