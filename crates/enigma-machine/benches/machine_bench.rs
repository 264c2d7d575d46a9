// Criterion benchmarks for enigma-machine.
//
// Run:
//   cargo bench -p enigma-machine

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use enigma_core::{Alphabet, Permutation};
use enigma_machine::{Machine, Rotor, RotorCatalog};

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ---------------------------------------------------------------------------
// Machine setup
// ---------------------------------------------------------------------------

fn standard_machine() -> Machine {
    let alphabet = Arc::new(Alphabet::new(UPPER).expect("alphabet"));
    let perm = |c: &str| Permutation::new(c, alphabet.clone()).expect("cycles");
    let rotors = vec![
        Rotor::moving("I", perm("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q")
            .expect("rotor I"),
        Rotor::moving("II", perm("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E")
            .expect("rotor II"),
        Rotor::moving("III", perm("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V")
            .expect("rotor III"),
        Rotor::fixed("Beta", perm("(ALBEVFCYODJWUGNMQTZSKPR) (HIX)")),
        Rotor::reflector(
            "B",
            perm("(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)"),
        )
        .expect("reflector B"),
    ];
    let catalog = RotorCatalog::new(alphabet.clone(), rotors).expect("catalog");
    let mut machine = Machine::new(alphabet.clone(), 5, 3, Arc::new(catalog)).expect("machine");
    machine
        .insert_rotors(&["B", "Beta", "I", "II", "III"])
        .expect("insert");
    machine
        .set_plugboard(Permutation::new("(AQ) (EP) (HZ)", alphabet).expect("plugboard"))
        .expect("plugboard");
    machine
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Parse the cycle notation of a full 26-letter rotor.
fn bench_parse_permutation(c: &mut Criterion) {
    let alphabet = Arc::new(Alphabet::new(UPPER).expect("alphabet"));
    c.bench_function("parse_rotor_cycles", |b| {
        b.iter(|| {
            std::hint::black_box(Permutation::new(
                "(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)",
                alphabet.clone(),
            ))
        });
    });
}

/// Encode one symbol at a time, stepping the rotors on each call.
fn bench_convert_index(c: &mut Criterion) {
    let mut machine = standard_machine();
    c.bench_function("convert_index", |b| {
        b.iter(|| std::hint::black_box(machine.convert(std::hint::black_box(7))));
    });
}

/// Encode a 10,000-symbol message from a fixed setting.
fn bench_convert_message(c: &mut Criterion) {
    let mut machine = standard_machine();
    let message: String = UPPER.chars().cycle().take(10_000).collect();
    c.bench_function("convert_message_10k", |b| {
        b.iter(|| {
            machine.set_rotors("AAAA").expect("setting");
            std::hint::black_box(machine.convert_message(&message))
        });
    });
}

criterion_group!(
    benches,
    bench_parse_permutation,
    bench_convert_index,
    bench_convert_message
);
criterion_main!(benches);
