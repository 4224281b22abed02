//! End-to-end checks of the command-line front-ends
//!
//! The data race on unsynchronized containers is only exercised by the
//! ignored `driver::tests::racy_shared_sets_overlap` unit test. To check that
//! ThreadSanitizer flags it, run
//! `RUSTFLAGS=-Zsanitizer=thread cargo +nightly test -- --ignored`.

use contention::shared::Snapshot;
use std::process::{Command, Output};

/// fibonacci(30), with fibonacci(0) == fibonacci(1) == 1
const FIB_30: &str = "1346269";

fn run(exe: &str, args: &[&str]) -> Output {
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run benchmark executable")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Containers expected at the end of a run of the shared-set variant
fn expected_sets() -> Snapshot {
    let mut expected = Snapshot::default();
    let (mut prev, mut curr) = (1u64, 1u64);
    for n in 2..=30 {
        (prev, curr) = (curr, prev + curr);
        if n < 15 || curr % 2 == 1 {
            expected.a.insert(curr);
        } else {
            expected.b.insert(curr);
        }
    }
    expected
}

#[test]
fn serial_iterations() {
    let output = run(env!("CARGO_BIN_EXE_serial"), &["3"]);
    assert_eq!(stdout_lines(&output), [FIB_30; 3]);
}

#[test]
fn serial_no_iteration() {
    let output = run(env!("CARGO_BIN_EXE_serial"), &["0"]);
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn threaded_single_worker() {
    let output = run(env!("CARGO_BIN_EXE_threaded"), &["1"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("{FIB_30}\n"));
}

#[test]
fn threaded_no_worker() {
    for count in ["0", "-2"] {
        let output = run(env!("CARGO_BIN_EXE_threaded"), &[count]);
        assert!(stdout_lines(&output).is_empty());
    }
}

#[test]
fn threaded_detached_workers() {
    let output = run(env!("CARGO_BIN_EXE_threaded"), &["3"]);
    let lines = stdout_lines(&output);
    assert!((1..=3).contains(&lines.len()), "{lines:?}");
    assert!(lines.iter().all(|line| line == FIB_30), "{lines:?}");
}

#[test]
fn threaded_joined_workers() {
    let output = run(env!("CARGO_BIN_EXE_threaded"), &["--join", "3"]);
    assert_eq!(stdout_lines(&output), [FIB_30; 3]);
}

#[test]
fn invalid_count() {
    for exe in [
        env!("CARGO_BIN_EXE_threaded"),
        env!("CARGO_BIN_EXE_serial"),
        env!("CARGO_BIN_EXE_shared_sets"),
    ] {
        let output = run(exe, &["seven"]);
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8(output.stderr).unwrap().contains("Usage"));
    }
}

#[test]
fn shared_sets_single_worker() {
    let output = run(env!("CARGO_BIN_EXE_shared_sets"), &["--join", "1"]);
    assert_eq!(
        stdout_lines(&output),
        [FIB_30.to_owned(), expected_sets().to_string()]
    );
}

#[test]
fn shared_sets_locked() {
    let output = run(env!("CARGO_BIN_EXE_shared_sets"), &["--locked", "1"]);
    assert_eq!(
        stdout_lines(&output),
        [FIB_30.to_owned(), expected_sets().to_string()]
    );
}

#[test]
fn serial_shared_sets() {
    let output = run(env!("CARGO_BIN_EXE_serial"), &["--shared-sets", "1"]);
    assert_eq!(
        stdout_lines(&output),
        [FIB_30.to_owned(), expected_sets().to_string()]
    );
}
