//! End-to-end tests for the huffpack binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn huffpack(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_huffpack"))
        .args(args)
        .output()
        .expect("failed to run huffpack")
}

#[test]
fn test_compress_then_decompress() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.huf");
    let restored = dir.path().join("restored.txt");
    let data = b"she sells sea shells by the sea shore".repeat(20);
    fs::write(&input, &data).unwrap();

    let out = huffpack(&[Path::new("compress"), &input, &packed]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with(&format!("Compressed {} bytes -> ", data.len())));

    let out = huffpack(&[Path::new("decompress"), &packed, &restored]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn test_empty_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty");
    let packed = dir.path().join("empty.huf");
    fs::write(&input, b"").unwrap();

    let out = huffpack(&[Path::new("compress"), &input, &packed]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
    assert!(!packed.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = huffpack(&[
        Path::new("compress"),
        &dir.path().join("nope"),
        &dir.path().join("out"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_corrupt_container_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bogus.huf");
    let output = dir.path().join("bogus.txt");
    fs::write(&input, b"HUFZ\x01 not really").unwrap();

    let out = huffpack(&[Path::new("decompress"), &input, &output]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_bad_invocation_prints_usage() {
    let out = huffpack(&[]);
    assert_eq!(out.status.code(), Some(1));

    let out = huffpack(&[Path::new("squash"), Path::new("a"), Path::new("b")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("USAGE"));

    let out = huffpack(&[Path::new("--help")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("USAGE"));

    let out = huffpack(&[Path::new("--version")]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_decompress_file_from_original_tool() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let restored = dir.path().join("letters.txt");

    let out = huffpack(&[
        Path::new("--legacy"),
        Path::new("decompress"),
        &fixtures.join("letters.txt.legacy"),
        &restored,
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read(&restored).unwrap(),
        fs::read(fixtures.join("letters.txt")).unwrap()
    );
}

#[test]
fn test_legacy_flag_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let packed = dir.path().join("in.huf");
    let restored = dir.path().join("out");
    fs::write(&input, b"aaab").unwrap();

    let out = huffpack(&[Path::new("--legacy"), Path::new("compress"), &input, &packed]);
    assert!(out.status.success());
    let bytes = fs::read(&packed).unwrap();
    assert_eq!(&bytes[..8], &4u64.to_le_bytes());

    // Without the flag the container is rejected as foreign.
    let out = huffpack(&[Path::new("decompress"), &packed, &restored]);
    assert_eq!(out.status.code(), Some(1));

    let out = huffpack(&[Path::new("decompress"), &packed, &restored, Path::new("--legacy")]);
    assert!(out.status.success());
    assert_eq!(fs::read(&restored).unwrap(), b"aaab");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("huffpack.json");
    let input = dir.path().join("in");
    fs::write(&config, r#"{ "max_input_size": 3 }"#).unwrap();
    fs::write(&input, b"four").unwrap();

    let out = huffpack(&[
        Path::new("--config"),
        &config,
        Path::new("compress"),
        &input,
        &dir.path().join("out"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("limit"));
}
