//! CLI integration tests.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_convert_missing_source_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.current_dir(dir.path()).arg("convert").arg("--src").arg("nope");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("source not found"));
}

#[test]
fn test_audit_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.current_dir(dir.path()).arg("audit");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("source not found: data"));
}

#[test]
fn test_audit_reports_histogram_and_truncates() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    for i in 0..23 {
        common::write_tone(&data.join(format!("{i:02}.wav")), 44100, 10);
    }
    common::write_tone(&data.join("ok.wav"), 22050, 10);

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.current_dir(dir.path()).arg("audit");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total audio files: 24"))
        .stdout(predicate::str::contains("SR 44100: 23\nSR 22050: 1"))
        .stdout(predicate::str::contains("... and 3 more files"));
}

#[test]
fn test_audit_json() {
    let dir = TempDir::new().unwrap();
    common::write_tone(&dir.path().join("a.wav"), 16000, 10);

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.arg("audit").arg(dir.path()).arg("--json").arg("--sr").arg("16000");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total_files\": 1"))
        .stdout(predicate::str::contains("\"target_rate\": 16000"));
}

#[test]
fn test_convert_writes_mirrored_tree() {
    let dir = TempDir::new().unwrap();
    common::write_tone(&dir.path().join("data/spk/a.wav"), 44100, 441);

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.current_dir(dir.path()).arg("convert").arg("--no-progress");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("converted: 1, unchanged: 0"));

    let reader = hound::WavReader::open(dir.path().join("data_22050/spk/a.wav")).unwrap();
    assert_eq!(reader.spec().sample_rate, 22050);
}

#[test]
fn test_prepare_writes_three_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("metadata.csv");
    fs::write(
        &input,
        "file_id,text\n0001.wav,Первая фраза\n0002.wav,Вторая фраза\n0003.wav,ok\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.arg("prepare")
        .arg("--input")
        .arg(&input)
        .arg("--seed")
        .arg("5");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Records after filtering: 2 (1 dropped)"))
        .stdout(predicate::str::contains("Train: 0, validation: 2"));

    let combined = fs::read_to_string(dir.path().join("ruslan_meta.txt")).unwrap();
    assert_eq!(combined.lines().count(), 2);
    assert!(combined.contains("0001|Первая фраза"));
    assert!(dir.path().join("metadata_train.txt").exists());
    assert!(dir.path().join("metadata_val.txt").exists());
}

#[test]
fn test_prepare_empty_transcript_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.arg("prepare").arg("--input").arg(&input);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("transcript file is empty"));
}

#[test]
fn test_reconcile_reports_counts() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    common::write_tone(&root.join("RUSLAN/a.wav"), 22050, 10);
    common::write_tone(&root.join("b.wav"), 22050, 10);
    fs::write(root.join("metadata_train.txt"), "a|first\nb|second\n").unwrap();
    fs::write(root.join("metadata_val.txt"), "c|third\n").unwrap();

    let mut cmd = cargo_bin_cmd!("corpusprep");
    cmd.arg("reconcile").arg("--root").arg(root);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("checked=2 repaired=1 unresolved=0"))
        .stdout(predicate::str::contains("checked=1 repaired=0 unresolved=1"));
}
