//! Integration tests for the chunkwise CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn chunkwise() -> Command {
    Command::cargo_bin("chunkwise").unwrap()
}

fn chunk_json(extra: &[&str]) -> serde_json::Value {
    let output = chunkwise()
        .args(["chunk", "-q", "-f", "json", "-i"])
        .arg(fixture_path("two-topics.json"))
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_chunk_two_topic_talk() {
    chunkwise()
        .args(["chunk", "-q", "-i"])
        .arg(fixture_path("two-topics.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 chunks, tiling)"))
        .stdout(predicate::str::contains(
            "[00:00 – 02:30] Rust ownership rules keep memory safe",
        ));
}

#[test]
fn test_monotonic_flag_anchors_second_chunk() {
    chunkwise()
        .args(["chunk", "-q", "--monotonic", "-i"])
        .arg(fixture_path("two-topics.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[02:21 – 06:00]"));
}

#[test]
fn test_json_output() {
    let value = chunk_json(&[]);
    let record = &value[0];

    assert_eq!(record["video_id"], "talk");
    assert_eq!(record["segmentation"]["method"], "tiling");
    assert_eq!(record["verification"]["passed"], true);

    let chunks = record["chunks"].as_array().unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0]["has_overlap"], false);
    assert_eq!(chunks[1]["has_overlap"], true);
    assert_eq!(chunks[1]["word_count"], 725);
    assert_eq!(chunks[1]["video_title"], "Rust and tomatoes");
}

#[test]
fn test_overlap_flags() {
    let value = chunk_json(&["--no-overlap"]);
    assert_eq!(value[0]["chunks"][1]["has_overlap"], false);
    assert_eq!(value[0]["chunks"][1]["word_count"], 700);

    let value = chunk_json(&["--overlap-words", "10"]);
    assert_eq!(value[0]["chunks"][1]["word_count"], 710);
}

#[test]
fn test_markdown_output() {
    chunkwise()
        .args(["chunk", "-q", "-f", "markdown", "-i"])
        .arg(fixture_path("two-topics.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("## Rust and tomatoes"))
        .stdout(predicate::str::contains("### Chunk 1 (00:00 – 02:30)"))
        .stdout(predicate::str::contains("*Total chunks: 2 across 1 transcripts*"));
}

#[test]
fn test_glob_pattern_covers_every_fixture() {
    chunkwise()
        .args(["chunk", "-q", "-i"])
        .arg(fixture_path("*.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("segments-only.json (1 chunks, fallback)"))
        .stdout(predicate::str::contains(
            "[00:10 – 00:15] Welcome back to the workshop. Today we sharpen chisels.",
        ))
        .stdout(predicate::str::contains("short-talk.json (1 chunks, fallback)"))
        .stdout(predicate::str::contains("two-topics.json (2 chunks, tiling)"));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("chunks.json");

    chunkwise()
        .args(["chunk", "-q", "-f", "json", "-i"])
        .arg(fixture_path("short-talk.json"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(value[0]["chunks"][0]["end_time"], 7.5);
}

#[test]
fn test_no_matching_files() {
    chunkwise()
        .args(["chunk", "-q", "-i", "tests/fixtures/*.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No files found matching the provided patterns",
        ));
}

#[test]
fn test_chunk_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[timestamps]\ntolerance = 0\n").unwrap();

    chunkwise()
        .args(["chunk", "-q", "-i"])
        .arg(fixture_path("short-talk.json"))
        .arg("-c")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_verify_prints_report() {
    chunkwise()
        .args(["verify", "-i"])
        .arg(fixture_path("two-topics.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"))
        .stdout(predicate::str::contains("\"no_data_loss\": true"))
        .stdout(predicate::str::contains("\"original_words\": 1200.0"));
}

#[test]
fn test_verify_strict_fails_small_chunks() {
    chunkwise()
        .args(["verify", "--strict", "-i"])
        .arg(fixture_path("short-talk.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"reasonable_sizes\": false"))
        .stderr(predicate::str::contains("Verification failed: reasonable_sizes"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("chunkwise.toml");

    chunkwise()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    chunkwise()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Configuration is valid!"))
        .stdout(predicate::str::contains("Length tiers: 3"));
}

#[test]
fn test_generate_config_to_stdout() {
    chunkwise()
        .arg("generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[overlap]"))
        .stdout(predicate::str::contains("overlap_words = 25"));
}

#[test]
fn test_validate_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[fallback]\nmin_words = 400\nmax_words = 300\n").unwrap();

    chunkwise()
        .arg("validate")
        .arg("-c")
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Configuration is invalid!"));
}

#[test]
fn test_format_range() {
    chunkwise()
        .args(["format-range", "75", "185"])
        .assert()
        .success()
        .stdout("01:15 – 03:05\n");
}

#[test]
fn test_help_lists_commands() {
    chunkwise()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chunk"))
        .stdout(predicate::str::contains("generate-config"))
        .stdout(predicate::str::contains("format-range"));
}
