//! Integration tests for the reckon CLI: global flags, exit codes, and the
//! model-listing commands

mod support;

use predicates::prelude::*;
use support::{ratings_fixture, reckon, stdout_json, write_file};
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    reckon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: reckon"))
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("neighbors"))
        .stdout(predicate::str::contains("profile"));
}

#[test]
fn test_version_flag() {
    reckon()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reckon"));
}

#[test]
fn test_no_command_prints_banner() {
    reckon()
        .assert()
        .success()
        .stdout(predicate::str::contains("reckon --help"));
}

// ============================================================================
// Exit codes and error envelopes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    reckon()
        .args(["--format", "records", "means"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_rating_source_is_usage_error() {
    reckon()
        .arg("means")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--ratings"));
}

#[test]
fn test_db_and_ratings_are_exclusive() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    reckon()
        .arg("--db")
        .arg(dir.path().join("r.db"))
        .arg("--ratings")
        .arg(&ratings)
        .arg("means")
        .assert()
        .code(2);
}

#[test]
fn test_usage_error_json_envelope() {
    let output = reckon()
        .args(["--format", "json", "predict", "--bogus"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let err = stdout_json(&output.stderr);
    assert_eq!(err["error"]["code"], 2);
    assert_eq!(err["error"]["type"], "usage_error");
}

#[test]
fn test_malformed_csv_is_data_error() {
    let dir = tempdir().unwrap();
    let ratings = write_file(dir.path(), "bad.csv", "1,1,5.0\n2,x,3.0\n");

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("means")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_empty_dataset_cannot_train() {
    let dir = tempdir().unwrap();
    let ratings = write_file(dir.path(), "empty.csv", "user,item,rating\n");

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("means")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no ratings"));
}

// ============================================================================
// means
// ============================================================================

#[test]
fn test_means_lists_items_best_first() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    let output = reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("means")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(rows, vec!["1\t4.0000", "2\t3.3333", "3\t2.0000"]);
}

#[test]
fn test_means_top_and_json() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    let output = reckon()
        .arg("--ratings")
        .arg(&ratings)
        .args(["--format", "json", "means", "--top", "1"])
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output.stdout);
    assert_eq!(json["damping"], 0.0);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item"], 1);
    assert!((items[0]["mean"].as_f64().unwrap() - 4.0).abs() < 1e-9);
    assert!((json["global_mean"].as_f64().unwrap() - 22.0 / 7.0).abs() < 1e-9);
}

#[test]
fn test_config_damping_shrinks_means() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());
    let config = write_file(dir.path(), "reckon.toml", "damping = 2.0\n");

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("--config")
        .arg(&config)
        .arg("means")
        .assert()
        .success()
        .stdout(predicate::str::contains("1\t3.5714"))
        .stdout(predicate::str::contains("2\t3.2571"));
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());
    let config = write_file(dir.path(), "reckon.toml", "damping = -1.0\n");

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("--config")
        .arg(&config)
        .arg("means")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid damping"));
}

#[test]
fn test_user_neighbor_floor_below_two_is_usage_error() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());
    let config = write_file(dir.path(), "reckon.toml", "[user_user]\nmin_neighbors = 1\n");

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .arg("--config")
        .arg(&config)
        .args(["predict", "--user", "1", "--items", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid user_user.min_neighbors: 1"));
}

// ============================================================================
// neighbors
// ============================================================================

#[test]
fn test_neighbors_lists_positive_similarities() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .args(["neighbors", "--item", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2\t0.8660"))
        .stdout(predicate::str::contains("3\t").not());
}

#[test]
fn test_neighbors_of_isolated_item() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .args(["neighbors", "--item", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar items for 3"));
}

#[test]
fn test_neighbors_unknown_item_exit_code_3() {
    let dir = tempdir().unwrap();
    let ratings = ratings_fixture(dir.path());

    reckon()
        .arg("--ratings")
        .arg(&ratings)
        .args(["--format", "json", "neighbors", "--item", "99"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown_item"));
}
