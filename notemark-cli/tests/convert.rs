use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("notemark-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn convert_markdown_to_blocks_via_cli() {
    let fixture = fixture_path("kitchensink.md");
    let mut cmd = cargo_bin_cmd!("notemark");
    cmd.arg("convert").arg(&fixture).arg("--to").arg("blocks");

    let output_pred = predicate::str::contains(r#""type": "heading_1""#)
        .and(predicate::str::contains(r#""type": "column_list""#))
        .and(predicate::str::contains(r#""type": "child_page""#))
        .and(predicate::str::contains("Project notes"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn convert_is_the_default_command() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.md");
    fs::write(&input_path, "# Title\n").unwrap();

    let mut cmd = cargo_bin_cmd!("notemark");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("blocks");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "heading_1""#));
}

#[test]
fn blocks_round_trip_through_files() {
    let dir = tempdir().unwrap();
    let markdown = "# Title\n\n- [x] done\n- [ ] open\n\n> quoted\n";
    let md_path = dir.path().join("doc.md");
    let json_path = dir.path().join("doc.json");
    let back_path = dir.path().join("back.md");
    fs::write(&md_path, markdown).unwrap();

    cargo_bin_cmd!("notemark")
        .arg("convert")
        .arg(md_path.as_os_str())
        .arg("--to")
        .arg("blocks")
        .arg("-o")
        .arg(json_path.as_os_str())
        .assert()
        .success();

    cargo_bin_cmd!("notemark")
        .arg("convert")
        .arg(json_path.as_os_str())
        .arg("--to")
        .arg("markdown")
        .arg("-o")
        .arg(back_path.as_os_str())
        .assert()
        .success();

    assert_eq!(fs::read_to_string(back_path).unwrap(), markdown);
}

#[test]
fn unknown_extension_requires_from() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.txt");
    fs::write(&input_path, "text").unwrap();

    cargo_bin_cmd!("notemark")
        .arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("blocks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect format"));

    cargo_bin_cmd!("notemark")
        .arg("convert")
        .arg(input_path.as_os_str())
        .arg("--from")
        .arg("markdown")
        .arg("--to")
        .arg("blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""content": "text""#));
}

#[test]
fn unknown_target_format_fails() {
    let mut cmd = cargo_bin_cmd!("notemark");
    cmd.arg("convert")
        .arg(fixture_path("kitchensink.md"))
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'html' not found"));
}

#[test]
fn invalid_block_json_is_reported() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, r#"{"foo": 1}"#).unwrap();

    cargo_bin_cmd!("notemark")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("markdown")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid document"));
}

#[test]
fn max_text_length_splits_long_paragraphs() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.md");
    fs::write(&input_path, "First sentence here. Second sentence here.\n").unwrap();

    let output = cargo_bin_cmd!("notemark")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("blocks")
        .arg("--max-text-length")
        .arg("25")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains(r#""content": "First sentence here.""#));
    assert!(stdout.contains(r#""content": "Second sentence here.""#));
}

#[test]
fn list_elements_shows_registry_order() {
    let output = cargo_bin_cmd!("notemark")
        .arg("list-elements")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let toggle = stdout.find("toggle").unwrap();
    let paragraph = stdout.find("paragraph").unwrap();
    assert!(toggle < paragraph);
    assert!(stdout.contains("multi-line"));
}

#[test]
fn list_formats() {
    cargo_bin_cmd!("notemark")
        .arg("list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown").and(predicate::str::contains("blocks")));
}
